use bevy::prelude::*;

use crate::config::BuildConfig;

use super::level::GridLevel;

/// All grid levels, index = story number. Exactly one level is active.
#[derive(Resource, Debug, Clone)]
pub struct LevelStack {
    levels: Vec<GridLevel>,
    active: usize,
}

impl LevelStack {
    /// Build `config.levels` empty levels (at least one) with level 0 active.
    pub fn new(config: &BuildConfig) -> Self {
        let count = config.levels.max(1);
        if config.levels == 0 {
            warn!("BuildConfig.levels is 0, creating a single level instead");
        }
        let mut levels: Vec<GridLevel> = (0..count).map(|i| GridLevel::new(i, config)).collect();
        levels[0].set_active(true);
        Self { levels, active: 0 }
    }

    /// Wrap pre-built levels with level 0 active. `None` if `levels` is empty.
    pub fn from_levels(mut levels: Vec<GridLevel>) -> Option<Self> {
        if levels.is_empty() {
            return None;
        }
        for (i, level) in levels.iter_mut().enumerate() {
            level.set_active(i == 0);
        }
        Some(Self { levels, active: 0 })
    }

    #[inline]
    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &GridLevel {
        &self.levels[self.active]
    }

    pub fn active_mut(&mut self) -> &mut GridLevel {
        &mut self.levels[self.active]
    }

    pub fn get(&self, index: usize) -> Option<&GridLevel> {
        self.levels.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut GridLevel> {
        self.levels.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false; a stack is never built empty.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridLevel> {
        self.levels.iter()
    }

    /// Step the active level by `direction` (usually +1 or -1), wrapping at
    /// both ends. Returns the new active index.
    pub fn activate_next(&mut self, direction: i32) -> usize {
        let count = self.levels.len() as i32;
        let next = (self.active as i32 + direction).rem_euclid(count) as usize;
        self.set_active_index(next);
        next
    }

    /// Make `index` the active level. Out-of-range indices are ignored.
    pub fn set_active_index(&mut self, index: usize) -> bool {
        if index >= self.levels.len() {
            return false;
        }
        self.levels[self.active].set_active(false);
        self.active = index;
        self.levels[index].set_active(true);
        true
    }
}

impl Default for LevelStack {
    fn default() -> Self {
        Self::new(&BuildConfig::default())
    }
}
