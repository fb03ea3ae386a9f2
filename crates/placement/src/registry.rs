//! Registry of placed objects.
//!
//! Objects live in a slot arena addressed by generational `ObjectId`s. Grid
//! cells hold ids, never the objects themselves, so removing an object only
//! needs its own `cells` list to unlink it, and any id still floating around
//! afterwards simply stops resolving.

use bevy::prelude::*;

use crate::footprint::{collider_offset, rotated_half_extents};
use crate::picking::ray_aabb;
use crate::prototypes::BuildablePrototype;

// =============================================================================
// Handles
// =============================================================================

/// Generational handle to a `PlacedObject`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    index: u32,
    generation: u32,
}

impl ObjectId {
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

/// A cell of a specific level: `(level index, flat cell index)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub level: usize,
    pub index: usize,
}

// =============================================================================
// PlacedObject
// =============================================================================

#[derive(Debug, Clone)]
pub struct PlacedObject {
    pub prototype: BuildablePrototype,
    pub position: Vec3,
    pub y_rotation: f32,
    /// Level the object is bound to. `None` for free objects.
    pub level: Option<usize>,
    /// Collision layer of the object's collider.
    pub layer: u32,
    /// World-space size of the collider before rotation.
    pub collider_size: Vec3,
    pub visual: Entity,
    pub demolition_preview: bool,
    pub cells: Vec<CellRef>,
}

impl PlacedObject {
    pub fn new(
        prototype: BuildablePrototype,
        position: Vec3,
        y_rotation: f32,
        level: Option<usize>,
        layer: u32,
        collider_size: Vec3,
        visual: Entity,
    ) -> Self {
        Self {
            prototype,
            position,
            y_rotation,
            level,
            layer,
            collider_size,
            visual,
            demolition_preview: false,
            cells: Vec::new(),
        }
    }

    /// Append a cell this object occupies. Callers must not add the same cell
    /// twice.
    #[inline]
    pub fn add_cell(&mut self, cell: CellRef) {
        self.cells.push(cell);
    }

    pub fn is_free(&self) -> bool {
        self.level.is_none()
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position)
            .with_rotation(Quat::from_rotation_y(self.y_rotation.to_radians()))
    }

    /// World-space centre of the collider box.
    pub fn collider_center(&self) -> Vec3 {
        self.position + collider_offset(&self.prototype)
    }

    /// World-space axis-aligned bounds of the collider.
    pub fn collider_aabb(&self) -> (Vec3, Vec3) {
        let center = self.collider_center();
        let half = rotated_half_extents(self.collider_size, self.y_rotation);
        (center - half, center + half)
    }
}

// =============================================================================
// ObjectRegistry
// =============================================================================

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    object: Option<PlacedObject>,
}

/// Every placed object in the world, grid-bound and free.
#[derive(Resource, Debug, Default)]
pub struct ObjectRegistry {
    slots: Vec<Slot>,
    vacant: Vec<u32>,
    /// Free objects in placement order.
    free_objects: Vec<ObjectId>,
    len: usize,
}

impl ObjectRegistry {
    pub fn insert(&mut self, object: PlacedObject) -> ObjectId {
        let is_free = object.is_free();
        let id = if let Some(index) = self.vacant.pop() {
            let slot = &mut self.slots[index as usize];
            slot.object = Some(object);
            ObjectId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                object: Some(object),
            });
            ObjectId {
                index,
                generation: 0,
            }
        };
        if is_free {
            self.free_objects.push(id);
        }
        self.len += 1;
        id
    }

    /// Take the object out and invalidate its id. Stale ids return `None`.
    pub fn remove(&mut self, id: ObjectId) -> Option<PlacedObject> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let object = slot.object.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.vacant.push(id.index);
        self.len -= 1;
        if object.is_free() {
            self.free_objects.retain(|free| *free != id);
        }
        Some(object)
    }

    pub fn get(&self, id: ObjectId) -> Option<&PlacedObject> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.object.as_ref()
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut PlacedObject> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.object.as_mut()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn free_objects(&self) -> &[ObjectId] {
        &self.free_objects
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &PlacedObject)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.object.as_ref().map(|object| {
                (
                    ObjectId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    object,
                )
            })
        })
    }

    pub fn ids(&self) -> Vec<ObjectId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Flip the demolition-preview flag. Returns the visual entity when the
    /// flag actually changed so the caller can update the presentation.
    pub fn set_demolition_preview(&mut self, id: ObjectId, enabled: bool) -> Option<Entity> {
        let object = self.get_mut(id)?;
        if object.demolition_preview == enabled {
            return None;
        }
        object.demolition_preview = enabled;
        Some(object.visual)
    }

    /// Nearest object whose collider layer is in `mask` and whose box the ray
    /// hits.
    pub fn pick(&self, ray: Ray3d, mask: u32) -> Option<ObjectId> {
        let mut best: Option<(f32, ObjectId)> = None;
        for (id, object) in self.iter() {
            if object.layer & mask == 0 {
                continue;
            }
            let (min, max) = object.collider_aabb();
            let Some(t) = ray_aabb(ray, min, max) else {
                continue;
            };
            match best {
                Some((best_t, _)) if best_t <= t => {}
                _ => best = Some((t, id)),
            }
        }
        best.map(|(_, id)| id)
    }
}
