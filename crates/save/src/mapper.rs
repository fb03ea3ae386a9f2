//! Conversion between the live build state and a `SaveRecord`.
//!
//! Export walks every level in cell order and writes each distinct occupant
//! once, with its position relative to the level origin. Levels without
//! occupants are left out. Import replays the record through the normal
//! placement path, so a saved object that no longer fits is rejected exactly
//! as an interactive placement would be. Import is not transactional: objects
//! placed before a failure stay placed.

use bevy::prelude::*;

use placement::construction_error::ConstructionError;
use placement::grid::LevelStack;
use placement::prototypes::{PrototypeLibrary, SnapCategory};
use placement::registry::ObjectRegistry;
use placement::site::{self, PlaceOutcome};
use placement::visuals::VisualSpawner;

use crate::save_types::*;

/// What happened while replaying a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub placed: usize,
    /// Objects whose footprint no longer fits.
    pub rejected: usize,
    /// Names with no prototype in the library, in encounter order.
    pub missing_prototypes: Vec<String>,
    /// Level payloads whose index has no level in the current stack.
    pub skipped_levels: Vec<u32>,
    pub failed: Vec<ConstructionError>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.rejected == 0
            && self.missing_prototypes.is_empty()
            && self.skipped_levels.is_empty()
            && self.failed.is_empty()
    }
}

// =============================================================================
// Export
// =============================================================================

pub fn export(levels: &LevelStack, registry: &ObjectRegistry) -> SaveRecord {
    let mut record = SaveRecord::default();

    for level in levels.iter() {
        let origin = level.origin();
        let objects: Vec<SaveGridObject> = level
            .occupants()
            .into_iter()
            .filter_map(|id| registry.get(id))
            .map(|object| SaveGridObject {
                name: object.prototype.name.clone(),
                position: SaveGridPosition {
                    x: object.position.x - origin.x,
                    z: object.position.z - origin.z,
                },
                y_rotation: object.y_rotation,
            })
            .collect();
        if objects.is_empty() {
            continue;
        }
        record.levels.push(SaveLevel {
            index: level.index() as u32,
            objects,
        });
    }

    record.free_objects = registry
        .free_objects()
        .iter()
        .filter_map(|id| registry.get(*id))
        .map(|object| SaveFreeObject {
            name: object.prototype.name.clone(),
            position: SavePosition {
                x: object.position.x,
                y: object.position.y,
                z: object.position.z,
            },
            y_rotation: object.y_rotation,
        })
        .collect();

    record
}

// =============================================================================
// Import
// =============================================================================

/// Replay `record` onto the current levels. Each level payload goes to the
/// level its stored index names, wherever it sits in the list, so sparse
/// records load onto the right story. Existing objects are left alone;
/// callers wanting a clean load reset the site first.
pub fn import(
    record: &SaveRecord,
    library: &PrototypeLibrary,
    levels: &mut LevelStack,
    registry: &mut ObjectRegistry,
    visuals: &mut impl VisualSpawner,
) -> ImportReport {
    let mut report = ImportReport::default();

    for saved_level in &record.levels {
        let index = saved_level.index as usize;
        let Some(origin) = levels.get(index).map(|level| level.origin()) else {
            warn!(
                "Import: level {} is not in the current stack of {}, skipping {} objects",
                saved_level.index,
                levels.len(),
                saved_level.objects.len()
            );
            report.skipped_levels.push(saved_level.index);
            continue;
        };

        for saved in &saved_level.objects {
            let Some(prototype) = library.get_by_name(&saved.name) else {
                warn!("Import: no prototype named '{}'", saved.name);
                report.missing_prototypes.push(saved.name.clone());
                continue;
            };
            let position = origin + Vec3::new(saved.position.x, 0.0, saved.position.z);
            match site::try_place(
                levels,
                registry,
                index,
                prototype,
                saved.y_rotation,
                position,
                visuals,
            ) {
                Ok(PlaceOutcome::Placed(_)) => report.placed += 1,
                Ok(PlaceOutcome::Rejected(rejection)) => {
                    debug!(
                        "Import: '{}' on level {index} rejected: {rejection}",
                        saved.name
                    );
                    report.rejected += 1;
                }
                Err(err) => {
                    warn!("Import: '{}' could not be built: {err}", saved.name);
                    report.failed.push(err);
                }
            }
        }
    }

    let free_layer = levels.active().layer_for(SnapCategory::Free);
    for saved in &record.free_objects {
        let Some(prototype) = library.get_by_name(&saved.name) else {
            warn!("Import: no prototype named '{}'", saved.name);
            report.missing_prototypes.push(saved.name.clone());
            continue;
        };
        if prototype.snap.is_grid_bound() {
            debug!(
                "Import: '{}' is grid-bound and cannot be placed freely",
                saved.name
            );
            report.rejected += 1;
            continue;
        }
        let position = Vec3::new(saved.position.x, saved.position.y, saved.position.z);
        match site::place_free(
            registry,
            prototype,
            position,
            saved.y_rotation,
            free_layer,
            visuals,
        ) {
            Ok(_) => report.placed += 1,
            Err(err) => {
                warn!("Import: '{}' could not be built: {err}", saved.name);
                report.failed.push(err);
            }
        }
    }

    report
}
