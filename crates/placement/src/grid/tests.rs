use bevy::prelude::*;

use super::*;
use crate::config::BuildConfig;
use crate::prototypes::{BuildablePrototype, SnapCategory};
use crate::registry::ObjectRegistry;

fn config(x: usize, z: usize, levels: usize) -> BuildConfig {
    BuildConfig {
        x_size: x,
        z_size: z,
        levels,
        ..BuildConfig::default()
    }
}

/// Ids come from a real registry so they carry valid generations.
fn ids(n: usize) -> Vec<crate::registry::ObjectId> {
    let mut reg = ObjectRegistry::default();
    (0..n)
        .map(|_| {
            reg.insert(crate::registry::PlacedObject::new(
                BuildablePrototype::ground("x", 1, 1),
                Vec3::ZERO,
                0.0,
                Some(0),
                0,
                Vec3::ONE,
                Entity::PLACEHOLDER,
            ))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// GridCell
// ---------------------------------------------------------------------------

#[test]
fn test_cell_slots_respect_category() {
    let id = ids(1)[0];
    let mut cell = GridCell::default();

    cell.set_ground(id, SnapCategory::Wall);
    assert!(!cell.has_ground());
    cell.set_wall(id, SnapCategory::Ground, Side::MinusZ);
    assert!(!cell.has_wall(Side::MinusZ));
    assert!(cell.is_empty());

    cell.set_ground(id, SnapCategory::Ground);
    cell.set_wall(id, SnapCategory::Wall, Side::X);
    assert_eq!(cell.ground(), Some(id));
    assert_eq!(cell.wall(Side::X), Some(id));
    assert!(!cell.has_wall(Side::Z));
}

#[test]
fn test_cell_clear_wall_object_scans_all_sides() {
    let v = ids(2);
    let (a, b) = (v[0], v[1]);
    let mut cell = GridCell::default();
    cell.set_wall(a, SnapCategory::Wall, Side::MinusZ);
    cell.set_wall(a, SnapCategory::Wall, Side::X);
    cell.set_wall(b, SnapCategory::Wall, Side::MinusX);

    cell.clear_wall_object(a);
    assert!(!cell.has_wall(Side::MinusZ));
    assert!(!cell.has_wall(Side::X));
    assert_eq!(cell.wall(Side::MinusX), Some(b));

    cell.clear_wall(Side::MinusX);
    assert!(cell.is_empty());
}

#[test]
fn test_cell_occupants_ground_first() {
    let v = ids(3);
    let mut cell = GridCell::default();
    cell.set_wall(v[1], SnapCategory::Wall, Side::Z);
    cell.set_wall(v[2], SnapCategory::Wall, Side::MinusZ);
    cell.set_ground(v[0], SnapCategory::Ground);
    let got: Vec<_> = cell.occupants().collect();
    assert_eq!(got, vec![v[0], v[2], v[1]]);

    cell.clear();
    assert!(cell.is_empty());
}

// ---------------------------------------------------------------------------
// GridLevel coordinates
// ---------------------------------------------------------------------------

#[test]
fn test_world_to_grid_recenters_on_origin() {
    let level = GridLevel::new(0, &config(200, 200, 1));
    assert_eq!(level.world_to_grid(Vec3::ZERO), IVec2::new(100, 100));
    assert_eq!(level.world_to_grid(Vec3::new(0.5, 0.0, 0.5)), IVec2::new(100, 100));
    assert_eq!(level.world_to_grid(Vec3::new(-0.5, 0.0, -0.5)), IVec2::new(99, 99));
    assert_eq!(level.world_to_grid(Vec3::new(-100.0, 0.0, 99.9)), IVec2::new(0, 199));
}

#[test]
fn test_world_to_grid_respects_cell_size() {
    let cfg = BuildConfig {
        cell_size: 2.0,
        ..config(10, 10, 1)
    };
    let level = GridLevel::new(0, &cfg);
    assert_eq!(level.world_to_grid(Vec3::new(3.9, 0.0, -0.1)), IVec2::new(6, 4));
}

#[test]
fn test_cell_center_is_inverse_of_world_to_grid() {
    let cfg = BuildConfig {
        cell_size: 0.5,
        ..config(40, 30, 1)
    };
    let level = GridLevel::new(0, &cfg).with_horizontal_origin(3.0, -2.0);
    for ix in [0, 7, 20, 39] {
        for iz in [0, 15, 29] {
            let center = level.cell_center_world(ix, iz);
            assert_eq!(level.world_to_grid(center), IVec2::new(ix, iz));
        }
    }
}

#[test]
fn test_level_height_follows_index() {
    let cfg = config(10, 10, 4);
    let level = GridLevel::new(3, &cfg);
    assert_eq!(level.origin().y, 3.0 * cfg.cell_height);
    assert_eq!(level.cell_center_world(0, 0).y, level.origin().y);
}

// ---------------------------------------------------------------------------
// Snapping
// ---------------------------------------------------------------------------

#[test]
fn test_snap_single_cell_centers_toward_cursor() {
    let level = GridLevel::new(0, &config(10, 10, 1));
    let snapped = level.snap_cursor(Vec3::new(0.3, 0.0, 0.3), true, true, 0.0);
    assert_eq!(snapped, Vec3::new(0.5, 0.0, 0.5));

    let snapped = level.snap_cursor(Vec3::new(-0.3, 0.0, 0.3), true, true, 0.0);
    assert_eq!(snapped, Vec3::new(-0.5, 0.0, 0.5));

    // Landed on the cell the cursor is over.
    assert_eq!(
        level.world_to_grid(Vec3::new(0.3, 0.0, 0.3)),
        level.world_to_grid(level.snap_cursor(Vec3::new(0.3, 0.0, 0.3), true, true, 0.0))
    );
}

#[test]
fn test_snap_even_footprint_lands_on_grid_line() {
    let level = GridLevel::new(0, &config(10, 10, 1));
    let snapped = level.snap_cursor(Vec3::new(1.4, 0.0, -2.6), false, false, 0.0);
    assert_eq!(snapped, Vec3::new(1.0, 0.0, -3.0));
}

#[test]
fn test_snap_offsets_swap_on_quarter_turn() {
    let level = GridLevel::new(0, &config(10, 10, 1));
    let cursor = Vec3::new(1.2, 0.0, 1.2);
    // Odd on x only (e.g. a 3x2 floor).
    assert_eq!(level.snap_cursor(cursor, true, false, 0.0), Vec3::new(1.5, 0.0, 1.0));
    assert_eq!(level.snap_cursor(cursor, true, false, 90.0), Vec3::new(1.0, 0.0, 1.5));
    assert_eq!(level.snap_cursor(cursor, true, false, 270.0), Vec3::new(1.0, 0.0, 1.5));
    assert_eq!(level.snap_cursor(cursor, true, false, 180.0), Vec3::new(1.5, 0.0, 1.0));
}

#[test]
fn test_snap_keeps_level_height_and_scales_with_cell_size() {
    let cfg = BuildConfig {
        cell_size: 2.0,
        ..config(10, 10, 3)
    };
    let level = GridLevel::new(2, &cfg);
    let snapped = level.snap_cursor(Vec3::new(2.6, 55.0, -0.4), true, true, 0.0);
    assert_eq!(snapped, Vec3::new(3.0, level.origin().y, -1.0));
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Valid indices are `0..size` on both axes: index 0 is usable and index
/// `size` is not.
#[test]
fn test_valid_index_is_zero_based_and_exclusive() {
    let level = GridLevel::new(0, &config(10, 8, 1));
    assert!(level.is_valid_index(0, 0));
    assert!(level.is_valid_index(9, 7));
    assert!(!level.is_valid_index(10, 0));
    assert!(!level.is_valid_index(0, 8));
    assert!(!level.is_valid_index(-1, 3));
    assert!(level.cell(9, 7).is_some());
    assert!(level.cell(10, 8).is_none());
}

#[test]
fn test_flat_index_is_x_major() {
    let level = GridLevel::new(0, &config(10, 8, 1));
    assert_eq!(level.flat_index(0, 0), Some(0));
    assert_eq!(level.flat_index(0, 7), Some(7));
    assert_eq!(level.flat_index(1, 0), Some(8));
    assert_eq!(level.flat_index(9, 7), Some(79));
    assert_eq!(level.coords_of(79), IVec2::new(9, 7));
}

#[test]
fn test_footprint_touching_high_edge_is_rejected_not_panicking() {
    let level = GridLevel::new(0, &config(4, 4, 1));
    let floor = BuildablePrototype::ground("Floor 2x2", 2, 2);
    // Start at (3, 3) needs (4, 4), which is off the grid.
    let pos = level.placement_point(IVec2::new(3, 3), 2, 2);
    assert_eq!(
        level.check_footprint(&floor, 0.0, pos),
        Err(Rejection::OutOfBounds(IVec2::new(3, 4)))
    );
    let pos = level.placement_point(IVec2::new(2, 2), 2, 2);
    assert!(level.check_footprint(&floor, 0.0, pos).is_ok());
}

// ---------------------------------------------------------------------------
// Footprint checks
// ---------------------------------------------------------------------------

#[test]
fn test_check_footprint_start_is_centered() {
    let level = GridLevel::new(0, &config(10, 10, 1));
    let strip = BuildablePrototype::ground("Strip", 3, 1);
    let pos = level.cell_center_world(5, 5);

    let fp = level.check_footprint(&strip, 0.0, pos).unwrap();
    assert_eq!(fp.start, IVec2::new(4, 5));
    assert_eq!((fp.x_len, fp.z_len), (3, 1));

    let fp = level.check_footprint(&strip, 90.0, pos).unwrap();
    assert_eq!(fp.start, IVec2::new(5, 4));
    assert_eq!((fp.x_len, fp.z_len), (1, 3));
}

#[test]
fn test_check_footprint_rejects_free_prototypes() {
    let level = GridLevel::new(0, &config(10, 10, 1));
    assert_eq!(
        level.check_footprint(&BuildablePrototype::free("Crate"), 0.0, Vec3::ZERO),
        Err(Rejection::NotGridBound)
    );
}

#[test]
fn test_placement_point_round_trips_through_check() {
    let level = GridLevel::new(0, &config(20, 20, 1));
    for (x_len, z_len) in [(1, 1), (2, 2), (3, 1), (1, 2), (3, 4)] {
        let start = IVec2::new(6, 9);
        let pos = level.placement_point(start, x_len, z_len);
        let proto = BuildablePrototype::ground("p", x_len, z_len);
        assert_eq!(level.check_footprint(&proto, 0.0, pos).unwrap().start, start);
    }
}

#[test]
fn test_snapped_cursor_places_under_cursor() {
    let level = GridLevel::new(0, &config(20, 20, 1));
    let proto = BuildablePrototype::ground("Floor 3x1", 3, 1);
    let cursor = Vec3::new(2.7, 0.0, -1.2);
    let (hx, hz) = crate::footprint::snap_offsets(&proto);
    let snapped = level.snap_cursor(cursor, hx, hz, 0.0);
    let fp = level.check_footprint(&proto, 0.0, snapped).unwrap();
    let under = level.world_to_grid(cursor);
    assert!(fp.cells().any(|c| c == under));
}

#[test]
fn test_link_and_unlink() {
    let mut level = GridLevel::new(2, &config(10, 10, 3));
    let id = ids(1)[0];
    let floor = BuildablePrototype::ground("Floor 2x2", 2, 2);
    let pos = level.placement_point(IVec2::new(1, 1), 2, 2);
    let fp = level.check_footprint(&floor, 0.0, pos).unwrap();

    let refs = level.link(id, &fp);
    assert_eq!(refs.len(), 4);
    assert!(refs.iter().all(|r| r.level == 2));
    assert_eq!(level.occupants(), vec![id]);

    for r in &refs {
        level.unlink(id, r.index);
    }
    assert!(level.is_empty());
}

#[test]
fn test_set_active_keeps_occupancy() {
    let mut level = GridLevel::new(0, &config(10, 10, 1));
    let id = ids(1)[0];
    let floor = BuildablePrototype::ground("Floor", 1, 1);
    let fp = level.check_footprint(&floor, 0.0, Vec3::new(0.5, 0.0, 0.5)).unwrap();
    level.link(id, &fp);

    level.set_active(true);
    level.set_active(false);
    assert!(!level.is_active());
    assert_eq!(level.occupied_cell_count(), 1);
}

// ---------------------------------------------------------------------------
// LevelStack
// ---------------------------------------------------------------------------

#[test]
fn test_stack_starts_on_level_zero() {
    let stack = LevelStack::new(&config(10, 10, 5));
    assert_eq!(stack.len(), 5);
    assert_eq!(stack.active_index(), 0);
    assert_eq!(stack.iter().filter(|l| l.is_active()).count(), 1);
}

#[test]
fn test_stack_wraps_downward() {
    let mut stack = LevelStack::new(&config(10, 10, 3));
    assert_eq!(stack.activate_next(-1), 2);
    assert_eq!(stack.active_index(), 2);
    assert!(stack.get(2).unwrap().is_active());
    assert!(!stack.get(0).unwrap().is_active());
}

#[test]
fn test_stack_wraps_upward() {
    let mut stack = LevelStack::new(&config(10, 10, 3));
    stack.activate_next(1);
    stack.activate_next(1);
    assert_eq!(stack.activate_next(1), 0);
    assert_eq!(stack.iter().filter(|l| l.is_active()).count(), 1);
}

#[test]
fn test_stack_single_level_wraps_to_itself() {
    let mut stack = LevelStack::new(&config(10, 10, 1));
    assert_eq!(stack.activate_next(-1), 0);
    assert_eq!(stack.activate_next(1), 0);
    assert!(stack.active().is_active());
}

#[test]
fn test_stack_zero_levels_falls_back_to_one() {
    let stack = LevelStack::new(&config(10, 10, 0));
    assert_eq!(stack.len(), 1);
}

#[test]
fn test_stack_set_active_index_bounds() {
    let mut stack = LevelStack::new(&config(10, 10, 3));
    assert!(!stack.set_active_index(3));
    assert_eq!(stack.active_index(), 0);
    assert!(stack.set_active_index(1));
    assert_eq!(stack.active().index(), 1);
}

#[test]
fn test_from_levels_rejects_empty() {
    assert!(LevelStack::from_levels(Vec::new()).is_none());
    let cfg = config(4, 4, 2);
    let stack = LevelStack::from_levels(vec![GridLevel::new(0, &cfg), GridLevel::new(1, &cfg)])
        .expect("non-empty");
    assert!(stack.get(0).unwrap().is_active());
}
