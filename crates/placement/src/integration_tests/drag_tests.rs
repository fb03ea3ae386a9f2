use bevy::prelude::*;

use crate::config::DragBehavior;
use crate::events::*;
use crate::test_harness::TestSite;

fn press(site: &mut TestSite, x: f32, y: f32) {
    site.send(PointerPressed {
        screen: Vec2::new(x, y),
    })
    .tick(1);
}

fn motion(site: &mut TestSite, x: f32, y: f32) {
    site.send(PointerMoved {
        screen: Vec2::new(x, y),
    })
    .tick(1);
}

fn release(site: &mut TestSite, x: f32, y: f32) {
    site.send(PointerReleased {
        screen: Vec2::new(x, y),
    })
    .tick(1);
}

// -----------------------------------------------------------------------
// DragBehavior::None
// -----------------------------------------------------------------------

#[test]
fn test_no_drag_places_on_press() {
    let mut site = TestSite::with_drag(DragBehavior::None);
    site.select("Floor 1x1");
    site.aim(0.3, 0.3);
    press(&mut site, 0.0, 0.0);
    assert_eq!(site.object_count(), 1);

    site.aim(3.3, 0.3);
    motion(&mut site, 200.0, 0.0);
    release(&mut site, 200.0, 0.0);
    assert_eq!(site.object_count(), 1, "motion and release never place");
}

// -----------------------------------------------------------------------
// DragBehavior::InstantPlacement
// -----------------------------------------------------------------------

#[test]
fn test_instant_click_places_on_release() {
    let mut site = TestSite::with_drag(DragBehavior::InstantPlacement);
    site.select("Floor 1x1");
    site.aim(0.3, 0.3);
    press(&mut site, 100.0, 100.0);
    assert_eq!(site.object_count(), 0, "press alone waits for release");

    release(&mut site, 103.0, 104.0);
    assert_eq!(site.object_count(), 1);
    assert!(!site.mode().drag.is_pressed());
}

#[test]
fn test_instant_drag_places_along_the_way() {
    let mut site = TestSite::with_drag(DragBehavior::InstantPlacement);
    site.select("Floor 1x1");
    site.aim(0.3, 0.3);
    press(&mut site, 0.0, 0.0);

    motion(&mut site, 4.0, 0.0);
    assert_eq!(site.object_count(), 0, "below threshold");

    motion(&mut site, 20.0, 0.0);
    assert_eq!(site.object_count(), 1);

    site.aim(1.3, 0.3);
    motion(&mut site, 40.0, 0.0);
    site.aim(2.3, 0.3);
    motion(&mut site, 60.0, 0.0);
    assert_eq!(site.object_count(), 3);

    release(&mut site, 60.0, 0.0);
    assert_eq!(site.object_count(), 3, "release after a drag adds nothing");
    let level = site.active_level();
    for ix in 10..=12 {
        assert!(level.cell(ix, 10).expect("cell").has_ground());
    }
}

#[test]
fn test_drag_over_same_cell_places_once() {
    let mut site = TestSite::with_drag(DragBehavior::InstantPlacement);
    site.select("Floor 1x1");
    site.aim(0.3, 0.3);
    press(&mut site, 0.0, 0.0);
    motion(&mut site, 30.0, 0.0);
    site.aim(0.7, 0.6);
    motion(&mut site, 50.0, 0.0);
    release(&mut site, 50.0, 0.0);
    assert_eq!(site.object_count(), 1);
}

// -----------------------------------------------------------------------
// DragBehavior::DelayedPlacement
// -----------------------------------------------------------------------

#[test]
fn test_delayed_drag_fills_rectangle_on_release() {
    let mut site = TestSite::with_drag(DragBehavior::DelayedPlacement);
    site.select("Floor 1x1");
    site.aim(0.3, 0.3);
    press(&mut site, 0.0, 0.0);
    assert_eq!(site.mode().drag.start, Some(Vec3::new(0.3, 0.0, 0.3)));

    site.aim(2.3, 2.3);
    motion(&mut site, 100.0, 100.0);
    assert_eq!(site.object_count(), 0, "nothing placed while dragging");
    assert!(site.mode().drag.rectangle().is_some());

    release(&mut site, 100.0, 100.0);
    assert_eq!(site.object_count(), 9);
    assert_eq!(site.events::<ObjectPlaced>().len(), 9);
    assert_eq!(site.active_level().occupied_cell_count(), 9);
}

#[test]
fn test_delayed_click_places_single() {
    let mut site = TestSite::with_drag(DragBehavior::DelayedPlacement);
    site.select("Floor 2x2");
    site.aim(0.2, 0.2);
    press(&mut site, 0.0, 0.0);
    release(&mut site, 1.0, 1.0);
    assert_eq!(site.object_count(), 1);
}

#[test]
fn test_opening_menu_cancels_drag() {
    let mut site = TestSite::with_drag(DragBehavior::DelayedPlacement);
    site.select("Floor 1x1");
    site.aim(0.3, 0.3);
    press(&mut site, 0.0, 0.0);
    site.send(ToggleMenu).tick(1);
    release(&mut site, 100.0, 100.0);
    assert_eq!(site.object_count(), 0);
}
