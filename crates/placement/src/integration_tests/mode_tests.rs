use crate::events::*;
use crate::test_harness::TestSite;

// -----------------------------------------------------------------------
// Build and demolition modes
// -----------------------------------------------------------------------

#[test]
fn test_fresh_site_is_idle() {
    let site = TestSite::new();
    assert!(!site.mode().build_active);
    assert!(!site.mode().demolish_active);
    assert_eq!(site.levels().active_index(), 0);
    assert!(site.registry().is_empty());
}

#[test]
fn test_toggle_build_mode_notifies() {
    let mut site = TestSite::new();
    site.send(ToggleBuildMode).tick(1);
    site.send(ToggleBuildMode).tick(1);
    assert_eq!(
        site.events::<BuildModeChanged>(),
        &[
            BuildModeChanged { active: true },
            BuildModeChanged { active: false }
        ]
    );
}

#[test]
fn test_leaving_build_mode_clears_selection() {
    let mut site = TestSite::new();
    site.select("Floor 1x1");
    assert!(site.mode().build_active, "selecting turns build mode on");
    assert_eq!(site.mode().selected(), Some(0));

    site.send(ToggleBuildMode).tick(1);
    assert!(!site.mode().build_active);
    assert_eq!(site.mode().selected(), None);
}

#[test]
fn test_entering_demolition_clears_selection() {
    let mut site = TestSite::new();
    site.select("Wall 2");
    site.send(ToggleDemolitionMode).tick(1);
    assert!(site.mode().demolish_active);
    assert_eq!(site.mode().selected(), None);
    assert_eq!(
        site.events::<DemolitionModeChanged>(),
        &[DemolitionModeChanged { active: true }]
    );
}

#[test]
fn test_selecting_leaves_demolition_mode() {
    let mut site = TestSite::new();
    site.send(ToggleDemolitionMode).tick(1);
    site.select("Crate");
    assert!(!site.mode().demolish_active);
    assert_eq!(
        site.events::<DemolitionModeChanged>().last(),
        Some(&DemolitionModeChanged { active: false })
    );
}

#[test]
fn test_select_out_of_range_is_ignored() {
    let mut site = TestSite::new();
    site.send(SelectPrototype { index: 999 }).tick(1);
    assert_eq!(site.mode().selected(), None);
    assert!(!site.mode().build_active);
}

#[test]
fn test_rotate_and_cancel_selection() {
    let mut site = TestSite::new();
    site.send(RotateSelection).tick(1);
    assert_eq!(site.mode().rotation(), 0, "nothing selected");

    site.select("Floor 3x1");
    for _ in 0..3 {
        site.send(RotateSelection);
    }
    site.tick(1);
    assert_eq!(site.mode().rotation(), 270);
    site.send(RotateSelection).tick(1);
    assert_eq!(site.mode().rotation(), 0);

    site.send(RotateSelection).tick(1);
    site.select("Floor 2x2");
    assert_eq!(site.mode().rotation(), 0, "new selection starts unrotated");

    site.send(CancelSelection).tick(1);
    assert_eq!(site.mode().selected(), None);
    assert!(site.mode().build_active, "cancel keeps build mode");
}

#[test]
fn test_menu_suspends_level_change_and_rotation() {
    let mut site = TestSite::new();
    site.select("Floor 3x1");
    site.send(ToggleMenu).tick(1);
    assert!(site.mode().menu_open);

    site.send(ChangeLevel { direction: 1 });
    site.send(RotateSelection);
    site.tick(1);
    assert_eq!(site.levels().active_index(), 0);
    assert_eq!(site.mode().rotation(), 0);

    site.send(ToggleMenu).tick(1);
    assert_eq!(
        site.events::<MenuToggled>(),
        &[MenuToggled { open: true }, MenuToggled { open: false }]
    );
}

// -----------------------------------------------------------------------
// Levels
// -----------------------------------------------------------------------

#[test]
fn test_level_down_from_ground_wraps_to_top() {
    let mut site = TestSite::new();
    site.send(ChangeLevel { direction: -1 }).tick(1);
    assert_eq!(site.levels().active_index(), 2);
    assert!(site.active_level().is_active());
    assert!(!site.levels().get(0).expect("level 0").is_active());
    assert_eq!(
        site.events::<LevelChanged>(),
        &[LevelChanged {
            level: 2,
            height: 4.0
        }]
    );
}

#[test]
fn test_level_up_wraps_to_ground() {
    let mut site = TestSite::new();
    for _ in 0..3 {
        site.send(ChangeLevel { direction: 1 }).tick(1);
    }
    let levels: Vec<usize> = site
        .events::<LevelChanged>()
        .iter()
        .map(|e| e.level)
        .collect();
    assert_eq!(levels, vec![1, 2, 0]);
    let active = site
        .levels()
        .iter()
        .filter(|level| level.is_active())
        .count();
    assert_eq!(active, 1, "exactly one level is active");
}
