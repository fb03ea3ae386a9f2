//! Integration tests for the build tool using the `TestSite` harness.
//!
//! These tests run `PlacementPlugin` in a headless Bevy App and drive it the
//! way the input layer does: by sending request events and setting the cursor
//! ray, then checking grid occupancy, the registry and emitted notifications.

mod drag_tests;
mod mode_tests;
