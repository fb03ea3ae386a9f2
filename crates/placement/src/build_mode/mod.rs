//! Interactive building: selection, rotation, build/demolition modes, cursor
//! snapping and the request handlers that drive the placement engine.
//!
//! Systems run in three `PlacementSet` phases each frame. The input phase
//! applies mode and selection changes, the cursor phase projects `CursorRay`
//! onto the active level and turns pointer input into requests, and the apply
//! phase commits placement, fill and demolition requests.

pub mod state;
pub(crate) mod systems;


pub use state::*;
