//! Persistence for the build: save record types, the mapper between live
//! state and records, the on-disk codec and store, and the save/load plugin.

mod atomic_write;
pub mod file_header;
pub mod mapper;
pub mod save_codec;
pub mod save_crypto;
pub mod save_error;
mod save_plugin;
pub mod save_types;
pub mod store;

#[cfg(test)]
mod test_support;

pub use mapper::{export, import, ImportReport};
pub use save_codec::SaveFormat;
pub use save_crypto::SaveKey;
pub use save_error::SaveError;
pub use save_plugin::{
    GameLoaded, GameSaved, LoadGameEvent, NewGameEvent, SaveGameEvent, SaveLoadState, SavePlugin,
};
pub use save_types::SaveRecord;
pub use store::SaveStore;
