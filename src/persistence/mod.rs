//! Key-value persistence
//!
//! The record list lives under one key as serialized text. Backends:
//! - `MemoryStore`: process-local map (tests, scratch sessions)
//! - `FileStore`: one JSON file per key in a data directory (native)
//! - `LocalStore`: `window.localStorage` (wasm32)

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(target_arch = "wasm32")]
mod local;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

use crate::error::StorageError;

/// String slots addressed by key. Writes replace the whole value.
pub trait KeyValueStore {
    /// Read a slot; `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace a slot's value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}
