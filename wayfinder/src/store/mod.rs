//! Favorite location storage.
//!
//! The search session owns its store and is the only writer. The store
//! itself does not enforce uniqueness of favorites; the session checks for
//! duplicates before calling [`SavedLocationStore::add`].

mod file;
mod memory;

use crate::domain::{Coordinate, SavedLocation, StorageId};

pub use file::{JsonFileStore, SavedLocationRecord};
pub use memory::MemoryStore;

/// Errors from a favorites store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("storage I/O error: {message}")]
    Io { message: String },

    /// The backing file could not be (de)serialized
    #[error("storage format error: {message}")]
    Json { message: String },

    /// No favorite has this id
    #[error("no saved location with id {0}")]
    NotFound(StorageId),
}

/// Synchronous record store for saved locations.
pub trait SavedLocationStore {
    /// All saved locations, in insertion order.
    fn fetch_all(&self) -> Result<Vec<SavedLocation>, StoreError>;

    /// Persist a new favorite and return it with its assigned id.
    fn add(&mut self, title: &str, coordinate: Coordinate) -> Result<SavedLocation, StoreError>;

    /// Remove a favorite.
    fn delete(&mut self, id: StorageId) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::NotFound(StorageId(3));
        assert_eq!(err.to_string(), "no saved location with id #3");

        let err = StoreError::Io {
            message: "permission denied".into(),
        };
        assert_eq!(err.to_string(), "storage I/O error: permission denied");
    }
}
