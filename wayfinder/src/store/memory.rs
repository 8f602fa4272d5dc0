//! In-memory favorites store.

use crate::domain::{Coordinate, SavedLocation, StorageId};

use super::{SavedLocationStore, StoreError};

/// Favorites kept in memory for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<SavedLocation>,
    next_id: u64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored favorites.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SavedLocationStore for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<SavedLocation>, StoreError> {
        Ok(self.records.clone())
    }

    fn add(&mut self, title: &str, coordinate: Coordinate) -> Result<SavedLocation, StoreError> {
        let saved = SavedLocation {
            id: StorageId(self.next_id),
            title: title.to_string(),
            coordinate,
        };
        self.next_id += 1;
        self.records.push(saved.clone());
        Ok(saved)
    }

    fn delete(&mut self, id: StorageId) -> Result<(), StoreError> {
        let idx = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        self.records.remove(idx);
        Ok(())
    }
}
