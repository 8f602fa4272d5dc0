//! Favorites persisted as a JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Coordinate, SavedLocation, StorageId};

use super::{SavedLocationStore, StoreError};

/// On-disk record. The file is a JSON array of these, in insertion order,
/// with no version field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLocationRecord {
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&SavedLocation> for SavedLocationRecord {
    fn from(saved: &SavedLocation) -> Self {
        Self {
            title: saved.title.clone(),
            latitude: saved.coordinate.latitude,
            longitude: saved.coordinate.longitude,
        }
    }
}

/// Favorites store backed by a JSON file.
///
/// The whole file is loaded on open and rewritten on every change. Ids are
/// process-local handles assigned in load order; they are not written to
/// disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    records: Vec<SavedLocation>,
    next_id: u64,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let on_disk: Vec<SavedLocationRecord> = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| StoreError::Json {
                message: format!("failed to parse {}: {}", path.display(), e),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(StoreError::Io {
                    message: format!("failed to read {}: {}", path.display(), e),
                });
            }
        };

        let records: Vec<SavedLocation> = on_disk
            .into_iter()
            .zip(0u64..)
            .map(|(r, id)| SavedLocation {
                id: StorageId(id),
                title: r.title,
                coordinate: Coordinate::from_degrees(r.latitude, r.longitude),
            })
            .collect();

        debug!(path = %path.display(), count = records.len(), "loaded favorites");

        Ok(Self {
            next_id: records.len() as u64,
            path,
            records,
        })
    }

    /// Get the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, records: &[SavedLocation]) -> Result<(), StoreError> {
        let on_disk: Vec<SavedLocationRecord> = records.iter().map(Into::into).collect();

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                message: format!("failed to create directory: {}", e),
            })?;
        }

        let json = serde_json::to_string_pretty(&on_disk).map_err(|e| StoreError::Json {
            message: format!("failed to serialize favorites: {}", e),
        })?;

        std::fs::write(&self.path, json).map_err(|e| StoreError::Io {
            message: format!("failed to write {}: {}", self.path.display(), e),
        })
    }
}

impl SavedLocationStore for JsonFileStore {
    fn fetch_all(&self) -> Result<Vec<SavedLocation>, StoreError> {
        Ok(self.records.clone())
    }

    fn add(&mut self, title: &str, coordinate: Coordinate) -> Result<SavedLocation, StoreError> {
        let saved = SavedLocation {
            id: StorageId(self.next_id),
            title: title.to_string(),
            coordinate,
        };

        let mut updated = self.records.clone();
        updated.push(saved.clone());
        self.write(&updated)?;

        self.records = updated;
        self.next_id += 1;
        Ok(saved)
    }

    fn delete(&mut self, id: StorageId) -> Result<(), StoreError> {
        let idx = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let mut updated = self.records.clone();
        updated.remove(idx);
        self.write(&updated)?;

        self.records = updated;
        Ok(())
    }
}
