//! Places returned by search and places the user has saved.

use std::fmt;

use super::Coordinate;

/// A place returned by the search provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub address: String,
    pub region: String,
    pub category: String,
    pub coordinate: Coordinate,
}

impl SearchResult {
    /// Create a search result with empty region and category.
    pub fn new(
        title: impl Into<String>,
        address: impl Into<String>,
        coordinate: Coordinate,
    ) -> Self {
        Self {
            title: title.into(),
            address: address.into(),
            region: String::new(),
            category: String::new(),
            coordinate,
        }
    }
}

/// Handle identifying a saved location inside its store.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageId(pub u64);

impl fmt::Debug for StorageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StorageId({})", self.0)
    }
}

impl fmt::Display for StorageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A favorite the user has saved.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedLocation {
    pub id: StorageId,
    pub title: String,
    pub coordinate: Coordinate,
}

impl SavedLocation {
    /// Whether this favorite has the given title and exact coordinate.
    ///
    /// This is the uniqueness key for favorites.
    pub fn matches(&self, title: &str, coordinate: &Coordinate) -> bool {
        self.title == title && self.coordinate.same_point(coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_on_title_and_exact_coordinate() {
        let saved = SavedLocation {
            id: StorageId(1),
            title: "Milad Tower".to_string(),
            coordinate: Coordinate::from_degrees(35.7448, 51.3753),
        };

        let here = Coordinate::from_degrees(35.7448, 51.3753);
        let next_door = Coordinate::from_degrees(35.7448, 51.3754);
        assert!(saved.matches("Milad Tower", &here));
        assert!(!saved.matches("Milad", &here));
        assert!(!saved.matches("Milad Tower", &next_door));
    }

    #[test]
    fn storage_id_display() {
        assert_eq!(StorageId(7).to_string(), "#7");
        assert_eq!(format!("{:?}", StorageId(7)), "StorageId(7)");
    }
}
