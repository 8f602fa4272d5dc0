//! Domain types for place search and routing.
//!
//! Coordinates, search results, saved favorites and decoded routes. These
//! types carry no I/O and are shared by the codec, the clients, the store
//! and the sessions.

mod coordinate;
mod place;
mod route;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use place::{SavedLocation, SearchResult, StorageId};
pub use route::Route;
