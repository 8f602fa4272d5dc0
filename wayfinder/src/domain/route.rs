//! Decoded driving routes.

use super::Coordinate;

/// An ordered, non-empty path from origin to destination.
///
/// Routes only come out of a successful polyline decode, so a `Route` is
/// never partially populated and never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Route(Vec<Coordinate>);

impl Route {
    /// Build a route from decoded points. Returns `None` for an empty path.
    pub(crate) fn from_points(points: Vec<Coordinate>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self(points))
        }
    }

    /// First point of the route.
    pub fn origin(&self) -> Coordinate {
        self.0[0]
    }

    /// Last point of the route.
    pub fn destination(&self) -> Coordinate {
        self.0[self.0.len() - 1]
    }

    /// Number of points.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// All points, origin first.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.0
    }

    /// Consume the route, returning its points.
    pub fn into_coordinates(self) -> Vec<Coordinate> {
        self.0
    }
}
