//! Geographic coordinate type.

use std::fmt;

/// Error returned when constructing a coordinate outside the valid range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A WGS84 position in decimal degrees.
///
/// Coordinates built with [`Coordinate::new`] are guaranteed to lie within
/// `[-90, 90] × [-180, 180]`. The polyline decoder produces coordinates with
/// [`Coordinate::from_degrees`], which does not check the range: the wire
/// format can describe any integer multiple of 1e-5 degrees.
///
/// # Examples
///
/// ```
/// use wayfinder::domain::Coordinate;
///
/// let tehran = Coordinate::new(35.6892, 51.3890).unwrap();
/// assert_eq!(tehran.latitude, 35.6892);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, -180.5).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting values outside the WGS84 range or NaN.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinate {
                reason: "latitude must be within [-90, 90]",
            });
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinate {
                reason: "longitude must be within [-180, 180]",
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a coordinate without range validation.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether two coordinates denote the same point exactly.
    ///
    /// Favorites are deduplicated on exact equality, the same way the
    /// persisted record stores them.
    pub fn same_point(&self, other: &Coordinate) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundaries() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinate::new(90.000_01, 0.0).is_err());
        assert!(Coordinate::new(-91.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.1).is_err());
        assert!(Coordinate::new(0.0, -200.0).is_err());
    }

    #[test]
    fn rejects_nan() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn error_display() {
        let err = Coordinate::new(100.0, 0.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid coordinate: latitude must be within [-90, 90]"
        );
    }

    #[test]
    fn display_is_lat_comma_lng() {
        let c = Coordinate::new(35.7219, 51.3347).unwrap();
        assert_eq!(c.to_string(), "35.7219,51.3347");
    }

    #[test]
    fn debug() {
        let c = Coordinate::from_degrees(38.5, -120.2);
        assert_eq!(format!("{:?}", c), "Coordinate(38.5, -120.2)");
    }

    #[test]
    fn same_point_is_exact() {
        let a = Coordinate::from_degrees(35.7, 51.4);
        let b = Coordinate::from_degrees(35.7, 51.4);
        let c = Coordinate::from_degrees(35.7, 51.400_001);
        assert!(a.same_point(&b));
        assert!(!a.same_point(&c));
    }
}
