//! Encoded polyline decoding and encoding.
//!
//! Each point is stored as a pair of signed deltas (latitude, then
//! longitude) from the previous point, in units of 1e-5 degrees. A delta is
//! zigzag-mapped to an unsigned value, split into 5-bit chunks (least
//! significant first), each chunk flagged with 0x20 when more follow, and
//! offset by 63 to land in printable ASCII.

use crate::domain::{Coordinate, Route};

use super::error::PolylineError;

/// Units per degree.
const PRECISION: f64 = 1e5;

/// Offset added to every chunk; also the smallest valid byte (`?`).
const BYTE_OFFSET: u8 = 63;

/// Largest valid byte (`~`).
const MAX_BYTE: u8 = 126;

const CHUNK_BITS: u32 = 5;
const CHUNK_MASK: u64 = 0x1f;
const CONTINUATION: u64 = 0x20;

/// Decode an encoded polyline into its points, origin first.
///
/// Fails if the input ends partway through a value (including after a
/// latitude with no longitude) or contains a byte outside `?`..=`~`. No
/// points are returned on failure. An empty string decodes to no points.
///
/// # Examples
///
/// ```
/// use wayfinder::polyline::decode;
///
/// let points = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
/// assert_eq!(points.len(), 3);
/// assert_eq!(points[0].latitude, 38.5);
/// assert_eq!(points[0].longitude, -120.2);
///
/// assert!(decode("_p~iF").is_err());
/// ```
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let mut reader = Reader::new(encoded.as_bytes());
    let mut points = Vec::new();

    // Running totals carry across every pair in the string.
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while !reader.is_exhausted() {
        let offset = reader.pos;
        let d_lat = reader.next_value()?;
        let d_lng = reader.next_value()?;

        lat = lat
            .checked_add(d_lat)
            .ok_or_else(|| PolylineError::new(offset, "latitude overflows"))?;
        lng = lng
            .checked_add(d_lng)
            .ok_or_else(|| PolylineError::new(offset, "longitude overflows"))?;

        points.push(Coordinate::from_degrees(
            lat as f64 / PRECISION,
            lng as f64 / PRECISION,
        ));
    }

    Ok(points)
}

/// Decode an encoded polyline into a [`Route`].
///
/// Returns `Ok(None)` when the string is well formed but holds no points.
pub fn decode_route(encoded: &str) -> Result<Option<Route>, PolylineError> {
    decode(encoded).map(Route::from_points)
}

/// Encode points as a polyline string. Inverse of [`decode`] up to 1e-5
/// degree rounding.
pub fn encode(points: &[Coordinate]) -> String {
    let mut out = String::with_capacity(points.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let lat = to_units(point.latitude);
        let lng = to_units(point.longitude);
        write_value(lat - prev_lat, &mut out);
        write_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

/// Cursor over the encoded bytes.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn is_exhausted(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Read one zigzag-encoded signed value.
    fn next_value(&mut self) -> Result<i64, PolylineError> {
        // Must start at zero for every value.
        let mut acc: u64 = 0;
        let mut shift: u32 = 0;

        loop {
            let Some(&byte) = self.bytes.get(self.pos) else {
                return Err(PolylineError::new(self.pos, "input ends mid-value"));
            };

            if !(BYTE_OFFSET..=MAX_BYTE).contains(&byte) {
                return Err(PolylineError::new(
                    self.pos,
                    "byte outside the encoding range",
                ));
            }

            let chunk = u64::from(byte - BYTE_OFFSET);
            let bits = chunk & CHUNK_MASK;

            // Bits shifted past the top of the accumulator would be lost.
            if shift >= u64::BITS || (bits << shift) >> shift != bits {
                return Err(PolylineError::new(self.pos, "value too long"));
            }

            acc |= bits << shift;
            shift += CHUNK_BITS;
            self.pos += 1;

            if chunk & CONTINUATION == 0 {
                return Ok(unzigzag(acc));
            }
        }
    }
}

fn unzigzag(value: u64) -> i64 {
    let half = (value >> 1) as i64;
    if value & 1 != 0 { !half } else { half }
}

fn zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

fn to_units(degrees: f64) -> i64 {
    (degrees * PRECISION).round() as i64
}

fn write_value(delta: i64, out: &mut String) {
    let mut v = zigzag(delta);
    while v >= CONTINUATION {
        let chunk = (CONTINUATION | (v & CHUNK_MASK)) as u8;
        out.push(char::from(chunk + BYTE_OFFSET));
        v >>= CHUNK_BITS;
    }
    out.push(char::from(v as u8 + BYTE_OFFSET));
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coordinate_strategy() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0)
            .prop_map(|(lat, lng)| Coordinate::from_degrees(lat, lng))
    }

    proptest! {
        /// decode(encode(points)) reproduces each point within 1e-5
        #[test]
        fn roundtrip(points in prop::collection::vec(coordinate_strategy(), 0..50)) {
            let decoded = decode(&encode(&points)).unwrap();
            prop_assert_eq!(decoded.len(), points.len());

            for (original, back) in points.iter().zip(&decoded) {
                prop_assert!((original.latitude - back.latitude).abs() <= 1e-5);
                prop_assert!((original.longitude - back.longitude).abs() <= 1e-5);
            }
        }

        /// Encoded output only uses bytes from the encoding range
        #[test]
        fn encoded_is_printable(points in prop::collection::vec(coordinate_strategy(), 0..20)) {
            let encoded = encode(&points);
            prop_assert!(encoded.bytes().all(|b| (BYTE_OFFSET..=MAX_BYTE).contains(&b)));
        }

        /// zigzag and unzigzag are inverses
        #[test]
        fn zigzag_inverse(v in any::<i64>()) {
            prop_assert_eq!(unzigzag(zigzag(v)), v);
        }

        /// Arbitrary in-range input never panics: it decodes or fails cleanly
        #[test]
        fn arbitrary_input_never_panics(s in "[?-~]{0,64}") {
            let _ = decode(&s);
        }

        /// Cutting inside a value fails; cutting between pairs yields
        /// exactly the pairs before the cut
        #[test]
        fn truncation_never_yields_partial_pairs(
            points in prop::collection::vec(coordinate_strategy(), 1..10),
            cut in 1usize..8,
        ) {
            let encoded = encode(&points);
            let end = encoded.len().saturating_sub(cut).max(1);
            prop_assume!(end < encoded.len());

            let boundary = (0..points.len()).find(|&k| encode(&points[..k]).len() == end);
            match boundary {
                Some(k) => {
                    let expected = decode(&encode(&points[..k])).unwrap();
                    prop_assert_eq!(decode(&encoded[..end]).unwrap(), expected);
                }
                None => prop_assert!(decode(&encoded[..end]).is_err()),
            }
        }
    }
}
