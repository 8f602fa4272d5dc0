//! Encoded polyline codec.
//!
//! Routing responses describe the path as a compact ASCII string of
//! delta-encoded, zigzag-mapped, 5-bit variable-length integers at 1e-5
//! degree precision. This module turns such a string into ordered
//! coordinates, and back.

mod codec;
mod error;

pub use codec::{decode, decode_route, encode};
pub use error::PolylineError;
