//! Polyline codec error type.

/// The encoded string could not be parsed.
///
/// Carries the byte offset at which decoding stopped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed polyline at byte {offset}: {reason}")]
pub struct PolylineError {
    pub offset: usize,
    pub reason: &'static str,
}

impl PolylineError {
    pub(crate) fn new(offset: usize, reason: &'static str) -> Self {
        Self { offset, reason }
    }
}
