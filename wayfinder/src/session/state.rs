//! Session state and error types shared by search and routing.

use crate::client::ClientError;
use crate::polyline::PolylineError;
use crate::store::StoreError;

/// Why a session operation failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// Connectivity check failed before any request was sent
    #[error("network unavailable")]
    NetworkUnavailable,

    /// The search or routing client reported an error
    #[error("request failed: {0}")]
    RequestFailed(#[from] ClientError),

    /// The route's encoded polyline could not be parsed
    #[error(transparent)]
    MalformedPolyline(#[from] PolylineError),

    /// The routing service answered, but with no usable path
    #[error("no route found")]
    NoRouteFound,

    /// A favorites store operation failed
    #[error("could not update saved locations: {0}")]
    PersistenceFailure(#[from] StoreError),
}

/// What a session is currently showing.
///
/// Exactly one variant holds at a time. `Loaded` carries the payload the
/// consumer should display.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(SessionError),
}

impl<T> Default for SessionState<T> {
    fn default() -> Self {
        SessionState::Idle
    }
}

impl<T> SessionState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    /// The loaded payload, if any.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            SessionState::Loaded(payload) => Some(payload),
            _ => None,
        }
    }

    /// The failure, if any.
    pub fn error(&self) -> Option<&SessionError> {
        match self {
            SessionState::Failed(err) => Some(err),
            _ => None,
        }
    }
}
