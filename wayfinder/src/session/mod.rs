//! Search and routing sessions.
//!
//! A session is the single owner of what one view shows: its state, its
//! generation counter and its subscriber. Network calls run in the
//! background and report back through the session's inbox; the owner
//! applies them in arrival order, and a response to anything but the
//! latest request is dropped. State changes reach the consumer in the
//! order the requests were made, whatever order the responses arrive in.

mod config;
mod events;
mod generation;
mod route;
mod search;
mod state;

pub use config::SearchConfig;
pub use events::{RouteEvent, SearchEvent};
pub use generation::{Completion, Disposition, Generation};
pub use route::{RouteCompletion, RouteSession};
pub use search::{SaveOutcome, SearchCompletion, SearchSession};
pub use state::{SessionError, SessionState};

#[cfg(test)]
mod route_tests;
