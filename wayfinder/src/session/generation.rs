//! Request generations and the completion inbox.
//!
//! Every request a session issues is tagged with the session's generation
//! at the time. A completion is applied only if its tag still equals the
//! session's current generation; anything older has been superseded and is
//! dropped on arrival. In-flight requests are never aborted. A request task
//! that panics still reports back, as a failure under its own generation.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;

use tokio::task::{self, JoinSet};
use tracing::warn;

use crate::client::ClientError;

/// Monotonically increasing request token owned by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// The generation following this one.
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// A client response tagged with the generation of its request.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion<T> {
    pub generation: Generation,
    pub result: Result<T, ClientError>,
}

/// What happened to a completion when it reached the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// It belonged to the current request and changed the session state.
    Applied,
    /// A newer request had started; it was ignored.
    Superseded,
}

/// Serialized channel of completions for in-flight requests.
pub(crate) struct Inbox<T> {
    tasks: JoinSet<Completion<T>>,
    generations: HashMap<task::Id, Generation>,
}

impl<T: Send + 'static> Inbox<T> {
    pub(crate) fn new() -> Self {
        Self {
            tasks: JoinSet::new(),
            generations: HashMap::new(),
        }
    }

    /// Run `request` in the background; its result arrives tagged with
    /// `generation`. Must be called from within a Tokio runtime.
    pub(crate) fn spawn<F>(&mut self, generation: Generation, request: F)
    where
        F: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let handle = self.tasks.spawn(async move {
            Completion {
                generation,
                result: request.await,
            }
        });
        self.generations.insert(handle.id(), generation);
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for the next completion, in arrival order. `None` when nothing
    /// is in flight.
    pub(crate) async fn recv(&mut self) -> Option<Completion<T>> {
        loop {
            match self.tasks.join_next_with_id().await? {
                Ok((id, completion)) => {
                    self.generations.remove(&id);
                    return Some(completion);
                }
                Err(e) => {
                    let Some(generation) = self.generations.remove(&e.id()) else {
                        warn!(error = %e, "untracked request task did not complete");
                        continue;
                    };
                    warn!(%generation, error = %e, "request task did not complete");
                    return Some(Completion {
                        generation,
                        result: Err(ClientError::TaskFailed {
                            message: e.to_string(),
                        }),
                    });
                }
            }
        }
    }
}
