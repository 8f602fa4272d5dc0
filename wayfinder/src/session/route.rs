//! Route session.
//!
//! Holds at most one current route. A new request supersedes the previous
//! one; a failed or empty response clears whatever route was shown.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::client::RouteClient;
use crate::domain::{Coordinate, Route};
use crate::polyline;

use super::events::{Notifier, RouteEvent};
use super::generation::{Completion, Disposition, Generation, Inbox};
use super::state::{SessionError, SessionState};

/// Completion of a route request: the raw encoded polyline.
pub type RouteCompletion = Completion<String>;

/// Routing lifecycle for one map.
pub struct RouteSession<R> {
    client: Arc<R>,
    state: SessionState<Route>,
    generation: Generation,
    inbox: Inbox<String>,
    notifier: Notifier<RouteEvent>,
}

impl<R: RouteClient> RouteSession<R> {
    pub fn new(client: Arc<R>) -> Self {
        Self {
            client,
            state: SessionState::Idle,
            generation: Generation::default(),
            inbox: Inbox::new(),
            notifier: Notifier::new(),
        }
    }

    /// Register the subscriber for this session's events, replacing any
    /// previous one.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<RouteEvent> {
        self.notifier.subscribe()
    }

    pub fn state(&self) -> &SessionState<Route> {
        &self.state
    }

    /// The route currently shown, if any.
    pub fn current_route(&self) -> Option<&Route> {
        self.state.loaded()
    }

    /// Generation of the most recent request.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn in_flight(&self) -> usize {
        self.inbox.in_flight()
    }

    /// Request a route from `origin` to `destination`, superseding any
    /// request in flight.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn get_route(&mut self, origin: Coordinate, destination: Coordinate) {
        self.generation = self.generation.next();
        let generation = self.generation;
        self.transition(SessionState::Loading);

        let client = Arc::clone(&self.client);
        debug!(%generation, %origin, %destination, "route requested");
        self.inbox.spawn(generation, async move {
            client.get_route(origin, destination).await
        });
    }

    /// Apply a completion if it belongs to the current request.
    pub fn apply(&mut self, completion: RouteCompletion) -> Disposition {
        if completion.generation != self.generation {
            debug!(
                generation = %completion.generation,
                current = %self.generation,
                "discarding superseded route response"
            );
            return Disposition::Superseded;
        }

        let next = match completion.result {
            Ok(encoded) => match polyline::decode_route(&encoded) {
                Ok(Some(route)) => {
                    debug!(points = route.len(), "route decoded");
                    SessionState::Loaded(route)
                }
                Ok(None) => SessionState::Failed(SessionError::NoRouteFound),
                Err(e) => {
                    debug!(error = %e, "route polyline rejected");
                    SessionState::Failed(SessionError::MalformedPolyline(e))
                }
            },
            Err(e) => {
                debug!(error = %e, "route request failed");
                SessionState::Failed(SessionError::RequestFailed(e))
            }
        };

        self.transition(next);
        Disposition::Applied
    }

    /// Wait for the next completion and apply it. Returns `None` when no
    /// request is in flight.
    pub async fn process_next(&mut self) -> Option<Disposition> {
        let completion = self.inbox.recv().await?;
        Some(self.apply(completion))
    }

    /// Process completions until nothing is in flight.
    pub async fn settle(&mut self) {
        while self.process_next().await.is_some() {}
    }

    /// Drop the current route and supersede any request in flight.
    pub fn clear(&mut self) {
        self.generation = self.generation.next();
        self.transition(SessionState::Idle);
    }

    fn transition(&mut self, state: SessionState<Route>) {
        self.state = state.clone();
        self.notifier.emit(RouteEvent::StateChanged(state));
    }
}
