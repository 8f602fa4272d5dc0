//! Notifications from sessions to their subscriber.

use tokio::sync::mpsc;

use crate::domain::{Coordinate, Route, SavedLocation, SearchResult};

use super::state::SessionState;

/// Notifications emitted by a [`SearchSession`](super::SearchSession).
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// The search state changed.
    StateChanged(SessionState<Vec<SearchResult>>),
    /// The cached favorites were reloaded from the store.
    FavoritesChanged(Vec<SavedLocation>),
    /// The consumer should center on this point.
    Focus(Coordinate),
}

/// Notifications emitted by a [`RouteSession`](super::RouteSession).
#[derive(Debug, Clone, PartialEq)]
pub enum RouteEvent {
    /// The route state changed. Anything other than `Loaded` means no route
    /// should be displayed.
    StateChanged(SessionState<Route>),
}

/// Single-subscriber event sink.
pub(crate) struct Notifier<E> {
    subscriber: Option<mpsc::UnboundedSender<E>>,
}

impl<E> Notifier<E> {
    pub(crate) fn new() -> Self {
        Self { subscriber: None }
    }

    /// Register a new subscriber, replacing any previous one.
    pub(crate) fn subscribe(&mut self) -> mpsc::UnboundedReceiver<E> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscriber = Some(tx);
        rx
    }

    pub(crate) fn emit(&mut self, event: E) {
        let closed = match &self.subscriber {
            Some(tx) => tx.send(event).is_err(),
            None => false,
        };
        if closed {
            self.subscriber = None;
        }
    }
}
