//! Search session.
//!
//! Owns the search state the user sees, the favorites cache and the
//! generation counter. Requests run in the background; their completions
//! come back through a serialized inbox and are applied by the owner via
//! [`SearchSession::process_next`] or [`SearchSession::settle`].

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::client::PlaceSearchClient;
use crate::connectivity::Connectivity;
use crate::domain::{Coordinate, SavedLocation, SearchResult, StorageId};
use crate::store::{SavedLocationStore, StoreError};

use super::config::SearchConfig;
use super::events::{Notifier, SearchEvent};
use super::generation::{Completion, Disposition, Generation, Inbox};
use super::state::{SessionError, SessionState};

/// Completion of a place search request.
pub type SearchCompletion = Completion<Vec<SearchResult>>;

/// Result of selecting a search result.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// A new favorite was stored.
    Saved(SavedLocation),
    /// An identical favorite already existed; nothing was stored.
    AlreadySaved(StorageId),
}

/// Search lifecycle for one view.
pub struct SearchSession<P, S, C> {
    client: Arc<P>,
    store: S,
    connectivity: C,
    config: SearchConfig,
    state: SessionState<Vec<SearchResult>>,
    generation: Generation,
    favorites: Vec<SavedLocation>,
    inbox: Inbox<Vec<SearchResult>>,
    notifier: Notifier<SearchEvent>,
}

impl<P, S, C> SearchSession<P, S, C>
where
    P: PlaceSearchClient,
    S: SavedLocationStore,
    C: Connectivity,
{
    /// Create an idle session and load the favorites cache.
    ///
    /// A store that fails to load starts the session with no favorites.
    pub fn new(client: Arc<P>, store: S, connectivity: C) -> Self {
        let favorites = store.fetch_all().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load saved locations");
            Vec::new()
        });

        Self {
            client,
            store,
            connectivity,
            config: SearchConfig::default(),
            state: SessionState::Idle,
            generation: Generation::default(),
            favorites,
            inbox: Inbox::new(),
            notifier: Notifier::new(),
        }
    }

    /// Use the given configuration.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Register the subscriber for this session's events, replacing any
    /// previous one.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<SearchEvent> {
        self.notifier.subscribe()
    }

    pub fn state(&self) -> &SessionState<Vec<SearchResult>> {
        &self.state
    }

    /// Generation of the most recent request.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Cached favorites, as last loaded from the store.
    pub fn favorites(&self) -> &[SavedLocation] {
        &self.favorites
    }

    /// The underlying favorites store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of requests whose completions have not been processed yet,
    /// superseded ones included.
    pub fn in_flight(&self) -> usize {
        self.inbox.in_flight()
    }

    /// Start a search for `query` around `origin`.
    ///
    /// An empty query shows favorites instead (same as [`clear`]). When the
    /// device is offline the session fails immediately with
    /// [`SessionError::NetworkUnavailable`] and the client is not called.
    /// Either way, any earlier request in flight is superseded.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// [`clear`]: SearchSession::clear
    pub fn search(&mut self, query: &str, origin: Coordinate) {
        let query = query.trim();
        if query.is_empty() {
            self.clear();
            return;
        }

        self.generation = self.generation.next();

        if !self.connectivity.is_online() {
            debug!(generation = %self.generation, "offline, search not sent");
            self.transition(SessionState::Failed(SessionError::NetworkUnavailable));
            return;
        }

        let generation = self.generation;
        self.transition(SessionState::Loading);

        let client = Arc::clone(&self.client);
        let query = query.to_string();
        debug!(%generation, query = %query, "search issued");
        self.inbox.spawn(generation, async move {
            client
                .search(&query, origin.latitude, origin.longitude)
                .await
        });
    }

    /// Apply a completion if it belongs to the current request.
    pub fn apply(&mut self, completion: SearchCompletion) -> Disposition {
        if completion.generation != self.generation {
            debug!(
                generation = %completion.generation,
                current = %self.generation,
                "discarding superseded search response"
            );
            return Disposition::Superseded;
        }

        let next = match completion.result {
            Ok(mut results) => {
                if let Some(max) = self.config.max_results {
                    results.truncate(max);
                }
                SessionState::Loaded(results)
            }
            Err(e) => {
                debug!(generation = %completion.generation, error = %e, "search failed");
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

    /// Return to the idle state and reload favorites.
    ///
    /// Requests still in flight are superseded.
    pub fn clear(&mut self) {
        self.generation = self.generation.next();
        self.transition(SessionState::Idle);

        if let Err(e) = self.refresh_favorites() {
            warn!(error = %e, "failed to reload saved locations");
        }
    }

    /// Reload the favorites cache from the store.
    pub fn reload_favorites(&mut self) -> Result<(), SessionError> {
        self.refresh_favorites()
            .map_err(SessionError::PersistenceFailure)
    }

    /// The user picked a search result: save it as a favorite unless an
    /// identical one exists, and focus its coordinate.
    ///
    /// The coordinate is focused even if saving fails. A save failure
    /// leaves the search state untouched.
    pub fn select_result(&mut self, result: &SearchResult) -> Result<SaveOutcome, SessionError> {
        let coordinate = result.coordinate;

        let outcome = match self
            .favorites
            .iter()
            .find(|f| f.matches(&result.title, &coordinate))
        {
            Some(existing) => {
                debug!(id = %existing.id, title = %result.title, "already saved");
                Ok(SaveOutcome::AlreadySaved(existing.id))
            }
            None => self.save(&result.title, coordinate),
        };

        self.notifier.emit(SearchEvent::Focus(coordinate));
        outcome
    }

    /// The user picked a saved favorite: focus its coordinate.
    pub fn select_favorite(&mut self, id: StorageId) -> Option<Coordinate> {
        let coordinate = self.favorites.iter().find(|f| f.id == id)?.coordinate;
        self.notifier.emit(SearchEvent::Focus(coordinate));
        Some(coordinate)
    }

    /// Delete a favorite and reload the cache. Search state is unchanged.
    pub fn delete_favorite(&mut self, id: StorageId) -> Result<(), SessionError> {
        if let Err(e) = self.store.delete(id) {
            warn!(%id, error = %e, "failed to delete saved location");
            return Err(SessionError::PersistenceFailure(e));
        }

        if let Err(e) = self.refresh_favorites() {
            warn!(error = %e, "failed to reload saved locations");
            self.favorites.retain(|f| f.id != id);
            self.notifier
                .emit(SearchEvent::FavoritesChanged(self.favorites.clone()));
        }

        Ok(())
    }

    fn save(&mut self, title: &str, coordinate: Coordinate) -> Result<SaveOutcome, SessionError> {
        let saved = match self.store.add(title, coordinate) {
            Ok(saved) => saved,
            Err(e) => {
                warn!(title, error = %e, "failed to save location");
                return Err(SessionError::PersistenceFailure(e));
            }
        };

        if let Err(e) = self.refresh_favorites() {
            // Keep the cache consistent with the store for dedup.
            warn!(error = %e, "failed to reload saved locations");
            self.favorites.push(saved.clone());
            self.notifier
                .emit(SearchEvent::FavoritesChanged(self.favorites.clone()));
        }

        Ok(SaveOutcome::Saved(saved))
    }

    fn refresh_favorites(&mut self) -> Result<(), StoreError> {
        self.favorites = self.store.fetch_all()?;
        self.notifier
            .emit(SearchEvent::FavoritesChanged(self.favorites.clone()));
        Ok(())
    }

    fn transition(&mut self, state: SessionState<Vec<SearchResult>>) {
        self.state = state.clone();
        self.notifier.emit(SearchEvent::StateChanged(state));
    }
}
