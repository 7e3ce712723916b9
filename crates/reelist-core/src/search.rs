use tokio_util::sync::CancellationToken;
use tracing::debug;

use reelist_catalog::CatalogError;
use reelist_models::MovieSummary;

use crate::slot::RequestSlot;

/// Queries shorter than this (trimmed) never hit the network.
pub const MIN_QUERY_LEN: usize = 3;

/// A search the presentation layer must dispatch to the catalog client.
/// The generation comes back with the outcome so stale responses can be
/// told apart from current ones.
#[derive(Debug)]
pub struct SearchRequest {
    pub term: String,
    pub generation: u64,
    pub cancel: CancellationToken,
}

/// State machine for the search pane: query text, result list, loading
/// flag and inline error, with newest-request-wins slot coordination.
#[derive(Default)]
pub struct SearchController {
    query: String,
    results: Vec<MovieSummary>,
    is_loading: bool,
    error: Option<String>,
    slot: RequestSlot,
}

impl SearchController {
    /// Record a query change. Returns the request to dispatch, or None
    /// when the query is too short to search for.
    pub fn set_query(&mut self, query: impl Into<String>) -> Option<SearchRequest> {
        self.query = query.into();

        if self.query.trim().chars().count() < MIN_QUERY_LEN {
            self.slot.cancel_pending();
            self.results.clear();
            self.error = None;
            self.is_loading = false;
            return None;
        }

        let (generation, cancel) = self.slot.begin();
        self.error = None;
        self.is_loading = true;
        debug!("Searching for {:?} (generation {})", self.query, generation);

        Some(SearchRequest {
            term: self.query.clone(),
            generation,
            cancel,
        })
    }

    /// Apply a finished search. Outcomes for superseded generations are
    /// discarded unconditionally, successful ones included.
    pub fn apply(&mut self, generation: u64, outcome: Result<Vec<MovieSummary>, CatalogError>) {
        if !self.slot.is_current(generation) {
            debug!("Dropping stale search result (generation {})", generation);
            return;
        }

        match outcome {
            Ok(results) => {
                self.results = results;
                self.error = None;
                self.is_loading = false;
            }
            Err(CatalogError::Cancelled) => {
                // Superseded in flight; the newer request owns the state.
            }
            Err(err) => {
                self.results.clear();
                self.error = Some(err.to_string());
                self.is_loading = false;
            }
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[MovieSummary] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
