use std::sync::mpsc::Sender;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::widgets::ListState;
use tokio::runtime::Handle;
use tracing::warn;

use reelist_catalog::{CatalogError, OmdbClient};
use reelist_core::{
    DetailController, DetailRequest, SearchController, SearchRequest, WatchlistManager,
};
use reelist_models::{MovieDetail, MovieSummary};

/// Fetch completions delivered back to the event loop. The generation is
/// the slot generation that issued the request; the controllers discard
/// anything stale.
pub enum FetchMessage {
    Search {
        generation: u64,
        outcome: Result<Vec<MovieSummary>, CatalogError>,
    },
    Detail {
        generation: u64,
        outcome: Result<MovieDetail, CatalogError>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Results,
    Watched,
}

pub struct BrowseApp {
    pub search: SearchController,
    pub detail: DetailController,
    pub watchlist: WatchlistManager,
    pub pane: Pane,
    pub results_state: ListState,
    pub watched_state: ListState,
    /// Transient footer message (e.g. a failed store write).
    pub status: Option<String>,
    catalog: OmdbClient,
    runtime: Handle,
    tx: Sender<FetchMessage>,
    should_quit: bool,
}

impl BrowseApp {
    pub fn new(
        catalog: OmdbClient,
        watchlist: WatchlistManager,
        runtime: Handle,
        tx: Sender<FetchMessage>,
    ) -> Self {
        Self {
            search: SearchController::default(),
            detail: DetailController::default(),
            watchlist,
            pane: Pane::Results,
            results_state: ListState::default(),
            watched_state: ListState::default(),
            status: None,
            catalog,
            runtime,
            tx,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.status = None;

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.should_quit = true;
            return;
        }

        // Escape closes the open detail view from anywhere.
        if self.detail.is_open() {
            self.handle_detail_key(key);
            return;
        }

        match self.pane {
            Pane::Results => self.handle_results_key(key),
            Pane::Watched => self.handle_watched_key(key),
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                let mut query = self.search.query().to_string();
                query.push(c);
                self.set_query(query);
            }
            KeyCode::Backspace => {
                let mut query = self.search.query().to_string();
                query.pop();
                self.set_query(query);
            }
            KeyCode::Up => move_selection(&mut self.results_state, self.search.results().len(), -1),
            KeyCode::Down => move_selection(&mut self.results_state, self.search.results().len(), 1),
            KeyCode::Enter => self.open_selected_result(),
            KeyCode::Tab => self.pane = Pane::Watched,
            _ => {}
        }
    }

    fn handle_watched_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('d') | KeyCode::Delete => self.remove_selected_watched(),
            KeyCode::Up => move_selection(&mut self.watched_state, self.watchlist.len(), -1),
            KeyCode::Down => move_selection(&mut self.watched_state, self.watchlist.len(), 1),
            KeyCode::Enter => self.open_selected_watched(),
            KeyCode::Tab => self.pane = Pane::Results,
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Left => self.detail.close(),
            KeyCode::Char(c @ '0'..='9') => {
                let already_watched = self
                    .detail
                    .selected_id()
                    .is_some_and(|id| self.watchlist.contains(id));
                if !already_watched {
                    let rating = if c == '0' { 10 } else { c as u8 - b'0' };
                    self.detail.set_rating(rating);
                }
            }
            KeyCode::Enter | KeyCode::Char('a') => self.confirm_add(),
            _ => {}
        }
    }

    /// Route a query change through the search controller, dispatching
    /// the returned request if any. A query change also closes any open
    /// detail view.
    pub fn set_query(&mut self, query: String) {
        if self.detail.is_open() {
            self.detail.close();
        }
        if let Some(request) = self.search.set_query(query) {
            self.dispatch_search(request);
        }
        if self.search.results().is_empty() {
            self.results_state.select(None);
        }
    }

    fn open_selected_result(&mut self) {
        let Some(index) = self.results_state.selected() else {
            return;
        };
        let Some(movie) = self.search.results().get(index) else {
            return;
        };
        let id = movie.imdb_id.clone();
        if let Some(request) = self.detail.select(&id) {
            self.dispatch_detail(request);
        }
    }

    fn open_selected_watched(&mut self) {
        let Some(index) = self.watched_state.selected() else {
            return;
        };
        let Some(movie) = self.watchlist.items().get(index) else {
            return;
        };
        let id = movie.imdb_id.clone();
        if let Some(request) = self.detail.select(&id) {
            self.dispatch_detail(request);
        }
    }

    fn confirm_add(&mut self) {
        let Some(id) = self.detail.selected_id() else {
            return;
        };
        // Already on the list: the panel shows the stored rating instead
        // of offering "add".
        if self.watchlist.contains(id) {
            return;
        }
        if let Some(movie) = self.detail.take_added() {
            let title = movie.title.clone();
            if let Err(e) = self.watchlist.add(movie) {
                warn!("Failed to persist watched list: {}", e);
                self.status = Some(format!("Failed to save watched list: {e}"));
            } else {
                self.status = Some(format!("Added {title} to your watched list"));
            }
        }
    }

    fn remove_selected_watched(&mut self) {
        let Some(index) = self.watched_state.selected() else {
            return;
        };
        let Some(movie) = self.watchlist.items().get(index) else {
            return;
        };
        let id = movie.imdb_id.clone();
        let title = movie.title.clone();
        if let Err(e) = self.watchlist.remove(&id) {
            warn!("Failed to persist watched list: {}", e);
            self.status = Some(format!("Failed to save watched list: {e}"));
        } else {
            self.status = Some(format!("Removed {title}"));
        }
        clamp_selection(&mut self.watched_state, self.watchlist.len());
    }

    pub fn apply_message(&mut self, message: FetchMessage) {
        match message {
            FetchMessage::Search { generation, outcome } => {
                self.search.apply(generation, outcome);
                clamp_selection(&mut self.results_state, self.search.results().len());
            }
            FetchMessage::Detail { generation, outcome } => {
                self.detail.apply(generation, outcome);
            }
        }
    }

    fn dispatch_search(&self, request: SearchRequest) {
        let catalog = self.catalog.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = catalog.search(&request.term, &request.cancel).await;
            let _ = tx.send(FetchMessage::Search {
                generation: request.generation,
                outcome,
            });
        });
    }

    fn dispatch_detail(&self, request: DetailRequest) {
        let catalog = self.catalog.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = catalog.lookup(&request.id, &request.cancel).await;
            let _ = tx.send(FetchMessage::Detail {
                generation: request.generation,
                outcome,
            });
        });
    }
}

fn move_selection(state: &mut ListState, len: usize, delta: i64) {
    if len == 0 {
        state.select(None);
        return;
    }
    let current = state.selected().unwrap_or(0) as i64;
    let next = (current + delta).clamp(0, len as i64 - 1) as usize;
    state.select(Some(next));
}

fn clamp_selection(state: &mut ListState, len: usize) {
    if len == 0 {
        state.select(None);
    } else {
        let selected = state.selected().unwrap_or(0).min(len - 1);
        state.select(Some(selected));
    }
}
