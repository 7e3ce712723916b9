use tokio_util::sync::CancellationToken;
use tracing::debug;

use reelist_catalog::CatalogError;
use reelist_models::{MovieDetail, WatchedMovie};

use crate::slot::RequestSlot;

/// A detail lookup the presentation layer must dispatch.
#[derive(Debug)]
pub struct DetailRequest {
    pub id: String,
    pub generation: u64,
    pub cancel: CancellationToken,
}

/// State machine for the detail panel: current selection, loaded detail,
/// pending rating, loading flag and inline error.
#[derive(Default)]
pub struct DetailController {
    selected_id: Option<String>,
    detail: Option<MovieDetail>,
    is_loading: bool,
    error: Option<String>,
    pending_rating: u8,
    slot: RequestSlot,
}

impl DetailController {
    /// Select an id. Re-selecting the open id toggles the panel closed
    /// (returns None); anything else replaces the selection and returns
    /// the lookup to dispatch.
    pub fn select(&mut self, id: &str) -> Option<DetailRequest> {
        if self.selected_id.as_deref() == Some(id) {
            self.close();
            return None;
        }

        self.selected_id = Some(id.to_string());
        self.detail = None;
        self.pending_rating = 0;
        self.error = None;
        self.is_loading = true;

        let (generation, cancel) = self.slot.begin();
        debug!("Fetching detail for {} (generation {})", id, generation);

        Some(DetailRequest {
            id: id.to_string(),
            generation,
            cancel,
        })
    }

    /// Close the panel and cancel any in-flight lookup. Bound to the
    /// explicit back control and to Escape anywhere in the UI.
    pub fn close(&mut self) {
        self.slot.cancel_pending();
        self.selected_id = None;
        self.detail = None;
        self.error = None;
        self.pending_rating = 0;
        self.is_loading = false;
    }

    pub fn apply(&mut self, generation: u64, outcome: Result<MovieDetail, CatalogError>) {
        if !self.slot.is_current(generation) {
            debug!("Dropping stale detail result (generation {})", generation);
            return;
        }

        match outcome {
            Ok(detail) => {
                self.detail = Some(detail);
                self.is_loading = false;
            }
            Err(CatalogError::Cancelled) => {}
            Err(err) => {
                self.error = Some(err.to_string());
                self.is_loading = false;
            }
        }
    }

    /// Store the pending rating. Only possible while a detail is loaded;
    /// the watchlist is untouched until the add is confirmed.
    pub fn set_rating(&mut self, rating: u8) -> bool {
        if self.detail.is_none() {
            return false;
        }
        self.pending_rating = rating.clamp(1, 10);
        true
    }

    pub fn can_add(&self) -> bool {
        self.detail.is_some() && self.pending_rating > 0
    }

    /// Build the watched entry for the current selection and close the
    /// panel. Yields None until a detail is loaded and a rating set; the
    /// caller checks the id is not already on the list before offering
    /// this, then hands the entry to [`crate::WatchlistManager::add`].
    pub fn take_added(&mut self) -> Option<WatchedMovie> {
        if self.pending_rating == 0 {
            return None;
        }
        let id = self.selected_id.clone()?;
        let detail = self.detail.as_ref()?;

        // The selection id is authoritative over the payload's.
        let mut movie = WatchedMovie::from_detail(detail, self.pending_rating);
        movie.imdb_id = id;

        self.close();
        Some(movie)
    }

    pub fn is_open(&self) -> bool {
        self.selected_id.is_some()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        self.detail.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pending_rating(&self) -> u8 {
        self.pending_rating
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_for(id: &str) -> MovieDetail {
        MovieDetail {
            imdb_id: id.to_string(),
            title: "Inception".to_string(),
            poster: "https://example.com/p.jpg".to_string(),
            runtime: "148 min".to_string(),
            imdb_rating: "8.8".to_string(),
            plot: "Dreams within dreams.".to_string(),
            released: "16 Jul 2010".to_string(),
            director: "Christopher Nolan".to_string(),
            genre: "Sci-Fi".to_string(),
            actors: "Leonardo DiCaprio".to_string(),
        }
    }

    fn open_with_detail(controller: &mut DetailController, id: &str) {
        let request = controller.select(id).unwrap();
        controller.apply(request.generation, Ok(detail_for(id)));
    }

    #[test]
    fn selecting_same_id_toggles_closed() {
        let mut controller = DetailController::default();
        open_with_detail(&mut controller, "tt1");
        assert!(controller.is_open());

        assert!(controller.select("tt1").is_none());
        assert!(!controller.is_open());
        assert!(controller.detail().is_none());
    }

    #[test]
    fn selecting_other_id_replaces_selection() {
        let mut controller = DetailController::default();
        let first = controller.select("tt1").unwrap();
        controller.apply(first.generation, Ok(detail_for("tt1")));
        controller.set_rating(8);

        let second = controller.select("tt2").unwrap();
        assert_eq!(controller.selected_id(), Some("tt2"));
        assert!(controller.detail().is_none());
        assert_eq!(controller.pending_rating(), 0);
        assert!(controller.is_loading());

        controller.apply(second.generation, Ok(detail_for("tt2")));
        assert_eq!(controller.detail().unwrap().imdb_id, "tt2");
    }

    #[test]
    fn stale_detail_is_discarded() {
        let mut controller = DetailController::default();
        let first = controller.select("tt1").unwrap();
        let second = controller.select("tt2").unwrap();
        assert!(first.cancel.is_cancelled());

        controller.apply(first.generation, Ok(detail_for("tt1")));
        assert!(controller.detail().is_none());

        controller.apply(second.generation, Ok(detail_for("tt2")));
        assert_eq!(controller.detail().unwrap().imdb_id, "tt2");
    }

    #[test]
    fn rating_requires_loaded_detail() {
        let mut controller = DetailController::default();
        assert!(!controller.set_rating(8));

        let request = controller.select("tt1").unwrap();
        assert!(!controller.set_rating(8));

        controller.apply(request.generation, Ok(detail_for("tt1")));
        assert!(controller.set_rating(8));
        assert_eq!(controller.pending_rating(), 8);
    }

    #[test]
    fn add_is_gated_on_rating() {
        let mut controller = DetailController::default();
        open_with_detail(&mut controller, "tt1");

        assert!(!controller.can_add());
        assert!(controller.take_added().is_none());
        assert!(controller.is_open());

        controller.set_rating(9);
        let movie = controller.take_added().unwrap();
        assert_eq!(movie.imdb_id, "tt1");
        assert_eq!(movie.user_rating, 9);
        assert_eq!(movie.imdb_rating, 8.8);
        assert_eq!(movie.runtime, 148);
        assert_eq!(movie.year, "16 Jul 2010");

        // Adding closes the panel.
        assert!(!controller.is_open());
    }

    #[test]
    fn unparsable_provider_fields_fall_back_to_zero() {
        let mut controller = DetailController::default();
        let request = controller.select("tt1").unwrap();
        let mut detail = detail_for("tt1");
        detail.runtime = "N/A".to_string();
        detail.imdb_rating = "N/A".to_string();
        controller.apply(request.generation, Ok(detail));

        controller.set_rating(6);
        let movie = controller.take_added().unwrap();
        assert_eq!(movie.imdb_rating, 0.0);
        assert_eq!(movie.runtime, 0);
    }

    #[test]
    fn transport_failure_surfaces_inline() {
        let mut controller = DetailController::default();
        let request = controller.select("tt1").unwrap();
        controller.apply(request.generation, Err(CatalogError::transport()));

        assert_eq!(
            controller.error(),
            Some("Something went wrong with fetching movies.")
        );
        assert!(!controller.is_loading());
        assert!(controller.is_open());
    }

    #[test]
    fn cancelled_outcome_changes_nothing() {
        let mut controller = DetailController::default();
        let request = controller.select("tt1").unwrap();
        controller.apply(request.generation, Err(CatalogError::Cancelled));

        assert!(controller.is_loading());
        assert!(controller.error().is_none());
    }

    #[test]
    fn close_cancels_inflight_lookup() {
        let mut controller = DetailController::default();
        let request = controller.select("tt1").unwrap();
        controller.close();

        assert!(request.cancel.is_cancelled());
        assert!(!controller.is_open());
        assert!(!controller.is_loading());
    }
}
