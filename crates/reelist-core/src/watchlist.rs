use anyhow::Result;
use tracing::{info, warn};

use reelist_models::{WatchedMovie, WatchedSummary};

use crate::store::WatchedStore;

/// Owner of the watched list.
///
/// Hydrated once from the store at startup; every mutation re-serializes
/// the whole list back to the store before returning (write-through).
pub struct WatchlistManager {
    items: Vec<WatchedMovie>,
    store: Box<dyn WatchedStore>,
}

impl WatchlistManager {
    pub fn load(store: Box<dyn WatchedStore>) -> Self {
        let items = match store.load() {
            Ok(items) => items,
            Err(e) => {
                warn!("Failed to load watched list: {}", e);
                Vec::new()
            }
        };
        info!("Watched list hydrated with {} items", items.len());
        Self { items, store }
    }

    /// Append an entry. Identifier uniqueness is the caller's contract:
    /// the detail view never offers "add" for an id already on the list,
    /// and a duplicate added past that gate is kept, not corrected.
    pub fn add(&mut self, movie: WatchedMovie) -> Result<()> {
        self.items.push(movie);
        self.persist()
    }

    /// Remove every entry with the given id. Removing an absent id is a
    /// no-op and does not touch the store.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let before = self.items.len();
        self.items.retain(|m| m.imdb_id != id);
        if self.items.len() == before {
            return Ok(());
        }
        self.persist()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|m| m.imdb_id == id)
    }

    pub fn get(&self, id: &str) -> Option<&WatchedMovie> {
        self.items.iter().find(|m| m.imdb_id == id)
    }

    pub fn items(&self) -> &[WatchedMovie] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary::from_items(&self.items)
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::Utc;

    fn watched(id: &str, user_rating: u8, imdb_rating: f64, runtime: u32) -> WatchedMovie {
        WatchedMovie {
            imdb_id: id.to_string(),
            title: format!("Movie {}", id),
            poster: "N/A".to_string(),
            user_rating,
            imdb_rating,
            runtime,
            year: "2020".to_string(),
            added_at: Utc::now(),
        }
    }

    fn manager_with_store() -> (WatchlistManager, MemoryStore) {
        let store = MemoryStore::new();
        let manager = WatchlistManager::load(Box::new(store.clone()));
        (manager, store)
    }

    #[test]
    fn add_is_write_through() {
        let (mut manager, store) = manager_with_store();
        manager.add(watched("tt001", 8, 7.5, 120)).unwrap();

        assert_eq!(store.load().unwrap().len(), 1);
        assert!(manager.contains("tt001"));
    }

    #[test]
    fn reload_after_add_yields_equal_sequence() {
        let (mut manager, store) = manager_with_store();
        manager.add(watched("tt001", 8, 7.5, 120)).unwrap();
        manager.add(watched("tt002", 6, 0.0, 0)).unwrap();

        let reloaded = WatchlistManager::load(Box::new(store));
        assert_eq!(reloaded.items(), manager.items());
    }

    #[test]
    fn remove_deletes_all_matches_and_is_idempotent() {
        let (mut manager, store) = manager_with_store();
        manager.add(watched("tt001", 8, 7.5, 120)).unwrap();
        manager.add(watched("tt001", 5, 7.5, 120)).unwrap();
        manager.add(watched("tt002", 6, 6.0, 90)).unwrap();

        manager.remove("tt001").unwrap();
        assert!(!manager.contains("tt001"));
        assert_eq!(manager.len(), 1);
        assert_eq!(store.load().unwrap().len(), 1);

        // Absent id: nothing changes.
        manager.remove("tt001").unwrap();
        manager.remove("tt999").unwrap();
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn summary_excludes_removed_items() {
        let (mut manager, _store) = manager_with_store();
        manager.add(watched("tt001", 8, 7.5, 120)).unwrap();
        manager.add(watched("tt002", 6, 0.0, 0)).unwrap();

        let summary = manager.summary();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.avg_imdb_rating, 7.5);
        assert_eq!(summary.avg_user_rating, 7.0);
        assert_eq!(summary.avg_runtime, 120.0);

        manager.remove("tt001").unwrap();
        let summary = manager.summary();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.avg_imdb_rating, 0.0);
        assert_eq!(summary.avg_user_rating, 6.0);
        assert_eq!(summary.avg_runtime, 0.0);
    }

    #[test]
    fn empty_summary_has_no_division_fault() {
        let (manager, _store) = manager_with_store();
        let summary = manager.summary();
        assert_eq!(summary.count, 0);
        assert_eq!(summary.avg_user_rating, 0.0);
    }

    #[test]
    fn duplicate_ids_both_persist() {
        let (mut manager, store) = manager_with_store();
        manager.add(watched("tt001", 8, 7.5, 120)).unwrap();
        manager.add(watched("tt001", 3, 7.5, 120)).unwrap();

        assert_eq!(manager.len(), 2);
        assert_eq!(store.load().unwrap().len(), 2);
    }
}
