use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use reelist_models::WatchedMovie;

/// Persistent slot for the watched list.
///
/// Implementations overwrite the whole sequence on every save; there are
/// no partial updates and no schema versioning. Malformed stored content
/// is treated as absent, never as a fatal error.
pub trait WatchedStore: Send {
    fn load(&self) -> Result<Vec<WatchedMovie>>;
    fn save(&self, items: &[WatchedMovie]) -> Result<()>;
}

/// JSON file under the user data directory.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl WatchedStore for JsonFileStore {
    fn load(&self) -> Result<Vec<WatchedMovie>> {
        if !self.path.exists() {
            debug!("Watched list file does not exist, starting empty");
            return Ok(Vec::new());
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read watched list file: {}", e);
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str::<Vec<WatchedMovie>>(&content) {
            Ok(items) => {
                debug!("Loaded {} watched items", items.len());
                Ok(items)
            }
            Err(e) => {
                warn!(
                    "Watched list file is malformed ({}), treating as empty",
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, items: &[WatchedMovie]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(items)
            .map_err(|e| anyhow!("Failed to serialize watched list: {}", e))?;
        std::fs::write(&self.path, json)
            .map_err(|e| anyhow!("Failed to write watched list: {}", e))?;
        debug!("Saved {} watched items", items.len());
        Ok(())
    }
}

/// In-memory fake, shared across clones. Used by tests and ephemeral runs.
#[derive(Clone, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<Vec<WatchedMovie>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WatchedStore for MemoryStore {
    fn load(&self) -> Result<Vec<WatchedMovie>> {
        Ok(self.items.lock().expect("store lock poisoned").clone())
    }

    fn save(&self, items: &[WatchedMovie]) -> Result<()> {
        *self.items.lock().expect("store lock poisoned") = items.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn watched(id: &str) -> WatchedMovie {
        WatchedMovie {
            imdb_id: id.to_string(),
            title: "Some Movie".to_string(),
            poster: "N/A".to_string(),
            user_rating: 7,
            imdb_rating: 6.5,
            runtime: 101,
            year: "12 Mar 1999".to_string(),
            added_at: Utc::now(),
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("watched.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data").join("watched.json"));

        let items = vec![watched("tt0000001"), watched("tt0000002")];
        store.save(&items).unwrap();

        assert_eq!(store.load().unwrap(), items);
    }

    #[test]
    fn malformed_content_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watched.json");
        std::fs::write(&path, "{ definitely not a list").unwrap();

        let store = JsonFileStore::new(path);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn memory_store_shares_state_across_clones() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.save(&[watched("tt0000001")]).unwrap();
        assert_eq!(other.load().unwrap().len(), 1);
    }
}
