use color_eyre::Result;

use reelist_core::{JsonFileStore, MemoryStore, WatchedStore, WatchlistManager};

use crate::commands::{catalog_client, load_setup};

pub async fn run(initial_query: Option<String>, ephemeral: bool) -> Result<()> {
    let (paths, config) = load_setup()?;
    let client = catalog_client(&config)?;

    let store: Box<dyn WatchedStore> = if ephemeral || config.storage.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(JsonFileStore::new(paths.watched_file()))
    };
    let watchlist = WatchlistManager::load(store);

    crate::tui::run(client, watchlist, initial_query).await
}
