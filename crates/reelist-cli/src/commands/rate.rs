use color_eyre::Result;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use reelist_core::{JsonFileStore, WatchlistManager};
use reelist_models::WatchedMovie;

use crate::commands::{catalog_client, load_setup, to_eyre};
use crate::output::Output;

pub async fn run(id: &str, rating: u8, output: &Output) -> Result<()> {
    let (paths, config) = load_setup()?;
    let client = catalog_client(&config)?;
    let mut manager = WatchlistManager::load(Box::new(JsonFileStore::new(paths.watched_file())));

    if let Some(existing) = manager.get(id) {
        output.error(format!(
            "{} is already on your watched list (your rating: {})",
            existing.title, existing.user_rating
        ));
        std::process::exit(1);
    }

    match client.lookup(id, &CancellationToken::new()).await {
        Ok(detail) => {
            let movie = WatchedMovie::from_detail(&detail, rating);
            let title = movie.title.clone();
            manager.add(movie).map_err(to_eyre)?;

            output.success(format!("Added {} (your rating: {})", title, rating));
            output.data(&json!({
                "added": manager.get(id),
                "summary": manager.summary(),
            }));
            Ok(())
        }
        Err(err) => {
            output.error(err.to_string());
            std::process::exit(1);
        }
    }
}
