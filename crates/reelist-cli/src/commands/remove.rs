use color_eyre::Result;

use reelist_core::{JsonFileStore, WatchlistManager};

use crate::commands::{load_setup, to_eyre};
use crate::output::Output;

pub fn run(id: &str, output: &Output) -> Result<()> {
    let (paths, _config) = load_setup()?;
    let mut manager = WatchlistManager::load(Box::new(JsonFileStore::new(paths.watched_file())));

    let Some(movie) = manager.get(id) else {
        // Removing an absent id is a no-op, not an error.
        output.warn(format!("{} is not on your watched list", id));
        return Ok(());
    };

    let title = movie.title.clone();
    manager.remove(id).map_err(to_eyre)?;
    output.success(format!("Removed {}", title));
    Ok(())
}
