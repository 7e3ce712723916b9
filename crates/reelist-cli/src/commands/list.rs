use color_eyre::Result;
use comfy_table::Table;
use serde_json::json;

use reelist_core::{JsonFileStore, WatchlistManager};

use crate::commands::load_setup;
use crate::output::Output;

pub fn run(output: &Output) -> Result<()> {
    let (paths, _config) = load_setup()?;
    let manager = WatchlistManager::load(Box::new(JsonFileStore::new(paths.watched_file())));
    let summary = manager.summary();

    if output.is_human() {
        if manager.is_empty() {
            output.info("Your watched list is empty.");
            return Ok(());
        }

        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        table.set_header(vec!["Title", "Year", "Your rating", "IMDb", "Runtime", "IMDb ID"]);
        for movie in manager.items() {
            table.add_row(vec![
                movie.title.clone(),
                movie.year.clone(),
                movie.user_rating.to_string(),
                if movie.imdb_rating > 0.0 {
                    format!("{:.1}", movie.imdb_rating)
                } else {
                    "N/A".to_string()
                },
                if movie.runtime > 0 {
                    format!("{} min", movie.runtime)
                } else {
                    "N/A".to_string()
                },
                movie.imdb_id.clone(),
            ]);
        }
        println!("{table}");
        output.info(format!(
            "{} movies · avg IMDb rating {:.2} · avg your rating {:.2} · avg runtime {:.0} min",
            summary.count, summary.avg_imdb_rating, summary.avg_user_rating, summary.avg_runtime
        ));
    }

    output.data(&json!({
        "items": manager.items(),
        "summary": summary,
    }));
    Ok(())
}
