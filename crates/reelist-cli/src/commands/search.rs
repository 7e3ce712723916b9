use color_eyre::Result;
use comfy_table::Table;
use tokio_util::sync::CancellationToken;

use reelist_catalog::CatalogError;
use reelist_core::MIN_QUERY_LEN;

use crate::commands::{catalog_client, load_setup};
use crate::output::Output;

pub async fn run(term: &str, output: &Output) -> Result<()> {
    if term.trim().chars().count() < MIN_QUERY_LEN {
        output.error("Enter at least 3 characters to search.");
        std::process::exit(2);
    }

    let (_paths, config) = load_setup()?;
    let client = catalog_client(&config)?;

    match client.search(term, &CancellationToken::new()).await {
        Ok(results) => {
            if output.is_human() {
                let mut table = Table::new();
                table.load_preset(comfy_table::presets::UTF8_FULL);
                table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
                table.set_header(vec!["Title", "Year", "IMDb ID"]);
                for movie in &results {
                    table.add_row(vec![
                        movie.title.clone(),
                        movie.year.clone(),
                        movie.imdb_id.clone(),
                    ]);
                }
                println!("{table}");
                output.info(format!("Found {} results", results.len()));
            }
            output.data(&serde_json::to_value(&results)?);
            Ok(())
        }
        Err(CatalogError::NotFound) => {
            output.error("Movie not found.");
            std::process::exit(1);
        }
        Err(err) => {
            output.error(err.to_string());
            std::process::exit(1);
        }
    }
}
