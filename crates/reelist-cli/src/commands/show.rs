use color_eyre::Result;
use owo_colors::OwoColorize;
use tokio_util::sync::CancellationToken;

use crate::commands::{catalog_client, load_setup};
use crate::output::Output;

pub async fn run(id: &str, output: &Output) -> Result<()> {
    let (_paths, config) = load_setup()?;
    let client = catalog_client(&config)?;

    match client.lookup(id, &CancellationToken::new()).await {
        Ok(detail) => {
            if output.is_human() {
                println!("{}", detail.title.bold());
                println!("{} · {}", detail.released, detail.runtime);
                println!("{}", detail.genre);
                println!("★ {} IMDb rating", detail.imdb_rating);
                println!();
                println!("{}", detail.plot.italic());
                println!();
                println!("Starring {}", detail.actors);
                println!("Directed by {}", detail.director);
            }
            output.data(&serde_json::to_value(&detail)?);
            Ok(())
        }
        Err(err) => {
            output.error(err.to_string());
            std::process::exit(1);
        }
    }
}
