use color_eyre::Result;

use reelist_config::PathManager;

use crate::commands::to_eyre;
use crate::output::Output;

pub fn run(watched: bool, all: bool, output: &Output) -> Result<()> {
    if !watched && !all {
        output.error("Nothing to clear: pass --watched or --all");
        std::process::exit(2);
    }

    let paths = PathManager::new().map_err(to_eyre)?;

    let watched_file = paths.watched_file();
    if watched_file.exists() {
        std::fs::remove_file(&watched_file)?;
        output.success("Deleted the watched list");
    } else {
        output.info("No watched list stored");
    }

    if all {
        let config_file = paths.config_file();
        if config_file.exists() {
            std::fs::remove_file(&config_file)?;
            output.success("Deleted the configuration file");
        }
    }

    Ok(())
}
