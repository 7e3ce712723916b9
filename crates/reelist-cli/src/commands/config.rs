use color_eyre::Result;
use comfy_table::{Cell, Table};
use serde_json::json;

use crate::commands::{load_setup, to_eyre};
use crate::output::Output;
use crate::ConfigCommands;

pub fn run(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show(full, output),
        ConfigCommands::SetKey { key } => set_key(key, output),
        ConfigCommands::Path => path(output),
    }
}

fn show(full: bool, output: &Output) -> Result<()> {
    let (paths, config) = load_setup()?;

    let key_from_env = std::env::var("OMDB_API_KEY").is_ok();
    let key_display = match config.api_key() {
        Some(key) if full => key,
        Some(key) => mask_string(&key),
        None => "(not set)".to_string(),
    };

    if output.is_human() {
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        table.add_row(vec![
            Cell::new("API Key").add_attribute(comfy_table::Attribute::Bold),
            Cell::new(if key_from_env {
                format!("{} (from OMDB_API_KEY)", key_display)
            } else {
                key_display.clone()
            }),
        ]);
        table.add_row(vec![
            Cell::new("Base URL").add_attribute(comfy_table::Attribute::Bold),
            Cell::new(&config.catalog.base_url),
        ]);
        table.add_row(vec![
            Cell::new("Ephemeral").add_attribute(comfy_table::Attribute::Bold),
            Cell::new(config.storage.ephemeral.to_string()),
        ]);
        table.add_row(vec![
            Cell::new("Config File").add_attribute(comfy_table::Attribute::Bold),
            Cell::new(paths.config_file().display().to_string()),
        ]);
        println!("{table}");
    }

    output.data(&json!({
        "api_key": key_display,
        "api_key_from_env": key_from_env,
        "base_url": config.catalog.base_url,
        "ephemeral": config.storage.ephemeral,
        "config_file": paths.config_file().display().to_string(),
    }));
    Ok(())
}

fn set_key(key: Option<String>, output: &Output) -> Result<()> {
    let (paths, mut config) = load_setup()?;

    let key = match key {
        Some(key) => key,
        None => dialoguer::Input::<String>::new()
            .with_prompt("OMDb API key")
            .interact_text()?,
    };

    config.catalog.api_key = key.trim().to_string();
    config.save(&paths.config_file()).map_err(to_eyre)?;
    output.success("API key saved");
    Ok(())
}

fn path(output: &Output) -> Result<()> {
    let (paths, _config) = load_setup()?;
    output.info(format!("Config file:  {}", paths.config_file().display()));
    output.info(format!("Watched list: {}", paths.watched_file().display()));
    output.info(format!("Log dir:      {}", paths.log_dir().display()));
    output.data(&json!({
        "config_file": paths.config_file().display().to_string(),
        "watched_file": paths.watched_file().display().to_string(),
        "log_dir": paths.log_dir().display().to_string(),
    }));
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.len() <= 4 {
        "*".repeat(s.len())
    } else {
        format!("{}{}", &s[..2], "*".repeat(s.len() - 2))
    }
}
