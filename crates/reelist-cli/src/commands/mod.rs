pub mod browse;
pub mod clear;
pub mod config;
pub mod list;
pub mod rate;
pub mod remove;
pub mod search;
pub mod show;

/// Bridge anyhow errors from the library crates into the CLI's eyre reports.
pub(crate) fn to_eyre(err: anyhow::Error) -> color_eyre::eyre::Report {
    color_eyre::eyre::eyre!("{:#}", err)
}

pub(crate) fn load_setup() -> color_eyre::Result<(reelist_config::PathManager, reelist_config::Config)>
{
    let paths = reelist_config::PathManager::new().map_err(to_eyre)?;
    let config = reelist_config::Config::load(&paths.config_file()).map_err(to_eyre)?;
    Ok((paths, config))
}

pub(crate) fn catalog_client(
    config: &reelist_config::Config,
) -> color_eyre::Result<reelist_catalog::OmdbClient> {
    let api_key = config.require_api_key().map_err(to_eyre)?;
    Ok(reelist_catalog::OmdbClient::with_base_url(
        api_key,
        config.catalog.base_url.clone(),
    ))
}
