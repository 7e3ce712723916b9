use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base path override for containers, defaulting to "/app".
pub fn container_base_path() -> Option<PathBuf> {
    std::env::var("REELIST_BASE_PATH").map(PathBuf::from).ok()
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        if let Some(base) = container_base_path() {
            return Ok(Self::from_base(base));
        }

        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("reelist");

        Ok(Self::from_base(base_dir))
    }

    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// The single well-known slot holding the watched list.
    pub fn watched_file(&self) -> PathBuf {
        self.data_dir.join("watched.json")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("reelist.log")
    }
}
