use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// OMDb API key; the OMDB_API_KEY environment variable wins over this.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Keep the watched list in memory only; nothing is written to disk.
    #[serde(default)]
    pub ephemeral: bool,
}

fn default_base_url() -> String {
    "https://www.omdbapi.com/".to_string()
}

impl Config {
    /// Load from a TOML file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn api_key(&self) -> Option<String> {
        std::env::var("OMDB_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| {
                let key = self.catalog.api_key.trim();
                (!key.is_empty()).then(|| key.to_string())
            })
    }

    pub fn require_api_key(&self) -> Result<String> {
        self.api_key().ok_or_else(|| {
            anyhow::anyhow!(
                "No OMDb API key configured. Run `reelist config set-key <key>` \
                 or set OMDB_API_KEY."
            )
        })
    }
}
