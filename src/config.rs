// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::storage::LocalStorage;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Render completed task titles with a strikethrough.
    #[serde(default = "default_true")]
    pub strikethrough_completed: bool,
    /// Show the description line under each task row.
    #[serde(default = "default_true")]
    pub show_descriptions: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strikethrough_completed: true,
            show_descriptions: true,
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        // Explicitly detect missing file so callers can fall back to defaults.
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Helper to detect whether an anyhow::Error indicates that the config
    /// file was missing, as opposed to a syntax or permission problem.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }
        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }
        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }
}
