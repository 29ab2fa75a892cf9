//! JSON Configuration Management
//!
//! Loads the bridge configuration from disk and the environment.
//! Configuration is read once at startup.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::settings::BridgeConfig;
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::config_path;

/// Configuration service for loading bridge settings
#[derive(Debug)]
pub struct ConfigService {
    config_path: Option<PathBuf>,
    config: BridgeConfig,
}

impl ConfigService {
    /// Load configuration from `path` (or ~/.admindo/config.json when it
    /// exists), then apply process environment overrides and validate.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Same as [`ConfigService::load`] with an explicit environment lookup.
    pub fn load_with_env<F>(path: Option<&Path>, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = match path {
            Some(explicit) => {
                if !explicit.exists() {
                    return Err(AppError::config(format!(
                        "Config file not found: {}",
                        explicit.display()
                    )));
                }
                Some(explicit.to_path_buf())
            }
            None => config_path().ok().filter(|p| p.exists()),
        };

        let mut config = match &config_path {
            Some(p) => Self::load_from_file(p)?,
            None => BridgeConfig::default(),
        };

        config
            .apply_env_overrides(lookup)
            .map_err(AppError::config)?;
        config.validate().map_err(AppError::validation)?;

        match &config_path {
            Some(p) => tracing::info!(path = %p.display(), "Configuration loaded"),
            None => tracing::info!("Configuration loaded from environment"),
        }

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> AppResult<BridgeConfig> {
        let content = fs::read_to_string(path)?;
        let config: BridgeConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &BridgeConfig {
        &self.config
    }

    /// File the configuration was read from, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Consume the service, returning the configuration
    pub fn into_config(self) -> BridgeConfig {
        self.config
    }
}
