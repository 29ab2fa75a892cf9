//! Cross-Platform Path Utilities
//!
//! Functions for resolving the bridge's configuration directory (~/.admindo/).

use std::path::PathBuf;

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the AdminDO directory (~/.admindo/)
pub fn admindo_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".admindo"))
}

/// Get the default config file path (~/.admindo/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(admindo_dir()?.join("config.json"))
}
