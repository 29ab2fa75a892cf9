//! AdminDO - Rust Backend Library
//!
//! Private Telegram bridge for administering a single DigitalOcean droplet.
//! It includes:
//! - Remote gateway: Telegram adapter, session gate, reply formatting
//! - Droplet services: DigitalOcean API directory and SSH command execution
//! - Storage layer (JSON config + environment)
//! - Data models and utilities

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use models::settings::BridgeConfig;
pub use storage::config::ConfigService;
pub use utils::error::{AppError, AppResult};
