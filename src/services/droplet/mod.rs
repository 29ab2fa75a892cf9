//! Droplet Services
//!
//! Everything the bridge does against the managed droplet: directory lookups
//! and power actions through the cloud provider, and shell command execution
//! over SSH.

pub mod digitalocean;
pub mod executor;
pub mod provider;
pub mod ssh;
pub mod types;

pub use digitalocean::DigitalOceanClient;
pub use executor::{RemoteExecutor, ShellConnector, ShellSession};
pub use provider::HostDirectory;
pub use ssh::SshConnector;
pub use types::*;
