//! Droplet Service Types
//!
//! Provider and SSH configuration, provider errors, and the error taxonomy
//! for remote command execution.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Configuration Types
// ---------------------------------------------------------------------------

/// DigitalOcean API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitalOceanConfig {
    #[serde(skip_serializing, default)]
    pub api_token: Option<String>,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_api_base_url() -> String {
    "https://api.digitalocean.com".to_string()
}

impl Default for DigitalOceanConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            api_base_url: default_api_base_url(),
        }
    }
}

/// How the SSH client treats the server's host key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HostKeyPolicy {
    /// Accept any host key on first contact without persisting it.
    #[default]
    AcceptAny,
    /// Require the key to be present in ~/.ssh/known_hosts.
    Strict,
}

impl std::str::FromStr for HostKeyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accept_any" => Ok(HostKeyPolicy::AcceptAny),
            "strict" => Ok(HostKeyPolicy::Strict),
            other => Err(format!(
                "Invalid host key policy: {}. Must be 'accept_any' or 'strict'",
                other
            )),
        }
    }
}

/// SSH connection settings shared by every command invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshConfig {
    #[serde(default = "default_ssh_user")]
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    #[serde(default = "default_ssh_port")]
    pub port: u16,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub host_key_policy: HostKeyPolicy,
}

fn default_ssh_user() -> String {
    "root".to_string()
}

fn default_ssh_port() -> u16 {
    22
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            username: default_ssh_user(),
            password: None,
            port: default_ssh_port(),
            connect_timeout_secs: default_connect_timeout_secs(),
            host_key_policy: HostKeyPolicy::AcceptAny,
        }
    }
}

// ---------------------------------------------------------------------------
// Execution Types
// ---------------------------------------------------------------------------

/// Fully captured streams of one remote command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: Option<u32>,
}

// ---------------------------------------------------------------------------
// Error Types
// ---------------------------------------------------------------------------

/// Errors from the cloud provider directory.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("Droplet {0} not found")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Http(err.to_string())
    }
}

/// Remote execution failures. `Display` is the text shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecError {
    /// Host name did not resolve in the directory.
    #[error("{0} not found")]
    NotFound(String),

    /// Transport or authentication failure before the command was sent.
    #[error("Failed to connect: {0}")]
    ConnectFailure(String),

    /// The command wrote to standard error.
    #[error("{0}")]
    RemoteError(String),

    #[error("Command execution failed: {0}")]
    Unclassified(String),
}
