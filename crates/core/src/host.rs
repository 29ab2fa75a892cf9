//! Host Types
//!
//! The provider-owned host record, the supported power actions and the
//! outcome of a single remote command invocation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Reply text used when a command succeeds without printing anything.
pub const NO_OUTPUT_PLACEHOLDER: &str = "Command executed successfully (no output)";

/// One remote machine as reported by the cloud provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostRecord {
    pub id: u64,
    pub name: String,
    pub status: String,
    /// Public IPv4 address; `None` until the provider assigns one.
    pub ip_address: Option<String>,
    pub region: String,
    pub size: String,
    pub created_at: String,
}

/// Power action accepted by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerAction {
    PowerOn,
    PowerOff,
    Reboot,
}

impl PowerAction {
    /// Action type string used by the provider API.
    pub fn api_name(&self) -> &'static str {
        match self {
            PowerAction::PowerOn => "power_on",
            PowerAction::PowerOff => "power_off",
            PowerAction::Reboot => "reboot",
        }
    }
}

impl fmt::Display for PowerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

impl FromStr for PowerAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" | "power_on" => Ok(PowerAction::PowerOn),
            "off" | "power_off" => Ok(PowerAction::PowerOff),
            "reboot" => Ok(PowerAction::Reboot),
            other => Err(CoreError::parse(format!("unknown power action: {}", other))),
        }
    }
}

/// Outcome of one command invocation. Exactly one of output or error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandResult {
    Output(String),
    Error(String),
}

impl CommandResult {
    pub fn is_error(&self) -> bool {
        matches!(self, CommandResult::Error(_))
    }
}

impl<E: fmt::Display> From<Result<String, E>> for CommandResult {
    fn from(result: Result<String, E>) -> Self {
        match result {
            Ok(output) => CommandResult::Output(output),
            Err(e) => CommandResult::Error(e.to_string()),
        }
    }
}
