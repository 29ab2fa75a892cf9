//! Console Session Types
//!
//! Identity of a chat-platform sender and the two-state console mode
//! tracked for each operator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque chat-platform sender identifier.
///
/// Compared by exact equality against the single authorized identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorId(pub i64);

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OperatorId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Per-operator console mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// No console session; free text is ignored.
    #[default]
    Idle,
    /// Console mode: free text is relayed to the droplet as a shell command.
    AwaitingCommand,
}

impl SessionMode {
    pub fn is_console(&self) -> bool {
        matches!(self, SessionMode::AwaitingCommand)
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMode::Idle => write!(f, "idle"),
            SessionMode::AwaitingCommand => write!(f, "awaiting_command"),
        }
    }
}
