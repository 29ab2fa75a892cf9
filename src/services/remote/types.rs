//! Remote Control Types
//!
//! Core types for the chat-driven droplet bridge: adapter configuration,
//! parsed directives, inbound messages, outbound replies, gateway status
//! and error handling.

use admindo_core::PowerAction;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Adapter & Configuration Types
// ---------------------------------------------------------------------------

/// Remote adapter type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RemoteAdapterType {
    Telegram,
}

impl fmt::Display for RemoteAdapterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteAdapterType::Telegram => write!(f, "telegram"),
        }
    }
}

/// Telegram-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramAdapterConfig {
    #[serde(skip_serializing, default)]
    pub bot_token: Option<String>,
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
}

fn default_max_message_length() -> usize {
    4000
}

impl Default for TelegramAdapterConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            max_message_length: default_max_message_length(),
        }
    }
}

// ---------------------------------------------------------------------------
// Command Types
// ---------------------------------------------------------------------------

/// Directive parsed from an operator message
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCommand {
    /// /help - Show available commands
    Help,
    /// /console - Enter console mode
    Console,
    /// /cancel - Leave console mode
    Cancel,
    /// /status - Show droplet status
    Status,
    /// /power <on|off|reboot> - `None` when the action is missing or invalid
    Power { action: Option<PowerAction> },
    /// /droplets - List droplets on the account
    Droplets,
    /// Any other prefixed directive; never relayed
    Unknown { directive: String },
    /// Free text; relayed as a shell command while in console mode
    Text { content: String },
}

impl RemoteCommand {
    /// Name used in the audit trail.
    pub fn type_name(&self) -> &'static str {
        match self {
            RemoteCommand::Help => "Help",
            RemoteCommand::Console => "Console",
            RemoteCommand::Cancel => "Cancel",
            RemoteCommand::Status => "Status",
            RemoteCommand::Power { .. } => "Power",
            RemoteCommand::Droplets => "Droplets",
            RemoteCommand::Unknown { .. } => "Unknown",
            RemoteCommand::Text { .. } => "Text",
        }
    }
}

// ---------------------------------------------------------------------------
// Status Types
// ---------------------------------------------------------------------------

/// Gateway runtime status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayStatus {
    pub running: bool,
    pub adapter_type: RemoteAdapterType,
    pub connected_since: Option<String>,
    pub active_console_sessions: u32,
    pub total_messages_processed: u64,
    pub last_message_at: Option<String>,
}

impl Default for GatewayStatus {
    fn default() -> Self {
        Self {
            running: false,
            adapter_type: RemoteAdapterType::Telegram,
            connected_since: None,
            active_console_sessions: 0,
            total_messages_processed: 0,
            last_message_at: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Message Types
// ---------------------------------------------------------------------------

/// Incoming message from remote platform
#[derive(Debug, Clone)]
pub struct IncomingRemoteMessage {
    pub adapter_type: RemoteAdapterType,
    pub chat_id: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub text: String,
    pub message_id: i64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// How a reply must be rendered by the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFormat {
    /// Ordinary text
    Plain,
    /// Verbatim block; markup characters must not be interpreted
    Literal,
}

/// One reply to send back to the operator's chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingReply {
    pub text: String,
    pub format: ReplyFormat,
}

impl OutgoingReply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: ReplyFormat::Plain,
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: ReplyFormat::Literal,
        }
    }
}

// ---------------------------------------------------------------------------
// Error Types
// ---------------------------------------------------------------------------

/// Remote control error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteError {
    #[error("Remote gateway is already running")]
    AlreadyRunning,

    #[error("Failed to send message: {0}")]
    SendFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
