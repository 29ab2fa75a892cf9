//! Command Router
//!
//! Parses incoming text messages into structured RemoteCommand variants.

use super::types::RemoteCommand;

/// Reserved prefix marking a directive. Prefixed text is never relayed.
pub const COMMAND_PREFIX: char = '/';

/// Stateless command parser for remote messages.
pub struct CommandRouter;

impl CommandRouter {
    /// Parse incoming message text into a RemoteCommand.
    ///
    /// Supports slash directives and plain text:
    /// - `/help` -> Help
    /// - `/console` -> Console
    /// - `/cancel` -> Cancel
    /// - `/status` -> Status
    /// - `/power <on|off|reboot>` -> Power
    /// - `/droplets` -> Droplets
    /// - Any other `/...` -> Unknown
    /// - Plain text -> Text (trimmed)
    ///
    /// A `@botname` suffix on the directive is ignored. Matching is case-sensitive.
    pub fn parse(text: &str) -> RemoteCommand {
        let text = text.trim();

        let rest = match text.strip_prefix(COMMAND_PREFIX) {
            Some(rest) => rest,
            None => {
                return RemoteCommand::Text {
                    content: text.to_string(),
                }
            }
        };

        let mut args = rest.split_whitespace();
        let head = args.next().unwrap_or("");
        let keyword = head.split('@').next().unwrap_or("");

        match keyword {
            "help" => RemoteCommand::Help,
            "console" => RemoteCommand::Console,
            "cancel" => RemoteCommand::Cancel,
            "status" => RemoteCommand::Status,
            "droplets" => RemoteCommand::Droplets,
            "power" => RemoteCommand::Power {
                action: args.next().and_then(|a| a.parse().ok()),
            },
            _ => RemoteCommand::Unknown {
                directive: head.to_string(),
            },
        }
    }
}

/// Help text displayed when user sends /help
pub const HELP_TEXT: &str = r#"AdminDO Bot
Your DigitalOcean Droplet Administrator

Available commands:
  /help              -- Show this help message
  /console           -- Enter console mode to execute commands
  /cancel            -- Cancel current operation
  /status            -- Show droplet status
  /power <action>    -- Power action: on, off, reboot
  /droplets          -- List droplets on the account

In console mode every plain message is run as a shell command
on the droplet. Use /cancel to leave console mode.
"#;

/// Directive menu registered with the chat platform: (command, description).
pub const BOT_COMMANDS: &[(&str, &str)] = &[
    ("help", "Show available commands"),
    ("console", "Enter console mode to execute commands"),
    ("cancel", "Cancel current operation"),
    ("status", "Show droplet status"),
    ("power", "Power action: on, off, reboot"),
    ("droplets", "List droplets on the account"),
];
