//! Response Mapper
//!
//! Converts command results, host records and errors into operator-facing
//! replies, and renders literal blocks for Telegram MarkdownV2.

use admindo_core::{CommandResult, HostRecord, NO_OUTPUT_PLACEHOLDER};

use super::types::OutgoingReply;

/// Reply to any message from an unauthorized sender.
pub const ACCESS_DENIED: &str = "\u{26D4} Access denied. This bot is private.";

/// Acknowledgement on entering console mode.
pub const CONSOLE_ENTERED: &str =
    "\u{1F4DD} Enter the command you want to execute on the droplet.\nUse /cancel to exit console mode.";

/// Acknowledgement on leaving console mode.
pub const CONSOLE_EXITED: &str = "Console mode deactivated. \u{274C}";

/// Reply to /cancel outside console mode.
pub const NOTHING_TO_CANCEL: &str = "Nothing to cancel.";

/// Sent after every relayed command, whatever its outcome.
pub const NEXT_COMMAND_PROMPT: &str = "Enter another command or use /cancel to exit console mode.";

/// Reply to /power without a recognized action.
pub const INVALID_POWER_ACTION: &str = "Invalid action. Use on, off, or reboot";

/// Response formatter for remote platform display.
pub struct ResponseMapper;

impl ResponseMapper {
    /// Format the result of a relayed command.
    ///
    /// Output is sent as a literal block; empty output becomes the placeholder.
    pub fn format_command_result(result: &CommandResult) -> OutgoingReply {
        match result {
            CommandResult::Error(message) => OutgoingReply::plain(Self::format_error(message)),
            CommandResult::Output(output) if output.is_empty() => {
                OutgoingReply::literal(NO_OUTPUT_PLACEHOLDER)
            }
            CommandResult::Output(output) => OutgoingReply::literal(output.clone()),
        }
    }

    /// Format an error for display.
    pub fn format_error(message: impl std::fmt::Display) -> String {
        format!("\u{274C} Error: {}", message)
    }

    /// Format a host record for /status.
    pub fn format_host_status(host: &HostRecord) -> String {
        format!(
            "Droplet: {}\nStatus: {}\nIP address: {}\nRegion: {}\nSize: {}\nCreated: {}",
            host.name,
            host.status,
            host.ip_address.as_deref().unwrap_or("none"),
            host.region,
            host.size,
            host.created_at
        )
    }

    /// Format the account's droplets for /droplets.
    pub fn format_host_list(hosts: &[HostRecord]) -> String {
        if hosts.is_empty() {
            return "No droplets found.".to_string();
        }
        let mut text = "All Droplets:\n".to_string();
        for host in hosts {
            text.push_str(&format!(
                "- {} ({})\n",
                host.name,
                host.ip_address.as_deref().unwrap_or("no IP")
            ));
        }
        text
    }

    /// Wrap text in a MarkdownV2 pre block.
    pub fn render_literal_block(text: &str) -> String {
        format!("```\n{}\n```", Self::escape_literal(text))
    }

    /// Escape the characters MarkdownV2 treats specially inside pre blocks.
    pub fn escape_literal(text: &str) -> String {
        let mut result = String::with_capacity(text.len() + 8);
        for ch in text.chars() {
            if ch == '`' || ch == '\\' {
                result.push('\\');
            }
            result.push(ch);
        }
        result
    }
}
