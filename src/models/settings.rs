//! Settings Models
//!
//! Bridge configuration stored in config.json and overridable from the
//! environment.

use serde::{Deserialize, Serialize};

use crate::services::droplet::{DigitalOceanConfig, HostKeyPolicy, SshConfig};
use crate::services::remote::TelegramAdapterConfig;
use admindo_core::{OperatorId, ProxyConfig};

/// Smallest and largest accepted chat message limit.
const MESSAGE_LENGTH_RANGE: std::ops::RangeInclusive<usize> = 100..=4096;

/// Bridge configuration stored in config.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Telegram bot settings
    #[serde(default)]
    pub telegram: TelegramAdapterConfig,
    /// The only chat identity allowed to use the bot
    #[serde(default)]
    pub authorized_user_id: OperatorId,
    /// Name of the droplet commands are relayed to
    #[serde(default)]
    pub droplet_name: Option<String>,
    /// DigitalOcean API settings
    #[serde(default)]
    pub digitalocean: DigitalOceanConfig,
    /// SSH settings for command execution
    #[serde(default)]
    pub ssh: SshConfig,
    /// Optional proxy for the chat platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
}

impl BridgeConfig {
    /// Apply environment overrides through `lookup`.
    ///
    /// Recognized keys: BOT_TOKEN, DROPLET_NAME, DO_TOKEN, SSH_USER,
    /// SSH_PASSWORD, SSH_PORT, AUTHORIZED_USER_ID, SSH_HOST_KEY_POLICY.
    /// Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get("BOT_TOKEN") {
            self.telegram.bot_token = Some(token);
        }
        if let Some(name) = get("DROPLET_NAME") {
            self.droplet_name = Some(name);
        }
        if let Some(token) = get("DO_TOKEN") {
            self.digitalocean.api_token = Some(token);
        }
        if let Some(user) = get("SSH_USER") {
            self.ssh.username = user;
        }
        if let Some(password) = get("SSH_PASSWORD") {
            self.ssh.password = Some(password);
        }
        if let Some(port) = get("SSH_PORT") {
            self.ssh.port = port
                .trim()
                .parse()
                .map_err(|_| format!("Invalid SSH_PORT: {}", port))?;
        }
        if let Some(id) = get("AUTHORIZED_USER_ID") {
            let id: i64 = id
                .trim()
                .parse()
                .map_err(|_| format!("Invalid AUTHORIZED_USER_ID: {}", id))?;
            self.authorized_user_id = OperatorId(id);
        }
        if let Some(policy) = get("SSH_HOST_KEY_POLICY") {
            self.ssh.host_key_policy = policy.trim().parse::<HostKeyPolicy>()?;
        }
        Ok(())
    }

    /// Droplet name, empty when unset.
    pub fn droplet_name(&self) -> &str {
        self.droplet_name.as_deref().unwrap_or_default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if is_blank(&self.telegram.bot_token) {
            return Err("Telegram bot token is required (BOT_TOKEN)".to_string());
        }
        if is_blank(&self.droplet_name) {
            return Err("Droplet name is required (DROPLET_NAME)".to_string());
        }
        if is_blank(&self.digitalocean.api_token) {
            return Err("DigitalOcean API token is required (DO_TOKEN)".to_string());
        }
        if is_blank(&self.ssh.password) {
            return Err("SSH password is required (SSH_PASSWORD)".to_string());
        }
        if self.authorized_user_id.0 == 0 {
            return Err("authorized_user_id must be set (AUTHORIZED_USER_ID)".to_string());
        }
        if self.ssh.connect_timeout_secs == 0 {
            return Err("connect_timeout_secs must be at least 1 second".to_string());
        }
        if !MESSAGE_LENGTH_RANGE.contains(&self.telegram.max_message_length) {
            return Err(format!(
                "max_message_length must be between {} and {}",
                MESSAGE_LENGTH_RANGE.start(),
                MESSAGE_LENGTH_RANGE.end()
            ));
        }
        Ok(())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
