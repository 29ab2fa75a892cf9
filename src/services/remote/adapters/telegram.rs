//! Telegram Adapter
//!
//! Telegram Bot adapter using teloxide for long-polling message reception.
//! Implements the RemoteAdapter trait with proxy support, command menu
//! registration, MarkdownV2 literal blocks, and message splitting for
//! Telegram's 4096 character limit.

use super::RemoteAdapter;
use crate::services::remote::command_router::BOT_COMMANDS;
use crate::services::remote::response_mapper::ResponseMapper;
use crate::services::remote::types::{
    IncomingRemoteMessage, RemoteAdapterType, RemoteError, TelegramAdapterConfig,
};
use admindo_core::ProxyConfig;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Characters added around a chunk by the pre-block fence.
const LITERAL_FENCE_LEN: usize = 8;

/// Telegram Bot adapter using teloxide with long-polling.
pub struct TelegramAdapter {
    pub(crate) config: TelegramAdapterConfig,
    pub(crate) bot: teloxide::Bot,
    pub(crate) cancel_token: CancellationToken,
}

impl TelegramAdapter {
    /// Create a new Telegram adapter with proxy-aware HTTP client.
    ///
    /// teloxide builds its own reqwest client and reads HTTPS_PROXY/HTTP_PROXY
    /// when doing so, so the proxy is applied through the environment before
    /// the bot is created.
    pub fn new(
        config: TelegramAdapterConfig,
        proxy: Option<&ProxyConfig>,
    ) -> Result<Self, RemoteError> {
        let bot_token = config
            .bot_token
            .as_ref()
            .ok_or_else(|| RemoteError::ConfigError("Bot token is required".to_string()))?;

        if let Some(proxy_cfg) = proxy {
            let proxy_url = proxy_cfg.url_with_auth();
            std::env::set_var("HTTPS_PROXY", &proxy_url);
            std::env::set_var("HTTP_PROXY", &proxy_url);
        }

        let bot = teloxide::Bot::new(bot_token);

        Ok(Self {
            config,
            bot,
            cancel_token: CancellationToken::new(),
        })
    }

    /// Raw chunk size for literal blocks. Escaping can at most double a
    /// chunk, and the fence adds a fixed overhead.
    fn literal_chunk_len(&self) -> usize {
        (self.config.max_message_length.saturating_sub(LITERAL_FENCE_LEN) / 2).max(1)
    }

    async fn register_commands(&self) -> Result<(), RemoteError> {
        use teloxide::prelude::*;
        use teloxide::types::BotCommand;

        let commands: Vec<BotCommand> = BOT_COMMANDS
            .iter()
            .map(|(command, description)| BotCommand::new(*command, *description))
            .collect();

        self.bot
            .delete_webhook()
            .drop_pending_updates(true)
            .await
            .map_err(|e| RemoteError::ConfigError(format!("Failed to delete webhook: {}", e)))?;
        self.bot
            .set_my_commands(commands)
            .await
            .map_err(|e| RemoteError::ConfigError(format!("Failed to set commands: {}", e)))?;
        Ok(())
    }
}

/// Split long messages at line boundaries to respect platform limits.
pub fn split_message(text: &str, max_len: usize) -> Vec<String> {
    if text.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if current.len() + line.len() + 1 > max_len {
            if !current.is_empty() {
                chunks.push(current.clone());
                current.clear();
            }
            // Handle single lines longer than max_len
            if line.len() > max_len {
                chunks.extend(split_at_char_boundaries(line, max_len));
                continue;
            }
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Hard-split a single line into pieces of at most `max_len` bytes without
/// cutting a UTF-8 character.
fn split_at_char_boundaries(line: &str, max_len: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;
    while start < line.len() {
        let mut end = std::cmp::min(start + max_len, line.len());
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        if end == start {
            // max_len smaller than one character
            end = start + line[start..].chars().next().map_or(1, |c| c.len_utf8());
        }
        pieces.push(line[start..end].to_string());
        start = end;
    }
    pieces
}

#[async_trait]
impl RemoteAdapter for TelegramAdapter {
    fn adapter_type(&self) -> RemoteAdapterType {
        RemoteAdapterType::Telegram
    }

    async fn start(
        &self,
        command_tx: mpsc::Sender<IncomingRemoteMessage>,
    ) -> Result<(), RemoteError> {
        use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
        use teloxide::types::{Message, Update};

        self.register_commands().await?;

        let bot = self.bot.clone();
        let cancel = self.cancel_token.clone();

        tokio::spawn(async move {
            let handler =
                Update::filter_message().endpoint(move |msg: Message, _bot: teloxide::Bot| {
                    let tx = command_tx.clone();
                    async move {
                        // Extract text and forward to command channel
                        if let Some(text) = msg.text() {
                            let incoming = IncomingRemoteMessage {
                                adapter_type: RemoteAdapterType::Telegram,
                                chat_id: msg.chat.id.0,
                                user_id: msg.from.as_ref().map(|u| u.id.0 as i64).unwrap_or(0),
                                username: msg.from.as_ref().and_then(|u| u.username.clone()),
                                text: text.to_string(),
                                message_id: msg.id.0 as i64,
                                timestamp: chrono::Utc::now(),
                            };
                            if tx.send(incoming).await.is_err() {
                                tracing::warn!("Gateway channel closed; dropping message");
                            }
                        }
                        Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
                    }
                });

            // Build and run dispatcher
            let mut dispatcher = Dispatcher::builder(bot, handler).build();

            // Get shutdown token for graceful termination
            let shutdown_token = dispatcher.shutdown_token();

            // Spawn a task that watches the CancellationToken and triggers shutdown
            let cancel_clone = cancel.clone();
            tokio::spawn(async move {
                cancel_clone.cancelled().await;
                let _ = shutdown_token.shutdown();
            });

            tracing::info!("Telegram long polling started");
            dispatcher.dispatch().await;
            tracing::info!("Telegram long polling stopped");
        });

        Ok(())
    }

    async fn stop(&self) -> Result<(), RemoteError> {
        self.cancel_token.cancel();
        Ok(())
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), RemoteError> {
        use teloxide::prelude::*;
        use teloxide::types::ChatId;

        let chunks = split_message(text, self.config.max_message_length);
        for chunk in chunks {
            self.bot
                .send_message(ChatId(chat_id), chunk)
                .await
                .map_err(|e| RemoteError::SendFailed(e.to_string()))?;
        }
        Ok(())
    }

    async fn send_literal(&self, chat_id: i64, text: &str) -> Result<(), RemoteError> {
        use teloxide::prelude::*;
        use teloxide::types::{ChatId, ParseMode};

        let chunks = split_message(text, self.literal_chunk_len());
        for chunk in chunks {
            self.bot
                .send_message(ChatId(chat_id), ResponseMapper::render_literal_block(&chunk))
                .parse_mode(ParseMode::MarkdownV2)
                .await
                .map_err(|e| RemoteError::SendFailed(e.to_string()))?;
        }
        Ok(())
    }

    async fn send_typing(&self, chat_id: i64) -> Result<(), RemoteError> {
        use teloxide::prelude::*;
        use teloxide::types::{ChatAction, ChatId};

        self.bot
            .send_chat_action(ChatId(chat_id), ChatAction::Typing)
            .await
            .map_err(|e| RemoteError::SendFailed(e.to_string()))?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), RemoteError> {
        use teloxide::prelude::*;

        self.bot
            .get_me()
            .await
            .map_err(|e| RemoteError::ConfigError(format!("Bot health check failed: {}", e)))?;
        Ok(())
    }
}
