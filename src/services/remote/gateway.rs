//! Remote Gateway Service
//!
//! Manages the adapter lifecycle, hands incoming messages to the SessionGate,
//! and delivers the replies. Each message is processed on its own task, so a
//! long-running remote command never blocks other updates.

use super::adapters::RemoteAdapter;
use super::dispatcher::{RelayListener, SessionGate};
use super::types::{GatewayStatus, IncomingRemoteMessage, RemoteError};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio_util::sync::CancellationToken;

/// Capacity of the adapter → gateway channel.
const CHANNEL_CAPACITY: usize = 100;

/// Shows a typing indicator while a console command runs.
struct TypingIndicator<'a> {
    adapter: &'a dyn RemoteAdapter,
}

#[async_trait]
impl RelayListener for TypingIndicator<'_> {
    async fn relay_started(&self, chat_id: i64) {
        if let Err(e) = self.adapter.send_typing(chat_id).await {
            tracing::debug!(chat_id, error = %e, "Failed to send typing indicator");
        }
    }
}

/// Remote Gateway Service managing adapter lifecycle and message processing.
pub struct RemoteGatewayService {
    pub(crate) gate: Arc<SessionGate>,
    pub(crate) adapter: RwLock<Option<Arc<dyn RemoteAdapter>>>,
    pub(crate) status: Arc<RwLock<GatewayStatus>>,
    pub(crate) cancel_token: CancellationToken,
}

impl RemoteGatewayService {
    /// Create a new RemoteGatewayService.
    pub fn new(gate: Arc<SessionGate>) -> Self {
        Self {
            gate,
            adapter: RwLock::new(None),
            status: Arc::new(RwLock::new(GatewayStatus::default())),
            cancel_token: CancellationToken::new(),
        }
    }

    /// Get current gateway status.
    pub async fn get_status(&self) -> GatewayStatus {
        let mut status = self.status.read().await.clone();
        status.active_console_sessions = self.gate.sessions().active_count().await as u32;
        status
    }

    /// Start the adapter and the message processing loop.
    pub async fn start(&self, adapter: Arc<dyn RemoteAdapter>) -> Result<(), RemoteError> {
        let mut adapter_guard = self.adapter.write().await;
        if adapter_guard.is_some() {
            return Err(RemoteError::AlreadyRunning);
        }

        // Create message channel
        let (tx, mut rx) = mpsc::channel::<IncomingRemoteMessage>(CHANNEL_CAPACITY);

        adapter.start(tx).await?;
        let adapter_type = adapter.adapter_type();
        *adapter_guard = Some(adapter.clone());
        drop(adapter_guard);

        // Spawn message processing loop
        let gate = self.gate.clone();
        let status_ref = self.status.clone();
        let cancel = self.cancel_token.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    maybe_msg = rx.recv() => {
                        let Some(msg) = maybe_msg else { break };
                        let gate = gate.clone();
                        let adapter = adapter.clone();
                        let status = status_ref.clone();
                        tokio::spawn(async move {
                            Self::handle_message(&msg, &gate, adapter.as_ref(), &status).await;
                        });
                    }
                    _ = cancel.cancelled() => {
                        break;
                    }
                }
            }
            tracing::debug!("Gateway message loop exited");
        });

        // Update status
        let mut status = self.status.write().await;
        status.running = true;
        status.adapter_type = adapter_type;
        status.connected_since = Some(chrono::Utc::now().to_rfc3339());

        tracing::info!(adapter = %status.adapter_type, "Remote gateway started");
        Ok(())
    }

    /// Handle an incoming remote message.
    async fn handle_message(
        msg: &IncomingRemoteMessage,
        gate: &SessionGate,
        adapter: &dyn RemoteAdapter,
        status: &RwLock<GatewayStatus>,
    ) {
        // Update stats
        {
            let mut s = status.write().await;
            s.total_messages_processed += 1;
            s.last_message_at = Some(chrono::Utc::now().to_rfc3339());
        }

        let typing = TypingIndicator { adapter };
        let replies = gate.handle_with_listener(msg, Some(&typing)).await;
        if replies.is_empty() {
            return;
        }

        for reply in &replies {
            if let Err(e) = adapter.send_reply(msg.chat_id, reply).await {
                tracing::warn!(chat_id = msg.chat_id, error = %e, "Failed to deliver reply");
            }
        }
    }

    /// Stop the gateway gracefully.
    pub async fn stop(&self) -> Result<(), RemoteError> {
        self.cancel_token.cancel();
        if let Some(adapter) = self.adapter.read().await.as_ref() {
            adapter.stop().await?;
        }
        let mut status = self.status.write().await;
        status.running = false;
        status.connected_since = None;
        tracing::info!("Remote gateway stopped");
        Ok(())
    }
}
