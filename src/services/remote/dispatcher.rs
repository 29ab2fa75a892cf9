//! Session Gate
//!
//! Authorizes every inbound message, then runs the console state machine:
//!
//! ```text
//! Idle --/console--> AwaitingCommand --/cancel--> Idle
//!                    AwaitingCommand --text----> AwaitingCommand (relay)
//! ```
//!
//! Directives are handled in any state and never relayed. Free text while
//! idle and unknown directives produce no reply.

use std::sync::Arc;

use admindo_core::{OperatorId, PowerAction, SessionMode};
use async_trait::async_trait;

use super::command_router::{CommandRouter, HELP_TEXT};
use super::response_mapper::{
    ResponseMapper, ACCESS_DENIED, CONSOLE_ENTERED, CONSOLE_EXITED, INVALID_POWER_ACTION,
    NEXT_COMMAND_PROMPT, NOTHING_TO_CANCEL,
};
use super::session_store::SessionStore;
use super::types::{IncomingRemoteMessage, OutgoingReply, RemoteCommand};
use crate::services::droplet::{HostDirectory, RemoteExecutor};

const AUDIT_TARGET: &str = "admindo::audit";

/// Notified when an authorized console command is about to run.
#[async_trait]
pub trait RelayListener: Send + Sync {
    async fn relay_started(&self, chat_id: i64);
}

/// Dispatcher owning the session store and the single authorized identity.
pub struct SessionGate {
    authorized_user: OperatorId,
    host_name: String,
    sessions: Arc<dyn SessionStore>,
    executor: Arc<RemoteExecutor>,
    directory: Arc<dyn HostDirectory>,
}

impl SessionGate {
    pub fn new(
        authorized_user: OperatorId,
        host_name: impl Into<String>,
        sessions: Arc<dyn SessionStore>,
        executor: Arc<RemoteExecutor>,
        directory: Arc<dyn HostDirectory>,
    ) -> Self {
        Self {
            authorized_user,
            host_name: host_name.into(),
            sessions,
            executor,
            directory,
        }
    }

    pub fn is_authorized(&self, operator: OperatorId) -> bool {
        operator == self.authorized_user
    }

    /// The session store backing this gate.
    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    /// Handle one inbound message and return the replies to send, in order.
    pub async fn handle(&self, msg: &IncomingRemoteMessage) -> Vec<OutgoingReply> {
        self.handle_with_listener(msg, None).await
    }

    /// Like [`SessionGate::handle`], calling `listener` right before a relay.
    pub async fn handle_with_listener(
        &self,
        msg: &IncomingRemoteMessage,
        listener: Option<&dyn RelayListener>,
    ) -> Vec<OutgoingReply> {
        let operator = OperatorId(msg.user_id);

        if !self.is_authorized(operator) {
            tracing::info!(
                target: AUDIT_TARGET,
                user_id = msg.user_id,
                chat_id = msg.chat_id,
                username = msg.username.as_deref().unwrap_or(""),
                result = "denied",
                "Unauthorized message"
            );
            return vec![OutgoingReply::plain(ACCESS_DENIED)];
        }

        let command = CommandRouter::parse(&msg.text);
        let command_type = command.type_name();

        let (replies, result_status) = match command {
            RemoteCommand::Help => (vec![OutgoingReply::plain(HELP_TEXT)], "success"),
            RemoteCommand::Console => {
                self.sessions
                    .replace(operator, SessionMode::AwaitingCommand)
                    .await;
                (vec![OutgoingReply::plain(CONSOLE_ENTERED)], "success")
            }
            RemoteCommand::Cancel => {
                let previous = self.sessions.replace(operator, SessionMode::Idle).await;
                let text = if previous.is_console() {
                    CONSOLE_EXITED
                } else {
                    NOTHING_TO_CANCEL
                };
                (vec![OutgoingReply::plain(text)], "success")
            }
            RemoteCommand::Status => self.droplet_status().await,
            RemoteCommand::Power { action } => self.power(action).await,
            RemoteCommand::Droplets => self.list_droplets().await,
            RemoteCommand::Unknown { .. } => (Vec::new(), "ignored"),
            RemoteCommand::Text { content } => {
                if self.sessions.mode(operator).await.is_console() {
                    if let Some(listener) = listener {
                        listener.relay_started(msg.chat_id).await;
                    }
                    self.relay(&content).await
                } else {
                    (Vec::new(), "ignored")
                }
            }
        };

        tracing::info!(
            target: AUDIT_TARGET,
            user_id = msg.user_id,
            chat_id = msg.chat_id,
            command_type,
            result = result_status,
            "Handled message"
        );

        replies
    }

    /// Forward command text to the executor; always followed by the prompt.
    async fn relay(&self, command: &str) -> (Vec<OutgoingReply>, &'static str) {
        tracing::debug!(host = %self.host_name, command = %command, "Relaying command");
        let result = self.executor.execute(&self.host_name, command).await;
        let status = if result.is_error() { "error" } else { "success" };
        (
            vec![
                ResponseMapper::format_command_result(&result),
                OutgoingReply::plain(NEXT_COMMAND_PROMPT),
            ],
            status,
        )
    }

    async fn droplet_status(&self) -> (Vec<OutgoingReply>, &'static str) {
        match self.directory.host_status(&self.host_name).await {
            Ok(host) => (
                vec![OutgoingReply::plain(ResponseMapper::format_host_status(&host))],
                "success",
            ),
            Err(e) => Self::error_reply(e),
        }
    }

    async fn power(&self, action: Option<PowerAction>) -> (Vec<OutgoingReply>, &'static str) {
        let action = match action {
            Some(action) => action,
            None => return Self::error_reply(INVALID_POWER_ACTION),
        };
        match self.directory.power_action(&self.host_name, action).await {
            Ok(message) => (vec![OutgoingReply::plain(message)], "success"),
            Err(e) => Self::error_reply(e),
        }
    }

    async fn list_droplets(&self) -> (Vec<OutgoingReply>, &'static str) {
        match self.directory.list_hosts().await {
            Ok(hosts) => (
                vec![OutgoingReply::plain(ResponseMapper::format_host_list(&hosts))],
                "success",
            ),
            Err(e) => Self::error_reply(e),
        }
    }

    fn error_reply(message: impl std::fmt::Display) -> (Vec<OutgoingReply>, &'static str) {
        (
            vec![OutgoingReply::plain(ResponseMapper::format_error(message))],
            "error",
        )
    }
}
