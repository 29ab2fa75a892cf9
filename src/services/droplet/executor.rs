//! Remote Executor
//!
//! Runs one shell command on a named host: resolve the host through the
//! directory, open a fresh shell connection, capture both streams, close.
//! No pooling and no retries; every invocation pays the connection setup.

use std::sync::Arc;
use std::time::Duration;

use admindo_core::CommandResult;
use async_trait::async_trait;

use super::provider::HostDirectory;
use super::types::{CapturedOutput, ExecError};

/// Opens authenticated remote-shell connections.
///
/// Failures to reach or authenticate against the host are reported as
/// `ExecError::ConnectFailure`.
#[async_trait]
pub trait ShellConnector: Send + Sync {
    async fn connect(&self, address: &str) -> Result<Box<dyn ShellSession>, ExecError>;
}

/// An open remote-shell connection.
#[async_trait]
pub trait ShellSession: Send {
    /// Run `command` as a single shell invocation and read both streams to completion.
    async fn exec(&mut self, command: &str) -> Result<CapturedOutput, ExecError>;

    /// Close the underlying connection.
    async fn close(self: Box<Self>);
}

/// Remote Execution Client.
pub struct RemoteExecutor {
    directory: Arc<dyn HostDirectory>,
    connector: Arc<dyn ShellConnector>,
    connect_timeout: Duration,
}

impl RemoteExecutor {
    pub fn new(
        directory: Arc<dyn HostDirectory>,
        connector: Arc<dyn ShellConnector>,
        connect_timeout: Duration,
    ) -> Self {
        Self {
            directory,
            connector,
            connect_timeout,
        }
    }

    /// Execute `command` on `host_name`. Never fails; errors become `CommandResult::Error`.
    pub async fn execute(&self, host_name: &str, command: &str) -> CommandResult {
        let result = self.run(host_name, command).await;
        if let Err(ref e) = result {
            tracing::warn!(host = %host_name, error = %e, "Remote command failed");
        }
        CommandResult::from(result)
    }

    async fn run(&self, host_name: &str, command: &str) -> Result<String, ExecError> {
        let host = self
            .directory
            .find_host(host_name)
            .await
            .map_err(|e| ExecError::Unclassified(e.to_string()))?
            .ok_or_else(|| ExecError::NotFound(host_name.to_string()))?;

        let address = host
            .ip_address
            .filter(|ip| !ip.is_empty())
            .ok_or_else(|| {
                ExecError::ConnectFailure(format!("{} has no IP address assigned", host_name))
            })?;

        tracing::debug!(host = %host_name, address = %address, "Opening shell connection");
        let mut session = match tokio::time::timeout(
            self.connect_timeout,
            self.connector.connect(&address),
        )
        .await
        {
            Ok(Ok(session)) => session,
            Ok(Err(e)) => return Err(e),
            Err(_) => {
                return Err(ExecError::ConnectFailure(format!(
                    "timed out after {}s",
                    self.connect_timeout.as_secs()
                )))
            }
        };

        let captured = session.exec(command).await;
        session.close().await;

        interpret(captured?)
    }
}

/// Any stderr output fails the whole invocation and drops stdout.
fn interpret(captured: CapturedOutput) -> Result<String, ExecError> {
    let stderr = captured.stderr.trim();
    if !stderr.is_empty() {
        return Err(ExecError::RemoteError(stderr.to_string()));
    }
    Ok(captured.stdout.trim().to_string())
}
