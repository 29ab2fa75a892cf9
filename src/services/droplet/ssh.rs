//! SSH Connector
//!
//! `ShellConnector` built on russh. Password authentication with the shared
//! credentials from `SshConfig`; host keys are checked according to
//! `HostKeyPolicy`.

use std::sync::Arc;

use async_trait::async_trait;
use russh::client;
use russh::{ChannelMsg, Disconnect};
use russh_keys::key::PublicKey;

use super::executor::{ShellConnector, ShellSession};
use super::types::{CapturedOutput, ExecError, HostKeyPolicy, SshConfig};

/// SSH extended-data stream number for stderr.
const SSH_EXTENDED_DATA_STDERR: u32 = 1;

/// Opens one russh client connection per command.
pub struct SshConnector {
    username: String,
    password: String,
    port: u16,
    host_key_policy: HostKeyPolicy,
}

impl SshConnector {
    pub fn new(config: &SshConfig) -> Result<Self, ExecError> {
        let password = config
            .password
            .clone()
            .ok_or_else(|| {
                ExecError::ConnectFailure("SSH password is not configured".to_string())
            })?;

        Ok(Self {
            username: config.username.clone(),
            password,
            port: config.port,
            host_key_policy: config.host_key_policy,
        })
    }
}

/// Client handler that only decides whether to trust the server key.
struct HostKeyVerifier {
    policy: HostKeyPolicy,
    host: String,
    port: u16,
}

impl HostKeyVerifier {
    fn trusts(&self, server_public_key: &PublicKey) -> bool {
        match self.policy {
            HostKeyPolicy::AcceptAny => true,
            HostKeyPolicy::Strict => {
                match russh_keys::check_known_hosts(&self.host, self.port, server_public_key) {
                    Ok(true) => true,
                    Ok(false) => {
                        tracing::warn!(host = %self.host, "Host key not in known_hosts");
                        false
                    }
                    Err(e) => {
                        tracing::warn!(
                            host = %self.host,
                            error = %e,
                            "Host key verification failed"
                        );
                        false
                    }
                }
            }
        }
    }
}

#[async_trait]
impl client::Handler for HostKeyVerifier {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> Result<bool, Self::Error> {
        Ok(self.trusts(server_public_key))
    }
}

#[async_trait]
impl ShellConnector for SshConnector {
    async fn connect(&self, address: &str) -> Result<Box<dyn ShellSession>, ExecError> {
        let handler = HostKeyVerifier {
            policy: self.host_key_policy,
            host: address.to_string(),
            port: self.port,
        };

        let config = Arc::new(client::Config::default());
        let mut handle = client::connect(config, (address, self.port), handler)
            .await
            .map_err(|e| ExecError::ConnectFailure(e.to_string()))?;

        let authenticated = handle
            .authenticate_password(self.username.as_str(), self.password.as_str())
            .await
            .map_err(|e| ExecError::ConnectFailure(e.to_string()))?;
        if !authenticated {
            let _ = handle
                .disconnect(Disconnect::ByApplication, "", "English")
                .await;
            return Err(ExecError::ConnectFailure("Authentication failed.".to_string()));
        }

        tracing::debug!(address = %address, user = %self.username, "SSH session established");
        Ok(Box::new(SshSession { handle }))
    }
}

/// One authenticated SSH connection.
struct SshSession {
    handle: client::Handle<HostKeyVerifier>,
}

#[async_trait]
impl ShellSession for SshSession {
    async fn exec(&mut self, command: &str) -> Result<CapturedOutput, ExecError> {
        let mut channel = self
            .handle
            .channel_open_session()
            .await
            .map_err(|e| ExecError::Unclassified(e.to_string()))?;
        channel
            .exec(true, command)
            .await
            .map_err(|e| ExecError::Unclassified(e.to_string()))?;

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut exit_status = None;

        while let Some(msg) = channel.wait().await {
            match msg {
                ChannelMsg::Data { ref data } => stdout.extend_from_slice(data),
                ChannelMsg::ExtendedData { ref data, ext } if ext == SSH_EXTENDED_DATA_STDERR => {
                    stderr.extend_from_slice(data)
                }
                ChannelMsg::ExitStatus { exit_status: code } => exit_status = Some(code),
                _ => {}
            }
        }

        Ok(CapturedOutput {
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
            exit_status,
        })
    }

    async fn close(self: Box<Self>) {
        if let Err(e) = self
            .handle
            .disconnect(Disconnect::ByApplication, "", "English")
            .await
        {
            tracing::debug!(error = %e, "SSH disconnect failed");
        }
    }
}
