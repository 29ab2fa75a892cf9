//! Host Directory
//!
//! The cloud-provider capabilities the bridge consumes: list hosts, look one
//! up by name, and submit power actions.

use admindo_core::{HostRecord, PowerAction};
use async_trait::async_trait;

use super::types::ProviderError;

/// Directory of hosts owned by the cloud provider.
///
/// Implementors supply `list_hosts` and `submit_power_action`; name lookup,
/// status and power actions by name are derived from those.
#[async_trait]
pub trait HostDirectory: Send + Sync {
    /// All hosts visible to the configured account.
    async fn list_hosts(&self) -> Result<Vec<HostRecord>, ProviderError>;

    /// Submit a power action for an already-resolved host.
    async fn submit_power_action(
        &self,
        host: &HostRecord,
        action: PowerAction,
    ) -> Result<(), ProviderError>;

    /// Linear scan; the first exact name match wins.
    async fn find_host(&self, name: &str) -> Result<Option<HostRecord>, ProviderError> {
        let hosts = self.list_hosts().await?;
        Ok(hosts.into_iter().find(|h| h.name == name))
    }

    /// Current record for `name`, or `ProviderError::NotFound`.
    async fn host_status(&self, name: &str) -> Result<HostRecord, ProviderError> {
        self.find_host(name)
            .await?
            .ok_or_else(|| ProviderError::NotFound(name.to_string()))
    }

    /// Resolve `name` and submit `action`, returning the confirmation text.
    async fn power_action(&self, name: &str, action: PowerAction) -> Result<String, ProviderError> {
        let host = self.host_status(name).await?;
        self.submit_power_action(&host, action).await?;
        tracing::info!(host = %name, action = %action, "Power action submitted");
        Ok(format!("{} action initiated on {}", action, name))
    }
}
