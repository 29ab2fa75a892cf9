//! DigitalOcean Directory
//!
//! `HostDirectory` backed by the DigitalOcean v2 REST API.
//! API endpoints: `GET /v2/droplets` (paginated) and
//! `POST /v2/droplets/{id}/actions`.

use admindo_core::{HostRecord, PowerAction};
use async_trait::async_trait;
use serde::Deserialize;

use super::provider::HostDirectory;
use super::types::{DigitalOceanConfig, ProviderError};

const PAGE_SIZE: u32 = 200;

/// DigitalOcean API client.
pub struct DigitalOceanClient {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl DigitalOceanClient {
    pub fn new(config: &DigitalOceanConfig) -> Result<Self, ProviderError> {
        let api_token = config
            .api_token
            .clone()
            .ok_or_else(|| {
                ProviderError::Config("DigitalOcean API token is required".to_string())
            })?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }

    async fn fetch_page(&self, page: u32) -> Result<DropletsPage, ProviderError> {
        let url = format!("{}/v2/droplets", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .query(&[("page", page), ("per_page", PAGE_SIZE)])
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Ok(response.json::<DropletsPage>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        Err(ProviderError::Api { status, message })
    }
}

#[async_trait]
impl HostDirectory for DigitalOceanClient {
    async fn list_hosts(&self) -> Result<Vec<HostRecord>, ProviderError> {
        let mut hosts = Vec::new();
        let mut page = 1;
        loop {
            let body = self.fetch_page(page).await?;
            let has_next = body.has_next_page();
            hosts.extend(body.droplets.into_iter().map(HostRecord::from));
            if !has_next {
                break;
            }
            page += 1;
        }
        tracing::debug!(count = hosts.len(), "Fetched droplet list");
        Ok(hosts)
    }

    async fn submit_power_action(
        &self,
        host: &HostRecord,
        action: PowerAction,
    ) -> Result<(), ProviderError> {
        let url = format!("{}/v2/droplets/{}/actions", self.base_url, host.id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&serde_json::json!({ "type": action.api_name() }))
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct DropletsPage {
    droplets: Vec<ApiDroplet>,
    #[serde(default)]
    links: Option<ApiLinks>,
}

impl DropletsPage {
    fn has_next_page(&self) -> bool {
        self.links
            .as_ref()
            .and_then(|l| l.pages.as_ref())
            .and_then(|p| p.next.as_ref())
            .is_some()
    }
}

#[derive(Debug, Deserialize)]
struct ApiLinks {
    #[serde(default)]
    pages: Option<ApiPages>,
}

#[derive(Debug, Deserialize)]
struct ApiPages {
    #[serde(default)]
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiDroplet {
    id: u64,
    name: String,
    status: String,
    created_at: String,
    size_slug: String,
    region: ApiRegion,
    #[serde(default)]
    networks: ApiNetworks,
}

#[derive(Debug, Deserialize)]
struct ApiRegion {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiNetworks {
    #[serde(default)]
    v4: Vec<ApiNetworkV4>,
}

#[derive(Debug, Deserialize)]
struct ApiNetworkV4 {
    ip_address: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl From<ApiDroplet> for HostRecord {
    fn from(d: ApiDroplet) -> Self {
        let ip_address = d
            .networks
            .v4
            .into_iter()
            .find(|n| n.kind == "public")
            .map(|n| n.ip_address);
        HostRecord {
            id: d.id,
            name: d.name,
            status: d.status,
            ip_address,
            region: d.region.name,
            size: d.size_slug,
            created_at: d.created_at,
        }
    }
}
