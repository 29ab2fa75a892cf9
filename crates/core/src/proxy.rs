//! Proxy Configuration Types
//!
//! Proxy settings for the chat-platform client. The Telegram adapter applies
//! these through the standard proxy environment variables before it builds
//! its HTTP client.

use serde::{Deserialize, Serialize};

/// Proxy protocol type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProxyProtocol {
    Http,
    Https,
    Socks5,
}

impl ProxyProtocol {
    /// Return the URL scheme string for this protocol.
    pub fn scheme(&self) -> &'static str {
        match self {
            ProxyProtocol::Http => "http",
            ProxyProtocol::Https => "https",
            ProxyProtocol::Socks5 => "socks5",
        }
    }
}

/// Proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub protocol: ProxyProtocol,
    pub host: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Excluded from serialization to avoid accidental persistence.
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
}

impl ProxyConfig {
    /// Build the proxy URL string (without auth).
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol.scheme(), self.host, self.port)
    }

    /// Build the proxy URL string with embedded credentials (if any).
    pub fn url_with_auth(&self) -> String {
        match (&self.username, &self.password) {
            (Some(u), Some(p)) => {
                format!("{}://{}:{}@{}:{}", self.protocol.scheme(), u, p, self.host, self.port)
            }
            (Some(u), None) => {
                format!("{}://{}@{}:{}", self.protocol.scheme(), u, self.host, self.port)
            }
            _ => self.url(),
        }
    }
}
