//! Configuration Integration Tests
//!
//! Loads config files from a temporary directory with explicit environment
//! lookups and checks the resulting bridge settings.

use std::fs;

use admindo::services::droplet::HostKeyPolicy;
use admindo::{AppError, ConfigService};
use admindo_core::{OperatorId, ProxyProtocol};
use tempfile::TempDir;

fn env_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |key| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    }
}

const SECRETS: &[(&str, &str)] = &[
    ("BOT_TOKEN", "123:abc"),
    ("DO_TOKEN", "do-secret"),
    ("SSH_PASSWORD", "hunter2"),
];

#[test]
fn test_environment_only_configuration() {
    let service = ConfigService::load_with_env(
        None,
        env_from(&[
            ("BOT_TOKEN", "123:abc"),
            ("DO_TOKEN", "do-secret"),
            ("SSH_PASSWORD", "hunter2"),
            ("DROPLET_NAME", "web-1"),
            ("AUTHORIZED_USER_ID", "5303965494"),
        ]),
    );
    // Environment wins over any ~/.admindo/config.json present on the host
    let config = service.unwrap().into_config();
    assert_eq!(config.droplet_name(), "web-1");
    assert_eq!(config.authorized_user_id, OperatorId(5303965494));
}

#[test]
fn test_full_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "authorized_user_id": 5303965494,
            "droplet_name": "web-1",
            "digitalocean": { "api_base_url": "http://localhost:9999/" },
            "ssh": {
                "username": "deploy",
                "port": 2222,
                "connect_timeout_secs": 5,
                "host_key_policy": "strict"
            },
            "telegram": { "max_message_length": 2000 },
            "proxy": { "protocol": "socks5", "host": "127.0.0.1", "port": 1080 }
        }"#,
    )
    .unwrap();

    let config = ConfigService::load_with_env(Some(&path), env_from(SECRETS))
        .unwrap()
        .into_config();

    assert_eq!(config.ssh.username, "deploy");
    assert_eq!(config.ssh.port, 2222);
    assert_eq!(config.ssh.connect_timeout_secs, 5);
    assert_eq!(config.ssh.host_key_policy, HostKeyPolicy::Strict);
    assert_eq!(config.telegram.max_message_length, 2000);
    assert_eq!(config.digitalocean.api_base_url, "http://localhost:9999/");
    let proxy = config.proxy.unwrap();
    assert_eq!(proxy.protocol, ProxyProtocol::Socks5);
    assert_eq!(proxy.url(), "socks5://127.0.0.1:1080");
}

#[test]
fn test_zero_timeout_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "authorized_user_id": 1,
            "droplet_name": "web-1",
            "ssh": { "connect_timeout_secs": 0 }
        }"#,
    )
    .unwrap();

    let result = ConfigService::load_with_env(Some(&path), env_from(SECRETS));
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn test_bad_host_key_policy_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "authorized_user_id": 1, "droplet_name": "web-1" }"#).unwrap();

    let result = ConfigService::load_with_env(
        Some(&path),
        env_from(&[
            ("BOT_TOKEN", "123:abc"),
            ("DO_TOKEN", "do-secret"),
            ("SSH_PASSWORD", "hunter2"),
            ("SSH_HOST_KEY_POLICY", "trust-me"),
        ]),
    );
    assert!(matches!(result, Err(AppError::Config(_))));
}
