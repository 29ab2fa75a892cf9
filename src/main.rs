// AdminDO - Telegram bridge entry point

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use admindo::services::droplet::{DigitalOceanClient, HostDirectory, RemoteExecutor, SshConnector};
use admindo::services::remote::{
    InMemorySessionStore, RemoteAdapter, RemoteGatewayService, SessionGate, TelegramAdapter,
};
use admindo::ConfigService;

/// admindo - private Telegram bridge for a DigitalOcean droplet
#[derive(Parser)]
#[command(name = "admindo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.admindo/config.json when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_logging(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("admindo=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting AdminDO bridge");

    let config = ConfigService::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .into_config();

    let directory: Arc<dyn HostDirectory> = Arc::new(
        DigitalOceanClient::new(&config.digitalocean)
            .context("Failed to create DigitalOcean client")?,
    );
    let connector = Arc::new(SshConnector::new(&config.ssh).context("Invalid SSH settings")?);
    let executor = Arc::new(RemoteExecutor::new(
        directory.clone(),
        connector,
        Duration::from_secs(config.ssh.connect_timeout_secs),
    ));

    let gate = SessionGate::new(
        config.authorized_user_id,
        config.droplet_name(),
        Arc::new(InMemorySessionStore::new()),
        executor,
        directory,
    );
    let gateway = RemoteGatewayService::new(Arc::new(gate));

    let adapter: Arc<dyn RemoteAdapter> = Arc::new(
        TelegramAdapter::new(config.telegram.clone(), config.proxy.as_ref())
            .context("Failed to create Telegram adapter")?,
    );
    if let Err(e) = adapter.health_check().await {
        tracing::warn!(error = %e, "Telegram health check failed; continuing");
    }

    gateway
        .start(adapter)
        .await
        .context("Failed to start remote gateway")?;

    tracing::info!(
        droplet = %config.droplet_name(),
        user_id = %config.authorized_user_id,
        "Bridge ready"
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl+c")?;

    tracing::info!("Shutting down");
    gateway.stop().await.context("Failed to stop gateway")?;

    let status = gateway.get_status().await;
    tracing::info!(
        messages = status.total_messages_processed,
        active_console_sessions = status.active_console_sessions,
        last_message_at = status.last_message_at.as_deref().unwrap_or("never"),
        "Bridge stopped"
    );

    Ok(())
}
