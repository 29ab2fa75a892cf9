//! Services
//!
//! Business logic services for the bridge.

pub mod droplet;
pub mod remote;

pub use droplet::{DigitalOceanClient, RemoteExecutor, SshConnector};
pub use remote::{RemoteGatewayService, SessionGate, TelegramAdapter};
