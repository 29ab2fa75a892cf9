//! Remote Administration Bridge
//!
//! Lets a single authorized operator administer the droplet through a
//! messaging platform. Currently supports Telegram Bot as the adapter.
//!
//! ## Architecture
//!
//! ```text
//! Remote Platform → RemoteAdapter → mpsc → RemoteGatewayService
//!                                            ↓ (task per message)
//!                                   SessionGate.handle()
//!                                     ├─ authorization
//!                                     ├─ CommandRouter.parse()
//!                                     ├─ SessionStore (Idle / AwaitingCommand)
//!                                     └─ RemoteExecutor / HostDirectory
//!                                            ↓
//!                                   ResponseMapper → RemoteAdapter.send_reply()
//! ```

pub mod adapters;
pub mod command_router;
pub mod dispatcher;
pub mod gateway;
pub mod response_mapper;
pub mod session_store;
pub mod types;

pub use adapters::telegram::TelegramAdapter;
pub use adapters::RemoteAdapter;
pub use dispatcher::SessionGate;
pub use gateway::RemoteGatewayService;
pub use session_store::{InMemorySessionStore, SessionStore};
pub use types::*;
