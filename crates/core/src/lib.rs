//! AdminDO Core
//!
//! Foundational types shared across the AdminDO workspace. This crate has no
//! dependencies on the chat platform, the cloud provider or the SSH stack.
//!
//! ## Module Organization
//!
//! - `error` - Core error type (`CoreError`)
//! - `session` - Operator identity and console session mode
//! - `host` - Host records, power actions and command results
//! - `proxy` - Proxy configuration for outbound chat-platform traffic
//!
//! ## Design Principles
//!
//! 1. **Zero external dependencies beyond serde/thiserror**
//! 2. **Plain data** - services in the main crate own all behavior
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod error;
pub mod host;
pub mod proxy;
pub mod session;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::CoreError;

// ── Session Types ──────────────────────────────────────────────────────
pub use session::{OperatorId, SessionMode};

// ── Host Types ─────────────────────────────────────────────────────────
pub use host::{CommandResult, HostRecord, PowerAction, NO_OUTPUT_PLACEHOLDER};

// ── Proxy Types ────────────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};
