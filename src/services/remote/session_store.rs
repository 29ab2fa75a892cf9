//! Session Store
//!
//! Maps operator identity to console mode. State lives for the process
//! lifetime only; an operator in `Idle` has no entry at all.

use admindo_core::{OperatorId, SessionMode};
use async_trait::async_trait;
use dashmap::DashMap;

/// Storage for per-operator console mode.
///
/// Each call is atomic with respect to other calls for the same operator.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Current mode; `Idle` for operators never seen.
    async fn mode(&self, operator: OperatorId) -> SessionMode;

    /// Set the mode and return the previous one. Setting `Idle` drops the entry.
    async fn replace(&self, operator: OperatorId, mode: SessionMode) -> SessionMode;

    /// Number of operators currently in console mode.
    async fn active_count(&self) -> usize;
}

/// In-memory store. Per-key updates are serialized by DashMap shard locking.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<OperatorId, SessionMode>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn mode(&self, operator: OperatorId) -> SessionMode {
        self.sessions
            .get(&operator)
            .map(|entry| *entry.value())
            .unwrap_or_default()
    }

    async fn replace(&self, operator: OperatorId, mode: SessionMode) -> SessionMode {
        let previous = match mode {
            SessionMode::Idle => self.sessions.remove(&operator).map(|(_, m)| m),
            active => self.sessions.insert(operator, active),
        };
        previous.unwrap_or_default()
    }

    async fn active_count(&self) -> usize {
        self.sessions.len()
    }
}
