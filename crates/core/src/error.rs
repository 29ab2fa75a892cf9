//! Core Error Types
//!
//! Defines the foundational error types used across the AdminDO workspace.
//! These error types are dependency-free (only thiserror + std) to keep the core
//! crate lightweight.

use thiserror::Error;

/// Core error type for the AdminDO workspace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Parse errors
    #[error("Parse error: {0}")]
    Parse(String),
}

impl CoreError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
