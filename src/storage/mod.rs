//! Storage Layer
//!
//! Handles configuration persistence (JSON file plus environment).

pub mod config;

pub use config::*;
