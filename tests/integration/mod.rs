//! Integration Tests Module
//!
//! End-to-end tests for the AdminDO bridge.
//! Tests cover the console session flow through the session gate, the
//! DigitalOcean REST client against a mock server, and configuration loading.

// Session gate + remote executor flow tests
mod console_flow_test;


// Configuration file + environment tests
mod config_test;
