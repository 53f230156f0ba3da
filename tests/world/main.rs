//! Integration tests for the parlor_world crate.
//!
//! Tests for the world model:
//! - Containment and placement
//! - Darkness, fit, and liquid queries
//! - Connectors and locks

mod containment_tests;
mod query_tests;
