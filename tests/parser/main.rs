//! Integration tests for the parlor_parser crate.
//!
//! Tests for the parsing pipeline against a real world:
//! - Verb identification and template routing
//! - Noun resolution and disambiguation

mod resolution_tests;
mod routing_tests;
