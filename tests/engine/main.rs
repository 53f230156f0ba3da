//! Integration tests for the parlor_engine crate.
//!
//! Tests that run whole turns through a game:
//! - The implicit-action chain
//! - Override hooks
//! - Daemons
//! - Locks and held keys
//! - Commerce tables
//! - Saves, restores, and determinism
//! - Meta-commands

mod commerce_tests;
mod daemon_tests;
mod event_tests;
mod hook_tests;
mod implicit_tests;
mod lock_tests;
mod meta_tests;
mod persistence_tests;
