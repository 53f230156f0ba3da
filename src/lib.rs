//! Parlor - Parser-driven interactive fiction engine
//!
//! This crate re-exports all layers of the Parlor system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: parlor_runtime    — Terminal front-end, session loop, save files
//! Layer 2: parlor_engine     — Turn dispatch, verbs, events, daemons
//!          parlor_parser     — Tokenizer, verb templates, noun resolution
//! Layer 1: parlor_world      — Things, rooms, connectors, placement
//! Layer 0: parlor_foundation — Core types (Ix, Direction, Value, errors)
//! ```

pub use parlor_engine as engine;
pub use parlor_foundation as foundation;
pub use parlor_parser as parser;
pub use parlor_runtime as runtime;
pub use parlor_world as world;
