//! Core types, values, and errors for Parlor.
//!
//! This crate provides:
//! - [`Ix`] - Stable, creation-ordered entity indices
//! - [`VerbId`] / [`Role`] - Identifiers for verb dispatch
//! - [`Value`] - The dynamic value type used by saves and template globals
//! - [`TurnAbort`] / [`EngineError`] - The two error families
//! - [`Direction`] - The twelve travel directions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod direction;
mod error;
mod ix;
mod value;

pub use direction::Direction;
pub use error::{EngineError, Result, TurnAbort, TurnError, TurnResult, VerbResult};
pub use ix::{Ix, IxAllocator, Role, VerbId};
pub use value::Value;
