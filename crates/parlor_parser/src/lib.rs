//! Natural language parser for parser-based interactive fiction.
//!
//! This crate turns player input like "take sword" or "put the sword
//! in the chest" into commands the turn engine can dispatch.
//!
//! # Architecture
//!
//! ```text
//! "unlock the box with the silver key"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → ["unlock", "the", "box", "with", ...]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ VERB            │  → unlock (candidates for "unlock", minus any
//! │ IDENTIFICATION  │    that the prepositions/keywords contradict)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ TEMPLATE        │  → "unlock <dobj> with <iobj>",
//! │ MATCHING        │    dobj=["the","box"], iobj=["the","silver","key"]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ NOUN            │  → box-thing, key-thing (or a "Do you mean ...?"
//! │ RESOLUTION      │    question that parks the parse)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ COMMAND         │  → Command { verb, template, dobj, iobj }
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`lexicon`] - Immutable word tables (articles, prepositions, ...)
//! - [`tokenizer`] - Convert a raw line to a token stream
//! - [`verb`] - Verb records, scopes, type constraints, the registry
//! - [`phrase`] - Syntax template matching
//! - [`resolve`] - Noun resolution against the world
//! - [`command`] - The parsed command handed to the engine
//! - [`parser`] - Main parser pipeline orchestration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod command;
pub mod lexicon;
pub mod parser;
pub mod phrase;
pub mod resolve;
pub mod tokenizer;
pub mod verb;

pub use command::{Command, ResolvedObject};
pub use parser::{Parser, PendingDisambig};
pub use phrase::PhraseMatch;
pub use resolve::Resolution;
pub use verb::{Scope, TemplateTok, TypeConstraint, VerbRecord, VerbRegistry};
