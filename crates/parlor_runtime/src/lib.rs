//! Terminal front-end, session loop, and save files for Parlor.
//!
//! This crate provides:
//! - [`Session`] - The interactive read-parse-act loop
//! - [`TerminalApp`] - The stdout/rustyline front-end
//! - [`Recorder`] - Command transcript recording and playback
//! - [`save`] - `MessagePack` snapshot serialization

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod record;
pub mod save;
pub mod session;
pub mod terminal;

pub use record::Recorder;
pub use session::Session;
pub use terminal::TerminalApp;
