//! Turn engine for parser-based interactive fiction.
//!
//! This crate runs the game loop: it feeds player input through the
//! parser, dispatches the resulting command to a verb function, runs
//! hooks and daemons around it, and collects everything said during
//! the turn into an ordered event buffer for the front end to print.
//!
//! # Modules
//!
//! - [`game`] - The [`Game`] aggregate and the turn loop
//! - [`dispatch`] - Command dispatch, implicit actions, meta commands
//! - [`verbs`] - The standard verb library
//! - [`event`] - Per-turn output buffering and template expansion
//! - [`hooks`] - Author-installed before/after verb hooks
//! - [`daemon`] - Background processes that run each turn
//! - [`sequence`] - Scripted interludes and menus
//! - [`score`] - Achievements and scoring
//! - [`hints`] - The progressive hint tree
//! - [`app`] - The front-end trait the engine talks through

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod app;
pub mod daemon;
pub mod dispatch;
pub mod event;
pub mod game;
pub mod hints;
pub mod hooks;
pub mod score;
pub mod sequence;
pub mod verbs;

pub use app::{App, BufferApp};
pub use daemon::{consumable_light, light_daemon_name, Daemon, DaemonFn};
pub use dispatch::{dispatch, perform, SessionRequest};
pub use event::{expand, Event, TurnEvents, COMMAND_EVENT, TURN_EVENT, TURN_PRIORITY};
pub use game::{CoreVerbs, Game, Snapshot, VerbFn};
pub use hints::{HintNode, HintTree};
pub use hooks::{HookFn, HookOutcome, HookRegistry};
pub use score::{Achievement, ScoreBoard};
pub use sequence::{SeqBranch, SeqNode, SeqStep, Sequence, SequenceState};
