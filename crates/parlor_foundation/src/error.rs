//! Error types for the Parlor engine.
//!
//! There are two families. [`TurnAbort`] is player-facing: it is how a
//! parser stage or verb signals that the turn cannot continue, and the
//! turn engine converts it into event text. [`EngineError`] is
//! author-facing: it indicates a programming mistake in a game
//! definition and propagates upward instead of being shown to the
//! player.

use thiserror::Error;

use crate::ix::Ix;

/// A clean unwind of the current turn.
///
/// The `Err` arm of every parser stage and verb function. Each variant
/// renders as the line the player sees; [`TurnAbort::Handled`] means
/// the turn already emitted its message and nothing more should be
/// printed.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TurnAbort {
    /// No registered verb matches the leading token.
    #[error("I don't understand the verb \"{word}\".")]
    NoVerb {
        /// The unrecognized leading token.
        word: String,
    },

    /// A verb matched but no syntax template could be reconciled.
    #[error("I understood as far as \"{understood}\".")]
    Syntax {
        /// The prefix of the input that was understood.
        understood: String,
    },

    /// An object phrase mapped to no entity, or to several; the
    /// message is the disambiguation prompt when candidates survive.
    #[error("{prompt}")]
    NoMatch {
        /// The full prompt to show the player.
        prompt: String,
    },

    /// The object exists but is not in the scope the verb requires.
    #[error("{message}")]
    OutOfScope {
        /// Scope-specific message ("I don't see any X here", ...).
        message: String,
    },

    /// Sentinel: the turn has already produced its message.
    #[error("")]
    Handled,
}

impl TurnAbort {
    /// True if this abort carries text the player should see.
    #[must_use]
    pub fn has_message(&self) -> bool {
        !matches!(self, TurnAbort::Handled)
    }
}

/// Result type for parser stages and verb functions.
pub type TurnResult<T> = std::result::Result<T, TurnAbort>;

/// An author-facing programming mistake.
///
/// These indicate bugs in a game definition, not problems with player
/// input, so they propagate with `?` rather than becoming turn text.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A verb record is malformed (bad template, missing scope, ...).
    #[error("verb definition error: {0}")]
    VerbDefinition(String),

    /// An index does not resolve against the entity store.
    #[error("unknown entity index: {0}")]
    UnknownIx(Ix),

    /// A template expansion is malformed or calls a function.
    #[error("template expansion error: {0}")]
    Template(String),

    /// A save file failed to serialize, deserialize, or validate.
    #[error("save error: {0}")]
    Save(String),

    /// An I/O failure outside the save path.
    #[error("io error: {0}")]
    Io(String),
}

/// Result type for author-facing operations.
pub type Result<T, E = EngineError> = std::result::Result<T, E>;

/// Either error family, for code that can hit both.
///
/// Verb functions and dispatch stages look entities up (which can
/// surface author bugs) while also aborting turns on player input; `?`
/// lifts both families into this enum. The turn engine unwraps it:
/// the `Abort` arm becomes event text, the `Engine` arm propagates.
#[derive(Debug, Error)]
pub enum TurnError {
    /// Clean turn unwind; rendered to the player.
    #[error(transparent)]
    Abort(#[from] TurnAbort),

    /// Author bug; propagates out of the turn loop.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result type for verb functions and dispatch stages.
pub type VerbResult<T = ()> = std::result::Result<T, TurnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abort_messages_render() {
        let abort = TurnAbort::NoVerb {
            word: "frobnicate".to_string(),
        };
        assert_eq!(abort.to_string(), "I don't understand the verb \"frobnicate\".");

        let abort = TurnAbort::Syntax {
            understood: "unlock box".to_string(),
        };
        assert_eq!(abort.to_string(), "I understood as far as \"unlock box\".");
    }

    #[test]
    fn handled_has_no_message() {
        assert!(!TurnAbort::Handled.has_message());
        assert!(
            TurnAbort::OutOfScope {
                message: "You don't have any key.".to_string()
            }
            .has_message()
        );
    }

    #[test]
    fn engine_error_display() {
        let err = EngineError::UnknownIx(Ix::from_raw("thing99"));
        assert_eq!(err.to_string(), "unknown entity index: thing99");
    }
}
