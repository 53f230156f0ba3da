//! Per-entity verb override hooks.
//!
//! Authors customise interactions without editing core verbs by
//! registering a closure keyed by (entity, verb, role). Dispatch
//! consults the registry for each resolved object before running the
//! verb's default function; a hook that reports
//! [`HookOutcome::Handled`] ends the turn's verb processing.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parlor_foundation::{Ix, Role, VerbId, VerbResult};
use parlor_parser::Command;

use crate::game::Game;

/// What a hook tells dispatch to do next.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HookOutcome {
    /// The hook produced the turn's response; skip the default verb.
    Handled,
    /// Fall through to the default verb function.
    Continue,
}

/// The closure type hooks run. Hooks receive the whole game and the
/// parsed command, like verb functions do.
pub type HookFn = Arc<dyn Fn(&mut Game, &Command) -> VerbResult<HookOutcome>>;

/// Registry of override hooks keyed by (entity, verb, role).
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: HashMap<(Ix, VerbId, Role), HookFn>,
}

impl HookRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a hook, replacing any previous one for the key.
    pub fn set(
        &mut self,
        entity: Ix,
        verb: VerbId,
        role: Role,
        hook: impl Fn(&mut Game, &Command) -> VerbResult<HookOutcome> + 'static,
    ) {
        self.hooks.insert((entity, verb, role), Arc::new(hook));
    }

    /// The hook for a key, cloned out so the game can be borrowed
    /// mutably while it runs.
    #[must_use]
    pub fn get(&self, entity: &Ix, verb: VerbId, role: Role) -> Option<HookFn> {
        self.hooks.get(&(entity.clone(), verb, role)).cloned()
    }

    /// Removes a hook.
    pub fn remove(&mut self, entity: &Ix, verb: VerbId, role: Role) {
        self.hooks.remove(&(entity.clone(), verb, role));
    }

    /// Number of registered hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hooks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
