//! The parsed command handed to the engine.

use parlor_foundation::{Direction, Ix, VerbId};

/// A fully resolved object slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedObject {
    /// A thing in the world.
    Thing(Ix),
    /// A compass or vertical direction.
    Direction(Direction),
    /// Raw text, for topic and free-form slots.
    Text(Vec<String>),
}

impl ResolvedObject {
    /// The thing index, when the slot resolved to a thing.
    #[must_use]
    pub fn thing(&self) -> Option<&Ix> {
        match self {
            ResolvedObject::Thing(ix) => Some(ix),
            _ => None,
        }
    }

    /// The direction, when the slot resolved to one.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        match self {
            ResolvedObject::Direction(d) => Some(*d),
            _ => None,
        }
    }

    /// The captured words, when the slot is free text.
    #[must_use]
    pub fn text(&self) -> Option<&[String]> {
        match self {
            ResolvedObject::Text(words) => Some(words),
            _ => None,
        }
    }
}

/// One turn's worth of parsed input: a verb, the template that fired,
/// and the resolved object slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    /// The verb to dispatch.
    pub verb: VerbId,
    /// Index of the syntax template that matched.
    pub template: usize,
    /// Direct object, if the template bound one.
    pub dobj: Option<ResolvedObject>,
    /// Indirect object, if the template bound one.
    pub iobj: Option<ResolvedObject>,
}

impl Command {
    /// A command with empty object slots.
    #[must_use]
    pub fn bare(verb: VerbId) -> Self {
        Self {
            verb,
            template: 0,
            dobj: None,
            iobj: None,
        }
    }
}
