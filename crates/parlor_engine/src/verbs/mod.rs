//! The standard verb set.
//!
//! Each submodule registers its verb declarations and default
//! functions through the [`Installer`]; [`install`] wires the whole
//! set into a fresh registry and hands back the [`CoreVerbs`] handles
//! the dispatcher chains into implicitly. Authors override behavior
//! per entity with hooks rather than by replacing these functions.

pub mod commerce;
pub mod containers;
pub mod core;
pub mod light;
pub mod liquids;
pub mod posture;
pub mod talk;
pub mod travel;
pub mod wearing;

use std::collections::HashMap;

use parlor_foundation::{EngineError, Ix, Result, TurnError, VerbId, VerbResult};
use parlor_parser::{Command, VerbRecord, VerbRegistry};

use crate::game::{CoreVerbs, Game, VerbFn};

/// Registers records and their default functions as one unit.
pub(crate) struct Installer<'a> {
    registry: &'a mut VerbRegistry,
    actions: &'a mut HashMap<VerbId, VerbFn>,
}

impl Installer<'_> {
    fn verb(&mut self, record: VerbRecord, func: VerbFn) -> Result<VerbId> {
        let id = self.registry.register(record)?;
        self.actions.insert(id, func);
        Ok(id)
    }
}

/// Installs the standard verb set into a registry and action table.
///
/// # Errors
///
/// Propagates registration failures; these indicate a malformed
/// declaration in this module, never author input.
pub fn install(
    registry: &mut VerbRegistry,
    actions: &mut HashMap<VerbId, VerbFn>,
) -> Result<CoreVerbs> {
    let mut i = Installer { registry, actions };
    let (look, get, drop) = core::install(&mut i)?;
    let (open, close, lock, unlock, remove_from) = containers::install(&mut i)?;
    let go = travel::install(&mut i)?;
    let (stand, sit, lie) = posture::install(&mut i)?;
    let (wear, doff) = wearing::install(&mut i)?;
    talk::install(&mut i)?;
    commerce::install(&mut i)?;
    light::install(&mut i)?;
    liquids::install(&mut i)?;
    Ok(CoreVerbs {
        get,
        drop,
        open,
        close,
        lock,
        unlock,
        remove_from,
        stand,
        sit,
        lie,
        wear,
        doff,
        go,
        look,
    })
}

// =============================================================================
// Slot access
// =============================================================================

/// The direct object as a thing. A verb that declares a thing slot
/// never runs without one, so absence is an engine bug.
pub(crate) fn dobj_ix(command: &Command) -> VerbResult<Ix> {
    match command.dobj.as_ref().and_then(|obj| obj.thing()) {
        Some(ix) => Ok(ix.clone()),
        None => Err(TurnError::Engine(EngineError::VerbDefinition(
            "verb ran without its direct object".to_string(),
        ))),
    }
}

/// The indirect object as a thing, when the template bound one.
pub(crate) fn iobj_ix(command: &Command) -> Option<Ix> {
    command
        .iobj
        .as_ref()
        .and_then(|obj| obj.thing())
        .cloned()
}

/// The indirect object as a thing, required.
pub(crate) fn iobj_required(command: &Command) -> VerbResult<Ix> {
    match iobj_ix(command) {
        Some(ix) => Ok(ix),
        None => Err(TurnError::Engine(EngineError::VerbDefinition(
            "verb ran without its indirect object".to_string(),
        ))),
    }
}

// =============================================================================
// Text helpers
// =============================================================================

/// The full noun phrase of a thing.
pub(crate) fn name(game: &Game, ix: &Ix) -> VerbResult<String> {
    Ok(game.world.thing(ix)?.verbose_name())
}

/// Prefixes the indefinite article.
pub(crate) fn indefinite(noun: &str) -> String {
    let article = match noun.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    };
    format!("{article} {noun}")
}

/// Uppercases the first letter.
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Joins noun phrases into prose: "a cup", "a cup and an egg",
/// "a cup, an egg, and a fork".
pub(crate) fn list_phrase(names: &[String]) -> String {
    let with_articles: Vec<String> = names.iter().map(|n| indefinite(n)).collect();
    match with_articles.as_slice() {
        [] => String::new(),
        [one] => one.clone(),
        [first, second] => format!("{first} and {second}"),
        many => {
            let (last, rest) = many.split_last().unwrap_or((&with_articles[0], &[]));
            format!("{}, and {last}", rest.join(", "))
        }
    }
}

/// The noun-phrase list of a set of things.
pub(crate) fn contents_phrase(game: &Game, ixes: &[Ix]) -> VerbResult<String> {
    let mut names = Vec::with_capacity(ixes.len());
    for ix in ixes {
        names.push(name(game, ix)?);
    }
    Ok(list_phrase(&names))
}
