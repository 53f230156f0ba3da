//! Command dispatch.
//!
//! Sits between the parser and the verb functions. Handles the
//! always-accepted meta-commands, interposes the implicit-action chain
//! (take-before-use, remove-from-container, doff, drop,
//! stand-up-before-travel), consults override hooks, and finally runs
//! the verb's default function.

use std::path::PathBuf;

use parlor_foundation::{Ix, Role, TurnAbort, VerbResult};
use parlor_parser::tokenizer::tokenize;
use parlor_parser::{Command, ResolvedObject, Scope, TemplateTok, TypeConstraint, VerbRecord};
use parlor_world::{Holder, ThingKind};

use crate::app::App;
use crate::game::Game;
use crate::hooks::HookOutcome;

/// A meta-command the session loop must fulfill: the core has no
/// filesystem access of its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionRequest {
    /// Serialize a snapshot to this path.
    Save(PathBuf),
    /// Load a snapshot from this path.
    Load(PathBuf),
    /// Start appending commands to a transcript file at this path.
    RecordOn(PathBuf),
    /// Stop recording.
    RecordOff,
    /// Replay the recorded transcript.
    Playback,
}

/// Runs one line: meta-commands first, then parse and perform.
///
/// # Errors
///
/// Turn aborts for player mistakes; engine errors for author bugs.
pub fn dispatch(
    game: &mut Game,
    line: &str,
    app: &mut dyn App,
) -> VerbResult<Option<SessionRequest>> {
    if let Some(request) = meta_command(game, line, app)? {
        return Ok(request.into_option());
    }
    let command = game.parse(line)?;
    perform(game, &command)?;
    Ok(None)
}

/// Outcome of the meta-command check.
enum Meta {
    /// Handled entirely inside the core.
    Handled,
    /// Handled, and the session loop owes us this.
    Request(SessionRequest),
}

impl Meta {
    fn into_option(self) -> Option<SessionRequest> {
        match self {
            Meta::Handled => None,
            Meta::Request(r) => Some(r),
        }
    }
}

#[allow(clippy::too_many_lines)]
fn meta_command(game: &mut Game, line: &str, app: &mut dyn App) -> VerbResult<Option<Meta>> {
    let tokens = tokenize(line);
    let words: Vec<&str> = tokens.iter().map(String::as_str).collect();
    let meta = match words.as_slice() {
        ["save"] => match app.save_prompt("sav", "Parlor save file", "Save where?") {
            Some(path) => Meta::Request(SessionRequest::Save(path)),
            None => {
                game.events.say("Save cancelled.");
                Meta::Handled
            }
        },
        ["load"] => match app.open_prompt("sav", "Parlor save file", "Load which save?") {
            Some(path) => Meta::Request(SessionRequest::Load(path)),
            None => {
                game.events.say("Load cancelled.");
                Meta::Handled
            }
        },
        ["record", "on"] => {
            match app.save_prompt("txt", "Parlor transcript", "Record where?") {
                Some(path) => Meta::Request(SessionRequest::RecordOn(path)),
                None => {
                    game.events.say("Recording cancelled.");
                    Meta::Handled
                }
            }
        }
        ["record", "off"] => Meta::Request(SessionRequest::RecordOff),
        ["playback"] => Meta::Request(SessionRequest::Playback),
        ["score"] => {
            let summary = game.score.summary();
            game.events.say(summary);
            Meta::Handled
        }
        ["fullscore"] | ["full", "score"] => {
            for line in game.score.full_report() {
                game.events.say(line);
            }
            Meta::Handled
        }
        ["hint"] => {
            match game.hints.next_hint() {
                Some(hint) => game.events.say(hint),
                None => game.events.say("No hints are available right now."),
            }
            Meta::Handled
        }
        ["verbs"] => {
            let mut words: Vec<&str> = game
                .registry()
                .records()
                .iter()
                .map(|r| r.word.as_str())
                .collect();
            words.sort_unstable();
            words.dedup();
            let listing = format!("I know the following verbs: {}.", words.join(", "));
            game.events.say(listing);
            Meta::Handled
        }
        ["verb", "help", word] => {
            let lines = verb_help(game, word);
            for line in lines {
                game.events.say(line);
            }
            Meta::Handled
        }
        ["instructions"] => {
            let text = if game.instructions_text.is_empty() {
                "Type commands like \"take the key\", \"go north\", or \"ask sarah about \
                 the opal\". Type \"verbs\" for a list of verbs."
                    .to_string()
            } else {
                game.instructions_text.clone()
            };
            game.events.say(text);
            Meta::Handled
        }
        ["about"] => {
            let text = if game.about_text.is_empty() {
                "Parlor interactive fiction engine.".to_string()
            } else {
                game.about_text.clone()
            };
            game.events.say(text);
            Meta::Handled
        }
        _ => return Ok(None),
    };
    Ok(Some(meta))
}

fn verb_help(game: &Game, word: &str) -> Vec<String> {
    let Some(record) = game
        .registry()
        .records()
        .iter()
        .find(|r| r.word == word || r.synonyms.iter().any(|s| s == word))
    else {
        return vec![format!("I don't know the verb \"{word}\".")];
    };
    if !record.help.is_empty() {
        return vec![record.help.clone()];
    }
    record
        .templates
        .iter()
        .map(|template| {
            template
                .iter()
                .map(|tok| match tok {
                    TemplateTok::Literal(w) => w.clone(),
                    TemplateTok::Dobj => "<thing>".to_string(),
                    TemplateTok::Iobj => "<other thing>".to_string(),
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

// =============================================================================
// Performing a command
// =============================================================================

/// Runs a parsed command: implicit actions, hooks, then the default
/// verb function.
///
/// # Errors
///
/// Anything the chain raises; an implicit failure aborts the outer
/// verb.
pub fn perform(game: &mut Game, command: &Command) -> VerbResult {
    let record = game.registry().record(command.verb).clone();
    implicit_stand(game, &record, command)?;
    let command = implicit_prepare(game, &record, command)?;
    if run_hooks(game, &command)? {
        return Ok(());
    }
    game.run_verb(command.verb, &command)
}

/// Rule: any verb aimed outward (non-inventory direct object) first
/// gets the player upright and out of whatever they were sitting or
/// lying on.
fn implicit_stand(game: &mut Game, record: &VerbRecord, command: &Command) -> VerbResult {
    let core = game.core();
    if command.verb == core.stand || command.verb == core.sit || command.verb == core.lie {
        return Ok(());
    }
    if command.dobj.is_none() || record.dscope.wants_held() {
        return Ok(());
    }
    let player = game.world.player()?.clone();
    let actor = game.world.thing(&player)?;
    let nested_in = match &actor.location {
        Some(Holder::Thing(ix)) => Some(ix.clone()),
        _ => None,
    };
    if actor.position == parlor_world::Posture::Standing && nested_in.is_none() {
        return Ok(());
    }
    if let Some(seat) = nested_in {
        let name = game.world.thing(&seat)?.verbose_name();
        game.events.say(format!("(Getting off of the {name})"));
    } else {
        game.events.say("(Standing up)");
    }
    let stand = Command::bare(core.stand);
    game.run_verb(core.stand, &stand)
}

/// Rewrites the command's object slots per the implicit-action chain,
/// running the interposed verbs as it goes.
fn implicit_prepare(game: &mut Game, record: &VerbRecord, command: &Command) -> VerbResult<Command> {
    let mut out = command.clone();
    if let Some(ResolvedObject::Thing(ix)) = &command.dobj {
        let fixed = prepare_slot(game, record, ix, record.dscope, record.dtype, record.allow_implicit_take)?;
        out.dobj = Some(ResolvedObject::Thing(fixed));
    }
    if let Some(ResolvedObject::Thing(ix)) = &command.iobj {
        let fixed = prepare_slot(game, record, ix, record.iscope, record.itype, record.allow_implicit_take)?;
        out.iobj = Some(ResolvedObject::Thing(fixed));
    }
    Ok(out)
}

fn prepare_slot(
    game: &mut Game,
    record: &VerbRecord,
    ix: &Ix,
    scope: Scope,
    constraint: Option<TypeConstraint>,
    allow_take: bool,
) -> VerbResult<Ix> {
    let core = game.core();
    let mut target = ix.clone();

    // A liquid offered to a verb that doesn't expect one stands in
    // for its container.
    let thing = game.world.thing(&target)?;
    if thing.kind == ThingKind::Liquid
        && !matches!(
            constraint,
            Some(TypeConstraint::Liquid | TypeConstraint::LiquidContainer)
        )
        && let Some(Holder::Thing(container)) = &thing.location
    {
        target = container.clone();
    }

    match scope {
        Scope::Inv | Scope::InvFlex => {
            let player = game.world.player()?.clone();
            let worn = game.world.thing(&player)?.wearing.contains(&target);
            if worn && record.id == core.wear {
                // The wear verb reports "already wearing" itself.
            } else if worn {
                let name = game.world.thing(&target)?.verbose_name();
                game.events.say(format!("(First taking off the {name})"));
                run_implicit(game, core.doff, &target, None)?;
            } else if !game.world.in_inventory(&target)? {
                let location = game.world.thing(&target)?.location.clone();
                match location {
                    Some(Holder::Thing(container))
                        if game.world.in_inventory(&container)? =>
                    {
                        let container_thing = game.world.thing(&container)?;
                        let closed = container_thing.has_lid && !container_thing.is_open;
                        if closed {
                            let name = container_thing.verbose_name();
                            game.events.say(format!("(First opening the {name})"));
                            run_implicit(game, core.open, &container, None)?;
                        }
                        let dname = game.world.thing(&target)?.verbose_name();
                        let cname = game.world.thing(&container)?.verbose_name();
                        game.events
                            .say(format!("(First removing the {dname} from the {cname})"));
                        run_implicit(game, core.remove_from, &target, Some(&container))?;
                    }
                    _ => {
                        if !allow_take || !record.allow_implicit_take {
                            return Err(no_hold_abort(game, &target)?);
                        }
                        let name = game.world.thing(&target)?.verbose_name();
                        game.events
                            .say(format!("(First attempting to take the {name})"));
                        run_implicit(game, core.get, &target, None)?;
                    }
                }
            }
        }
        Scope::Room | Scope::RoomFlex => {
            if game.world.in_inventory(&target)? {
                let name = game.world.thing(&target)?.verbose_name();
                game.events.say(format!("(First dropping the {name})"));
                run_implicit(game, core.drop, &target, None)?;
            }
        }
        _ => {}
    }
    Ok(target)
}

fn no_hold_abort(game: &Game, target: &Ix) -> VerbResult<parlor_foundation::TurnError> {
    let name = game.world.thing(target)?.verbose_name();
    Ok(TurnAbort::OutOfScope {
        message: format!("You aren't holding the {name}."),
    }
    .into())
}

fn run_implicit(game: &mut Game, verb: parlor_foundation::VerbId, dobj: &Ix, iobj: Option<&Ix>) -> VerbResult {
    let command = Command {
        verb,
        template: 0,
        dobj: Some(ResolvedObject::Thing(dobj.clone())),
        iobj: iobj.map(|ix| ResolvedObject::Thing(ix.clone())),
    };
    perform(game, &command)
}

/// Consults the override hooks for each resolved object. Returns true
/// when a hook handled the turn.
fn run_hooks(game: &mut Game, command: &Command) -> VerbResult<bool> {
    for (slot, role) in [(&command.dobj, Role::Dobj), (&command.iobj, Role::Iobj)] {
        if let Some(ResolvedObject::Thing(ix)) = slot
            && let Some(hook) = game.hooks().get(ix, command.verb, role)
        {
            if hook(game, command)? == HookOutcome::Handled {
                return Ok(true);
            }
        }
    }
    Ok(false)
}
