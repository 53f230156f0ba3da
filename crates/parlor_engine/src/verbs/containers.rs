//! Containers, surfaces, under-spaces, doors, and locks.

use parlor_foundation::{Ix, Result, VerbId, VerbResult};
use parlor_parser::{Command, ResolvedObject, Scope, TypeConstraint, VerbRecord};
use parlor_world::Holder;

use crate::game::Game;

use super::{contents_phrase, dobj_ix, iobj_ix, iobj_required, name, Installer};

#[allow(clippy::too_many_lines)]
pub(super) fn install(
    i: &mut Installer,
) -> Result<(VerbId, VerbId, VerbId, VerbId, VerbId)> {
    i.verb(
        VerbRecord::new("put")
            .with_synonyms(&["set", "place", "insert"])
            .with_template(&["put", "<dobj>", "in", "<iobj>"])
            .with_template(&["put", "<dobj>", "into", "<iobj>"])
            .with_dscope(Scope::Inv)
            .with_iscope(Scope::Near)
            .with_itype(TypeConstraint::Container)
            .with_preposition(&["in", "into"])
            .with_help("put THING in CONTAINER"),
        set_in_verb,
    )?;
    i.verb(
        VerbRecord::new("put")
            .with_synonyms(&["set", "place"])
            .with_template(&["put", "<dobj>", "on", "<iobj>"])
            .with_template(&["put", "<dobj>", "onto", "<iobj>"])
            .with_dscope(Scope::Inv)
            .with_iscope(Scope::Near)
            .with_itype(TypeConstraint::Surface)
            .with_preposition(&["on", "onto"])
            .with_help("put THING on SURFACE"),
        set_on_verb,
    )?;
    i.verb(
        VerbRecord::new("put")
            .with_synonyms(&["set", "place", "slide"])
            .with_template(&["put", "<dobj>", "under", "<iobj>"])
            .with_dscope(Scope::Inv)
            .with_iscope(Scope::Near)
            .with_itype(TypeConstraint::UnderSpace)
            .with_preposition(&["under"])
            .with_help("put THING under THING"),
        set_under_verb,
    )?;
    let open = i.verb(
        VerbRecord::new("open")
            .with_template(&["open", "<dobj>"])
            .with_dscope(Scope::Near)
            .with_help("open THING: open a container or door"),
        open_verb,
    )?;
    let close = i.verb(
        VerbRecord::new("close")
            .with_synonyms(&["shut"])
            .with_template(&["close", "<dobj>"])
            .with_dscope(Scope::Near)
            .with_help("close THING: close a container or door"),
        close_verb,
    )?;
    let remove_from = i.verb(
        VerbRecord::new("remove")
            .with_synonyms(&["take", "get"])
            .with_template(&["remove", "<dobj>", "from", "<iobj>"])
            .with_dscope(Scope::Near)
            .with_iscope(Scope::Near)
            .with_preposition(&["from"])
            .with_help("take THING from CONTAINER"),
        remove_from_verb,
    )?;
    let lock = i.verb(
        VerbRecord::new("lock")
            .with_template(&["lock", "<dobj>", "with", "<iobj>"])
            .with_template(&["lock", "<dobj>"])
            .with_dscope(Scope::Near)
            .with_iscope(Scope::Inv)
            .with_itype(TypeConstraint::Key)
            .with_preposition(&["with", "using"])
            .with_help("lock THING [with KEY]"),
        lock_verb,
    )?;
    let unlock = i.verb(
        VerbRecord::new("unlock")
            .with_template(&["unlock", "<dobj>", "with", "<iobj>"])
            .with_template(&["unlock", "<dobj>"])
            .with_dscope(Scope::Near)
            .with_iscope(Scope::Inv)
            .with_itype(TypeConstraint::Key)
            .with_preposition(&["with", "using"])
            .with_help("unlock THING [with KEY]"),
        unlock_verb,
    )?;
    i.verb(
        VerbRecord::new("look")
            .with_template(&["look", "under", "<dobj>"])
            .with_dscope(Scope::Near)
            .with_preposition(&["under"]),
        look_under_verb,
    )?;
    Ok((open, close, lock, unlock, remove_from))
}

// =============================================================================
// Putting
// =============================================================================

fn set_in_verb(game: &mut Game, command: &Command) -> VerbResult {
    let d = dobj_ix(command)?;
    let c = iobj_required(command)?;
    if d == c {
        let dname = name(game, &d)?;
        game.events
            .say(format!("You can't put the {dname} inside itself."));
        return Ok(());
    }
    if !ensure_open(game, &c)? {
        return Ok(());
    }
    if !game.world.can_fit(&c, &d)? {
        let dname = name(game, &d)?;
        let cname = name(game, &c)?;
        game.events
            .say(format!("The {dname} won't fit in the {cname}."));
        return Ok(());
    }
    game.world.move_to(&d, &Holder::Thing(c.clone()))?;
    let dname = name(game, &d)?;
    let cname = name(game, &c)?;
    game.events.say(format!("You put the {dname} in the {cname}."));
    Ok(())
}

fn set_on_verb(game: &mut Game, command: &Command) -> VerbResult {
    let d = dobj_ix(command)?;
    let c = iobj_required(command)?;
    if d == c {
        let dname = name(game, &d)?;
        game.events
            .say(format!("You can't put the {dname} on itself."));
        return Ok(());
    }
    if !game.world.can_fit(&c, &d)? {
        let dname = name(game, &d)?;
        let cname = name(game, &c)?;
        game.events
            .say(format!("There's no room on the {cname} for the {dname}."));
        return Ok(());
    }
    game.world.move_to(&d, &Holder::Thing(c.clone()))?;
    let dname = name(game, &d)?;
    let cname = name(game, &c)?;
    game.events.say(format!("You put the {dname} on the {cname}."));
    Ok(())
}

fn set_under_verb(game: &mut Game, command: &Command) -> VerbResult {
    let d = dobj_ix(command)?;
    let c = iobj_required(command)?;
    if !game.world.can_fit(&c, &d)? {
        let dname = name(game, &d)?;
        let cname = name(game, &c)?;
        game.events
            .say(format!("The {dname} won't fit under the {cname}."));
        return Ok(());
    }
    game.world.move_to(&d, &Holder::Thing(c.clone()))?;
    // The player knows what they hid, so the space stays revealed.
    game.world.thing_mut(&c)?.revealed = true;
    let dname = name(game, &d)?;
    let cname = name(game, &c)?;
    game.events
        .say(format!("You put the {dname} under the {cname}."));
    Ok(())
}

/// Opens a closed-lid container on the way to using its interior.
/// Returns false when the interior stays unreachable.
fn ensure_open(game: &mut Game, c: &Ix) -> VerbResult<bool> {
    let closed = {
        let thing = game.world.thing(c)?;
        thing.has_lid && !thing.is_open
    };
    if !closed {
        return Ok(true);
    }
    let cname = name(game, c)?;
    game.events.say(format!("(First opening the {cname})"));
    let open = game.core().open;
    game.run_verb(
        open,
        &Command {
            verb: open,
            template: 0,
            dobj: Some(ResolvedObject::Thing(c.clone())),
            iobj: None,
        },
    )?;
    let thing = game.world.thing(c)?;
    Ok(!thing.has_lid || thing.is_open)
}

// =============================================================================
// Opening and closing
// =============================================================================

fn open_verb(game: &mut Game, command: &Command) -> VerbResult {
    let ix = dobj_ix(command)?;
    let connector = game.world.thing(&ix)?.connector.clone();
    if let Some(cix) = connector {
        return open_entrance(game, &ix, &cix);
    }
    let (nname, refusal, reveal) = {
        let thing = game.world.thing(&ix)?;
        let nname = thing.verbose_name();
        let refusal = if !thing.has_lid {
            Some(format!("The {nname} can't be opened."))
        } else if is_locked(game, thing.lock_obj.as_ref())? {
            Some(format!("The {nname} is locked."))
        } else if thing.is_open {
            Some(format!("The {nname} is already open."))
        } else {
            None
        };
        (nname, refusal, thing.contents().to_vec())
    };
    if let Some(message) = refusal {
        game.events.say(message);
        return Ok(());
    }
    game.world.thing_mut(&ix)?.is_open = true;
    game.events.say(format!("You open the {nname}."));
    if !reveal.is_empty() {
        let phrase = contents_phrase(game, &reveal)?;
        game.events.say(format!("Inside is {phrase}."));
        for kid in reveal {
            game.world.make_known(&kid)?;
        }
    }
    Ok(())
}

fn open_entrance(game: &mut Game, entrance: &Ix, cix: &Ix) -> VerbResult {
    let nname = name(game, entrance)?;
    let (blocks_ever, lock_obj, is_open) = {
        let conn = game.world.connector(cix)?;
        (
            conn.kind != parlor_world::ConnectorKind::Passage,
            conn.lock_obj.clone(),
            conn.is_open,
        )
    };
    if !blocks_ever {
        game.events.say("There's nothing there to open.");
        return Ok(());
    }
    if is_locked(game, lock_obj.as_ref())? {
        game.events.say(format!("The {nname} is locked."));
        return Ok(());
    }
    if is_open {
        game.events.say(format!("The {nname} is already open."));
        return Ok(());
    }
    game.world.connector_mut(cix)?.is_open = true;
    game.events.say(format!("You open the {nname}."));
    Ok(())
}

fn close_verb(game: &mut Game, command: &Command) -> VerbResult {
    let ix = dobj_ix(command)?;
    let nname = name(game, &ix)?;
    let connector = game.world.thing(&ix)?.connector.clone();
    if let Some(cix) = connector {
        let conn = game.world.connector(&cix)?;
        if conn.kind == parlor_world::ConnectorKind::Passage {
            game.events.say("There's nothing there to close.");
            return Ok(());
        }
        if !conn.is_open {
            game.events.say(format!("The {nname} is already closed."));
            return Ok(());
        }
        game.world.connector_mut(&cix)?.is_open = false;
        game.events.say(format!("You close the {nname}."));
        return Ok(());
    }
    let (has_lid, is_open) = {
        let thing = game.world.thing(&ix)?;
        (thing.has_lid, thing.is_open)
    };
    if !has_lid {
        game.events.say(format!("The {nname} can't be closed."));
        return Ok(());
    }
    if !is_open {
        game.events.say(format!("The {nname} is already closed."));
        return Ok(());
    }
    game.world.thing_mut(&ix)?.is_open = false;
    game.events.say(format!("You close the {nname}."));
    Ok(())
}

// =============================================================================
// Removing from containers
// =============================================================================

fn remove_from_verb(game: &mut Game, command: &Command) -> VerbResult {
    let d = dobj_ix(command)?;
    let c = iobj_required(command)?;
    let dname = name(game, &d)?;
    let cname = name(game, &c)?;
    if game.world.thing(&d)?.location != Some(Holder::Thing(c.clone())) {
        game.events
            .say(format!("The {dname} isn't in the {cname}."));
        return Ok(());
    }
    if !ensure_open(game, &c)? {
        return Ok(());
    }
    let refusal = {
        let thing = game.world.thing(&d)?;
        if thing.takeable() {
            None
        } else {
            Some(
                thing
                    .cannot_take_msg
                    .clone()
                    .unwrap_or_else(|| format!("You can't take the {dname}.")),
            )
        }
    };
    if let Some(message) = refusal {
        game.events.say(message);
        return Ok(());
    }
    let player = game.world.player()?.clone();
    game.world.move_to(&d, &Holder::Thing(player))?;
    game.world.make_known(&d)?;
    game.events
        .say(format!("You take the {dname} from the {cname}."));
    Ok(())
}

// =============================================================================
// Locks
// =============================================================================

/// The lock entity guarding a thing: its own lock, or its door's.
fn lock_of(game: &Game, ix: &Ix) -> VerbResult<Option<Ix>> {
    let thing = game.world.thing(ix)?;
    if let Some(cix) = &thing.connector {
        return Ok(game.world.connector(cix)?.lock_obj.clone());
    }
    Ok(thing.lock_obj.clone())
}

fn is_locked(game: &Game, lock: Option<&Ix>) -> VerbResult<bool> {
    match lock {
        Some(ix) => Ok(game.world.thing(ix)?.is_locked),
        None => Ok(false),
    }
}

/// Finds a held thing that works this lock, by `known_ix`.
pub(crate) fn held_key_for(game: &Game, lock: &Ix) -> VerbResult<Option<Ix>> {
    let Some(wanted) = game.world.thing(lock)?.key_obj.clone() else {
        return Ok(None);
    };
    let wanted_known = game.world.thing(&wanted)?.known_ix.clone();
    let player = game.world.player()?.clone();
    for held in game.world.all_contents_list(&Holder::Thing(player))? {
        if game.world.thing(&held)?.known_ix == wanted_known {
            return Ok(Some(held));
        }
    }
    Ok(None)
}

fn key_fits(game: &Game, lock: &Ix, key: &Ix) -> VerbResult<bool> {
    let Some(wanted) = game.world.thing(lock)?.key_obj.clone() else {
        return Ok(false);
    };
    Ok(game.world.thing(&wanted)?.known_ix == game.world.thing(key)?.known_ix)
}

fn lock_verb(game: &mut Game, command: &Command) -> VerbResult {
    set_locked(game, command, true)
}

fn unlock_verb(game: &mut Game, command: &Command) -> VerbResult {
    set_locked(game, command, false)
}

fn set_locked(game: &mut Game, command: &Command, locked: bool) -> VerbResult {
    let d = dobj_ix(command)?;
    let dname = name(game, &d)?;
    let Some(lock) = lock_of(game, &d)? else {
        game.events.say(format!("The {dname} has no lock."));
        return Ok(());
    };
    if game.world.thing(&lock)?.is_locked == locked {
        let state = if locked { "locked" } else { "unlocked" };
        game.events.say(format!("The {dname} is already {state}."));
        return Ok(());
    }

    if let Some(key) = iobj_ix(command) {
        if !key_fits(game, &lock, &key)? {
            let kname = name(game, &key)?;
            game.events
                .say(format!("The {kname} doesn't fit the lock."));
            return Ok(());
        }
    } else if held_key_for(game, &lock)?.is_none()
        && game.world.thing(&lock)?.key_obj.is_some()
    {
        game.events.say("You don't have the key.");
        return Ok(());
    }
    // A lock only engages over a closed lid or door.
    if locked && !ensure_closed(game, &d)? {
        return Ok(());
    }
    game.world.thing_mut(&lock)?.is_locked = locked;
    let action = if locked { "lock" } else { "unlock" };
    game.events.say(format!("You {action} the {dname}."));
    Ok(())
}

/// Closes an open lid or door before locking it.
fn ensure_closed(game: &mut Game, ix: &Ix) -> VerbResult<bool> {
    let open = {
        let thing = game.world.thing(ix)?;
        if let Some(cix) = &thing.connector {
            game.world.connector(cix)?.is_open
        } else {
            thing.has_lid && thing.is_open
        }
    };
    if !open {
        return Ok(true);
    }
    let nname = name(game, ix)?;
    game.events.say(format!("(First closing the {nname})"));
    let close = game.core().close;
    game.run_verb(
        close,
        &Command {
            verb: close,
            template: 0,
            dobj: Some(ResolvedObject::Thing(ix.clone())),
            iobj: None,
        },
    )?;
    let thing = game.world.thing(ix)?;
    if let Some(cix) = &thing.connector {
        Ok(!game.world.connector(cix)?.is_open)
    } else {
        Ok(!thing.is_open)
    }
}

// =============================================================================
// Looking under
// =============================================================================

fn look_under_verb(game: &mut Game, command: &Command) -> VerbResult {
    let ix = dobj_ix(command)?;
    let nname = name(game, &ix)?;
    let underspace = game.world.thing(&ix)?.contain_kind
        == Some(parlor_world::ContainKind::Under);
    if !underspace {
        game.events
            .say(format!("There's nothing under the {nname}."));
        return Ok(());
    }
    game.world.thing_mut(&ix)?.revealed = true;
    let kids = game.world.thing(&ix)?.contents().to_vec();
    if kids.is_empty() {
        game.events
            .say(format!("There's nothing under the {nname}."));
        return Ok(());
    }
    let phrase = contents_phrase(game, &kids)?;
    game.events
        .say(format!("Under the {nname} is {phrase}."));
    for kid in kids {
        game.world.make_known(&kid)?;
    }
    Ok(())
}
