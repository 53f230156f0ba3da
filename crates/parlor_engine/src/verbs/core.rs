//! Looking, inventory, taking, dropping, reading, waiting.

use parlor_foundation::{Ix, Result, VerbId, VerbResult};
use parlor_parser::{Command, Scope, TypeConstraint, VerbRecord};
use parlor_world::{ContainKind, Holder, ThingKind};

use crate::game::Game;

use super::{capitalize, contents_phrase, dobj_ix, indefinite, Installer};

pub(super) fn install(i: &mut Installer) -> Result<(VerbId, VerbId, VerbId)> {
    let look = i.verb(
        VerbRecord::new("look")
            .with_synonyms(&["l"])
            .with_template(&["look"])
            .with_template(&["look", "around"])
            .with_preposition(&["around"])
            .with_help("look: describe the current room"),
        look_verb,
    )?;
    i.verb(
        VerbRecord::new("examine")
            .with_synonyms(&["x", "inspect", "look"])
            .with_template(&["examine", "<dobj>"])
            .with_template(&["look", "at", "<dobj>"])
            .with_dscope(Scope::Near)
            .with_far_dobj()
            .with_preposition(&["at"])
            .with_help("examine THING: describe something closely"),
        examine_verb,
    )?;
    i.verb(
        VerbRecord::new("inventory")
            .with_synonyms(&["i", "inv"])
            .with_template(&["inventory"])
            .with_help("inventory: list what you are carrying"),
        inventory_verb,
    )?;
    let get = i.verb(
        VerbRecord::new("take")
            .with_synonyms(&["get", "grab", "pick"])
            .with_template(&["pick", "up", "<dobj>"])
            .with_template(&["take", "<dobj>"])
            .with_dscope(Scope::Room)
            .with_preposition(&["up"])
            .with_help("take THING: pick something up"),
        take_verb,
    )?;
    i.verb(
        VerbRecord::new("take")
            .with_synonyms(&["get", "grab"])
            .with_template(&["take", "all"])
            .with_template(&["take", "everything"])
            .with_keywords(&["all", "everything"]),
        take_all_verb,
    )?;
    let drop = i.verb(
        VerbRecord::new("drop")
            .with_synonyms(&["discard"])
            .with_template(&["drop", "<dobj>"])
            .with_dscope(Scope::Inv)
            .without_implicit_take()
            .with_help("drop THING: put something down"),
        drop_verb,
    )?;
    i.verb(
        VerbRecord::new("drop")
            .with_synonyms(&["discard"])
            .with_template(&["drop", "all"])
            .with_template(&["drop", "everything"])
            .with_keywords(&["all", "everything"]),
        drop_all_verb,
    )?;
    i.verb(
        VerbRecord::new("read")
            .with_template(&["read", "<dobj>"])
            .with_dscope(Scope::Near)
            .with_dtype(TypeConstraint::Readable)
            .with_help("read THING: read what is written on something"),
        read_verb,
    )?;
    i.verb(
        VerbRecord::new("wait").with_synonyms(&["z"]).with_template(&["wait"]),
        wait_verb,
    )?;
    Ok((look, get, drop))
}

// =============================================================================
// Looking
// =============================================================================

fn look_verb(game: &mut Game, _command: &Command) -> VerbResult {
    describe_room(game)
}

/// Prints the current room: title, description, then a line per
/// listed object. Shared by `look` and arrival after travel.
pub(crate) fn describe_room(game: &mut Game) -> VerbResult {
    let player = game.world.player()?.clone();
    let Some(room_ix) = game.world.outermost_room(&player)? else {
        return Ok(());
    };
    if !game.world.resolve_darkness(&room_ix)? {
        let dark_desc = game.world.room(&room_ix)?.dark_desc.clone();
        game.events.say(dark_desc);
        return Ok(());
    }
    let (title, desc, contents, scenery) = {
        let room = game.world.room(&room_ix)?;
        (
            room.name.clone(),
            room.desc.clone(),
            room.contents().to_vec(),
            room.scenery.clone(),
        )
    };
    game.events.say(title);
    if !desc.is_empty() {
        game.events.say(desc);
    }
    for ix in contents {
        if ix == player || scenery.contains(&ix) {
            continue;
        }
        describe_listing(game, &ix)?;
    }
    Ok(())
}

/// One room-listing line for a thing, plus its visible contents.
fn describe_listing(game: &mut Game, ix: &Ix) -> VerbResult {
    let (line, interior) = {
        let thing = game.world.thing(ix)?;
        if matches!(thing.kind, ThingKind::Entrance | ThingKind::Abstract) {
            return Ok(());
        }
        let line = if !thing.desc.is_empty() {
            thing.desc.clone()
        } else if thing.is_actor() {
            format!("{} is here.", capitalize(&thing.verbose_name()))
        } else {
            format!("There is {} here.", indefinite(&thing.verbose_name()))
        };
        (line, interior_line(game, ix)?)
    };
    game.events.say(line);
    game.world.make_known(ix)?;
    if let Some((text, kids)) = interior {
        game.events.say(text);
        for kid in kids {
            game.world.make_known(&kid)?;
        }
    }
    Ok(())
}

/// "In the box is a silver key." for a thing whose interior is
/// visible and occupied.
fn interior_line(game: &Game, ix: &Ix) -> VerbResult<Option<(String, Vec<Ix>)>> {
    let thing = game.world.thing(ix)?;
    if !thing.interior_visible() || thing.contents().is_empty() {
        return Ok(None);
    }
    let Some(kind) = thing.contain_kind else {
        return Ok(None);
    };
    let prep = match kind {
        ContainKind::In => "In",
        ContainKind::On => "On",
        ContainKind::Under => "Under",
    };
    let kids = thing.contents().to_vec();
    let name = thing.verbose_name();
    let phrase = contents_phrase(game, &kids)?;
    Ok(Some((format!("{prep} the {name} is {phrase}."), kids)))
}

fn examine_verb(game: &mut Game, command: &Command) -> VerbResult {
    let ix = dobj_ix(command)?;
    game.world.make_known(&ix)?;
    let (text, closed_note, interior) = {
        let thing = game.world.thing(&ix)?;
        let name = thing.verbose_name();
        let text = if thing.xdesc.is_empty() {
            format!("You see nothing special about the {name}.")
        } else {
            thing.xdesc.clone()
        };
        let closed_note = (thing.has_lid && !thing.is_open)
            .then(|| format!("The {name} is closed."));
        (text, closed_note, interior_line(game, &ix)?)
    };
    game.events.say(text);
    if let Some(note) = closed_note {
        game.events.say(note);
    }
    if let Some((line, kids)) = interior {
        game.events.say(line);
        for kid in kids {
            game.world.make_known(&kid)?;
        }
    }
    Ok(())
}

fn inventory_verb(game: &mut Game, _command: &Command) -> VerbResult {
    let player = game.world.player()?.clone();
    let (held, worn) = {
        let actor = game.world.thing(&player)?;
        let worn = actor.wearing.clone();
        let held: Vec<Ix> = actor
            .contents()
            .iter()
            .filter(|ix| !worn.contains(ix))
            .cloned()
            .collect();
        (held, worn)
    };
    if held.is_empty() {
        game.events.say("You aren't carrying anything.");
    } else {
        let phrase = contents_phrase(game, &held)?;
        game.events.say(format!("You are carrying: {phrase}."));
    }
    if !worn.is_empty() {
        let phrase = contents_phrase(game, &worn)?;
        game.events.say(format!("You are wearing: {phrase}."));
    }
    Ok(())
}

// =============================================================================
// Taking and dropping
// =============================================================================

fn take_verb(game: &mut Game, command: &Command) -> VerbResult {
    let ix = dobj_ix(command)?;
    take_one(game, &ix)
}

/// The take action over one thing; also driven by "take all" and the
/// dispatcher's implicit take.
pub(crate) fn take_one(game: &mut Game, ix: &Ix) -> VerbResult {
    let player = game.world.player()?.clone();
    if *ix == player {
        game.events.say("You are beyond taking.");
        return Ok(());
    }
    if game.world.in_inventory(ix)? {
        let name = super::name(game, ix)?;
        game.events.say(format!("You already have the {name}."));
        return Ok(());
    }
    let refusal = {
        let thing = game.world.thing(ix)?;
        let name = thing.verbose_name();
        if thing.is_actor() {
            Some(format!("The {name} doesn't care to be picked up."))
        } else if let Some(parent) = &thing.parent_obj {
            Some(thing.cannot_take_msg.clone().unwrap_or_else(|| {
                let whole = game
                    .world
                    .thing(parent)
                    .map(|p| p.verbose_name())
                    .unwrap_or_default();
                format!("The {name} is attached to the {whole}.")
            }))
        } else if !thing.inv_item {
            Some(
                thing
                    .cannot_take_msg
                    .clone()
                    .unwrap_or_else(|| format!("You can't take the {name}.")),
            )
        } else {
            None
        }
    };
    if let Some(message) = refusal {
        game.events.say(message);
        return Ok(());
    }
    game.world.move_to(ix, &Holder::Thing(player))?;
    game.world.make_known(ix)?;
    let name = super::name(game, ix)?;
    game.events.say(format!("You take the {name}."));
    Ok(())
}

fn take_all_verb(game: &mut Game, _command: &Command) -> VerbResult {
    let player = game.world.player()?.clone();
    let Some(room_ix) = game.world.outermost_room(&player)? else {
        return Ok(());
    };
    let scenery = game.world.room(&room_ix)?.scenery.clone();
    let contents = game.world.room(&room_ix)?.contents().to_vec();
    let mut pool = Vec::new();
    for ix in contents {
        if ix == player || scenery.contains(&ix) {
            continue;
        }
        let thing = game.world.thing(&ix)?;
        if thing.takeable() && thing.kind != ThingKind::Liquid {
            pool.push(ix);
        }
    }
    if pool.is_empty() {
        game.events.say("There's nothing here to take.");
        return Ok(());
    }
    for ix in pool {
        take_one(game, &ix)?;
    }
    Ok(())
}

fn drop_verb(game: &mut Game, command: &Command) -> VerbResult {
    let ix = dobj_ix(command)?;
    drop_one(game, &ix)
}

pub(crate) fn drop_one(game: &mut Game, ix: &Ix) -> VerbResult {
    let name = super::name(game, ix)?;
    if !game.world.in_inventory(ix)? {
        game.events.say(format!("You aren't holding the {name}."));
        return Ok(());
    }
    let player = game.world.player()?.clone();
    let Some(room_ix) = game.world.outermost_room(&player)? else {
        return Ok(());
    };
    game.world.move_to(ix, &Holder::Room(room_ix))?;
    game.events.say(format!("You drop the {name}."));
    Ok(())
}

fn drop_all_verb(game: &mut Game, _command: &Command) -> VerbResult {
    let player = game.world.player()?.clone();
    let held: Vec<Ix> = {
        let actor = game.world.thing(&player)?;
        let worn = &actor.wearing;
        actor
            .contents()
            .iter()
            .filter(|ix| !worn.contains(ix))
            .cloned()
            .collect()
    };
    if held.is_empty() {
        game.events.say("You aren't carrying anything to drop.");
        return Ok(());
    }
    for ix in held {
        drop_one(game, &ix)?;
    }
    Ok(())
}

// =============================================================================
// Reading and waiting
// =============================================================================

fn read_verb(game: &mut Game, command: &Command) -> VerbResult {
    let ix = dobj_ix(command)?;
    game.world.make_known(&ix)?;
    let text = game.world.thing(&ix)?.read_text.clone();
    match text {
        Some(text) => game.events.say(text),
        None => {
            let name = super::name(game, &ix)?;
            game.events
                .say(format!("There's nothing written on the {name}."));
        }
    }
    Ok(())
}

fn wait_verb(game: &mut Game, _command: &Command) -> VerbResult {
    game.events.say("Time passes.");
    Ok(())
}
