//! Pouring, filling, and drinking.
//!
//! A container holds at most one liquid, and a liquid fills whatever
//! it sits in. Pouring one liquid onto another consults the liquids'
//! mix tables; an unlisted pair just refuses.

use parlor_foundation::{Ix, Result, VerbResult};
use parlor_parser::{Command, Scope, TypeConstraint, VerbRecord};
use parlor_world::{Holder, ThingKind};

use crate::game::Game;

use super::{dobj_ix, iobj_ix, iobj_required, name, Installer};

pub(super) fn install(i: &mut Installer) -> Result<()> {
    i.verb(
        VerbRecord::new("pour")
            .with_synonyms(&["empty"])
            .with_template(&["pour", "<dobj>", "into", "<iobj>"])
            .with_template(&["pour", "<dobj>", "in", "<iobj>"])
            .with_template(&["pour", "out", "<dobj>"])
            .with_template(&["pour", "<dobj>"])
            .with_dscope(Scope::Near)
            .with_iscope(Scope::Near)
            .with_preposition(&["out", "into", "in"])
            .with_help("pour THING [into VESSEL]"),
        pour_verb,
    )?;
    i.verb(
        VerbRecord::new("fill")
            .with_template(&["fill", "<dobj>", "with", "<iobj>"])
            .with_template(&["fill", "<dobj>", "from", "<iobj>"])
            .with_dscope(Scope::Near)
            .with_dtype(TypeConstraint::LiquidContainer)
            .with_iscope(Scope::Near)
            .with_preposition(&["with", "from"])
            .with_help("fill VESSEL with LIQUID"),
        fill_verb,
    )?;
    i.verb(
        VerbRecord::new("drink")
            .with_synonyms(&["sip", "quaff"])
            .with_template(&["drink", "<dobj>"])
            .with_dscope(Scope::Near)
            .with_help("drink THING"),
        drink_verb,
    )?;
    Ok(())
}

/// The liquid a slot refers to: the thing itself, or the one inside
/// it.
fn liquid_in(game: &Game, ix: &Ix) -> VerbResult<Option<Ix>> {
    if game.world.thing(ix)?.kind == ThingKind::Liquid {
        return Ok(Some(ix.clone()));
    }
    Ok(game.world.contains_liquid(ix)?)
}

fn pour_verb(game: &mut Game, command: &Command) -> VerbResult {
    let d = dobj_ix(command)?;
    let dname = name(game, &d)?;
    let Some(liquid) = liquid_in(game, &d)? else {
        game.events
            .say(format!("There's no liquid in the {dname}."));
        return Ok(());
    };
    let lname = name(game, &liquid)?;

    let Some(dest) = iobj_ix(command) else {
        // Poured on the ground, a liquid is gone.
        game.world.remove_thing(&liquid)?;
        game.events
            .say(format!("You pour the {lname} out onto the ground."));
        return Ok(());
    };
    transfer_liquid(game, &liquid, &dest)
}

fn fill_verb(game: &mut Game, command: &Command) -> VerbResult {
    let dest = dobj_ix(command)?;
    let source = iobj_required(command)?;
    let sname = name(game, &source)?;
    let Some(liquid) = liquid_in(game, &source)? else {
        game.events
            .say(format!("There's no liquid in the {sname}."));
        return Ok(());
    };
    transfer_liquid(game, &liquid, &dest)
}

fn transfer_liquid(game: &mut Game, liquid: &Ix, dest: &Ix) -> VerbResult {
    let lname = name(game, liquid)?;
    let dname = name(game, dest)?;
    if !game.world.thing(dest)?.holds_liquid {
        game.events
            .say(format!("The {dname} can't hold liquids."));
        return Ok(());
    }

    if let Some(existing) = game.world.contains_liquid(dest)? {
        if existing == *liquid {
            game.events
                .say(format!("The {lname} is already in the {dname}."));
            return Ok(());
        }
        return mix_liquids(game, liquid, &existing, dest);
    }

    if !game.world.can_fit(dest, liquid)? {
        game.events
            .say(format!("The {dname} can't hold that much."));
        return Ok(());
    }
    game.world.move_to(liquid, &Holder::Thing(dest.clone()))?;
    game.events
        .say(format!("You pour the {lname} into the {dname}."));
    Ok(())
}

/// Combines two liquids per their mix tables, or refuses.
fn mix_liquids(game: &mut Game, incoming: &Ix, resident: &Ix, dest: &Ix) -> VerbResult {
    let in_type = game.world.thing(incoming)?.liquid_type.clone();
    let res_type = game.world.thing(resident)?.liquid_type.clone();
    let (Some(in_type), Some(res_type)) = (in_type, res_type) else {
        game.events.say("That would just make a mess.");
        return Ok(());
    };
    if in_type == res_type {
        let dname = name(game, dest)?;
        game.events
            .say(format!("The {dname} is already full of {res_type}."));
        return Ok(());
    }

    let result = mix_result(game, incoming, &res_type)?
        .or(mix_result(game, resident, &in_type)?);
    let Some(result) = result else {
        game.events.say("That would just make a mess.");
        return Ok(());
    };

    // The incoming liquid is consumed; the resident becomes the
    // mixture.
    game.world.remove_thing(incoming)?;
    game.world.add_synonym(resident, &result)?;
    {
        let thing = game.world.thing_mut(resident)?;
        thing.liquid_type = Some(result.clone());
        thing.name = result.clone();
    }
    game.events
        .say(format!("The {in_type} and the {res_type} mix into {result}."));
    Ok(())
}

fn mix_result(game: &Game, liquid: &Ix, other_type: &str) -> VerbResult<Option<String>> {
    Ok(game
        .world
        .thing(liquid)?
        .mix_with
        .iter()
        .find(|(with, _)| with == other_type)
        .map(|(_, result)| result.clone()))
}

fn drink_verb(game: &mut Game, command: &Command) -> VerbResult {
    let d = dobj_ix(command)?;
    let Some(liquid) = liquid_in(game, &d)? else {
        let dname = name(game, &d)?;
        game.events.say(format!("You can't drink the {dname}."));
        return Ok(());
    };
    let lname = name(game, &liquid)?;
    if !game.world.thing(&liquid)?.drinkable {
        game.events
            .say(format!("The {lname} doesn't look safe to drink."));
        return Ok(());
    }
    game.world.remove_thing(&liquid)?;
    game.events.say(format!("You drink the {lname}."));
    Ok(())
}
