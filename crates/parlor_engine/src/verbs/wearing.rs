//! Wearing and removing clothing.

use parlor_foundation::{Result, VerbId, VerbResult};
use parlor_parser::{Command, Scope, TypeConstraint, VerbRecord};

use crate::game::Game;

use super::{dobj_ix, name, Installer};

pub(super) fn install(i: &mut Installer) -> Result<(VerbId, VerbId)> {
    let wear = i.verb(
        VerbRecord::new("wear")
            .with_synonyms(&["don", "put"])
            .with_template(&["wear", "<dobj>"])
            .with_template(&["put", "on", "<dobj>"])
            .with_dscope(Scope::Inv)
            .with_dtype(TypeConstraint::Clothing)
            .with_preposition(&["on"])
            .with_help("wear THING: put on clothing"),
        wear_verb,
    )?;
    let doff = i.verb(
        VerbRecord::new("doff")
            .with_synonyms(&["take", "remove"])
            .with_template(&["doff", "<dobj>"])
            .with_template(&["take", "off", "<dobj>"])
            .with_dscope(Scope::Wearing)
            .with_preposition(&["off"])
            .with_help("take off THING: remove worn clothing"),
        doff_verb,
    )?;
    Ok((wear, doff))
}

fn wear_verb(game: &mut Game, command: &Command) -> VerbResult {
    let ix = dobj_ix(command)?;
    let nname = name(game, &ix)?;
    let player = game.world.player()?.clone();
    if game.world.thing(&player)?.wearing.contains(&ix) {
        game.events
            .say(format!("You're already wearing the {nname}."));
        return Ok(());
    }
    game.world.thing_mut(&player)?.wearing.push(ix);
    game.events.say(format!("You put on the {nname}."));
    Ok(())
}

fn doff_verb(game: &mut Game, command: &Command) -> VerbResult {
    let ix = dobj_ix(command)?;
    let nname = name(game, &ix)?;
    let player = game.world.player()?.clone();
    let worn = game.world.thing(&player)?.wearing.contains(&ix);
    if !worn {
        game.events
            .say(format!("You aren't wearing the {nname}."));
        return Ok(());
    }
    game.world
        .thing_mut(&player)?
        .wearing
        .retain(|w| *w != ix);
    game.events.say(format!("You take off the {nname}."));
    Ok(())
}
