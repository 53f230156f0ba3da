//! Lighting and extinguishing light sources.

use parlor_foundation::{Result, VerbResult};
use parlor_parser::{Command, Scope, TypeConstraint, VerbRecord};

use crate::daemon::{consumable_light, light_daemon_name, Daemon};
use crate::game::Game;

use super::{dobj_ix, name, Installer};

pub(super) fn install(i: &mut Installer) -> Result<()> {
    i.verb(
        VerbRecord::new("light")
            .with_synonyms(&["ignite", "kindle"])
            .with_template(&["light", "<dobj>"])
            .with_dscope(Scope::Near)
            .with_dtype(TypeConstraint::LightSource)
            .with_help("light THING: light a lamp, candle, or torch"),
        light_verb,
    )?;
    i.verb(
        VerbRecord::new("extinguish")
            .with_synonyms(&["douse", "put", "blow", "snuff"])
            .with_template(&["extinguish", "<dobj>"])
            .with_template(&["put", "out", "<dobj>"])
            .with_template(&["blow", "out", "<dobj>"])
            .with_dscope(Scope::Near)
            .with_dtype(TypeConstraint::LightSource)
            .with_preposition(&["out"])
            .with_help("put out THING: extinguish a light source"),
        extinguish_verb,
    )?;
    Ok(())
}

fn light_verb(game: &mut Game, command: &Command) -> VerbResult {
    let ix = dobj_ix(command)?;
    let nname = name(game, &ix)?;
    let (is_lit, fuel) = {
        let thing = game.world.thing(&ix)?;
        (thing.is_lit, thing.light_turns)
    };
    if is_lit {
        game.events.say(format!("The {nname} is already lit."));
        return Ok(());
    }
    if fuel == Some(0) {
        game.events.say(format!("The {nname} is burnt out."));
        return Ok(());
    }
    game.world.thing_mut(&ix)?.is_lit = true;
    game.events.say(format!("You light the {nname}."));
    if fuel.is_some() {
        game.install_daemon(Daemon::new(
            light_daemon_name(&ix),
            ix.clone(),
            consumable_light,
        ));
    }
    Ok(())
}

fn extinguish_verb(game: &mut Game, command: &Command) -> VerbResult {
    let ix = dobj_ix(command)?;
    let nname = name(game, &ix)?;
    if !game.world.thing(&ix)?.is_lit {
        game.events.say(format!("The {nname} isn't lit."));
        return Ok(());
    }
    game.world.thing_mut(&ix)?.is_lit = false;
    game.remove_daemon(&light_daemon_name(&ix));
    game.events.say(format!("You put out the {nname}."));
    Ok(())
}
