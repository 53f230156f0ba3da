//! Standing, sitting, and lying, on the floor or on furniture.

use parlor_foundation::{Ix, Result, VerbId, VerbResult};
use parlor_parser::{Command, Scope, VerbRecord};
use parlor_world::{ContainKind, Holder, Posture};

use crate::game::Game;

use super::{dobj_ix, name, Installer};

pub(super) fn install(i: &mut Installer) -> Result<(VerbId, VerbId, VerbId)> {
    let stand = i.verb(
        VerbRecord::new("stand")
            .with_template(&["stand"])
            .with_template(&["stand", "up"])
            .with_preposition(&["up"])
            .with_help("stand: get up from wherever you are"),
        stand_verb,
    )?;
    let sit = i.verb(
        VerbRecord::new("sit")
            .with_template(&["sit", "on", "<dobj>"])
            .with_template(&["sit", "in", "<dobj>"])
            .with_template(&["sit", "down"])
            .with_template(&["sit"])
            .with_dscope(Scope::Room)
            .with_preposition(&["on", "in", "down"])
            .with_help("sit [on THING]"),
        sit_verb,
    )?;
    let lie = i.verb(
        VerbRecord::new("lie")
            .with_template(&["lie", "on", "<dobj>"])
            .with_template(&["lie", "in", "<dobj>"])
            .with_template(&["lie", "down", "on", "<dobj>"])
            .with_template(&["lie", "down"])
            .with_template(&["lie"])
            .with_dscope(Scope::Room)
            .with_preposition(&["on", "in", "down"])
            .with_help("lie down [on THING]"),
        lie_verb,
    )?;
    Ok((stand, sit, lie))
}

fn stand_verb(game: &mut Game, _command: &Command) -> VerbResult {
    let player = game.world.player()?.clone();
    let (position, nested) = {
        let actor = game.world.thing(&player)?;
        let nested = match &actor.location {
            Some(Holder::Thing(ix)) => Some(ix.clone()),
            _ => None,
        };
        (actor.position, nested)
    };
    if position == Posture::Standing && nested.is_none() {
        game.events.say("You're already standing.");
        return Ok(());
    }
    if nested.is_some() {
        let Some(room) = game.world.outermost_room(&player)? else {
            return Ok(());
        };
        game.world.move_to(&player, &Holder::Room(room))?;
    }
    game.world.thing_mut(&player)?.position = Posture::Standing;
    game.events.say("You stand up.");
    Ok(())
}

fn sit_verb(game: &mut Game, command: &Command) -> VerbResult {
    settle(game, command, Posture::Sitting)
}

fn lie_verb(game: &mut Game, command: &Command) -> VerbResult {
    settle(game, command, Posture::Lying)
}

fn settle(game: &mut Game, command: &Command, posture: Posture) -> VerbResult {
    let player = game.world.player()?.clone();
    match command.dobj.as_ref().and_then(|obj| obj.thing()) {
        None => {
            if game.world.thing(&player)?.position == posture {
                game.events
                    .say(format!("You're already {}.", posture.participle()));
                return Ok(());
            }
            game.world.thing_mut(&player)?.position = posture;
            let word = settle_word(posture);
            game.events.say(format!("You {word} down."));
            Ok(())
        }
        Some(seat) => settle_on(game, &seat.clone(), posture),
    }
}

fn settle_on(game: &mut Game, seat: &Ix, posture: Posture) -> VerbResult {
    let player = game.world.player()?.clone();
    let nname = name(game, seat)?;
    let (allowed, contain) = {
        let thing = game.world.thing(seat)?;
        let allowed = match posture {
            Posture::Sitting => thing.can_sit_in,
            Posture::Lying => thing.can_lie_in,
            Posture::Standing => thing.can_stand_in,
        };
        (allowed, thing.contain_kind)
    };
    let word = settle_word(posture);
    if !allowed {
        game.events.say(format!("You can't {word} on the {nname}."));
        return Ok(());
    }
    if game.world.thing(&player)?.location == Some(Holder::Thing(seat.clone())) {
        game.events
            .say(format!("You're already on the {nname}."));
        return Ok(());
    }
    game.world.move_to(&player, &Holder::Thing(seat.clone()))?;
    game.world.thing_mut(&player)?.position = posture;
    let prep = match contain {
        Some(ContainKind::In) => "in",
        _ => "on",
    };
    game.events.say(format!("You {word} {prep} the {nname}."));
    Ok(())
}

fn settle_word(posture: Posture) -> &'static str {
    match posture {
        Posture::Sitting => "sit",
        Posture::Lying => "lie",
        Posture::Standing => "stand",
    }
}
