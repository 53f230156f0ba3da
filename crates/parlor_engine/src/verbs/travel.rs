//! Travel between rooms, through open and locked doors.

use parlor_foundation::{Direction, EngineError, Ix, Result, TurnError, VerbId, VerbResult};
use parlor_parser::{Command, ResolvedObject, Scope, TypeConstraint, VerbRecord};
use parlor_world::{Exit, Holder};

use crate::game::Game;

use super::{core::describe_room, dobj_ix, name, Installer};

pub(super) fn install(i: &mut Installer) -> Result<VerbId> {
    let go = i.verb(
        VerbRecord::new("go")
            .with_synonyms(&["walk", "head", "travel"])
            .with_template(&["go", "<dobj>"])
            .with_dscope(Scope::Direction)
            .with_help("go DIRECTION: travel (or just type the direction)"),
        go_verb,
    )?;
    i.verb(
        VerbRecord::new("enter")
            .with_synonyms(&["go", "cross"])
            .with_template(&["enter", "<dobj>"])
            .with_template(&["go", "through", "<dobj>"])
            .with_dscope(Scope::Room)
            .with_dtype(TypeConstraint::Entrance)
            .with_preposition(&["through"])
            .with_help("enter DOOR: travel through a door or passage"),
        enter_verb,
    )?;
    Ok(go)
}

fn go_verb(game: &mut Game, command: &Command) -> VerbResult {
    let direction = match command.dobj.as_ref().and_then(ResolvedObject::direction) {
        Some(direction) => direction,
        None => {
            return Err(TurnError::Engine(EngineError::VerbDefinition(
                "travel ran without a direction".to_string(),
            )))
        }
    };
    travel(game, direction)
}

fn enter_verb(game: &mut Game, command: &Command) -> VerbResult {
    let ix = dobj_ix(command)?;
    match game.world.thing(&ix)?.direction {
        Some(direction) => travel(game, direction),
        None => {
            let nname = name(game, &ix)?;
            game.events
                .say(format!("The {nname} doesn't lead anywhere."));
            Ok(())
        }
    }
}

/// Moves the player one room in a direction, opening (and with the
/// right key, unlocking) a door on the way.
pub(crate) fn travel(game: &mut Game, direction: Direction) -> VerbResult {
    let player = game.world.player()?.clone();
    let Some(here) = game.world.outermost_room(&player)? else {
        return Ok(());
    };

    // In the dark only the remembered exits are usable.
    if !game.world.resolve_darkness(&here)? {
        let visible = game.world.room(&here)?.dark_visible_exits.clone();
        if !visible.contains(&direction) {
            game.events
                .say("It's too dark to tell which way is which.");
            return Ok(());
        }
    }

    let exit = game.world.room(&here)?.exit(direction).cloned();
    match exit {
        None => {
            game.events.say("You can't go that way.");
            Ok(())
        }
        Some(Exit::Room(dest)) => cross(game, &dest, None, direction),
        Some(Exit::Connector(cix)) => {
            let conn = game.world.connector(&cix)?.clone();
            let Some(face) = conn.face_in(&here) else {
                return Err(TurnError::Engine(EngineError::VerbDefinition(format!(
                    "connector {cix} has no face in {here}"
                ))));
            };
            let entrance = face.entrance.clone();
            let Some(opposite) = conn.face_opposite(&here) else {
                return Err(TurnError::Engine(EngineError::VerbDefinition(format!(
                    "connector {cix} has no opposite face for {here}"
                ))));
            };
            let dest = opposite.room.clone();

            if conn.blocks() && !clear_door(game, &entrance, &conn.lock_obj)? {
                return Ok(());
            }
            cross(game, &dest, conn.travel_msg.clone(), direction)
        }
    }
}

/// Unlocks (given the key) and opens a closed door. Returns false
/// when the door stays shut.
fn clear_door(
    game: &mut Game,
    entrance: &Ix,
    lock_obj: &Option<Ix>,
) -> VerbResult<bool> {
    let ename = name(game, entrance)?;
    if let Some(lock) = lock_obj
        && game.world.thing(lock)?.is_locked
    {
        if super::containers::held_key_for(game, lock)?.is_none() {
            game.events.say(format!("The {ename} is locked."));
            return Ok(false);
        }
        game.events.say(format!("(First unlocking the {ename})"));
        let unlock = game.core().unlock;
        game.run_verb(
            unlock,
            &Command {
                verb: unlock,
                template: 1,
                dobj: Some(ResolvedObject::Thing(entrance.clone())),
                iobj: None,
            },
        )?;
        if game.world.thing(lock)?.is_locked {
            return Ok(false);
        }
    }
    game.events.say(format!("(First opening the {ename})"));
    let open = game.core().open;
    game.run_verb(
        open,
        &Command {
            verb: open,
            template: 0,
            dobj: Some(ResolvedObject::Thing(entrance.clone())),
            iobj: None,
        },
    )?;
    let cix = game.world.thing(entrance)?.connector.clone();
    match cix {
        Some(cix) => Ok(!game.world.connector(&cix)?.blocks()),
        None => Ok(true),
    }
}

fn cross(
    game: &mut Game,
    dest: &Ix,
    travel_msg: Option<String>,
    direction: Direction,
) -> VerbResult {
    let player = game.world.player()?.clone();
    game.world.move_to(&player, &Holder::Room(dest.clone()))?;
    let message =
        travel_msg.unwrap_or_else(|| format!("You go {}.", direction.phrase()));
    game.events.say(message);
    game.world.make_room_known(dest)?;
    describe_room(game)
}
