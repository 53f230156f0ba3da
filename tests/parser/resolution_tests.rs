//! Noun resolution and disambiguation tests.

use parlor_engine::Game;
use parlor_foundation::{Ix, TurnAbort, TurnError};
use parlor_parser::ResolvedObject;
use parlor_world::{Holder, ThingKind, World};

/// Two bottles, told apart only by adjective.
fn bottle_fixture() -> (Game, Ix, Ix) {
    let mut world = World::new();
    let room = world.create_room("Pantry", "A narrow pantry.");
    world.create_player(&room).unwrap();

    let old = world.create_thing(ThingKind::Container, "bottle");
    world.add_adjective(&old, "old").unwrap();
    world.thing_mut(&old).unwrap().inv_item = true;
    world.add_thing(&Holder::Room(room.clone()), &old).unwrap();

    let new = world.create_thing(ThingKind::Container, "bottle");
    world.add_adjective(&new, "new").unwrap();
    world.thing_mut(&new).unwrap().inv_item = true;
    world.add_thing(&Holder::Room(room), &new).unwrap();

    let game = Game::new(world).unwrap();
    (game, old, new)
}

#[test]
fn adjectives_narrow_to_one_candidate() {
    let (mut game, old, new) = bottle_fixture();

    let command = game.parse("take the old bottle").unwrap();
    assert_eq!(command.dobj, Some(ResolvedObject::Thing(old)));

    let command = game.parse("take new bottle").unwrap();
    assert_eq!(command.dobj, Some(ResolvedObject::Thing(new)));
}

#[test]
fn ambiguity_parks_the_parse_for_an_index_answer() {
    let (mut game, _, new) = bottle_fixture();

    let err = game.parse("take bottle").unwrap_err();
    let TurnError::Abort(TurnAbort::NoMatch { prompt }) = err else {
        panic!("expected a disambiguation prompt");
    };
    assert_eq!(
        prompt,
        "Do you mean the old bottle (1), or the new bottle (2)?"
    );

    let command = game.parse("2").unwrap();
    assert_eq!(command.verb, game.core().get);
    assert_eq!(command.dobj, Some(ResolvedObject::Thing(new)));
}

#[test]
fn an_adjective_also_answers_the_question() {
    let (mut game, old, _) = bottle_fixture();

    let _ = game.parse("take bottle").unwrap_err();
    let command = game.parse("old").unwrap();
    assert_eq!(command.dobj, Some(ResolvedObject::Thing(old)));
}

#[test]
fn a_fresh_command_cancels_the_pending_question() {
    let (mut game, _, _) = bottle_fixture();

    let _ = game.parse("take bottle").unwrap_err();
    let command = game.parse("look").unwrap();
    assert_eq!(command.verb, game.core().look);
}

#[test]
fn absent_nouns_fail_with_a_message() {
    let (mut game, _, _) = bottle_fixture();

    let err = game.parse("take the ghost").unwrap_err();
    let TurnError::Abort(abort) = err else {
        panic!("expected a turn abort");
    };
    assert!(abort.has_message());
    assert!(abort.to_string().contains("ghost"));
}
