//! Verb identification and template routing tests.

use parlor_engine::Game;
use parlor_foundation::{Direction, Ix, TurnAbort, TurnError};
use parlor_parser::ResolvedObject;
use parlor_world::{Holder, ThingKind, World};

/// One room, a key on the floor, a box and a table beside it, and a
/// hat already in the player's hands.
fn fixture() -> (Game, Ix, Ix) {
    let mut world = World::new();
    let room = world.create_room("Study", "A cramped study.");
    world.create_player(&room).unwrap();

    let key = world.create_thing(ThingKind::Key, "key");
    world.add_thing(&Holder::Room(room.clone()), &key).unwrap();

    let box_ = world.create_thing(ThingKind::Container, "box");
    world.add_thing(&Holder::Room(room.clone()), &box_).unwrap();

    let table = world.create_thing(ThingKind::Surface, "table");
    world.add_thing(&Holder::Room(room.clone()), &table).unwrap();

    let mat = world.create_thing(ThingKind::UnderSpace, "mat");
    world.add_thing(&Holder::Room(room.clone()), &mat).unwrap();

    let hat = world.create_thing(ThingKind::Clothing, "hat");
    let player = world.player().unwrap().clone();
    world.add_thing(&Holder::Thing(player), &hat).unwrap();

    let hall = world.create_room("Hall", "A long hall.");
    world
        .room_mut(&room)
        .unwrap()
        .set_exit(Direction::North, Some(parlor_world::Exit::Room(hall)));

    let game = Game::new(world).unwrap();
    (game, key, hat)
}

#[test]
fn synonyms_route_to_the_primary_verb() {
    let (mut game, key, _) = fixture();
    let get = game.core().get;

    for line in ["take key", "get key", "grab the key"] {
        let command = game.parse(line).unwrap();
        assert_eq!(command.verb, get, "{line}");
        assert_eq!(command.dobj, Some(ResolvedObject::Thing(key.clone())));
    }
}

#[test]
fn pick_up_binds_the_noun_after_the_particle() {
    let (mut game, key, _) = fixture();
    let command = game.parse("pick up the key").unwrap();
    assert_eq!(command.verb, game.core().get);
    assert_eq!(command.dobj, Some(ResolvedObject::Thing(key)));
}

#[test]
fn put_routes_by_preposition() {
    let (mut game, _, _) = fixture();

    let in_cmd = game.parse("put key in box").unwrap();
    let in_rec = game.registry().record(in_cmd.verb).clone();
    assert_eq!(in_rec.word, "put");
    assert!(in_rec.preposition.iter().any(|p| p == "in"));

    let on_cmd = game.parse("put key on table").unwrap();
    let on_rec = game.registry().record(on_cmd.verb).clone();
    assert_eq!(on_rec.word, "put");
    assert!(on_rec.preposition.iter().any(|p| p == "on"));

    assert_ne!(in_cmd.verb, on_cmd.verb);
}

#[test]
fn put_on_clothing_routes_to_wear() {
    let (mut game, _, hat) = fixture();
    let command = game.parse("put on hat").unwrap();
    assert_eq!(command.verb, game.core().wear);
    assert_eq!(command.dobj, Some(ResolvedObject::Thing(hat)));
}

#[test]
fn take_all_uses_the_quantifier_record() {
    let (mut game, _, _) = fixture();
    let command = game.parse("take all").unwrap();
    let record = game.registry().record(command.verb).clone();
    assert!(record.keywords.iter().any(|k| k == "all"));
    assert_eq!(command.dobj, None);
}

#[test]
fn look_under_is_its_own_record() {
    let (mut game, _, _) = fixture();
    let command = game.parse("look under the mat").unwrap();
    let record = game.registry().record(command.verb).clone();
    assert_eq!(record.word, "look");
    assert!(record.preposition.iter().any(|p| p == "under"));
    assert!(command.dobj.is_some());
}

#[test]
fn bare_direction_is_travel() {
    let (mut game, _, _) = fixture();
    let command = game.parse("n").unwrap();
    assert_eq!(command.verb, game.core().go);
    assert_eq!(
        command.dobj,
        Some(ResolvedObject::Direction(Direction::North))
    );
}

#[test]
fn unknown_verbs_abort_cleanly() {
    let (mut game, _, _) = fixture();
    let err = game.parse("frobnicate the key").unwrap_err();
    assert!(matches!(
        err,
        TurnError::Abort(TurnAbort::NoVerb { word }) if word == "frobnicate"
    ));
}
