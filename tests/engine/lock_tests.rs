//! Locks worked by a key the player already carries.

use parlor_engine::{BufferApp, Game};
use parlor_foundation::{Direction, Ix};
use parlor_world::{ConnectorKind, Holder, ThingKind, World};

/// Hall and yard joined by a locked door; the key starts in the
/// player's hands.
fn door_fixture() -> (Game, Ix, Ix) {
    let mut world = World::new();
    let hall = world.create_room("Hall", "A bare hall.");
    let yard = world.create_room("Yard", "A walled yard.");
    world.create_player(&hall).unwrap();
    let player = world.player().unwrap().clone();

    let key = world.create_thing(ThingKind::Key, "key");
    world.add_thing(&Holder::Thing(player), &key).unwrap();

    let door = world
        .create_connector(ConnectorKind::Door, &hall, Direction::East, &yard, "door")
        .unwrap();
    let lock = world.create_lock(Some(key.clone()));
    world.attach_lock_to_connector(&door, &lock).unwrap();

    (Game::new(world).unwrap(), key, yard)
}

#[test]
fn a_key_in_hand_clears_a_locked_door() {
    let (mut game, _key, yard) = door_fixture();

    let mut app = BufferApp::new();
    game.turn("go east", &mut app).unwrap();

    assert!(!app.saw("The door is locked."));
    assert!(app.saw("(First unlocking the door)"));
    assert!(app.saw("You go east."));
    let player = game.world.player().unwrap().clone();
    assert_eq!(game.world.outermost_room(&player).unwrap(), Some(yard));
}

#[test]
fn bare_unlock_finds_the_key_in_hand() {
    let (mut game, _key, _yard) = door_fixture();

    let mut app = BufferApp::new();
    game.turn("unlock the door", &mut app).unwrap();

    assert!(!app.saw("You don't have the key."));
    assert!(app.saw("You unlock the door."));
}

#[test]
fn a_key_in_a_held_pouch_also_counts() {
    let mut world = World::new();
    let room = world.create_room("Cellar", "A stone cellar.");
    world.create_player(&room).unwrap();
    let player = world.player().unwrap().clone();

    let pouch = world.create_thing(ThingKind::Container, "pouch");
    world.add_thing(&Holder::Thing(player), &pouch).unwrap();
    let key = world.create_thing(ThingKind::Key, "key");
    world.add_thing(&Holder::Thing(pouch), &key).unwrap();

    let chest = world.create_thing(ThingKind::Container, "chest");
    world.thing_mut(&chest).unwrap().has_lid = true;
    world.add_thing(&Holder::Room(room), &chest).unwrap();
    let lock = world.create_lock(Some(key));
    world.attach_lock_to(&chest, &lock).unwrap();

    let mut game = Game::new(world).unwrap();
    let mut app = BufferApp::new();
    game.turn("unlock the chest", &mut app).unwrap();

    assert!(app.saw("You unlock the chest."));
}
