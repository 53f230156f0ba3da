//! Save, restore, and determinism tests.

use parlor_engine::{BufferApp, Game};
use parlor_runtime::save;
use parlor_world::{Holder, ThingKind, World};

/// A room, a takeable key, and a lit lamp in inventory.
fn build_game() -> Game {
    let mut world = World::new();
    let room = world.create_room("Cellar", "A damp cellar.");
    world.create_player(&room).unwrap();
    let key = world.create_thing(ThingKind::Key, "key");
    world.add_thing(&Holder::Room(room), &key).unwrap();
    let lamp = world.create_thing(ThingKind::LightSource, "lamp");
    world.thing_mut(&lamp).unwrap().light_turns = Some(20);
    let player = world.player().unwrap().clone();
    world.add_thing(&Holder::Thing(player), &lamp).unwrap();
    Game::new(world).unwrap()
}

#[test]
fn a_restored_save_carries_the_world_changes() {
    let mut game = build_game();
    let mut app = BufferApp::new();
    game.turn("take the key", &mut app).unwrap();
    game.turn("light the lamp", &mut app).unwrap();

    let bytes = save::to_bytes(&game.snapshot()).unwrap();

    // A freshly built game has the key on the floor again.
    let mut fresh = build_game();
    let key = fresh.world.noun_lookup("key").first().cloned().unwrap();
    assert!(!fresh.world.in_inventory(&key).unwrap());

    let snapshot = save::from_bytes(&bytes).unwrap();
    fresh.restore(&snapshot).unwrap();

    assert!(fresh.world.in_inventory(&key).unwrap());
    assert_eq!(fresh.turn_count(), game.turn_count());
}

#[test]
fn restore_rederives_the_light_daemon() {
    let mut game = build_game();
    let mut app = BufferApp::new();
    game.turn("light the lamp", &mut app).unwrap();
    let bytes = save::to_bytes(&game.snapshot()).unwrap();

    let mut fresh = build_game();
    let lamp = fresh.world.noun_lookup("lamp").first().cloned().unwrap();
    fresh.restore(&save::from_bytes(&bytes).unwrap()).unwrap();

    assert!(fresh.has_daemon(&parlor_engine::light_daemon_name(&lamp)));
    assert!(fresh.world.thing(&lamp).unwrap().is_lit);
}

#[test]
fn restore_rederives_the_daemon_of_a_lamp_on_the_floor() {
    let mut game = build_game();
    let mut app = BufferApp::new();
    game.turn("light the lamp", &mut app).unwrap();
    game.turn("drop the lamp", &mut app).unwrap();
    let bytes = save::to_bytes(&game.snapshot()).unwrap();

    let mut fresh = build_game();
    let lamp = fresh.world.noun_lookup("lamp").first().cloned().unwrap();
    fresh.restore(&save::from_bytes(&bytes).unwrap()).unwrap();

    // The lamp is a direct child of the room, not nested in anything.
    assert!(fresh.has_daemon(&parlor_engine::light_daemon_name(&lamp)));
}

#[test]
fn identical_scripts_produce_identical_transcripts() {
    let script = ["look", "take the key", "drop the key", "inventory"];

    let mut first = build_game();
    let mut first_app = BufferApp::new();
    for line in script {
        first.turn(line, &mut first_app).unwrap();
    }

    let mut second = build_game();
    let mut second_app = BufferApp::new();
    for line in script {
        second.turn(line, &mut second_app).unwrap();
    }

    assert_eq!(first_app.transcript(), second_app.transcript());
}

#[test]
fn a_snapshot_from_another_world_is_rejected() {
    let game = build_game();
    let snapshot = game.snapshot();

    let mut other_world = World::new();
    let room = other_world.create_room("Attic", "A bare attic.");
    other_world.create_player(&room).unwrap();
    let mut other = Game::new(other_world).unwrap();

    assert!(other.restore(&snapshot).is_err());
}
