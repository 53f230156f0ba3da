//! End-to-end scenarios.
//!
//! Each test builds a small world, plays a literal script through
//! whole turns, and checks the exact lines a player would see.

use parlor_engine::{BufferApp, Game};
use parlor_world::{ActorData, ConnectorKind, Exit, Holder, Posture, ThingKind, World};

use parlor_foundation::Direction;

fn run(game: &mut Game, app: &mut BufferApp, line: &str) {
    game.turn(line, app).unwrap();
}

#[test]
fn implicit_take_before_use() {
    let mut world = World::new();
    let room = world.create_room("Workshop", "A cluttered workshop.");
    world.create_player(&room).unwrap();

    let key = world.create_thing(ThingKind::Key, "key");
    world.add_adjective(&key, "silver").unwrap();
    world.add_thing(&Holder::Room(room.clone()), &key).unwrap();

    let bench = world.create_thing(ThingKind::Surface, "bench");
    world.add_thing(&Holder::Room(room), &bench).unwrap();

    let box_ = world.create_thing(ThingKind::Container, "box");
    world.thing_mut(&box_).unwrap().has_lid = true;
    world.add_thing(&Holder::Thing(bench), &box_).unwrap();

    let lock = world.create_lock(Some(key));
    world.attach_lock_to(&box_, &lock).unwrap();

    let mut game = Game::new(world).unwrap();
    let mut app = BufferApp::new();
    run(&mut game, &mut app, "unlock box with silver key");

    assert!(app.saw("(First attempting to take the silver key)"));
    assert!(app.saw("You unlock the box"));
}

#[test]
fn darkness_blocks_examination() {
    let mut world = World::new();
    let room = world.create_room("Cave", "A low cave.");
    world.room_mut(&room).unwrap().dark = true;
    world.create_player(&room).unwrap();

    let lamp = world.create_thing(ThingKind::LightSource, "lamp");
    let player = world.player().unwrap().clone();
    world.add_thing(&Holder::Thing(player), &lamp).unwrap();

    let rock = world.create_thing(ThingKind::Thing, "rock");
    world.thing_mut(&rock).unwrap().xdesc = "The rock is jagged granite.".to_string();
    world.add_thing(&Holder::Room(room), &rock).unwrap();

    let mut game = Game::new(world).unwrap();
    let mut app = BufferApp::new();

    run(&mut game, &mut app, "x rock");
    assert!(app.saw("It's too dark to see"));

    app.clear();
    run(&mut game, &mut app, "light lamp");
    assert!(app.saw("You light the lamp"));

    app.clear();
    run(&mut game, &mut app, "x rock");
    assert!(app.saw("The rock is jagged granite."));
}

#[test]
fn disambiguation_by_adjective_then_index() {
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

    let mut game = Game::new(world).unwrap();
    let mut app = BufferApp::new();

    run(&mut game, &mut app, "take bottle");
    assert!(app.saw("Do you mean the old bottle (1), or the new bottle (2)?"));

    app.clear();
    run(&mut game, &mut app, "2");
    assert!(app.saw("You take the new bottle"));
    assert!(game.world.in_inventory(&new).unwrap());
}

#[test]
fn conversation_falls_back_and_appends_the_sticky_topic() {
    let mut world = World::new();
    let room = world.create_room("Parlor", "A tidy parlor.");
    world.create_player(&room).unwrap();

    let sarah = world.create_thing(ThingKind::Actor, "sarah");
    world.thing_mut(&sarah).unwrap().actor = Some(ActorData {
        default_topic: Some("Sarah scoffs.".to_string()),
        sticky_topic: Some(parlor_world::Topic::new("She eyes you warily.")),
        ..ActorData::default()
    });
    world.add_thing(&Holder::Room(room), &sarah).unwrap();

    let opal = world.create_thing(ThingKind::Abstract, "opal");
    world.make_known(&opal).unwrap();

    let mut game = Game::new(world).unwrap();
    let mut app = BufferApp::new();
    run(&mut game, &mut app, "ask sarah about opal");

    let scoff = app.lines.iter().position(|l| l.contains("Sarah scoffs."));
    let sticky = app
        .lines
        .iter()
        .position(|l| l.contains("She eyes you warily."));
    assert!(scoff.is_some());
    assert!(sticky.is_some());
    assert!(scoff < sticky);
}

#[test]
fn a_locked_door_stops_travel_without_the_key() {
    let mut world = World::new();
    let room = world.create_room("Landing", "A bare landing.");
    let vault = world.create_room("Vault", "A steel vault.");
    world.create_player(&room).unwrap();

    let door = world
        .create_connector(ConnectorKind::Door, &room, Direction::East, &vault, "door")
        .unwrap();
    let key = world.create_thing(ThingKind::Key, "key");
    world.add_adjective(&key, "rusty").unwrap();
    let lock = world.create_lock(Some(key.clone()));
    world.attach_lock_to_connector(&door, &lock).unwrap();

    let table = world.create_thing(ThingKind::Surface, "table");
    world.add_thing(&Holder::Room(room.clone()), &table).unwrap();
    world.add_thing(&Holder::Thing(table), &key).unwrap();

    let mut game = Game::new(world).unwrap();
    let mut app = BufferApp::new();
    run(&mut game, &mut app, "go east");

    assert!(app.saw("The door is locked."));
    let player = game.world.player().unwrap().clone();
    assert_eq!(
        game.world.outermost_room(&player).unwrap(),
        Some(room)
    );
}

#[test]
fn travel_unnests_a_seated_player() {
    let mut world = World::new();
    let room = world.create_room("Boardwalk", "A weathered boardwalk.");
    let beach = world.create_room("Beach", "Pale sand in every direction.");
    world.create_player(&room).unwrap();

    let bench = world.create_thing(ThingKind::Thing, "bench");
    world.thing_mut(&bench).unwrap().can_sit_in = true;
    world.thing_mut(&bench).unwrap().inv_item = false;
    world.add_thing(&Holder::Room(room.clone()), &bench).unwrap();

    let player = world.player().unwrap().clone();
    world.move_to(&player, &Holder::Thing(bench)).unwrap();
    world.thing_mut(&player).unwrap().position = Posture::Sitting;

    world
        .room_mut(&room)
        .unwrap()
        .set_exit(Direction::North, Some(Exit::Room(beach.clone())));

    let mut game = Game::new(world).unwrap();
    let mut app = BufferApp::new();
    run(&mut game, &mut app, "n");

    assert!(app.saw("(Getting off of the bench)"));
    assert!(app.saw("You go north."));
    assert_eq!(
        game.world.outermost_room(&player).unwrap(),
        Some(beach)
    );
}
