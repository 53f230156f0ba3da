//! Implicit-action chain tests.

use parlor_engine::{BufferApp, Game};
use parlor_world::{Holder, ThingKind, World};

fn run(game: &mut Game, app: &mut BufferApp, line: &str) {
    game.turn(line, app).unwrap();
}

#[test]
fn held_verbs_take_the_object_first() {
    let mut world = World::new();
    let room = world.create_room("Hall", "A long hall.");
    world.create_player(&room).unwrap();
    let hat = world.create_thing(ThingKind::Clothing, "hat");
    world.add_thing(&Holder::Room(room), &hat).unwrap();

    let mut game = Game::new(world).unwrap();
    let mut app = BufferApp::new();
    run(&mut game, &mut app, "wear the hat");

    assert!(app.saw("(First attempting to take the hat)"));
    assert!(app.saw("You take the hat."));
    assert!(app.saw("You put on the hat."));
}

#[test]
fn worn_objects_are_doffed_before_dropping() {
    let mut world = World::new();
    let room = world.create_room("Hall", "A long hall.");
    world.create_player(&room).unwrap();
    let player = world.player().unwrap().clone();
    let coat = world.create_thing(ThingKind::Clothing, "coat");
    world.add_thing(&Holder::Thing(player.clone()), &coat).unwrap();
    world.thing_mut(&player).unwrap().wearing.push(coat);

    let mut game = Game::new(world).unwrap();
    let mut app = BufferApp::new();
    run(&mut game, &mut app, "drop the coat");

    assert!(app.saw("(First taking off the coat)"));
    assert!(app.saw("You drop the coat."));
}

#[test]
fn objects_in_held_containers_are_removed_first() {
    let mut world = World::new();
    let room = world.create_room("Hall", "A long hall.");
    world.create_player(&room).unwrap();
    let player = world.player().unwrap().clone();

    let pouch = world.create_thing(ThingKind::Container, "pouch");
    world.add_thing(&Holder::Thing(player), &pouch).unwrap();
    let coin = world.create_thing(ThingKind::Thing, "coin");
    world.add_thing(&Holder::Thing(pouch), &coin).unwrap();

    let box_ = world.create_thing(ThingKind::Container, "box");
    world.add_thing(&Holder::Room(room), &box_).unwrap();

    let mut game = Game::new(world).unwrap();
    let mut app = BufferApp::new();
    run(&mut game, &mut app, "put the coin in the box");

    assert!(app.saw("(First removing the coin from the pouch)"));
    assert!(app.saw("You put the coin in the box."));
}

#[test]
fn closed_lids_are_opened_on_the_way() {
    let mut world = World::new();
    let room = world.create_room("Hall", "A long hall.");
    world.create_player(&room).unwrap();
    let chest = world.create_thing(ThingKind::Container, "chest");
    world.thing_mut(&chest).unwrap().has_lid = true;
    world.thing_mut(&chest).unwrap().is_open = false;
    world.add_thing(&Holder::Room(room.clone()), &chest).unwrap();
    let gem = world.create_thing(ThingKind::Thing, "gem");
    let player = world.player().unwrap().clone();
    world.add_thing(&Holder::Thing(player), &gem).unwrap();

    let mut game = Game::new(world).unwrap();
    let mut app = BufferApp::new();
    run(&mut game, &mut app, "put the gem in the chest");

    assert!(app.saw("(First opening the chest)"));
    assert!(app.saw("You put the gem in the chest."));
}
