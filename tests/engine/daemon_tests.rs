//! Daemon tests, mostly around the burn-down of light sources.

use parlor_engine::{light_daemon_name, BufferApp, Game};
use parlor_world::{Holder, ThingKind, World};

fn game_with_lamp(fuel: i64, warning: i64) -> (Game, parlor_foundation::Ix) {
    let mut world = World::new();
    let room = world.create_room("Cellar", "A damp cellar.");
    world.create_player(&room).unwrap();
    let lamp = world.create_thing(ThingKind::LightSource, "lamp");
    world.thing_mut(&lamp).unwrap().light_turns = Some(fuel);
    world.thing_mut(&lamp).unwrap().warning_turns = warning;
    let player = world.player().unwrap().clone();
    world.add_thing(&Holder::Thing(player), &lamp).unwrap();
    (Game::new(world).unwrap(), lamp)
}

#[test]
fn lighting_installs_the_burn_daemon() {
    let (mut game, lamp) = game_with_lamp(10, 2);
    let mut app = BufferApp::new();
    game.turn("light the lamp", &mut app).unwrap();

    assert!(app.saw("You light the lamp."));
    assert!(game.has_daemon(&light_daemon_name(&lamp)));
}

#[test]
fn the_lamp_warns_then_goes_out() {
    let (mut game, lamp) = game_with_lamp(4, 2);
    let mut app = BufferApp::new();

    game.turn("light the lamp", &mut app).unwrap(); // 3 left
    assert!(!app.saw("getting dim"));

    app.clear();
    game.turn("wait", &mut app).unwrap(); // 2 left
    assert!(app.saw("The lamp is getting dim."));

    app.clear();
    game.turn("wait", &mut app).unwrap(); // 1 left
    game.turn("wait", &mut app).unwrap(); // 0 left
    assert!(app.saw("The lamp goes out."));
    assert!(!game.world.thing(&lamp).unwrap().is_lit);
    assert!(!game.has_daemon(&light_daemon_name(&lamp)));
}

#[test]
fn extinguishing_removes_the_daemon() {
    let (mut game, lamp) = game_with_lamp(10, 2);
    let mut app = BufferApp::new();

    game.turn("light the lamp", &mut app).unwrap();
    game.turn("put out the lamp", &mut app).unwrap();

    assert!(app.saw("You put out the lamp."));
    assert!(!game.has_daemon(&light_daemon_name(&lamp)));
    assert!(!game.world.thing(&lamp).unwrap().is_lit);
}
