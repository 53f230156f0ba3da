//! Turn event ordering.

use parlor_engine::{BufferApp, Game};
use parlor_world::{Holder, ThingKind, World};

#[test]
fn the_raw_line_leads_the_turn_output() {
    let mut world = World::new();
    let room = world.create_room("Shed", "A tool shed.");
    world.create_player(&room).unwrap();
    let rake = world.create_thing(ThingKind::Thing, "rake");
    world.add_thing(&Holder::Room(room), &rake).unwrap();

    let mut game = Game::new(world).unwrap();
    let mut app = BufferApp::new();
    game.turn("take the rake", &mut app).unwrap();

    assert_eq!(app.lines.first().map(String::as_str), Some("take the rake"));
    let echoed = app.lines.iter().position(|l| l == "take the rake").unwrap();
    let reply = app
        .lines
        .iter()
        .position(|l| l == "You take the rake.")
        .unwrap();
    assert!(echoed < reply);
}
