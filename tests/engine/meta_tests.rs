//! Meta-command tests: score, hints, verb listing, sequences.

use parlor_engine::{BufferApp, Game, SeqBranch, SeqNode, Sequence};
use parlor_world::World;

fn bare_game() -> Game {
    let mut world = World::new();
    let room = world.create_room("Foyer", "A quiet foyer.");
    world.create_player(&room).unwrap();
    Game::new(world).unwrap()
}

#[test]
fn score_reports_earned_and_possible_points() {
    let mut game = bare_game();
    game.score.declare("first-step", 5);
    game.score.declare("grand-finale", 10);
    game.score.award("first-step");

    let mut app = BufferApp::new();
    game.turn("score", &mut app).unwrap();
    assert!(app.saw("You have earned 5 of 15 points."));

    app.clear();
    game.turn("fullscore", &mut app).unwrap();
    assert!(app.saw("5 points: first-step"));
}

#[test]
fn hints_reveal_one_at_a_time() {
    let mut game = bare_game();
    game.hints.declare("stuck", &["Try the door.", "It isn't locked."]);
    game.hints.set_current("stuck");

    let mut app = BufferApp::new();
    game.turn("hint", &mut app).unwrap();
    assert!(app.saw("Try the door."));
    assert!(!app.saw("It isn't locked."));

    app.clear();
    game.turn("hint", &mut app).unwrap();
    assert!(app.saw("It isn't locked."));
}

#[test]
fn the_verb_listing_names_each_verb_once() {
    let mut game = bare_game();
    let mut app = BufferApp::new();
    game.turn("verbs", &mut app).unwrap();

    let listing = app
        .lines
        .iter()
        .find(|l| l.starts_with("I know the following verbs:"))
        .cloned()
        .unwrap();
    assert!(listing.contains("take"));
    // Several records share the word "put"; the listing dedups.
    assert_eq!(listing.matches(", put,").count(), 1);
}

#[test]
fn a_sequence_consumes_player_input_until_done() {
    let mut game = bare_game();
    game.add_sequence(Sequence::new(
        "intro",
        vec![
            SeqNode::Line("A stranger nods at you.".to_string()),
            SeqNode::Choice(vec![
                SeqBranch {
                    label: "Nod back".to_string(),
                    body: vec![SeqNode::Line("You nod back.".to_string())],
                },
                SeqBranch {
                    label: "Look away".to_string(),
                    body: vec![SeqNode::Line("You look away.".to_string())],
                },
            ]),
        ],
    ));
    game.start_sequence("intro").unwrap();
    assert!(game.sequence_running());

    let mut app = BufferApp::new();
    game.turn("2", &mut app).unwrap();

    assert!(app.saw("You look away."));
    assert!(!game.sequence_running());
}
