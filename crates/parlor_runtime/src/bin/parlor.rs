//! Parlor CLI entry point.
//!
//! Runs the built-in demonstration game: a small house with a locked
//! garden door, a dark cellar, and a lamp that doesn't burn forever.

use std::env;
use std::process::ExitCode;

use parlor_engine::{Game, HookOutcome};
use parlor_foundation::{Direction, Role};
use parlor_runtime::{Session, TerminalApp};
use parlor_world::{ConnectorKind, Holder, ThingKind, World};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    for arg in &args[1..] {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            "-V" | "--version" => {
                println!("parlor {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            other => {
                return Err(format!("unknown option: {other}").into());
            }
        }
    }

    let game = build_demo_game()?;
    let mut app = TerminalApp::new()?;
    let mut session = Session::new(game)?
        .with_banner("THE LOCKED GARDEN\nA small demonstration of the Parlor engine.\n")
        .with_prompt("> ");
    session.run(&mut app)?;
    Ok(())
}

fn print_help() {
    println!("parlor - a parser-driven interactive fiction engine");
    println!();
    println!("Usage: parlor [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -h, --help     Show this help");
    println!("  -V, --version  Show version");
    println!();
    println!("In the game, type commands like \"look\", \"take the lamp\",");
    println!("or \"go north\". Type \"verbs\" for the verb list and \"quit\"");
    println!("to leave.");
}

/// Builds the demonstration world: parlor, locked garden, dark
/// cellar.
fn build_demo_game() -> Result<Game, Box<dyn std::error::Error>> {
    let mut world = World::new();

    let parlor = world.create_room(
        "Parlor",
        "A tidy parlor with a worn rug. A door leads north to the \
         garden, and a staircase descends into the dark cellar.",
    );
    let garden = world.create_room(
        "Garden",
        "Rows of herbs run along a low stone wall. The house lies to \
         the south.",
    );
    let cellar = world.create_room(
        "Cellar",
        "Shelves of dusty preserves line the cellar walls.",
    );

    world.create_player(&parlor)?;

    // The lamp, fuel enough for a long visit downstairs.
    let lamp = world.create_thing(ThingKind::LightSource, "lamp");
    world.add_adjective(&lamp, "brass")?;
    {
        let t = world.thing_mut(&lamp)?;
        t.desc = "A brass lamp sits on the rug.".to_string();
        t.xdesc = "A small brass oil lamp, recently filled.".to_string();
        t.light_turns = Some(60);
        t.warning_turns = 5;
    }
    world.add_thing(&Holder::Room(parlor.clone()), &lamp)?;

    // The mat hides the garden key.
    let mat = world.create_thing(ThingKind::UnderSpace, "mat");
    world.add_adjective(&mat, "straw")?;
    {
        let t = world.thing_mut(&mat)?;
        t.desc = "A straw mat lies by the north door.".to_string();
        t.xdesc = "The mat has seen a lot of boots.".to_string();
    }
    world.add_thing(&Holder::Room(parlor.clone()), &mat)?;

    let key = world.create_thing(ThingKind::Key, "key");
    world.add_adjective(&key, "iron")?;
    {
        let t = world.thing_mut(&key)?;
        t.xdesc = "A heavy iron key.".to_string();
    }
    world.add_thing(&Holder::Thing(mat.clone()), &key)?;

    // The garden door, locked, worked by the iron key.
    let door = world.create_connector(
        ConnectorKind::Door,
        &parlor,
        Direction::North,
        &garden,
        "door",
    )?;
    let lock = world.create_lock(Some(key.clone()));
    world.attach_lock_to_connector(&door, &lock)?;

    // The open staircase down; the cellar is dark.
    world.create_connector(
        ConnectorKind::Staircase,
        &parlor,
        Direction::Down,
        &cellar,
        "staircase",
    )?;
    world.room_mut(&cellar)?.dark = true;
    world.room_mut(&cellar)?.dark_desc =
        "It's pitch black down here. You can feel the staircase behind you.".to_string();
    world.room_mut(&cellar)?.dark_visible_exits = vec![Direction::Up];

    // Something to find in the dark.
    let jar = world.create_thing(ThingKind::Container, "jar");
    world.add_adjective(&jar, "dusty")?;
    {
        let t = world.thing_mut(&jar)?;
        t.has_lid = true;
        t.is_open = false;
        t.xdesc = "An old preserving jar with a tight lid.".to_string();
    }
    world.add_thing(&Holder::Room(cellar.clone()), &jar)?;

    let note = world.create_thing(ThingKind::Readable, "note");
    {
        let t = world.thing_mut(&note)?;
        t.read_text = Some("\"The garden gate sticks. Lift, then push.\"".to_string());
    }
    world.add_thing(&Holder::Thing(jar), &note)?;

    let mut game = Game::new(world)?;
    game.about_text = "The Locked Garden, a demonstration game for the Parlor engine.".to_string();
    game.instructions_text = "Find your way into the garden. Try \"look under the mat\", \
                              \"open the door\", and \"go north\". The cellar is dark; \
                              take the lamp and \"light lamp\" first."
        .to_string();
    game.score.declare("found-key", 5);
    game.score.declare("read-note", 5);

    let get = game.core().get;
    game.hooks_mut().set(key, get, Role::Dobj, |game, _cmd| {
        if let Some(points) = game.score.award("found-key") {
            game.events.say(format!("[{points} points for finding the key]"));
        }
        Ok(HookOutcome::Continue)
    });
    if let Some(read) = game.registry().by_word("read").map(|r| r.id) {
        game.hooks_mut().set(note, read, Role::Dobj, |game, _cmd| {
            if let Some(points) = game.score.award("read-note") {
                game.events.say(format!("[{points} points for the note]"));
            }
            Ok(HookOutcome::Continue)
        });
    }

    game.hints.declare(
        "garden-door",
        &[
            "The door wants a key.",
            "People hide keys near doors.",
            "Look under the mat.",
        ],
    );
    game.hints.set_current("garden-door");
    Ok(game)
}
