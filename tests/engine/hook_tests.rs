//! Override hook tests.

use parlor_engine::{BufferApp, Game, HookOutcome};
use parlor_foundation::Role;
use parlor_world::{Holder, ThingKind, World};

fn game_with_rock() -> (Game, parlor_foundation::Ix) {
    let mut world = World::new();
    let room = world.create_room("Quarry", "A dusty quarry.");
    world.create_player(&room).unwrap();
    let rock = world.create_thing(ThingKind::Thing, "rock");
    world.add_thing(&Holder::Room(room), &rock).unwrap();
    (Game::new(world).unwrap(), rock)
}

#[test]
fn a_handled_hook_replaces_the_default_verb() {
    let (mut game, rock) = game_with_rock();
    let get = game.core().get;
    game.hooks_mut().set(rock.clone(), get, Role::Dobj, |game, _cmd| {
        game.events.say("The rock is fused to the bedrock.");
        Ok(HookOutcome::Handled)
    });

    let mut app = BufferApp::new();
    game.turn("take the rock", &mut app).unwrap();

    assert!(app.saw("The rock is fused to the bedrock."));
    assert!(!app.saw("You take the rock."));
    assert!(!game.world.in_inventory(&rock).unwrap());
}

#[test]
fn a_continue_hook_falls_through_to_the_default() {
    let (mut game, rock) = game_with_rock();
    let get = game.core().get;
    game.hooks_mut().set(rock.clone(), get, Role::Dobj, |game, _cmd| {
        game.events.say("The rock is warm to the touch.");
        Ok(HookOutcome::Continue)
    });

    let mut app = BufferApp::new();
    game.turn("take the rock", &mut app).unwrap();

    assert!(app.saw("The rock is warm to the touch."));
    assert!(app.saw("You take the rock."));
    assert!(game.world.in_inventory(&rock).unwrap());
}

#[test]
fn hooks_are_keyed_by_verb_and_role() {
    let (mut game, rock) = game_with_rock();
    let get = game.core().get;
    game.hooks_mut().set(rock.clone(), get, Role::Dobj, |game, _cmd| {
        game.events.say("No taking.");
        Ok(HookOutcome::Handled)
    });

    // A different verb on the same entity runs untouched.
    let mut app = BufferApp::new();
    game.turn("examine the rock", &mut app).unwrap();

    assert!(!app.saw("No taking."));
    assert!(app.saw("You see nothing special about the rock."));
}
