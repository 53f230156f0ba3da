//! Buying and selling against actor sale and purchase tables.

use std::collections::HashMap;

use parlor_engine::{BufferApp, Game};
use parlor_foundation::Ix;
use parlor_world::{ActorData, BuyItem, Holder, SaleItem, Stock, ThingKind, World};

/// A market with a grocer selling apples for coins. The apple and
/// coin prototypes stay offstage; the player carries `coins` copies
/// directly in hand.
fn market(price: i64, coins: usize, stock: Stock) -> (Game, Ix, Ix) {
    let mut world = World::new();
    let room = world.create_room("Market", "A busy market square.");
    world.create_player(&room).unwrap();
    let player = world.player().unwrap().clone();

    let coin = world.create_thing(ThingKind::Thing, "coin");
    for _ in 0..coins {
        let c = world.copy_thing(&coin).unwrap();
        world.add_thing(&Holder::Thing(player.clone()), &c).unwrap();
    }

    let apple = world.create_thing(ThingKind::Thing, "apple");
    world.make_known(&apple).unwrap();

    let grocer = world.create_thing(ThingKind::Actor, "grocer");
    let mut for_sale = HashMap::new();
    for_sale.insert(
        world.thing(&apple).unwrap().known_ix.clone(),
        SaleItem {
            item: apple.clone(),
            currency: world.thing(&coin).unwrap().known_ix.clone(),
            price,
            stock,
        },
    );
    world.thing_mut(&grocer).unwrap().actor = Some(ActorData {
        for_sale,
        ..ActorData::default()
    });
    world.add_thing(&Holder::Room(room), &grocer).unwrap();

    (Game::new(world).unwrap(), apple, coin)
}

fn held_count(game: &Game, known: &Ix) -> usize {
    let player = game.world.player().unwrap().clone();
    game.world
        .contents_list(&Holder::Thing(player))
        .unwrap()
        .iter()
        .filter(|ix| &game.world.thing(ix).unwrap().known_ix == known)
        .count()
}

#[test]
fn a_coin_in_hand_pays_for_a_purchase() {
    let (mut game, apple, coin) = market(1, 1, Stock::Infinite);
    let apple_known = game.world.thing(&apple).unwrap().known_ix.clone();
    let coin_known = game.world.thing(&coin).unwrap().known_ix.clone();

    let mut app = BufferApp::new();
    game.turn("buy apple from grocer", &mut app).unwrap();

    assert!(!app.saw("You can't afford the apple."));
    assert!(app.saw("You buy the apple."));
    assert_eq!(held_count(&game, &apple_known), 1);
    assert_eq!(held_count(&game, &coin_known), 0);
}

#[test]
fn a_purchase_consumes_limited_stock() {
    let (mut game, apple, _coin) = market(1, 2, Stock::Limited(1));
    let apple_known = game.world.thing(&apple).unwrap().known_ix.clone();

    let mut app = BufferApp::new();
    game.turn("buy apple from grocer", &mut app).unwrap();
    assert!(app.saw("You buy the apple."));

    app.clear();
    game.turn("buy apple from grocer", &mut app).unwrap();
    assert!(app.saw("is out of those."));
    assert_eq!(held_count(&game, &apple_known), 1);
}

#[test]
fn an_empty_purse_fails_the_sale() {
    let (mut game, apple, coin) = market(2, 1, Stock::Infinite);
    let apple_known = game.world.thing(&apple).unwrap().known_ix.clone();
    let coin_known = game.world.thing(&coin).unwrap().known_ix.clone();

    let mut app = BufferApp::new();
    game.turn("buy apple from grocer", &mut app).unwrap();

    assert!(app.saw("You can't afford the apple."));
    assert_eq!(held_count(&game, &apple_known), 0);
    assert_eq!(held_count(&game, &coin_known), 1);
}

#[test]
fn selling_pays_out_and_decrements_the_wants_counter() {
    let mut world = World::new();
    let room = world.create_room("Trading Post", "Furs hang from the rafters.");
    world.create_player(&room).unwrap();
    let player = world.player().unwrap().clone();

    let pelt = world.create_thing(ThingKind::Thing, "pelt");
    world.add_thing(&Holder::Thing(player.clone()), &pelt).unwrap();
    let spare = world.copy_thing(&pelt).unwrap();
    world.add_thing(&Holder::Thing(player), &spare).unwrap();

    let coin = world.create_thing(ThingKind::Thing, "coin");

    let trader = world.create_thing(ThingKind::Actor, "trader");
    let pelt_known = world.thing(&pelt).unwrap().known_ix.clone();
    let coin_known = world.thing(&coin).unwrap().known_ix.clone();
    let mut will_buy = HashMap::new();
    will_buy.insert(
        pelt_known,
        BuyItem {
            item: world.thing(&pelt).unwrap().known_ix.clone(),
            currency: coin.clone(),
            price: 2,
            wants: Some(1),
        },
    );
    world.thing_mut(&trader).unwrap().actor = Some(ActorData {
        will_buy,
        ..ActorData::default()
    });
    world.add_thing(&Holder::Room(room), &trader).unwrap();

    let mut game = Game::new(world).unwrap();
    let mut app = BufferApp::new();
    game.turn("sell pelt to trader", &mut app).unwrap();

    assert!(app.saw("You sell the pelt."));
    assert_eq!(held_count(&game, &coin_known), 2);

    app.clear();
    game.turn("sell pelt to trader", &mut app).unwrap();
    assert!(app.saw("doesn't want any more of those."));
}
