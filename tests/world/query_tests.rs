//! Darkness, fit, and liquid query tests.

use parlor_world::{Holder, ThingKind, World};

#[test]
fn darkness_lifts_only_for_a_lit_reachable_source() {
    let mut world = World::new();
    let cave = world.create_room("Cave", "A wet cave.");
    world.room_mut(&cave).unwrap().dark = true;
    world.create_player(&cave).unwrap();

    let lamp = world.create_thing(ThingKind::LightSource, "lamp");
    let player = world.player().unwrap().clone();
    world.add_thing(&Holder::Thing(player), &lamp).unwrap();

    assert!(!world.resolve_darkness(&cave).unwrap());

    world.thing_mut(&lamp).unwrap().is_lit = true;
    assert!(world.resolve_darkness(&cave).unwrap());

    world.thing_mut(&lamp).unwrap().is_lit = false;
    assert!(!world.resolve_darkness(&cave).unwrap());
}

#[test]
fn a_lit_source_on_the_floor_also_counts() {
    let mut world = World::new();
    let cave = world.create_room("Cave", "A wet cave.");
    world.room_mut(&cave).unwrap().dark = true;
    world.create_player(&cave).unwrap();

    let torch = world.create_thing(ThingKind::LightSource, "torch");
    world.thing_mut(&torch).unwrap().is_lit = true;
    world.add_thing(&Holder::Room(cave.clone()), &torch).unwrap();

    assert!(world.resolve_darkness(&cave).unwrap());
}

#[test]
fn fit_respects_container_capacity() {
    let mut world = World::new();
    let room = world.create_room("Shed", "A tool shed.");
    let crate_ = world.create_thing(ThingKind::Container, "crate");
    world.thing_mut(&crate_).unwrap().size = 20;
    let anvil = world.create_thing(ThingKind::Thing, "anvil");
    world.thing_mut(&anvil).unwrap().size = 30;
    let nail = world.create_thing(ThingKind::Thing, "nail");
    world.thing_mut(&nail).unwrap().size = 1;
    world.add_thing(&Holder::Room(room), &crate_).unwrap();

    assert!(!world.can_fit(&crate_, &anvil).unwrap());
    assert!(world.can_fit(&crate_, &nail).unwrap());
}

#[test]
fn one_liquid_per_container() {
    let mut world = World::new();
    let room = world.create_room("Kitchen", "A kitchen.");
    let cup = world.create_thing(ThingKind::Container, "cup");
    world.thing_mut(&cup).unwrap().holds_liquid = true;
    world.add_thing(&Holder::Room(room), &cup).unwrap();

    let water = world.create_thing(ThingKind::Liquid, "water");
    world.thing_mut(&water).unwrap().liquid_type = Some("water".to_string());
    let milk = world.create_thing(ThingKind::Liquid, "milk");
    world.thing_mut(&milk).unwrap().liquid_type = Some("milk".to_string());

    assert!(world.can_fit(&cup, &water).unwrap());
    world.add_thing(&Holder::Thing(cup.clone()), &water).unwrap();

    assert_eq!(world.contains_liquid(&cup).unwrap(), Some(water));
    assert!(!world.can_fit(&cup, &milk).unwrap());
}

#[test]
fn knowledge_deduplicates_by_known_identity() {
    let mut world = World::new();
    let room = world.create_room("Vault", "A vault.");
    world.create_player(&room).unwrap();
    let coin = world.create_thing(ThingKind::Thing, "coin");
    world.add_thing(&Holder::Room(room), &coin).unwrap();
    let copy = world.copy_thing(&coin).unwrap();

    world.make_known(&coin).unwrap();
    world.make_known(&copy).unwrap();

    let player = world.player().unwrap().clone();
    let knows = &world.thing(&player).unwrap().knows_about;
    let shared = world.thing(&coin).unwrap().known_ix.clone();
    assert_eq!(knows.iter().filter(|ix| **ix == shared).count(), 1);
}
