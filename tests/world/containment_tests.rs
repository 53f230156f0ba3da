//! Containment and placement tests.

use parlor_foundation::Direction;
use parlor_world::{ConnectorKind, Holder, ThingKind, World};

fn world_with_room() -> (World, parlor_foundation::Ix) {
    let mut world = World::new();
    let room = world.create_room("Study", "A cramped study.");
    (world, room)
}

#[test]
fn a_thing_lives_in_exactly_one_place() {
    let (mut world, room) = world_with_room();
    let shelf = world.create_thing(ThingKind::Surface, "shelf");
    let book = world.create_thing(ThingKind::Readable, "book");

    world.add_thing(&Holder::Room(room.clone()), &shelf).unwrap();
    world.add_thing(&Holder::Room(room.clone()), &book).unwrap();
    world.move_to(&book, &Holder::Thing(shelf.clone())).unwrap();

    assert!(!world.room(&room).unwrap().contents().contains(&book));
    assert!(world.thing(&shelf).unwrap().contents().contains(&book));
    assert_eq!(
        world.thing(&book).unwrap().location,
        Some(Holder::Thing(shelf))
    );
}

#[test]
fn sub_contents_follow_nesting() {
    let (mut world, room) = world_with_room();
    let chest = world.create_thing(ThingKind::Container, "chest");
    let pouch = world.create_thing(ThingKind::Container, "pouch");
    let gem = world.create_thing(ThingKind::Thing, "gem");

    world.add_thing(&Holder::Room(room.clone()), &chest).unwrap();
    world.add_thing(&Holder::Thing(chest.clone()), &pouch).unwrap();
    world.add_thing(&Holder::Thing(pouch), &gem).unwrap();

    let deep = world.sub_contents_list(&Holder::Room(room)).unwrap();
    assert!(deep.contains(&gem));
    assert!(world.thing(&chest).unwrap().sub_contents().contains(&gem));
}

#[test]
fn removed_things_go_offstage() {
    let (mut world, room) = world_with_room();
    let apple = world.create_thing(ThingKind::Thing, "apple");
    world.add_thing(&Holder::Room(room.clone()), &apple).unwrap();

    world.remove_thing(&apple).unwrap();

    assert_eq!(world.thing(&apple).unwrap().location, None);
    assert!(!world.room(&room).unwrap().contents().contains(&apple));
}

#[test]
fn composite_children_follow_their_parent() {
    let (mut world, room) = world_with_room();
    let other = world.create_room("Hall", "A long hall.");
    let desk = world.create_thing(ThingKind::Thing, "desk");
    let drawer = world.create_thing(ThingKind::Container, "drawer");

    world.add_thing(&Holder::Room(room.clone()), &desk).unwrap();
    world.attach_part(&desk, &drawer).unwrap();

    assert_eq!(world.thing(&drawer).unwrap().parent_obj, Some(desk.clone()));
    assert!(!world.thing(&drawer).unwrap().takeable());

    world.move_to(&desk, &Holder::Room(other.clone())).unwrap();
    let here = world.sub_contents_list(&Holder::Room(other)).unwrap();
    assert!(here.contains(&drawer));
}

#[test]
fn copies_share_a_known_identity() {
    let (mut world, room) = world_with_room();
    let coin = world.create_thing(ThingKind::Thing, "coin");
    world.add_thing(&Holder::Room(room), &coin).unwrap();

    let copy = world.copy_thing(&coin).unwrap();

    assert_ne!(copy, coin);
    assert_eq!(
        world.thing(&copy).unwrap().known_ix,
        world.thing(&coin).unwrap().known_ix
    );
}

#[test]
fn door_connector_faces_both_rooms() {
    let (mut world, room) = world_with_room();
    let hall = world.create_room("Hall", "A long hall.");
    let door = world
        .create_connector(ConnectorKind::Door, &room, Direction::North, &hall, "door")
        .unwrap();

    let connector = world.connector(&door).unwrap();
    assert_eq!(connector.side_a.room, room);
    assert_eq!(connector.side_b.room, hall);
    assert_eq!(connector.side_b.direction, Direction::South);
    assert!(!connector.is_open);

    // Both entrances are placed, one per room.
    let a = world.thing(&connector.side_a.entrance).unwrap();
    assert_eq!(a.location, Some(Holder::Room(room)));
    let b = world.thing(&connector.side_b.entrance).unwrap();
    assert_eq!(b.location, Some(Holder::Room(hall)));
}

#[test]
fn locked_container_starts_closed() {
    let (mut world, room) = world_with_room();
    let chest = world.create_thing(ThingKind::Container, "chest");
    world.thing_mut(&chest).unwrap().has_lid = true;
    world.add_thing(&Holder::Room(room), &chest).unwrap();

    let key = world.create_thing(ThingKind::Key, "key");
    let lock = world.create_lock(Some(key));
    world.attach_lock_to(&chest, &lock).unwrap();

    assert!(!world.thing(&chest).unwrap().is_open);
    assert!(world.thing(&lock).unwrap().is_locked);
}
