//! Rooms and travel connectors.
//!
//! A [`Room`] is a top-level location with twelve direction slots. A
//! [`Connector`] is a two-faced edge between rooms; each face is an
//! entrance [`crate::Thing`] placed in its endpoint room. Door state
//! (open, lock) lives once on the connector, so both faces always
//! agree.

use parlor_foundation::{Direction, Ix};

/// What a direction slot leads to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Exit {
    /// Straight into another room.
    Room(Ix),
    /// Through a connector (door, ladder, staircase, passage).
    Connector(Ix),
}

/// A top-level location.
#[derive(Clone, Debug)]
pub struct Room {
    /// Stable index.
    pub ix: Ix,
    /// Room title.
    pub name: String,
    /// Description printed on entry and on `look`.
    pub desc: String,

    /// One slot per [`Direction`], in slot order.
    pub(crate) exits: [Option<Exit>; 12],
    /// Direct contents, in insertion order.
    pub(crate) contains: Vec<Ix>,
    /// Transitive descendants; cache maintained by the world.
    pub(crate) sub_contains: Vec<Ix>,

    /// Whether the room is dark without a light source.
    pub dark: bool,
    /// Message shown when darkness hides the room.
    pub dark_desc: String,
    /// Exits that remain usable in darkness.
    pub dark_visible_exits: Vec<Direction>,

    /// Default scenery: floor, ceiling, and the four walls.
    pub scenery: Vec<Ix>,

    /// Whether the player has visited this room.
    pub known: bool,
}

impl Room {
    /// Creates a room with no exits and no contents.
    #[must_use]
    pub fn new(ix: Ix, name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            ix,
            name: name.into(),
            desc: desc.into(),
            exits: Default::default(),
            contains: Vec::new(),
            sub_contains: Vec::new(),
            dark: false,
            dark_desc: "It's pitch black here.".to_string(),
            dark_visible_exits: Vec::new(),
            scenery: Vec::new(),
            known: false,
        }
    }

    /// The exit in a direction, if any.
    #[must_use]
    pub fn exit(&self, dir: Direction) -> Option<&Exit> {
        self.exits[dir.slot()].as_ref()
    }

    /// Sets or clears the exit in a direction.
    pub fn set_exit(&mut self, dir: Direction, exit: Option<Exit>) {
        self.exits[dir.slot()] = exit;
    }

    /// Directions that currently have exits.
    #[must_use]
    pub fn exit_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| self.exits[d.slot()].is_some())
            .collect()
    }

    /// Direct contents, in insertion order.
    #[must_use]
    pub fn contents(&self) -> &[Ix] {
        &self.contains
    }

    /// Transitive descendants.
    #[must_use]
    pub fn sub_contents(&self) -> &[Ix] {
        &self.sub_contains
    }
}

/// The flavor of a connector.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ConnectorKind {
    /// An open passage; never blocks.
    Passage,
    /// A door: can be closed and locked.
    Door,
    /// A ladder between levels.
    Ladder,
    /// A staircase between levels.
    Staircase,
}

/// One face of a connector.
#[derive(Clone, Debug)]
pub struct Face {
    /// The room this face opens into.
    pub room: Ix,
    /// The entrance thing placed in that room.
    pub entrance: Ix,
    /// The direction the player travels to use this face.
    pub direction: Direction,
}

/// A two-faced edge between rooms.
#[derive(Clone, Debug)]
pub struct Connector {
    /// Stable index.
    pub ix: Ix,
    /// Flavor.
    pub kind: ConnectorKind,
    /// The face in the first room.
    pub side_a: Face,
    /// The face in the second room.
    pub side_b: Face,
    /// Open state; meaningful for doors. Shared by both faces, which
    /// is what keeps the twin invariant tautological.
    pub is_open: bool,
    /// Lock entity guarding the door, if any.
    pub lock_obj: Option<Ix>,
    /// Message printed on a successful crossing, keyed per side by
    /// the departure message; `None` uses the default travel text.
    pub travel_msg: Option<String>,
}

impl Connector {
    /// The face whose room matches, if either.
    #[must_use]
    pub fn face_in(&self, room: &Ix) -> Option<&Face> {
        if &self.side_a.room == room {
            Some(&self.side_a)
        } else if &self.side_b.room == room {
            Some(&self.side_b)
        } else {
            None
        }
    }

    /// The face opposite the given room.
    #[must_use]
    pub fn face_opposite(&self, room: &Ix) -> Option<&Face> {
        if &self.side_a.room == room {
            Some(&self.side_b)
        } else if &self.side_b.room == room {
            Some(&self.side_a)
        } else {
            None
        }
    }

    /// True when crossing is blocked by a closed (door) face.
    #[must_use]
    pub fn blocks(&self) -> bool {
        self.kind == ConnectorKind::Door && !self.is_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exits_round_trip() {
        let mut room = Room::new(Ix::from_raw("room0"), "Cabin", "A snug cabin.");
        assert!(room.exit(Direction::North).is_none());

        room.set_exit(Direction::North, Some(Exit::Room(Ix::from_raw("room1"))));
        assert_eq!(
            room.exit(Direction::North),
            Some(&Exit::Room(Ix::from_raw("room1")))
        );
        assert_eq!(room.exit_directions(), vec![Direction::North]);
    }

    #[test]
    fn connector_faces_resolve_by_room() {
        let connector = Connector {
            ix: Ix::from_raw("connector0"),
            kind: ConnectorKind::Door,
            side_a: Face {
                room: Ix::from_raw("room0"),
                entrance: Ix::from_raw("thing0"),
                direction: Direction::East,
            },
            side_b: Face {
                room: Ix::from_raw("room1"),
                entrance: Ix::from_raw("thing1"),
                direction: Direction::West,
            },
            is_open: false,
            lock_obj: None,
            travel_msg: None,
        };

        let here = Ix::from_raw("room0");
        assert_eq!(connector.face_in(&here).unwrap().direction, Direction::East);
        assert_eq!(
            connector.face_opposite(&here).unwrap().room,
            Ix::from_raw("room1")
        );
        assert!(connector.blocks());
    }
}
