//! The twelve travel directions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A travel direction out of a room.
///
/// Rooms carry one exit slot per variant. `In` and `Out` correspond to
/// the source model's `entrance` and `exit` slots.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// North.
    North,
    /// Northeast.
    Northeast,
    /// East.
    East,
    /// Southeast.
    Southeast,
    /// South.
    South,
    /// Southwest.
    Southwest,
    /// West.
    West,
    /// Northwest.
    Northwest,
    /// Up.
    Up,
    /// Down.
    Down,
    /// Inward (enter).
    In,
    /// Outward (exit).
    Out,
}

impl Direction {
    /// All twelve directions, in slot order.
    pub const ALL: [Direction; 12] = [
        Direction::North,
        Direction::Northeast,
        Direction::East,
        Direction::Southeast,
        Direction::South,
        Direction::Southwest,
        Direction::West,
        Direction::Northwest,
        Direction::Up,
        Direction::Down,
        Direction::In,
        Direction::Out,
    ];

    /// Parses a direction word (canonical or abbreviation).
    #[must_use]
    pub fn parse(word: &str) -> Option<Direction> {
        match word {
            "north" | "n" => Some(Direction::North),
            "northeast" | "ne" => Some(Direction::Northeast),
            "east" | "e" => Some(Direction::East),
            "southeast" | "se" => Some(Direction::Southeast),
            "south" | "s" => Some(Direction::South),
            "southwest" | "sw" => Some(Direction::Southwest),
            "west" | "w" => Some(Direction::West),
            "northwest" | "nw" => Some(Direction::Northwest),
            "up" | "u" | "upward" => Some(Direction::Up),
            "down" | "d" | "downward" => Some(Direction::Down),
            "in" | "enter" | "inside" => Some(Direction::In),
            "out" | "exit" | "outside" => Some(Direction::Out),
            _ => None,
        }
    }

    /// The opposite direction, used when twinning connector faces.
    #[must_use]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::Northeast => Direction::Southwest,
            Direction::East => Direction::West,
            Direction::Southeast => Direction::Northwest,
            Direction::South => Direction::North,
            Direction::Southwest => Direction::Northeast,
            Direction::West => Direction::East,
            Direction::Northwest => Direction::Southeast,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::In => Direction::Out,
            Direction::Out => Direction::In,
        }
    }

    /// Slot index within a room's exit table.
    #[must_use]
    pub fn slot(self) -> usize {
        Self::ALL.iter().position(|d| *d == self).unwrap_or(0)
    }

    /// The phrase used in travel messages ("You go north.").
    #[must_use]
    pub fn phrase(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::Northeast => "northeast",
            Direction::East => "east",
            Direction::Southeast => "southeast",
            Direction::South => "south",
            Direction::Southwest => "southwest",
            Direction::West => "west",
            Direction::Northwest => "northwest",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.phrase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_abbreviations() {
        assert_eq!(Direction::parse("n"), Some(Direction::North));
        assert_eq!(Direction::parse("sw"), Some(Direction::Southwest));
        assert_eq!(Direction::parse("u"), Some(Direction::Up));
        assert_eq!(Direction::parse("enter"), Some(Direction::In));
        assert_eq!(Direction::parse("sideways"), None);
    }

    #[test]
    fn opposites_are_involutions() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn slots_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for dir in Direction::ALL {
            assert!(seen.insert(dir.slot()));
        }
    }
}
