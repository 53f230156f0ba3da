//! Sequential-reveal hints.
//!
//! Authors group hints by puzzle; the `hint` command reveals the
//! current puzzle's hints one at a time, never un-revealing. Which
//! puzzle is current is set by the game as the player progresses.

use serde::{Deserialize, Serialize};

/// One puzzle's worth of hints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HintNode {
    /// Puzzle name (author-facing).
    pub name: String,
    /// Hints in reveal order, vaguest first.
    pub hints: Vec<String>,
    /// How many have been revealed so far.
    pub revealed: usize,
}

/// The game's hint state.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HintTree {
    nodes: Vec<HintNode>,
    current: Option<usize>,
}

impl HintTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a puzzle's hints; the first declared puzzle becomes
    /// current.
    pub fn declare(&mut self, name: impl Into<String>, hints: &[&str]) {
        self.nodes.push(HintNode {
            name: name.into(),
            hints: hints.iter().map(ToString::to_string).collect(),
            revealed: 0,
        });
        if self.current.is_none() {
            self.current = Some(self.nodes.len() - 1);
        }
    }

    /// Makes the named puzzle current.
    pub fn set_current(&mut self, name: &str) {
        self.current = self.nodes.iter().position(|n| n.name == name);
    }

    /// Reveals and returns the next hint for the current puzzle.
    pub fn next_hint(&mut self) -> Option<String> {
        let node = &mut self.nodes[self.current?];
        if node.revealed >= node.hints.len() {
            return None;
        }
        let hint = node.hints[node.revealed].clone();
        node.revealed += 1;
        Some(hint)
    }

    /// Hints already revealed for the current puzzle.
    #[must_use]
    pub fn revealed(&self) -> Vec<String> {
        let Some(current) = self.current else {
            return Vec::new();
        };
        let node = &self.nodes[current];
        node.hints[..node.revealed].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_reveal_in_order_and_stop() {
        let mut tree = HintTree::new();
        tree.declare("the locked box", &["Look around the bench.", "Try the silver key."]);
        assert_eq!(tree.next_hint().as_deref(), Some("Look around the bench."));
        assert_eq!(tree.next_hint().as_deref(), Some("Try the silver key."));
        assert_eq!(tree.next_hint(), None);
        assert_eq!(tree.revealed().len(), 2);
    }

    #[test]
    fn current_puzzle_switches() {
        let mut tree = HintTree::new();
        tree.declare("first", &["a"]);
        tree.declare("second", &["b"]);
        tree.set_current("second");
        assert_eq!(tree.next_hint().as_deref(), Some("b"));
    }
}
