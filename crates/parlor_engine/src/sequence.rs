//! Scripted sequences (dialogue trees, cutscenes).
//!
//! A sequence is a tree of lines and choice points. Running one is a
//! deterministic walk: lines print until a choice point, the options
//! print as a numbered menu, and the next player input selects a
//! branch. The cursor is an explicit index path into the tree, so
//! in-progress sequences survive a save.

use parlor_foundation::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// One node of a sequence tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeqNode {
    /// A line printed verbatim.
    Line(String),
    /// A menu of labelled branches.
    Choice(Vec<SeqBranch>),
}

/// One selectable branch of a choice point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeqBranch {
    /// The label shown in the menu and matched against input.
    pub label: String,
    /// The nodes played when selected.
    pub body: Vec<SeqNode>,
}

/// A sequence definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    /// Unique name; the save file references sequences by name.
    pub name: String,
    /// Top-level nodes.
    pub nodes: Vec<SeqNode>,
}

/// The live cursor of a running sequence.
///
/// `path` alternates node index and branch index: `[2, 0, 1]` means
/// "node 2's choice, branch 0, node 1 of that body".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceState {
    /// Name of the running sequence.
    pub name: String,
    /// Cursor path into the tree.
    pub path: Vec<usize>,
}

/// What one step of the interpreter produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeqStep {
    /// Lines to print, then the sequence is over.
    Done(Vec<String>),
    /// Lines to print, then a menu awaiting a selection.
    Menu {
        /// Lines printed before the menu.
        lines: Vec<String>,
        /// The numbered option labels.
        options: Vec<String>,
    },
}

impl Sequence {
    /// Creates a sequence from its nodes.
    #[must_use]
    pub fn new(name: impl Into<String>, nodes: Vec<SeqNode>) -> Self {
        Self {
            name: name.into(),
            nodes,
        }
    }

    /// Starts the sequence: plays from the top until a choice or the
    /// end.
    ///
    /// # Errors
    ///
    /// [`EngineError`] if the tree is malformed.
    pub fn start(&self) -> Result<(SequenceState, SeqStep)> {
        let mut state = SequenceState {
            name: self.name.clone(),
            path: Vec::new(),
        };
        let step = self.play(&mut state, 0)?;
        Ok((state, step))
    }

    /// Feeds a player selection into a waiting menu. Accepts a bare
    /// 1-based numeral or an unambiguous label prefix.
    ///
    /// # Errors
    ///
    /// [`EngineError`] if the stored cursor no longer fits the tree.
    pub fn select(&self, state: &mut SequenceState, input: &str) -> Result<Option<SeqStep>> {
        let (body, _) = self.node_at(&state.path)?;
        let SeqNode::Choice(branches) = body else {
            return Err(EngineError::Template(format!(
                "sequence {:?}: cursor is not at a choice",
                self.name
            )));
        };
        let choice = match input.trim().parse::<usize>() {
            Ok(n) if n >= 1 && n <= branches.len() => Some(n - 1),
            Ok(_) => None,
            Err(_) => {
                let lowered = input.trim().to_lowercase();
                let matches: Vec<usize> = branches
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| b.label.to_lowercase().starts_with(&lowered))
                    .map(|(i, _)| i)
                    .collect();
                if matches.len() == 1 { Some(matches[0]) } else { None }
            }
        };
        let Some(choice) = choice else {
            return Ok(None);
        };
        state.path.push(choice);
        let step = self.play(state, 0)?;
        Ok(Some(step))
    }

    /// Plays nodes from `from` at the cursor's level, descending into
    /// nothing: lines accumulate until a choice or the level ends.
    fn play(&self, state: &mut SequenceState, from: usize) -> Result<SeqStep> {
        let mut lines = Vec::new();
        let mut index = from;
        loop {
            let level = self.level_at(&state.path)?;
            match level.get(index) {
                None => {
                    // Level exhausted; pop back up to the parent level
                    // and continue after the choice node we came from.
                    if state.path.len() < 2 {
                        return Ok(SeqStep::Done(lines));
                    }
                    state.path.pop();
                    let node_index = state.path.pop().unwrap_or(0);
                    index = node_index + 1;
                }
                Some(SeqNode::Line(text)) => {
                    lines.push(text.clone());
                    index += 1;
                }
                Some(SeqNode::Choice(branches)) => {
                    state.path.push(index);
                    let options = branches.iter().map(|b| b.label.clone()).collect();
                    return Ok(SeqStep::Menu { lines, options });
                }
            }
        }
    }

    /// The node list the cursor path currently points into.
    fn level_at(&self, path: &[usize]) -> Result<&[SeqNode]> {
        let mut level: &[SeqNode] = &self.nodes;
        let mut i = 0;
        while i + 1 < path.len() {
            let (node_index, branch_index) = (path[i], path[i + 1]);
            let SeqNode::Choice(branches) = level.get(node_index).ok_or_else(|| {
                EngineError::Template(format!("sequence {:?}: bad cursor", self.name))
            })?
            else {
                return Err(EngineError::Template(format!(
                    "sequence {:?}: bad cursor",
                    self.name
                )));
            };
            level = &branches
                .get(branch_index)
                .ok_or_else(|| {
                    EngineError::Template(format!("sequence {:?}: bad cursor", self.name))
                })?
                .body;
            i += 2;
        }
        Ok(level)
    }

    /// The node a full cursor path names (the trailing odd element).
    fn node_at(&self, path: &[usize]) -> Result<(&SeqNode, usize)> {
        if path.is_empty() {
            return Err(EngineError::Template(format!(
                "sequence {:?}: empty cursor",
                self.name
            )));
        }
        let level = self.level_at(path)?;
        let index = path[path.len() - 1];
        let node = level.get(index).ok_or_else(|| {
            EngineError::Template(format!("sequence {:?}: bad cursor", self.name))
        })?;
        Ok((node, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Sequence {
        Sequence::new(
            "meeting",
            vec![
                SeqNode::Line("Sarah looks up.".to_string()),
                SeqNode::Choice(vec![
                    SeqBranch {
                        label: "Greet her".to_string(),
                        body: vec![SeqNode::Line("\"Hello,\" she says.".to_string())],
                    },
                    SeqBranch {
                        label: "Say nothing".to_string(),
                        body: vec![SeqNode::Line("The silence stretches.".to_string())],
                    },
                ]),
                SeqNode::Line("She returns to her book.".to_string()),
            ],
        )
    }

    #[test]
    fn start_plays_until_menu() {
        let seq = sample();
        let (_state, step) = seq.start().unwrap();
        let SeqStep::Menu { lines, options } = step else {
            panic!("expected a menu");
        };
        assert_eq!(lines, vec!["Sarah looks up."]);
        assert_eq!(options, vec!["Greet her", "Say nothing"]);
    }

    #[test]
    fn numeral_selects_and_continues_past_the_choice() {
        let seq = sample();
        let (mut state, _) = seq.start().unwrap();
        let step = seq.select(&mut state, "1").unwrap().unwrap();
        assert_eq!(
            step,
            SeqStep::Done(vec![
                "\"Hello,\" she says.".to_string(),
                "She returns to her book.".to_string(),
            ])
        );
    }

    #[test]
    fn label_prefix_selects() {
        let seq = sample();
        let (mut state, _) = seq.start().unwrap();
        let step = seq.select(&mut state, "say").unwrap().unwrap();
        let SeqStep::Done(lines) = step else {
            panic!("expected done");
        };
        assert_eq!(lines[0], "The silence stretches.");
    }

    #[test]
    fn bad_selection_repeats_the_menu() {
        let seq = sample();
        let (mut state, _) = seq.start().unwrap();
        assert_eq!(seq.select(&mut state, "7").unwrap(), None);
        assert_eq!(seq.select(&mut state, "mumble").unwrap(), None);
    }
}
