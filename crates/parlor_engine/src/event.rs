//! The turn's event bus.
//!
//! Each turn holds an ordered map of named events. Every piece of
//! player-visible text is pushed into an event; at turn end the events
//! are sorted by ascending priority, their text expanded, and each one
//! handed to the front-end. Nothing in the core prints directly.

use std::collections::HashMap;

use parlor_foundation::{EngineError, Result, Value};

/// A named, prioritized bundle of turn text.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// Event name ("command", "turn", author-defined).
    pub name: String,
    /// Flush order; lower flushes first.
    pub priority: i32,
    /// Optional style tag for the front-end.
    pub style: Option<String>,
    /// Text fragments, in push order.
    pub lines: Vec<String>,
    /// Nested sub-events, flattened after this event's own lines.
    pub sub: Vec<Event>,
}

impl Event {
    /// Creates an empty event.
    #[must_use]
    pub fn new(name: impl Into<String>, priority: i32) -> Self {
        Self {
            name: name.into(),
            priority,
            style: None,
            lines: Vec::new(),
            sub: Vec::new(),
        }
    }

    /// This event's lines followed by each sub-event's, depth-first.
    #[must_use]
    pub fn flatten(&self) -> Vec<String> {
        let mut out = self.lines.clone();
        for sub in &self.sub {
            out.extend(sub.flatten());
        }
        out
    }

    /// Whether the event carries any text at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.sub.iter().all(Event::is_empty)
    }
}

/// The events of the current turn, in insertion order by name.
#[derive(Clone, Debug, Default)]
pub struct TurnEvents {
    events: Vec<Event>,
}

/// Name of the event echoing the player's raw line.
pub const COMMAND_EVENT: &str = "command";

/// Name of the event verb text lands in by default.
pub const TURN_EVENT: &str = "turn";

/// Priority of the default turn event.
pub const TURN_PRIORITY: i32 = 5;

impl TurnEvents {
    /// Starts a fresh turn with the two standard events. The command
    /// event sorts first so the echoed line leads the turn's output.
    #[must_use]
    pub fn begin() -> Self {
        let mut events = Self::default();
        events.add_event(COMMAND_EVENT, 0);
        events.add_event(TURN_EVENT, TURN_PRIORITY);
        events
    }

    /// Adds a named event if absent; returns a handle to it.
    pub fn add_event(&mut self, name: &str, priority: i32) -> &mut Event {
        if let Some(pos) = self.events.iter().position(|e| e.name == name) {
            return &mut self.events[pos];
        }
        self.events.push(Event::new(name, priority));
        let last = self.events.len() - 1;
        &mut self.events[last]
    }

    /// Pushes a line of text into a named event, creating the event at
    /// turn priority if it does not exist yet.
    pub fn push(&mut self, name: &str, text: impl Into<String>) {
        self.add_event(name, TURN_PRIORITY).lines.push(text.into());
    }

    /// Pushes a line into the default turn event.
    pub fn say(&mut self, text: impl Into<String>) {
        self.push(TURN_EVENT, text);
    }

    /// Looks up an event by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.name == name)
    }

    /// Sorts by ascending priority (stable: insertion order breaks
    /// ties), expands templates, and drains the turn.
    ///
    /// # Errors
    ///
    /// Propagates template expansion failures.
    pub fn flush(&mut self, globals: &HashMap<String, Value>) -> Result<Vec<Event>> {
        let mut events = std::mem::take(&mut self.events);
        events.sort_by_key(|e| e.priority);
        for event in &mut events {
            expand_event(event, globals)?;
        }
        events.retain(|e| !e.is_empty());
        Ok(events)
    }
}

fn expand_event(event: &mut Event, globals: &HashMap<String, Value>) -> Result<()> {
    for line in &mut event.lines {
        *line = expand(line, globals)?;
    }
    for sub in &mut event.sub {
        expand_event(sub, globals)?;
    }
    Ok(())
}

/// Expands `<<path.to.attr>>` placeholders against registered globals.
///
/// The first path segment names a global; the rest walk into it.
/// Function-call syntax inside a placeholder is rejected: expansions
/// read state, they never run code.
///
/// # Errors
///
/// [`EngineError::Template`] for unterminated placeholders, unknown
/// globals or paths, and call syntax.
pub fn expand(text: &str, globals: &HashMap<String, Value>) -> Result<String> {
    if !text.contains("<<") {
        return Ok(text.to_string());
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("<<") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find(">>") else {
            return Err(EngineError::Template(format!(
                "unterminated placeholder in {text:?}"
            )));
        };
        let path = after[..end].trim();
        if path.contains('(') {
            return Err(EngineError::Template(format!(
                "function-call expansion rejected: {path:?}"
            )));
        }
        let (head, tail) = match path.split_once('.') {
            Some((head, tail)) => (head, Some(tail)),
            None => (path, None),
        };
        let root = globals.get(head).ok_or_else(|| {
            EngineError::Template(format!("unknown template global: {head:?}"))
        })?;
        let value = match tail {
            Some(tail) => root.walk_path(tail).ok_or_else(|| {
                EngineError::Template(format!("no value at path: {path:?}"))
            })?,
            None => root,
        };
        out.push_str(&value.render());
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}
