//! The front-end port.
//!
//! The core never prints or touches the filesystem directly; all
//! player-visible output leaves through [`App::print_event`], and the
//! save/load verbs ask the front-end for paths through the prompt
//! methods. Front-ends are small: a terminal, or a buffer in tests.

use std::path::PathBuf;

use crate::event::Event;

/// What a front-end must provide to host a game.
pub trait App {
    /// Receives one ordered, named text bundle.
    fn print_event(&mut self, event: &Event);

    /// Asks the player where to save. `None` cancels.
    fn save_prompt(&mut self, ext: &str, desc: &str, msg: &str) -> Option<PathBuf>;

    /// Asks the player which file to open. `None` cancels.
    fn open_prompt(&mut self, ext: &str, desc: &str, msg: &str) -> Option<PathBuf>;
}

/// A front-end that collects output in memory. Used by tests and by
/// playback.
#[derive(Clone, Debug, Default)]
pub struct BufferApp {
    /// Every line printed, in order.
    pub lines: Vec<String>,
    /// The path returned by [`App::save_prompt`].
    pub save_path: Option<PathBuf>,
    /// The path returned by [`App::open_prompt`].
    pub open_path: Option<PathBuf>,
}

impl BufferApp {
    /// Creates an empty buffer front-end.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The whole transcript as one string.
    #[must_use]
    pub fn transcript(&self) -> String {
        self.lines.join("\n")
    }

    /// Whether any printed line contains the given text.
    #[must_use]
    pub fn saw(&self, text: &str) -> bool {
        self.lines.iter().any(|l| l.contains(text))
    }

    /// Forgets everything printed so far.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl App for BufferApp {
    fn print_event(&mut self, event: &Event) {
        self.lines.extend(event.flatten());
    }

    fn save_prompt(&mut self, _ext: &str, _desc: &str, _msg: &str) -> Option<PathBuf> {
        self.save_path.clone()
    }

    fn open_prompt(&mut self, _ext: &str, _desc: &str, _msg: &str) -> Option<PathBuf> {
        self.open_path.clone()
    }
}
