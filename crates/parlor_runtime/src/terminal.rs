//! The terminal front-end.
//!
//! Implements the engine's [`App`] port over stdout and rustyline.
//! Turn text goes straight to the terminal; the save and load prompts
//! read a path on a secondary prompt line.

use std::path::PathBuf;

use parlor_engine::{App, Event};
use parlor_foundation::{EngineError, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// A front-end that prints to stdout and prompts on the terminal.
pub struct TerminalApp {
    prompter: DefaultEditor,
}

impl TerminalApp {
    /// Creates the terminal front-end.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Io`] if the line editor fails to
    /// initialize.
    pub fn new() -> Result<Self> {
        let prompter = DefaultEditor::new().map_err(|e| EngineError::Io(e.to_string()))?;
        Ok(Self { prompter })
    }

    /// Reads one path from the terminal. Empty input or Ctrl-C
    /// cancels.
    fn path_prompt(&mut self, ext: &str, msg: &str) -> Option<PathBuf> {
        println!("{msg}");
        let line = match self.prompter.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return None,
            Err(_) => return None,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        let mut path = PathBuf::from(trimmed);
        if path.extension().is_none() {
            path.set_extension(ext);
        }
        Some(path)
    }
}

impl App for TerminalApp {
    fn print_event(&mut self, event: &Event) {
        for line in event.flatten() {
            println!("{line}");
        }
    }

    fn save_prompt(&mut self, ext: &str, _desc: &str, msg: &str) -> Option<PathBuf> {
        self.path_prompt(ext, msg)
    }

    fn open_prompt(&mut self, ext: &str, _desc: &str, msg: &str) -> Option<PathBuf> {
        self.path_prompt(ext, msg)
    }
}
