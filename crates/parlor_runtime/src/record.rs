//! Command recording and playback.
//!
//! While recording is on, every line the player types is kept in
//! memory and appended to a plain-text transcript file, one command
//! per line. `playback` feeds the transcript back through the game
//! one line at a time, which makes bug reports and regression scripts
//! reproducible.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parlor_foundation::{EngineError, Result};

/// The command transcript for a session.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    recording: bool,
    lines: Vec<String>,
    path: Option<PathBuf>,
}

impl Recorder {
    /// Creates a recorder with recording off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether lines are currently being captured.
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Starts capturing in memory only. The existing transcript is
    /// kept; new lines append to it.
    pub fn start(&mut self) {
        self.recording = true;
    }

    /// Starts capturing to a transcript file, truncating any previous
    /// content at that path. Captured lines are appended to the file
    /// as they arrive.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Io`] if the file cannot be created.
    pub fn start_to(&mut self, path: PathBuf) -> Result<()> {
        File::create(&path).map_err(|e| {
            EngineError::Io(format!(
                "failed to create file '{}': {e}",
                path.display()
            ))
        })?;
        self.path = Some(path);
        self.recording = true;
        Ok(())
    }

    /// Stops capturing. The transcript file, if any, stays in place.
    pub fn stop(&mut self) {
        self.recording = false;
    }

    /// The transcript file currently appended to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Offers a typed line to the recorder. Meta-commands that steer
    /// the recorder itself are never captured, so playback can't
    /// recurse.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Io`] if appending to the transcript file
    /// fails.
    pub fn observe(&mut self, line: &str) -> Result<()> {
        if !self.recording {
            return Ok(());
        }
        let trimmed = line.trim();
        match trimmed {
            "record on" | "record off" | "playback" | "save" | "load" => Ok(()),
            _ => {
                self.lines.push(trimmed.to_string());
                self.append_to_file(trimmed)
            }
        }
    }

    fn append_to_file(&self, line: &str) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let mut file = OpenOptions::new().append(true).open(path).map_err(|e| {
            EngineError::Io(format!("failed to open file '{}': {e}", path.display()))
        })?;
        writeln!(file, "{line}").map_err(|e| {
            EngineError::Io(format!(
                "failed to write to file '{}': {e}",
                path.display()
            ))
        })
    }

    /// The transcript captured so far.
    #[must_use]
    pub fn transcript(&self) -> &[String] {
        &self.lines
    }

    /// Takes the transcript for playback, leaving the recorder empty
    /// and stopped. The transcript file is left as written.
    pub fn take(&mut self) -> Vec<String> {
        self.recording = false;
        self.path = None;
        std::mem::take(&mut self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observe_captures_only_while_recording() {
        let mut recorder = Recorder::new();
        recorder.observe("look").unwrap();
        recorder.start();
        recorder.observe("take lamp").unwrap();
        recorder.stop();
        recorder.observe("go north").unwrap();

        assert_eq!(recorder.transcript(), &["take lamp".to_string()]);
    }

    #[test]
    fn recorder_meta_commands_are_not_captured() {
        let mut recorder = Recorder::new();
        recorder.start();
        recorder.observe("record off").unwrap();
        recorder.observe("playback").unwrap();
        recorder.observe("save").unwrap();
        recorder.observe("wait").unwrap();

        assert_eq!(recorder.transcript(), &["wait".to_string()]);
    }

    #[test]
    fn take_drains_and_stops() {
        let mut recorder = Recorder::new();
        recorder.start();
        recorder.observe("look").unwrap();

        let lines = recorder.take();
        assert_eq!(lines, vec!["look".to_string()]);
        assert!(!recorder.is_recording());
        assert!(recorder.transcript().is_empty());
    }

    #[test]
    fn captured_lines_land_in_the_transcript_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("parlor-record-test-{}.txt", std::process::id()));

        let mut recorder = Recorder::new();
        recorder.start_to(path.clone()).unwrap();
        recorder.observe("take lamp").unwrap();
        recorder.observe("go north").unwrap();
        recorder.stop();

        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(written, "take lamp\ngo north\n");
    }

    #[test]
    fn starting_over_truncates_the_old_transcript() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("parlor-record-trunc-{}.txt", std::process::id()));

        let mut recorder = Recorder::new();
        recorder.start_to(path.clone()).unwrap();
        recorder.observe("look").unwrap();

        let mut second = Recorder::new();
        second.start_to(path.clone()).unwrap();
        second.observe("wait").unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(written, "wait\n");
    }

    #[test]
    fn unwritable_transcript_path_is_an_io_error() {
        let mut recorder = Recorder::new();
        let result = recorder.start_to(PathBuf::from("/nonexistent/parlor/rec.txt"));
        assert!(matches!(result, Err(EngineError::Io(_))));
    }
}
