//! The interactive session loop.
//!
//! Owns the game, the line editor, and the command recorder, and
//! fulfills the session-level requests the engine core cannot: the
//! core decides *that* a save happens, the session decides *how* the
//! bytes reach disk.

use parlor_engine::{App, Event, Game, SessionRequest};
use parlor_foundation::{EngineError, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::record::Recorder;
use crate::save;

/// An interactive game session over a line editor.
pub struct Session {
    game: Game,
    recorder: Recorder,
    editor: DefaultEditor,
    prompt: String,
    banner: Option<String>,
}

impl Session {
    /// Creates a session around a game.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Io`] if the line editor fails to
    /// initialize.
    pub fn new(game: Game) -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| EngineError::Io(e.to_string()))?;
        Ok(Self {
            game,
            recorder: Recorder::new(),
            editor,
            prompt: "> ".to_string(),
            banner: None,
        })
    }

    /// Sets the input prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Sets an opening banner, printed once before the first turn.
    #[must_use]
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = Some(banner.into());
        self
    }

    /// The game under this session.
    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Mutable access to the game, for setup before [`Session::run`].
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Runs the session until the player quits or input ends.
    ///
    /// # Errors
    ///
    /// Author-facing engine errors only; player mistakes and failed
    /// saves become session text.
    pub fn run(&mut self, app: &mut dyn App) -> Result<()> {
        if let Some(banner) = &self.banner {
            say(app, banner.clone());
        }
        self.game.turn("look", app)?;

        loop {
            let line = match self.editor.readline(&self.prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => return Err(EngineError::Io(e.to_string())),
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if matches!(trimmed, "quit" | "q" | "exit") {
                break;
            }
            let _ = self.editor.add_history_entry(trimmed);
            self.step(trimmed, app)?;
        }

        say(app, "Goodbye.".to_string());
        Ok(())
    }

    /// Runs one line through the game and fulfills any session
    /// request it produces.
    ///
    /// # Errors
    ///
    /// Author-facing engine errors only.
    pub fn step(&mut self, line: &str, app: &mut dyn App) -> Result<()> {
        if let Err(e) = self.recorder.observe(line) {
            self.recorder.stop();
            say(app, format!("Recording stopped: {e}"));
        }
        if let Some(request) = self.game.turn(line, app)? {
            self.fulfill(request, app)?;
        }
        Ok(())
    }

    fn fulfill(&mut self, request: SessionRequest, app: &mut dyn App) -> Result<()> {
        match request {
            SessionRequest::Save(path) => {
                match save::save_to_file(&self.game.snapshot(), &path) {
                    Ok(()) => say(app, format!("Saved to {}.", path.display())),
                    Err(e) => say(app, format!("Save failed: {e}")),
                }
            }
            SessionRequest::Load(path) => match save::load_from_file(&path) {
                Ok(snapshot) => match self.game.restore(&snapshot) {
                    Ok(()) => {
                        say(app, "Restored.".to_string());
                        self.game.turn("look", app)?;
                    }
                    Err(e) => say(app, format!("Load failed: {e}")),
                },
                Err(e) => say(app, format!("Load failed: {e}")),
            },
            SessionRequest::RecordOn(path) => match self.recorder.start_to(path.clone()) {
                Ok(()) => say(app, format!("Recording to {}.", path.display())),
                Err(e) => say(app, format!("Recording failed: {e}")),
            },
            SessionRequest::RecordOff => {
                self.recorder.stop();
                say(app, "Recording off.".to_string());
            }
            SessionRequest::Playback => {
                self.recorder.stop();
                let lines = self.recorder.transcript().to_vec();
                if lines.is_empty() {
                    say(app, "Nothing has been recorded.".to_string());
                }
                for line in lines {
                    say(app, format!("> {line}"));
                    self.game.turn(&line, app)?;
                }
            }
        }
        Ok(())
    }
}

/// Pushes one session-level line through the front-end, outside any
/// turn.
fn say(app: &mut dyn App, text: String) {
    let mut event = Event::new("session", 0);
    event.lines.push(text);
    app.print_event(&event);
}
