//! The game context.
//!
//! One `Game` owns everything a running session needs: the world, the
//! parser, the action table, hooks, daemons, sequences, score and
//! hints. It is threaded explicitly through every operation; nothing
//! lives in process-wide state except the immutable lexicon tables.

use std::collections::HashMap;

use parlor_foundation::{Ix, Result, TurnError, Value, VerbId, VerbResult};
use parlor_parser::{Command, Parser, VerbRegistry};
use parlor_world::{World, WorldState};
use serde::{Deserialize, Serialize};

use crate::app::App;
use crate::daemon::Daemon;
use crate::dispatch::{self, SessionRequest};
use crate::event::TurnEvents;
use crate::hints::HintTree;
use crate::hooks::HookRegistry;
use crate::score::ScoreBoard;
use crate::sequence::{SeqStep, Sequence, SequenceState};
use crate::verbs;

/// A verb's default implementation.
pub type VerbFn = fn(&mut Game, &Command) -> VerbResult;

/// Handles to the verbs the dispatcher chains into implicitly.
#[derive(Clone, Copy, Debug)]
pub struct CoreVerbs {
    /// take
    pub get: VerbId,
    /// drop
    pub drop: VerbId,
    /// open
    pub open: VerbId,
    /// close
    pub close: VerbId,
    /// lock
    pub lock: VerbId,
    /// unlock
    pub unlock: VerbId,
    /// take X from Y
    pub remove_from: VerbId,
    /// stand
    pub stand: VerbId,
    /// sit
    pub sit: VerbId,
    /// lie
    pub lie: VerbId,
    /// wear
    pub wear: VerbId,
    /// take off
    pub doff: VerbId,
    /// travel
    pub go: VerbId,
    /// look
    pub look: VerbId,
}

/// Everything a save file carries.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Mutable world state (attributes + placement trees).
    pub world: WorldState,
    /// A sequence in progress, if any.
    pub active_sequence: Option<SequenceState>,
    /// Score state.
    pub score: ScoreBoard,
    /// Hint reveal state.
    pub hints: HintTree,
    /// Turns elapsed.
    pub turn_count: u64,
}

/// The single mutable context for a running game.
pub struct Game {
    /// The world model.
    pub world: World,
    /// The current turn's event bus.
    pub events: TurnEvents,
    /// Achievements.
    pub score: ScoreBoard,
    /// Hint state.
    pub hints: HintTree,
    /// Template-expansion globals.
    pub globals: HashMap<String, Value>,
    /// Text for the `about` meta-command.
    pub about_text: String,
    /// Text for the `instructions` meta-command.
    pub instructions_text: String,

    parser: Parser,
    actions: HashMap<VerbId, VerbFn>,
    core: CoreVerbs,
    hooks: HookRegistry,
    daemons: Vec<Daemon>,
    sequences: HashMap<String, Sequence>,
    active_sequence: Option<SequenceState>,
    turn_count: u64,
}

impl Game {
    /// Creates a game over a world, with the standard verb set
    /// installed.
    ///
    /// # Errors
    ///
    /// Propagates verb-registration failures (a bug in the standard
    /// set, not in author code).
    pub fn new(world: World) -> Result<Self> {
        let mut registry = VerbRegistry::new();
        let mut actions: HashMap<VerbId, VerbFn> = HashMap::new();
        let core = verbs::install(&mut registry, &mut actions)?;
        Ok(Self {
            world,
            events: TurnEvents::begin(),
            score: ScoreBoard::new(),
            hints: HintTree::new(),
            globals: HashMap::new(),
            about_text: String::new(),
            instructions_text: String::new(),
            parser: Parser::new(registry),
            actions,
            core,
            hooks: HookRegistry::new(),
            daemons: Vec::new(),
            sequences: HashMap::new(),
            active_sequence: None,
            turn_count: 0,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The installed verb registry.
    #[must_use]
    pub fn registry(&self) -> &VerbRegistry {
        self.parser.registry()
    }

    /// Handles to the implicitly-chained verbs.
    #[must_use]
    pub fn core(&self) -> CoreVerbs {
        self.core
    }

    /// The override-hook registry.
    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    /// Read access to the hooks.
    #[must_use]
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Turns elapsed since the game started.
    #[must_use]
    pub fn turn_count(&self) -> u64 {
        self.turn_count
    }

    /// Registers a template-expansion global.
    pub fn set_global(&mut self, name: impl Into<String>, value: Value) {
        self.globals.insert(name.into(), value);
    }

    // =========================================================================
    // The turn
    // =========================================================================

    /// Runs one player line to completion and flushes the turn's
    /// events to the front-end.
    ///
    /// Returns a request only for the session-level meta-commands the
    /// front-end must fulfill (save, load, recording control).
    ///
    /// # Errors
    ///
    /// Author-facing [`parlor_foundation::EngineError`]s only; player
    /// mistakes become turn text.
    pub fn turn(&mut self, line: &str, app: &mut dyn App) -> Result<Option<SessionRequest>> {
        self.events = TurnEvents::begin();
        self.events.push(crate::event::COMMAND_EVENT, line);
        let mut request = None;

        if self.feed_sequence(line)? {
            // The line belonged to a running sequence.
        } else {
            match dispatch::dispatch(self, line, app) {
                Ok(req) => request = req,
                Err(TurnError::Abort(abort)) => {
                    if abort.has_message() {
                        self.events.say(abort.to_string());
                    }
                }
                Err(TurnError::Engine(e)) => return Err(e),
            }
            self.run_daemons()?;
        }

        self.turn_count += 1;
        self.flush_events(app)?;
        Ok(request)
    }

    /// Dispatches a single parsed command, without the surrounding
    /// turn machinery. Used by implicit actions and tests.
    ///
    /// # Errors
    ///
    /// Anything the verb function raises.
    pub fn perform(&mut self, command: &Command) -> VerbResult {
        dispatch::perform(self, command)
    }

    /// Parses one line against the current world.
    ///
    /// # Errors
    ///
    /// Parser aborts and lookup failures.
    pub fn parse(&mut self, line: &str) -> VerbResult<Command> {
        self.parser.parse(line, &self.world)
    }

    /// Runs a verb's default function directly.
    ///
    /// # Errors
    ///
    /// Anything the verb function raises, or an unknown verb id.
    pub fn run_verb(&mut self, verb: VerbId, command: &Command) -> VerbResult {
        let Some(func) = self.actions.get(&verb).copied() else {
            return Err(TurnError::Engine(parlor_foundation::EngineError::VerbDefinition(
                format!("no action registered for verb {verb:?}"),
            )));
        };
        func(self, command)
    }

    fn flush_events(&mut self, app: &mut dyn App) -> Result<()> {
        for event in self.events.flush(&self.globals)? {
            app.print_event(&event);
        }
        Ok(())
    }

    // =========================================================================
    // Daemons
    // =========================================================================

    /// Installs a daemon; a daemon with the same name is replaced.
    pub fn install_daemon(&mut self, daemon: Daemon) {
        self.remove_daemon(&daemon.name);
        self.daemons.push(daemon);
    }

    /// Removes a daemon by name.
    pub fn remove_daemon(&mut self, name: &str) {
        self.daemons.retain(|d| d.name != name);
    }

    /// Whether a daemon with this name is installed.
    #[must_use]
    pub fn has_daemon(&self, name: &str) -> bool {
        self.daemons.iter().any(|d| d.name == name)
    }

    fn run_daemons(&mut self) -> Result<()> {
        // Installation order; clone so daemons may install or remove
        // daemons while running.
        let daemons = self.daemons.clone();
        for daemon in daemons {
            daemon.run(self)?;
        }
        Ok(())
    }

    // =========================================================================
    // Sequences
    // =========================================================================

    /// Registers a sequence definition.
    pub fn add_sequence(&mut self, sequence: Sequence) {
        self.sequences.insert(sequence.name.clone(), sequence);
    }

    /// Starts a registered sequence; its opening lines land in the
    /// turn event.
    ///
    /// # Errors
    ///
    /// Unknown sequence name, or a malformed tree.
    pub fn start_sequence(&mut self, name: &str) -> Result<()> {
        let sequence = self.sequences.get(name).cloned().ok_or_else(|| {
            parlor_foundation::EngineError::VerbDefinition(format!("unknown sequence {name:?}"))
        })?;
        let (state, step) = sequence.start()?;
        self.apply_seq_step(step, state);
        Ok(())
    }

    /// Feeds a line to the running sequence, if one is running.
    /// Returns true when the line was consumed.
    fn feed_sequence(&mut self, line: &str) -> Result<bool> {
        let Some(mut state) = self.active_sequence.take() else {
            return Ok(false);
        };
        let Some(sequence) = self.sequences.get(&state.name).cloned() else {
            return Ok(false);
        };
        match sequence.select(&mut state, line)? {
            Some(step) => self.apply_seq_step(step, state),
            None => {
                self.events.say("(Please choose one of the listed options.)");
                self.active_sequence = Some(state);
            }
        }
        Ok(true)
    }

    fn apply_seq_step(&mut self, step: SeqStep, state: SequenceState) {
        match step {
            SeqStep::Done(lines) => {
                for line in lines {
                    self.events.say(line);
                }
                self.active_sequence = None;
            }
            SeqStep::Menu { lines, options } => {
                for line in lines {
                    self.events.say(line);
                }
                for (i, option) in options.iter().enumerate() {
                    self.events.say(format!("{}) {option}", i + 1));
                }
                self.active_sequence = Some(state);
            }
        }
    }

    /// Whether a sequence is awaiting a selection.
    #[must_use]
    pub fn sequence_running(&self) -> bool {
        self.active_sequence.is_some()
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Captures everything a save file carries.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            world: self.world.capture(),
            active_sequence: self.active_sequence.clone(),
            score: self.score.clone(),
            hints: self.hints.clone(),
            turn_count: self.turn_count,
        }
    }

    /// Restores a snapshot. Validates against the current world
    /// first; a bad file never corrupts state. Daemons are re-derived
    /// from the restored world rather than loaded.
    ///
    /// # Errors
    ///
    /// [`parlor_foundation::EngineError::Save`] on validation failure.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.world.restore(&snapshot.world)?;
        self.active_sequence = snapshot.active_sequence.clone();
        self.score = snapshot.score.clone();
        self.hints = snapshot.hints.clone();
        self.turn_count = snapshot.turn_count;
        self.rederive_daemons()
    }

    /// Reinstalls the daemons implied by world state (burning light
    /// sources with finite fuel).
    fn rederive_daemons(&mut self) -> Result<()> {
        self.daemons.clear();
        let rooms = self.world.rooms_in_order().to_vec();
        let mut lit: Vec<Ix> = Vec::new();
        for room in &rooms {
            lit.extend(
                self.world
                    .all_contents_list(&parlor_world::Holder::Room(room.clone()))?,
            );
        }
        for ix in lit {
            let thing = self.world.thing(&ix)?;
            if thing.is_lit && thing.light_turns.is_some() {
                self.install_daemon(Daemon::new(
                    crate::daemon::light_daemon_name(&ix),
                    ix.clone(),
                    crate::daemon::consumable_light,
                ));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("turn_count", &self.turn_count)
            .field("daemons", &self.daemons.len())
            .field("sequence_running", &self.active_sequence.is_some())
            .finish_non_exhaustive()
    }
}
