//! Per-turn daemons.
//!
//! A daemon is a named callback run once per turn after the verb, in
//! installation order. Daemons are plain function pointers over a
//! target entity, so they clone cheaply and are re-derived rather than
//! serialized on load.

use parlor_foundation::{Ix, Result};

use crate::game::Game;

/// The callback type daemons run.
pub type DaemonFn = fn(&mut Game, &Ix) -> Result<()>;

/// A registered per-turn callback.
#[derive(Clone, Debug)]
pub struct Daemon {
    /// Unique name; installing a second daemon with the same name
    /// replaces the first.
    pub name: String,
    /// The entity this daemon watches.
    pub target: Ix,
    func: DaemonFn,
}

impl Daemon {
    /// Creates a daemon over a target entity.
    #[must_use]
    pub fn new(name: impl Into<String>, target: Ix, func: DaemonFn) -> Self {
        Self {
            name: name.into(),
            target,
            func,
        }
    }

    /// Runs the daemon once.
    pub fn run(&self, game: &mut Game) -> Result<()> {
        (self.func)(game, &self.target)
    }
}

/// Daemon that burns down a consumable light source.
///
/// Decrements the remaining fuel each turn while the source is lit,
/// warns when the warning threshold is crossed, and extinguishes the
/// source (removing itself) at zero.
pub fn consumable_light(game: &mut Game, target: &Ix) -> Result<()> {
    let thing = game.world.thing(target)?;
    if !thing.is_lit {
        return Ok(());
    }
    let Some(turns) = thing.light_turns else {
        return Ok(());
    };
    let remaining = turns - 1;
    let warning_turns = thing.warning_turns;
    let name = thing.verbose_name();

    game.world.thing_mut(target)?.light_turns = Some(remaining);
    if remaining <= 0 {
        let thing = game.world.thing_mut(target)?;
        thing.is_lit = false;
        thing.light_turns = Some(0);
        game.events.say(format!("The {name} goes out."));
        game.remove_daemon(&format!("light:{target}"));
    } else if remaining == warning_turns {
        game.events.say(format!("The {name} is getting dim."));
    }
    Ok(())
}

/// The daemon name used for a light source's burn-down.
#[must_use]
pub fn light_daemon_name(target: &Ix) -> String {
    format!("light:{target}")
}
