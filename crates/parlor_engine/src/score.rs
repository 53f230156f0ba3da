//! Achievements and score.

use serde::{Deserialize, Serialize};

/// One named achievement worth a fixed number of points.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Display name.
    pub name: String,
    /// Points awarded when earned.
    pub points: i64,
    /// Whether the player has earned it.
    pub earned: bool,
}

/// The game's score state: every achievement, earned or not.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    achievements: Vec<Achievement>,
}

impl ScoreBoard {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an achievement. Duplicate names are ignored.
    pub fn declare(&mut self, name: impl Into<String>, points: i64) {
        let name = name.into();
        if self.achievements.iter().any(|a| a.name == name) {
            return;
        }
        self.achievements.push(Achievement {
            name,
            points,
            earned: false,
        });
    }

    /// Awards a declared achievement. Returns the points gained, or
    /// `None` when unknown or already earned.
    pub fn award(&mut self, name: &str) -> Option<i64> {
        let achievement = self
            .achievements
            .iter_mut()
            .find(|a| a.name == name && !a.earned)?;
        achievement.earned = true;
        Some(achievement.points)
    }

    /// Points earned so far.
    #[must_use]
    pub fn earned(&self) -> i64 {
        self.achievements
            .iter()
            .filter(|a| a.earned)
            .map(|a| a.points)
            .sum()
    }

    /// Total points available.
    #[must_use]
    pub fn possible(&self) -> i64 {
        self.achievements.iter().map(|a| a.points).sum()
    }

    /// The one-line `score` report.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "You have earned {} of {} points.",
            self.earned(),
            self.possible()
        )
    }

    /// The `fullscore` report: one line per earned achievement, then
    /// the summary.
    #[must_use]
    pub fn full_report(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .achievements
            .iter()
            .filter(|a| a.earned)
            .map(|a| format!("{} point{}: {}", a.points, plural(a.points), a.name))
            .collect();
        if lines.is_empty() {
            lines.push("You haven't earned any points yet.".to_string());
        }
        lines.push(self.summary());
        lines
    }

    /// All declared achievements.
    #[must_use]
    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}
