use std::fmt::Display;

use serde::Serialize;

use crate::player::RoundOutcome;

/// Counters a player accumulates over many games.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PlayerState {
    pub name: String,
    pub played_games: u64,
    pub rewards_won: u64,
    pub switched_games: u64,
    pub switched_wins: u64,
}

impl PlayerState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, outcome: &RoundOutcome) {
        self.played_games += 1;
        if outcome.won {
            self.rewards_won += 1;
        }
        if outcome.repicked {
            self.switched_games += 1;
            if outcome.won {
                self.switched_wins += 1;
            }
        }
    }

    /// Adds the counters of a partial run, e.g. one chunk of a parallel run.
    pub fn merge(&mut self, other: &PlayerState) {
        self.played_games += other.played_games;
        self.rewards_won += other.rewards_won;
        self.switched_games += other.switched_games;
        self.switched_wins += other.switched_wins;
    }

    pub fn win_rate(&self) -> f64 {
        if self.played_games == 0 {
            return 0.0;
        }
        self.rewards_won as f64 / self.played_games as f64
    }
}

impl Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} / {} games won.",
            self.name, self.rewards_won, self.played_games
        )
    }
}
