use std::fmt::Display;

use itertools::Itertools;
use serde::Serialize;
use types::PlayerState;

use crate::config::SimulationConfig;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StrategyReport {
    pub strategy: String,
    pub label: String,
    pub played_games: u64,
    pub rewards_won: u64,
    pub win_rate: f64,
    pub switched_games: u64,
    pub switched_wins: u64,
    pub skipped_trials: u64,
}

impl StrategyReport {
    pub fn new(strategy: String, state: &PlayerState, skipped_trials: u64) -> Self {
        Self {
            strategy,
            label: state.name.clone(),
            played_games: state.played_games,
            rewards_won: state.rewards_won,
            win_rate: state.win_rate(),
            switched_games: state.switched_games,
            switched_wins: state.switched_wins,
            skipped_trials,
        }
    }
}

impl Display for StrategyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} / {} games won.",
            self.label, self.rewards_won, self.played_games
        )?;
        if self.skipped_trials > 0 {
            write!(f, " ({} trials skipped)", self.skipped_trials)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationReport {
    pub config: SimulationConfig,
    pub strategies: Vec<StrategyReport>,
}

impl SimulationReport {
    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }
}

impl Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.strategies.iter().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SimulationReport {
        let mut switch = PlayerState::new("Player that opts to pick again");
        switch.played_games = 3;
        switch.rewards_won = 2;
        let mut stay = PlayerState::new("Player that sticks to its initial choice");
        stay.played_games = 3;
        stay.rewards_won = 1;
        SimulationReport {
            config: SimulationConfig::default(),
            strategies: vec![
                StrategyReport::new("always".to_string(), &switch, 0),
                StrategyReport::new("never".to_string(), &stay, 2),
            ],
        }
    }

    #[test]
    fn text_report_lines() {
        let text = report().render(OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "Player that opts to pick again: 2 / 3 games won.\n\
             Player that sticks to its initial choice: 1 / 3 games won. (2 trials skipped)"
        );
    }

    #[test]
    fn json_report_fields() {
        let json = report().render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["config"]["trial_count"], 100_000);
        assert_eq!(value["config"]["strategies"][0], "always");
        assert_eq!(value["config"]["on_trial_failure"], "abort");
        assert_eq!(value["strategies"][0]["rewards_won"], 2);
        assert_eq!(value["strategies"][1]["strategy"], "never");
        assert_eq!(value["strategies"][1]["skipped_trials"], 2);
    }
}
