pub mod input_strategy;

use std::{fmt::Display, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use types::{GameView, Strategy};

pub use crate::input_strategy::InputStrategy;

#[derive(Copy, Clone, Debug, Default)]
pub struct AlwaysRepick;

impl Strategy for AlwaysRepick {
    fn should_repick<R: Rng>(&mut self, _view: &GameView<'_>, _rng: &mut R) -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct NeverRepick;

impl Strategy for NeverRepick {
    fn should_repick<R: Rng>(&mut self, _view: &GameView<'_>, _rng: &mut R) -> bool {
        false
    }
}

/// Always repicks or never repicks, depending on the flag.
#[derive(Copy, Clone, Debug)]
pub struct ConsistentStrategy(pub bool);

impl Strategy for ConsistentStrategy {
    fn should_repick<R: Rng>(&mut self, _view: &GameView<'_>, _rng: &mut R) -> bool {
        self.0
    }
}

/// Repicks with a fixed probability.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomRepick {
    probability: f64,
}

impl RandomRepick {
    pub fn new(probability: f64) -> Result<Self, StrategyParseError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(StrategyParseError::InvalidProbability(probability));
        }
        Ok(Self { probability })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl Strategy for RandomRepick {
    fn should_repick<R: Rng>(&mut self, _view: &GameView<'_>, rng: &mut R) -> bool {
        rng.gen_bool(self.probability)
    }
}

/// Repicks only when the host has opened at least `min_revealed` boxes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RepickWhenRevealed {
    pub min_revealed: usize,
}

impl Strategy for RepickWhenRevealed {
    fn should_repick<R: Rng>(&mut self, view: &GameView<'_>, _rng: &mut R) -> bool {
        view.revealed_count() >= self.min_revealed
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrategyParseError {
    #[error("Unknown strategy {0:?}, expected one of: always, never, random:<p>, revealed:<n>")]
    Unknown(String),

    #[error("Repick probability must be within 0..=1, got {0}")]
    InvalidProbability(f64),

    #[error("Unable to parse a number from {0:?}")]
    InvalidNumber(String),
}

/// The non-interactive strategies, selectable from the command line or a config file.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StrategyKind {
    AlwaysRepick,
    NeverRepick,
    Random(RandomRepick),
    WhenRevealed(RepickWhenRevealed),
}

impl StrategyKind {
    pub fn label(&self) -> String {
        match self {
            StrategyKind::AlwaysRepick => "Player that opts to pick again".to_string(),
            StrategyKind::NeverRepick => "Player that sticks to its initial choice".to_string(),
            StrategyKind::Random(r) => format!(
                "Player that picks again with probability {}",
                r.probability()
            ),
            StrategyKind::WhenRevealed(r) => format!(
                "Player that picks again after {} or more reveals",
                r.min_revealed
            ),
        }
    }
}

impl Strategy for StrategyKind {
    fn should_repick<R: Rng>(&mut self, view: &GameView<'_>, rng: &mut R) -> bool {
        match self {
            StrategyKind::AlwaysRepick => AlwaysRepick.should_repick(view, rng),
            StrategyKind::NeverRepick => NeverRepick.should_repick(view, rng),
            StrategyKind::Random(s) => s.should_repick(view, rng),
            StrategyKind::WhenRevealed(s) => s.should_repick(view, rng),
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::AlwaysRepick => write!(f, "always"),
            StrategyKind::NeverRepick => write!(f, "never"),
            StrategyKind::Random(r) => write!(f, "random:{}", r.probability()),
            StrategyKind::WhenRevealed(r) => write!(f, "revealed:{}", r.min_revealed),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = StrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s.as_str(), None),
        };
        match (name, arg) {
            ("always" | "switch", None) => Ok(StrategyKind::AlwaysRepick),
            ("never" | "stay", None) => Ok(StrategyKind::NeverRepick),
            ("random", Some(arg)) => {
                let probability = arg
                    .parse()
                    .map_err(|_| StrategyParseError::InvalidNumber(arg.to_string()))?;
                Ok(StrategyKind::Random(RandomRepick::new(probability)?))
            }
            ("revealed", Some(arg)) => {
                let min_revealed = arg
                    .parse()
                    .map_err(|_| StrategyParseError::InvalidNumber(arg.to_string()))?;
                Ok(StrategyKind::WhenRevealed(RepickWhenRevealed { min_revealed }))
            }
            _ => Err(StrategyParseError::Unknown(s.clone())),
        }
    }
}

impl TryFrom<String> for StrategyKind {
    type Error = StrategyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StrategyKind> for String {
    fn from(value: StrategyKind) -> Self {
        value.to_string()
    }
}
