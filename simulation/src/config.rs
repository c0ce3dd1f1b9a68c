use std::path::{Path, PathBuf};

use rand::Rng;
use serde::{Deserialize, Serialize};
use strategies::StrategyKind;
use types::{Game, GameError, DEFAULT_BOX_COUNT, DEFAULT_HOST_REVEAL_COUNT};

use crate::error::ConfigError;

pub const CONFIG_ENV_VAR: &str = "MONTY_HALL_CONFIG";
pub const DEFAULT_TRIAL_COUNT: u64 = 100_000;

/// What to do when a single trial fails.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrialFailurePolicy {
    #[default]
    Abort,
    Skip,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub trial_count: u64,
    pub box_count: usize,
    pub host_reveal_count: usize,
    pub seed: Option<u64>,
    pub threads: usize,
    pub strategies: Vec<StrategyKind>,
    pub on_trial_failure: TrialFailurePolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trial_count: DEFAULT_TRIAL_COUNT,
            box_count: DEFAULT_BOX_COUNT,
            host_reveal_count: DEFAULT_HOST_REVEAL_COUNT,
            seed: None,
            threads: 1,
            strategies: vec![StrategyKind::AlwaysRepick, StrategyKind::NeverRepick],
            on_trial_failure: TrialFailurePolicy::Abort,
        }
    }
}

/// Values given on the command line. Anything set here wins over the config file.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub trial_count: Option<u64>,
    pub box_count: Option<usize>,
    pub host_reveal_count: Option<usize>,
    pub seed: Option<u64>,
    pub threads: Option<usize>,
    pub strategies: Vec<StrategyKind>,
    pub skip_failed_trials: bool,
}

/// The parameters needed to set up one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub box_count: usize,
    pub host_reveal_count: usize,
}

impl GameConfig {
    pub fn new_game<R: Rng>(&self, rng: &mut R) -> Result<Game, GameError> {
        Game::new(self.box_count, self.host_reveal_count, rng)
    }
}

impl SimulationConfig {
    /// Loads the YAML file named on the command line, or in `MONTY_HALL_CONFIG`,
    /// falling back to defaults, then applies the command line overrides.
    pub fn from_cli_or_env_or_yaml(
        cli_path: Option<PathBuf>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let path = if let Some(path) = cli_path {
            Some(path)
        } else {
            std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from)
        };

        let base = match path {
            Some(path) => {
                log::info!("Loading config from {path:?}");
                Self::from_yaml_file(&path)?
            }
            None => Self::default(),
        };

        let config = base.with_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(trial_count) = overrides.trial_count {
            self.trial_count = trial_count;
        }
        if let Some(box_count) = overrides.box_count {
            self.box_count = box_count;
        }
        if let Some(host_reveal_count) = overrides.host_reveal_count {
            self.host_reveal_count = host_reveal_count;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if let Some(threads) = overrides.threads {
            self.threads = threads;
        }
        if !overrides.strategies.is_empty() {
            self.strategies = overrides.strategies;
        }
        if overrides.skip_failed_trials {
            self.on_trial_failure = TrialFailurePolicy::Skip;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trial_count == 0 {
            return Err(ConfigError::InvalidTrialCount);
        }
        if self.box_count < 2 {
            return Err(ConfigError::InvalidBoxCount(self.box_count));
        }
        if self.host_reveal_count < 1 {
            return Err(ConfigError::InvalidRevealCount(self.host_reveal_count));
        }
        // the host needs an empty box besides the pick for every reveal
        if self.box_count < self.host_reveal_count + 2 {
            return Err(ConfigError::RevealCountTooLarge {
                box_count: self.box_count,
                host_reveal_count: self.host_reveal_count,
            });
        }
        if self.threads == 0 {
            return Err(ConfigError::InvalidThreadCount);
        }
        if self.strategies.is_empty() {
            return Err(ConfigError::NoStrategies);
        }
        Ok(())
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            box_count: self.box_count,
            host_reveal_count: self.host_reveal_count,
        }
    }
}
