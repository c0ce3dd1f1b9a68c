use std::path::PathBuf;

use thiserror::Error;
use types::GameError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Trial count must be greater than 0")]
    InvalidTrialCount,

    #[error("A game needs at least 2 boxes, got {0}")]
    InvalidBoxCount(usize),

    #[error("The host must reveal at least 1 box, got {0}")]
    InvalidRevealCount(usize),

    #[error("{box_count} boxes are too few for the host to reveal {host_reveal_count}; need at least {}", .host_reveal_count + 2)]
    RevealCountTooLarge {
        box_count: usize,
        host_reveal_count: usize,
    },

    #[error("Thread count must be at least 1")]
    InvalidThreadCount,

    #[error("No strategies configured")]
    NoStrategies,

    #[error("Unable to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Trial {trial} for {strategy:?} failed: {source}")]
    Trial {
        strategy: String,
        trial: u64,
        #[source]
        source: GameError,
    },

    #[error("Unable to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
