pub mod config;
pub mod error;
pub mod report;

use std::ops::Range;

use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use strategies::StrategyKind;
use types::{Player, PlayerState, Strategy};

pub use config::{ConfigOverrides, GameConfig, SimulationConfig, TrialFailurePolicy};
pub use error::{ConfigError, SimulationError};
pub use report::{OutputFormat, SimulationReport, StrategyReport};

/// Plays one fresh game per trial in `trials`. Returns how many trials were
/// skipped under [`TrialFailurePolicy::Skip`].
pub fn run_trials<S: Strategy, R: Rng>(
    player: &mut Player<S>,
    game_config: GameConfig,
    trials: Range<u64>,
    rng: &mut R,
    policy: TrialFailurePolicy,
) -> Result<u64, SimulationError> {
    let mut skipped = 0;
    for trial in trials {
        let result = game_config
            .new_game(rng)
            .and_then(|mut game| player.play_game(&mut game, rng));
        match (result, policy) {
            (Ok(_), _) => {}
            (Err(err), TrialFailurePolicy::Skip) => {
                log::warn!("Skipping trial {trial} for {}: {err}", player.state.name);
                skipped += 1;
            }
            (Err(source), TrialFailurePolicy::Abort) => {
                return Err(SimulationError::Trial {
                    strategy: player.state.name.clone(),
                    trial,
                    source,
                });
            }
        }
    }
    Ok(skipped)
}

/// Runs every configured strategy and collects the results.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationReport, SimulationError> {
    config.validate()?;
    log::info!(
        "Running {} trials per strategy with {} boxes, {} revealed, on {} thread(s)",
        config.trial_count,
        config.box_count,
        config.host_reveal_count,
        config.threads
    );

    let pool = if config.threads > 1 {
        Some(
            rayon::ThreadPoolBuilder::new()
                .num_threads(config.threads)
                .build()?,
        )
    } else {
        None
    };

    let mut strategies = Vec::with_capacity(config.strategies.len());
    for (index, &kind) in config.strategies.iter().enumerate() {
        let mut rng = strategy_rng(config.seed, index);
        let (state, skipped) = match &pool {
            Some(pool) => pool.install(|| run_strategy_parallel(kind, config, &mut rng))?,
            None => run_strategy(kind, config, &mut rng)?,
        };
        log::info!("{state} ({:.2}%)", state.win_rate() * 100.0);
        strategies.push(StrategyReport::new(kind.to_string(), &state, skipped));
    }

    Ok(SimulationReport {
        config: config.clone(),
        strategies,
    })
}

fn strategy_rng(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
        None => StdRng::from_entropy(),
    }
}

fn run_strategy(
    kind: StrategyKind,
    config: &SimulationConfig,
    rng: &mut StdRng,
) -> Result<(PlayerState, u64), SimulationError> {
    let mut player = Player::new(kind.label(), kind);
    let skipped = run_trials(
        &mut player,
        config.game_config(),
        0..config.trial_count,
        rng,
        config.on_trial_failure,
    )?;
    Ok((player.state, skipped))
}

/// Splits the trials into one chunk per thread. Each chunk gets its own
/// player and RNG, and the counters are merged afterwards.
fn run_strategy_parallel(
    kind: StrategyKind,
    config: &SimulationConfig,
    rng: &mut StdRng,
) -> Result<(PlayerState, u64), SimulationError> {
    let chunks = chunk_ranges(config.trial_count, config.threads);
    // drawn up front so the result does not depend on scheduling
    let seeds: Vec<u64> = chunks.iter().map(|_| rng.gen()).collect();
    let game_config = config.game_config();

    let partials = chunks
        .into_par_iter()
        .zip(seeds)
        .map(|(trials, seed)| -> Result<(PlayerState, u64), SimulationError> {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut player = Player::new(kind.label(), kind);
            let skipped = run_trials(
                &mut player,
                game_config,
                trials,
                &mut rng,
                config.on_trial_failure,
            )?;
            Ok((player.state, skipped))
        })
        .collect::<Result<Vec<_>, SimulationError>>()?;

    let mut state = PlayerState::new(kind.label());
    let mut skipped = 0;
    for (partial, partial_skipped) in &partials {
        state.merge(partial);
        skipped += partial_skipped;
    }
    Ok((state, skipped))
}

fn chunk_ranges(trial_count: u64, chunks: usize) -> Vec<Range<u64>> {
    let chunk_size = trial_count.div_ceil(chunks.max(1) as u64).max(1);
    (0..trial_count)
        .step_by(chunk_size as usize)
        .map(|start| start..(start + chunk_size).min(trial_count))
        .collect()
}
