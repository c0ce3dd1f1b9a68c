use std::path::PathBuf;

use clap::Parser;

use simulation::{
    run_simulation, ConfigOverrides, OutputFormat, SimulationConfig, SimulationError,
};
use strategies::StrategyKind;

#[derive(Parser, Debug)]
struct Params {
    /// YAML config file, defaults to $MONTY_HALL_CONFIG
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    trials: Option<u64>,

    #[arg(short, long)]
    boxes: Option<usize>,

    /// Boxes the host opens per game
    #[arg(short, long)]
    reveals: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    threads: Option<usize>,

    /// always, never, random:<p> or revealed:<n>; repeat for several
    #[arg(short, long = "strategy")]
    strategies: Vec<StrategyKind>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log and skip failing trials instead of aborting the run
    #[arg(long)]
    skip_failed_trials: bool,
}

fn main() -> Result<(), SimulationError> {
    env_logger::init();
    let args = Params::parse();
    log::info!("args: {args:?}");

    let overrides = ConfigOverrides {
        trial_count: args.trials,
        box_count: args.boxes,
        host_reveal_count: args.reveals,
        seed: args.seed,
        threads: args.threads,
        strategies: args.strategies,
        skip_failed_trials: args.skip_failed_trials,
    };

    let result = SimulationConfig::from_cli_or_env_or_yaml(args.config, overrides)
        .map_err(SimulationError::from)
        .and_then(|config| run_simulation(&config))
        .and_then(|report| Ok(report.render(args.format)?));

    match result {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(err) => {
            log::error!("Simulation failed: {err}");
            Err(err)
        }
    }
}
