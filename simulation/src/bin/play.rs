use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

use simulation::{ConfigOverrides, SimulationConfig, SimulationError};
use strategies::InputStrategy;
use types::Player;

#[derive(Parser, Debug)]
struct Params {
    #[arg(short, long)]
    boxes: Option<usize>,

    #[arg(short, long)]
    reveals: Option<usize>,

    #[arg(long, default_value_t = 3)]
    rounds: u64,

    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), SimulationError> {
    env_logger::init();
    let args = Params::parse();
    log::info!("args: {args:?}");

    let config = SimulationConfig::default().with_overrides(ConfigOverrides {
        trial_count: Some(args.rounds),
        box_count: args.boxes,
        host_reveal_count: args.reveals,
        seed: args.seed,
        ..Default::default()
    });
    if let Err(err) = config.validate() {
        log::error!("Invalid settings: {err}");
        return Err(err.into());
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let game_config = config.game_config();
    let strategy: InputStrategy = InputStrategy::default();
    let mut player = Player::new("You", strategy);

    for round in 1..=config.trial_count {
        println!("\nRound {round} of {}", config.trial_count);
        let played = game_config.new_game(&mut rng).and_then(|mut game| {
            let outcome = player.play_game(&mut game, &mut rng)?;
            Ok((game, outcome))
        });
        let (game, outcome) = played.map_err(|source| SimulationError::Trial {
            strategy: player.state.name.clone(),
            trial: round,
            source,
        })?;
        if outcome.repicked {
            println!(
                "Switched from box {} to box {}.",
                outcome.initial_pick, outcome.final_pick
            );
        }
        let verdict = if outcome.won { "You won!" } else { "No luck." };
        println!("{verdict} The reward was in box {}.", game.reward_index());
        println!("{}", player.state);
    }
    Ok(())
}
