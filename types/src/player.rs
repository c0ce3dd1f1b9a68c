use std::fmt::Debug;

use rand::{seq::SliceRandom, Rng};

use crate::{error::GameError, Game, GameView, PlayerState};

/// Decides whether to repick after the host has revealed boxes.
pub trait Strategy {
    fn should_repick<R: Rng>(&mut self, view: &GameView<'_>, rng: &mut R) -> bool;
}

/// Wraps a plain predicate so it can be used as a [`Strategy`].
pub struct FnStrategy<F>(pub F);

impl<F> Strategy for FnStrategy<F>
where
    F: FnMut(&GameView<'_>) -> bool,
{
    fn should_repick<R: Rng>(&mut self, view: &GameView<'_>, _rng: &mut R) -> bool {
        (self.0)(view)
    }
}

impl<F> Debug for FnStrategy<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnStrategy")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundOutcome {
    pub initial_pick: usize,
    pub final_pick: usize,
    pub revealed: Vec<usize>,
    pub repicked: bool,
    pub won: bool,
}

/// Plays one round of `game`: pick, host reveal, optional repick, win check.
pub fn play_round<S, R>(
    game: &mut Game,
    strategy: &mut S,
    rng: &mut R,
) -> Result<RoundOutcome, GameError>
where
    S: Strategy,
    R: Rng,
{
    let initial_pick = pick_random_available_box(game, None, rng)?;
    let revealed = game.host_box_reveal(rng)?;

    let repicked = strategy.should_repick(&game.view(), rng);
    let final_pick = if repicked {
        pick_random_available_box(game, Some(initial_pick), rng)?
    } else {
        initial_pick
    };

    let won = game.has_player_won()?;
    log::debug!("{game} -> {}", if won { "won" } else { "lost" });
    Ok(RoundOutcome {
        initial_pick,
        final_pick,
        revealed,
        repicked,
        won,
    })
}

fn pick_random_available_box<R: Rng>(
    game: &mut Game,
    exclude: Option<usize>,
    rng: &mut R,
) -> Result<usize, GameError> {
    let mut boxes = game.closed_box_indices();
    if let Some(exclude) = exclude {
        boxes.retain(|&i| i != exclude);
    }
    let &pick = boxes.choose(rng).ok_or(GameError::NoBoxToPick)?;
    game.pick_box(pick)?;
    Ok(pick)
}

#[derive(Debug)]
pub struct Player<S> {
    pub state: PlayerState,
    pub strategy: S,
}

impl<S: Strategy> Player<S> {
    pub fn new(name: impl Into<String>, strategy: S) -> Self {
        Self {
            state: PlayerState::new(name),
            strategy,
        }
    }

    /// Plays `game` and records the result. Counters are untouched on error.
    pub fn play_game<R: Rng>(
        &mut self,
        game: &mut Game,
        rng: &mut R,
    ) -> Result<RoundOutcome, GameError> {
        let outcome = play_round(game, &mut self.strategy, rng)?;
        self.state.record(&outcome);
        Ok(outcome)
    }
}

impl<F> Player<FnStrategy<F>>
where
    F: FnMut(&GameView<'_>) -> bool,
{
    pub fn from_fn(name: impl Into<String>, predicate: F) -> Self {
        Self::new(name, FnStrategy(predicate))
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn repick_moves_to_other_closed_box() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut player = Player::from_fn("switch", |_: &GameView<'_>| true);
        for _ in 0..200 {
            let mut game = Game::new(3, 1, &mut rng).unwrap();
            let outcome = player.play_game(&mut game, &mut rng).unwrap();
            assert!(outcome.repicked);
            assert_ne!(outcome.initial_pick, outcome.final_pick);
            assert!(!outcome.revealed.contains(&outcome.final_pick));
            // with three boxes switching wins exactly when the first pick lost
            let mut replay = game.clone();
            replay.pick_box(outcome.initial_pick).unwrap();
            assert_eq!(outcome.won, !replay.has_player_won().unwrap());
        }
        assert_eq!(player.state.played_games, 200);
        assert_eq!(player.state.switched_games, 200);
    }

    #[test]
    fn stay_keeps_first_pick() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut player = Player::from_fn("stay", |_: &GameView<'_>| false);
        for _ in 0..200 {
            let mut game = Game::new(4, 2, &mut rng).unwrap();
            let outcome = player.play_game(&mut game, &mut rng).unwrap();
            assert!(!outcome.repicked);
            assert_eq!(outcome.initial_pick, outcome.final_pick);
            assert_eq!(game.picked_index(), Some(outcome.initial_pick));
        }
        assert_eq!(player.state.switched_games, 0);
    }

    #[test]
    fn conditional_predicate_sees_reveals() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut seen = Vec::new();
        let mut strategy = FnStrategy(|view: &GameView<'_>| {
            seen.push((view.revealed_count(), view.closed_box_indices().len()));
            view.picked_index().is_some()
        });
        let mut game = Game::new(5, 2, &mut rng).unwrap();
        let outcome = play_round(&mut game, &mut strategy, &mut rng).unwrap();
        assert!(outcome.repicked);
        assert_eq!(seen, vec![(2, 3)]);
    }

    #[test]
    fn failed_round_leaves_counters_alone() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut player = Player::from_fn("switch", |_: &GameView<'_>| true);
        let mut game = Game::new(3, 2, &mut rng).unwrap();
        // either the host runs out of empty boxes or the player has nothing to switch to
        let err = player.play_game(&mut game, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            GameError::NoBoxToReveal | GameError::NoBoxToPick
        ));
        assert_eq!(err.kind(), ErrorKind::IllegalState);
        assert_eq!(player.state.played_games, 0);
    }

    #[test]
    fn no_box_left_to_repick() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut game = Game::with_reward(3, 2, 2).unwrap();
        // nothing picked yet, so the host opens both empty boxes
        game.host_box_reveal(&mut rng).unwrap();
        assert_eq!(game.closed_box_indices(), vec![2]);

        let err = pick_random_available_box(&mut game, Some(2), &mut rng).unwrap_err();
        assert_eq!(err, GameError::NoBoxToPick);
        assert_eq!(err.kind(), ErrorKind::IllegalState);
        assert_eq!(pick_random_available_box(&mut game, None, &mut rng), Ok(2));
    }
}
