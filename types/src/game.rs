use std::fmt::Display;

use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};

use crate::{error::GameError, PrizeBox};

pub const DEFAULT_BOX_COUNT: usize = 3;
pub const DEFAULT_HOST_REVEAL_COUNT: usize = 1;

/// A single game that a player can play once. After a play-through some boxes
/// are open, so a finished game is dropped rather than reused.
#[derive(Clone, Debug)]
pub struct Game {
    boxes: Vec<PrizeBox>,
    picked_index: Option<usize>,
    reward_index: usize,
    host_reveal_count: usize,
}

/// What a strategy is allowed to see of a game. The reward position is hidden.
#[derive(Copy, Clone, Debug)]
pub struct GameView<'a> {
    game: &'a Game,
}

impl Game {
    pub fn new<R: Rng>(
        box_count: usize,
        host_reveal_count: usize,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if box_count < 2 {
            return Err(GameError::TooFewBoxes(box_count));
        }
        let reward_index = rng.gen_range(0..box_count);
        Self::with_reward(box_count, reward_index, host_reveal_count)
    }

    pub fn with_reward(
        box_count: usize,
        reward_index: usize,
        host_reveal_count: usize,
    ) -> Result<Self, GameError> {
        if box_count < 2 {
            return Err(GameError::TooFewBoxes(box_count));
        }
        if reward_index >= box_count {
            return Err(GameError::out_of_range(reward_index, box_count));
        }
        let boxes = (0..box_count)
            .map(|i| PrizeBox::new(i, i == reward_index))
            .collect();
        log::trace!("New game with {box_count} boxes, reward in box {reward_index}");
        Ok(Self {
            boxes,
            picked_index: None,
            reward_index,
            host_reveal_count,
        })
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    pub fn host_reveal_count(&self) -> usize {
        self.host_reveal_count
    }

    pub fn picked_index(&self) -> Option<usize> {
        self.picked_index
    }

    /// Where the reward is. Strategies only get a [`GameView`], which hides this.
    pub fn reward_index(&self) -> usize {
        self.reward_index
    }

    /// Pick the box the player wants to open. Can be called again to change the
    /// pick, but never onto a box the host has opened.
    pub fn pick_box<I>(&mut self, id: I) -> Result<(), GameError>
    where
        I: TryInto<usize> + Copy + Display,
    {
        let index = id
            .try_into()
            .ok()
            .filter(|&index| index < self.boxes.len())
            .ok_or_else(|| GameError::out_of_range(id, self.boxes.len()))?;
        if self.boxes[index].is_open {
            return Err(GameError::BoxAlreadyOpen(index));
        }
        self.picked_index = Some(index);
        Ok(())
    }

    /// Let the host open `host_reveal_count` empty boxes, returning their indices
    /// in the order they were opened.
    pub fn host_box_reveal<R: Rng>(&mut self, rng: &mut R) -> Result<Vec<usize>, GameError> {
        (0..self.host_reveal_count)
            .map(|_| self.host_reveal_one_box(rng))
            .collect()
    }

    fn host_reveal_one_box<R: Rng>(&mut self, rng: &mut R) -> Result<usize, GameError> {
        let picked_index = self.picked_index;
        let may_reveal: Vec<usize> = self
            .boxes
            .iter()
            .filter(|b| b.may_reveal(picked_index))
            .map(|b| b.index)
            .collect();

        let &reveal_index = may_reveal.choose(rng).ok_or(GameError::NoBoxToReveal)?;
        self.boxes[reveal_index].is_open = true;
        log::trace!("Host opened box {reveal_index}");
        Ok(reveal_index)
    }

    pub fn box_open_states(&self) -> Vec<bool> {
        self.boxes.iter().map(|b| b.is_open).collect()
    }

    pub fn closed_box_indices(&self) -> Vec<usize> {
        self.boxes
            .iter()
            .filter(|b| !b.is_open)
            .map(|b| b.index)
            .collect()
    }

    pub fn has_player_won(&self) -> Result<bool, GameError> {
        let picked_index = self.picked_index.ok_or(GameError::NoBoxPicked)?;
        Ok(picked_index == self.reward_index)
    }

    pub fn view(&self) -> GameView<'_> {
        GameView { game: self }
    }

    #[cfg(test)]
    pub(crate) fn boxes(&self) -> &[PrizeBox] {
        &self.boxes
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let picked = self
            .picked_index
            .map_or_else(|| "None".to_string(), |i| i.to_string());
        write!(
            f,
            "Boxes: {} Picked: {}",
            self.boxes.iter().join(" "),
            picked
        )
    }
}

impl GameView<'_> {
    pub fn box_count(&self) -> usize {
        self.game.box_count()
    }

    pub fn picked_index(&self) -> Option<usize> {
        self.game.picked_index
    }

    pub fn closed_box_indices(&self) -> Vec<usize> {
        self.game.closed_box_indices()
    }

    pub fn open_box_indices(&self) -> Vec<usize> {
        self.game
            .boxes
            .iter()
            .filter(|b| b.is_open)
            .map(|b| b.index)
            .collect()
    }

    pub fn revealed_count(&self) -> usize {
        self.game.boxes.iter().filter(|b| b.is_open).count()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn exactly_one_reward_box() {
        let mut rng = StdRng::seed_from_u64(7);
        for box_count in 2..12 {
            for _ in 0..50 {
                let game = Game::new(box_count, 1, &mut rng).unwrap();
                assert_eq!(game.box_count(), box_count);
                assert_eq!(game.boxes().iter().filter(|b| b.has_reward).count(), 1);
                assert!(game.boxes().iter().all(|b| !b.is_open));
            }
        }
    }

    #[test]
    fn rejects_too_few_boxes() {
        let mut rng = StdRng::seed_from_u64(1);
        for box_count in [0, 1] {
            let err = Game::new(box_count, 1, &mut rng).unwrap_err();
            assert_eq!(err, GameError::TooFewBoxes(box_count));
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
        assert!(Game::with_reward(3, 3, 1).is_err());
    }

    #[test]
    fn pick_box_out_of_range() {
        let mut game = Game::with_reward(3, 0, 1).unwrap();
        for id in [-1, 3] {
            let err = game.pick_box(id).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
        assert_eq!(game.picked_index(), None);

        game.pick_box(2).unwrap();
        assert_eq!(game.picked_index(), Some(2));
        game.pick_box(0usize).unwrap();
        assert_eq!(game.picked_index(), Some(0));
    }

    #[test]
    fn pick_box_rejects_open_box() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut game = Game::with_reward(3, 1, 1).unwrap();
        game.pick_box(0).unwrap();
        let revealed = game.host_box_reveal(&mut rng).unwrap();
        assert_eq!(revealed, vec![2]);

        let err = game.pick_box(revealed[0]).unwrap_err();
        assert_eq!(err, GameError::BoxAlreadyOpen(2));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(game.picked_index(), Some(0));
        assert_eq!(game.box_open_states(), vec![false, false, true]);
    }

    #[test]
    fn reward_index_matches_reward_box() {
        let mut rng = StdRng::seed_from_u64(22);
        for _ in 0..100 {
            let game = Game::new(7, 1, &mut rng).unwrap();
            let reward_box = game.boxes()[game.reward_index()];
            assert!(reward_box.has_reward);
        }
    }

    #[test]
    fn has_player_won_before_pick() {
        let game = Game::with_reward(3, 1, 1).unwrap();
        let err = game.has_player_won().unwrap_err();
        assert_eq!(err, GameError::NoBoxPicked);
        assert_eq!(err.kind(), ErrorKind::IllegalState);
    }

    #[test]
    fn reveal_never_opens_picked_or_reward_box() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let mut game = Game::new(6, 3, &mut rng).unwrap();
            let pick = rng.gen_range(0..6);
            game.pick_box(pick).unwrap();
            let closed_before = game.closed_box_indices().len();

            let revealed = game.host_box_reveal(&mut rng).unwrap();

            assert_eq!(revealed.len(), 3);
            assert!(!revealed.contains(&pick));
            for b in game.boxes() {
                if b.has_reward || b.index == pick {
                    assert!(!b.is_open);
                }
            }
            let closed = game.closed_box_indices();
            assert_eq!(closed.len(), closed_before - 3);
            assert!(revealed.iter().all(|i| !closed.contains(i)));
        }
    }

    #[test]
    fn reveal_fails_without_candidates() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = Game::with_reward(3, 1, 2).unwrap();
        game.pick_box(0).unwrap();
        let err = game.host_box_reveal(&mut rng).unwrap_err();
        assert_eq!(err, GameError::NoBoxToReveal);
        assert_eq!(err.kind(), ErrorKind::IllegalState);
        // the first reveal still happened
        assert_eq!(game.box_open_states(), vec![false, false, true]);
        assert_eq!(game.reward_index(), 1);

        let mut game = Game::with_reward(2, 1, 1).unwrap();
        game.pick_box(0).unwrap();
        assert_eq!(
            game.host_box_reveal(&mut rng).unwrap_err(),
            GameError::NoBoxToReveal
        );
    }

    #[test]
    fn closed_indices_are_ascending() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut game = Game::with_reward(5, 4, 2).unwrap();
        assert_eq!(game.closed_box_indices(), vec![0, 1, 2, 3, 4]);
        game.pick_box(1).unwrap();
        game.host_box_reveal(&mut rng).unwrap();
        let closed = game.closed_box_indices();
        assert_eq!(closed.len(), 3);
        assert!(closed.windows(2).all(|w| w[0] < w[1]));
        assert!(closed.contains(&1) && closed.contains(&4));
        assert_eq!(game.view().revealed_count(), 2);
        assert_eq!(game.view().open_box_indices().len(), 2);
    }

    #[test]
    fn reward_box_one_scenario() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut game = Game::with_reward(3, 1, 1).unwrap();
        game.pick_box(0).unwrap();
        assert_eq!(game.host_box_reveal(&mut rng).unwrap(), vec![2]);
        assert_eq!(game.closed_box_indices(), vec![0, 1]);
        assert!(!game.has_player_won().unwrap());
        game.pick_box(1).unwrap();
        assert!(game.has_player_won().unwrap());
    }
}
