pub mod error;
pub mod game;
pub mod player;
pub mod player_state;
pub mod prize_box;

pub use error::{ErrorKind, GameError};
pub use game::{Game, GameView, DEFAULT_BOX_COUNT, DEFAULT_HOST_REVEAL_COUNT};
pub use player::{play_round, FnStrategy, Player, RoundOutcome, Strategy};
pub use player_state::PlayerState;
pub use prize_box::PrizeBox;
