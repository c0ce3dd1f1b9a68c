use std::fmt::Display;

use thiserror::Error;

/// Broad category of a [`GameError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    IllegalState,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Box index {index} is outside 0..{box_count}")]
    BoxIndexOutOfRange { index: String, box_count: usize },

    #[error("A game needs at least 2 boxes, got {0}")]
    TooFewBoxes(usize),

    #[error("Box {0} has already been opened")]
    BoxAlreadyOpen(usize),

    #[error("The player has not picked a box yet")]
    NoBoxPicked,

    #[error("There are no more boxes that the host can reveal")]
    NoBoxToReveal,

    #[error("The player tried to pick a box, but there are no boxes left to pick from")]
    NoBoxToPick,
}

impl GameError {
    pub fn out_of_range(index: impl Display, box_count: usize) -> Self {
        GameError::BoxIndexOutOfRange {
            index: index.to_string(),
            box_count,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::BoxIndexOutOfRange { .. }
            | GameError::TooFewBoxes(_)
            | GameError::BoxAlreadyOpen(_) => ErrorKind::InvalidArgument,
            GameError::NoBoxPicked | GameError::NoBoxToReveal | GameError::NoBoxToPick => {
                ErrorKind::IllegalState
            }
        }
    }
}
