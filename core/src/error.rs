use thiserror::Error;

use crate::CardId;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("A game needs at least one pair of cards")]
    NoPairs,
    #[error("Content for pair {pair_index} repeats an earlier pair")]
    DuplicateContent { pair_index: usize },
    #[error("{0} pairs do not fit in card ids")]
    TooManyPairs(usize),
    #[error("No card with id {0} in this game")]
    UnknownCard(CardId),
}

pub type Result<T> = core::result::Result<T, GameError>;
