use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use emoji::*;
pub use engine::*;
pub use error::*;
pub use snapshot::*;
pub use types::*;

mod card;
mod deck;
mod emoji;
mod engine;
mod error;
mod snapshot;
mod types;

/// Bonus window each card gets unless configured otherwise.
pub const DEFAULT_BONUS_TIME_LIMIT: Duration = Duration::from_secs(10);

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub number_of_pairs: usize,
    #[serde(default = "default_bonus_time_limit")]
    pub bonus_time_limit: Duration,
    /// Fixed shuffle seed, a fresh OS seed is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_bonus_time_limit() -> Duration {
    DEFAULT_BONUS_TIME_LIMIT
}

impl GameConfig {
    pub const fn new(number_of_pairs: usize) -> Self {
        Self {
            number_of_pairs,
            bonus_time_limit: DEFAULT_BONUS_TIME_LIMIT,
            seed: None,
        }
    }

    pub const fn with_bonus_time_limit(self, bonus_time_limit: Duration) -> Self {
        Self {
            bonus_time_limit,
            ..self
        }
    }

    pub const fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    pub const fn total_cards(&self) -> usize {
        self.number_of_pairs.saturating_mul(2)
    }
}

/// Outcome of choosing a card
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChooseOutcome {
    /// Card was already face-up or matched
    NoChange,
    /// Card became the only face-up card, earlier face-up cards were turned down
    Flipped,
    /// Card completed a pair
    Matched,
    /// Card was compared against the face-up card and did not match
    Mismatched,
}

impl ChooseOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use ChooseOutcome::*;
        match self {
            NoChange => false,
            Flipped => true,
            Matched => true,
            Mismatched => true,
        }
    }
}
