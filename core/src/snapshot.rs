use serde::Serialize;
use web_time::Instant;

use crate::*;

/// Read-only view of a card for renderers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CardSnapshot<'a, C> {
    pub id: CardId,
    pub content: &'a C,
    pub is_face_up: bool,
    pub is_matched: bool,
    pub bonus_remaining: f64,
    pub has_earned_bonus: bool,
    pub is_consuming_bonus_time: bool,
}

impl<'a, C> CardSnapshot<'a, C> {
    pub fn of(card: &'a Card<C>, now: Instant) -> Self {
        Self {
            id: card.id(),
            content: card.content(),
            is_face_up: card.is_face_up(),
            is_matched: card.is_matched(),
            bonus_remaining: card.bonus_remaining_at(now),
            has_earned_bonus: card.has_earned_bonus(),
            is_consuming_bonus_time: card.is_consuming_bonus_time_at(now),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameSnapshot<'a, C> {
    pub score: i64,
    pub is_finished: bool,
    pub cards: Vec<CardSnapshot<'a, C>>,
}

impl<C> MemoryGame<C> {
    /// Captures every derived card property against a single clock reading.
    pub fn snapshot_at(&self, now: Instant) -> GameSnapshot<'_, C> {
        GameSnapshot {
            score: self.score(),
            is_finished: self.is_finished(),
            cards: self
                .cards()
                .iter()
                .map(|card| CardSnapshot::of(card, now))
                .collect(),
        }
    }

    pub fn snapshot(&self) -> GameSnapshot<'_, C> {
        self.snapshot_at(Instant::now())
    }
}
