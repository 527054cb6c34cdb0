use core::hash::Hash;
use smallvec::SmallVec;
use web_time::Instant;

use crate::*;

/// Points awarded for completing a pair.
pub const MATCH_BONUS: i64 = 2;

/// Points lost for every already-seen card in a mismatch.
pub const MISMATCH_PENALTY: i64 = 1;

/// A game of memory from deal to the last pair.
///
/// Valid card transitions:
/// - face-down -> face-up (chosen)
/// - face-up -> face-down (another card is chosen after a mismatch)
/// - face-up -> matched (pair resolved), matched is terminal
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryGame<C> {
    cards: Vec<Card<C>>,
    score: i64,
}

impl<C: Clone + Eq + Hash> MemoryGame<C> {
    /// Deals a shuffled game of `number_of_pairs` pairs with the default configuration.
    ///
    /// # Panics
    ///
    /// When `number_of_pairs` is zero or `content_factory` repeats content.
    pub fn new(number_of_pairs: usize, content_factory: impl FnMut(usize) -> C) -> Self {
        Self::with_config(&GameConfig::new(number_of_pairs), content_factory)
    }

    /// # Panics
    ///
    /// Same as [`MemoryGame::new`].
    pub fn with_config(config: &GameConfig, content_factory: impl FnMut(usize) -> C) -> Self {
        match Self::try_with_config(config, content_factory) {
            Ok(game) => game,
            Err(err) => panic!("invalid game setup: {err}"),
        }
    }

    pub fn try_with_config(
        config: &GameConfig,
        content_factory: impl FnMut(usize) -> C,
    ) -> Result<Self> {
        let cards = deck::deal(config, content_factory)?;
        Ok(Self { cards, score: 0 })
    }
}

impl<C> MemoryGame<C> {
    pub fn cards(&self) -> &[Card<C>] {
        &self.cards
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn card(&self, id: CardId) -> Option<&Card<C>> {
        self.index_of(id).map(|index| &self.cards[index])
    }

    pub fn index_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id() == id)
    }

    /// The face-up unmatched card waiting for a partner, if it is the only one.
    pub fn index_of_the_one_and_only_face_up_card(&self) -> Option<usize> {
        self.showing_indices().only()
    }

    pub fn matched_pairs(&self) -> usize {
        self.cards.iter().filter(|card| card.is_matched()).count() / 2
    }

    pub fn earned_bonus_count(&self) -> usize {
        self.cards
            .iter()
            .filter(|card| card.has_earned_bonus())
            .count()
    }

    /// All pairs have been found
    pub fn is_finished(&self) -> bool {
        self.cards.iter().all(|card| card.is_matched())
    }

    fn showing_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.is_face_up() && !card.is_matched())
            .map(|(index, _)| index)
    }
}

impl<C: PartialEq> MemoryGame<C> {
    pub fn choose(&mut self, id: CardId) -> Result<ChooseOutcome> {
        self.choose_at(id, Instant::now())
    }

    /// Choose a card with `now` as the clock reading for bonus-time bookkeeping.
    pub fn choose_at(&mut self, id: CardId, now: Instant) -> Result<ChooseOutcome> {
        let chosen = self.index_of(id).ok_or(GameError::UnknownCard(id))?;

        let card = &self.cards[chosen];
        if card.is_face_up() || card.is_matched() {
            log::trace!("Ignoring choice of {}, already face-up or matched", id);
            return Ok(ChooseOutcome::NoChange);
        }

        Ok(match self.index_of_the_one_and_only_face_up_card() {
            Some(candidate) => self.resolve_pair(candidate, chosen, now),
            None => {
                self.show_only(chosen, now);
                ChooseOutcome::Flipped
            }
        })
    }

    fn resolve_pair(&mut self, candidate: usize, chosen: usize, now: Instant) -> ChooseOutcome {
        let outcome = if self.cards[candidate].content() == self.cards[chosen].content() {
            self.cards[candidate].mark_matched(now);
            self.cards[chosen].mark_matched(now);
            self.score += MATCH_BONUS;
            log::debug!(
                "Matched {} with {}, score: {}",
                self.cards[candidate].id(),
                self.cards[chosen].id(),
                self.score
            );
            ChooseOutcome::Matched
        } else {
            // only repeat offenders cost points
            for index in [candidate, chosen] {
                if self.cards[index].has_been_seen() {
                    self.score -= MISMATCH_PENALTY;
                }
                self.cards[index].mark_seen();
            }
            self.cards[candidate].stop_using_bonus_time(now);
            log::debug!(
                "Mismatch between {} and {}, score: {}",
                self.cards[candidate].id(),
                self.cards[chosen].id(),
                self.score
            );
            ChooseOutcome::Mismatched
        };
        self.cards[chosen].turn_face_up();
        outcome
    }

    /// Turns every showing card down and `chosen` up, making it the new candidate.
    fn show_only(&mut self, chosen: usize, now: Instant) {
        let showing: SmallVec<[usize; 2]> = self.showing_indices().collect();
        for index in showing {
            self.cards[index].turn_face_down(now);
        }

        let card = &mut self.cards[chosen];
        card.turn_face_up();
        card.start_using_bonus_time(now);
        log::debug!("Flipped {} face-up", card.id());
    }
}
