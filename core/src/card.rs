use core::fmt;
use core::time::Duration;
use serde::{Deserialize, Serialize};
use web_time::Instant;

/// Stable identity of a card, independent of its content.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single card on the table.
///
/// Bonus time is only spent while the card is the lone face-up candidate. Elapsed time is
/// kept as an accumulated duration plus the instant the current stretch started, so every
/// read is computed against a clock reading instead of a running timer.
#[derive(Clone, Debug, PartialEq)]
pub struct Card<C> {
    id: CardId,
    content: C,
    is_face_up: bool,
    is_matched: bool,
    has_been_seen: bool,
    bonus_time_limit: Duration,
    last_face_up: Option<Instant>,
    past_face_up_time: Duration,
    has_earned_bonus: bool,
}

impl<C> Card<C> {
    pub(crate) fn new(id: CardId, content: C, bonus_time_limit: Duration) -> Self {
        Self {
            id,
            content,
            is_face_up: false,
            is_matched: false,
            has_been_seen: false,
            bonus_time_limit,
            last_face_up: None,
            past_face_up_time: Duration::ZERO,
            has_earned_bonus: false,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn is_face_up(&self) -> bool {
        self.is_face_up
    }

    pub fn is_matched(&self) -> bool {
        self.is_matched
    }

    /// Whether the card was part of a mismatch before.
    ///
    /// This is not set merely by turning face-up: a lone face-up card or a card matched on
    /// its first showing is still unseen. Only seen cards are penalized on a mismatch.
    pub fn has_been_seen(&self) -> bool {
        self.has_been_seen
    }

    pub fn bonus_time_limit(&self) -> Duration {
        self.bonus_time_limit
    }

    /// Set once, when the card is matched with bonus time left.
    pub fn has_earned_bonus(&self) -> bool {
        self.has_earned_bonus
    }

    /// Total time spent as the face-up candidate, up to `now`.
    pub fn face_up_time_at(&self, now: Instant) -> Duration {
        match self.last_face_up {
            Some(since) => self.past_face_up_time + now.saturating_duration_since(since),
            None => self.past_face_up_time,
        }
    }

    pub fn face_up_time(&self) -> Duration {
        self.face_up_time_at(Instant::now())
    }

    pub fn bonus_time_remaining_at(&self, now: Instant) -> Duration {
        self.bonus_time_limit.saturating_sub(self.face_up_time_at(now))
    }

    /// Fraction of the bonus window still available, in `[0, 1]`.
    pub fn bonus_remaining_at(&self, now: Instant) -> f64 {
        if self.bonus_time_limit.is_zero() {
            return 0.0;
        }
        let used = self.face_up_time_at(now).as_secs_f64() / self.bonus_time_limit.as_secs_f64();
        (1.0 - used).max(0.0)
    }

    pub fn bonus_remaining(&self) -> f64 {
        self.bonus_remaining_at(Instant::now())
    }

    /// Whether the bonus window is currently draining.
    ///
    /// Only the lone face-up card drains it, the two cards left showing after a mismatch
    /// report `false` even with bonus left.
    pub fn is_consuming_bonus_time_at(&self, now: Instant) -> bool {
        self.last_face_up.is_some()
            && self.is_face_up
            && !self.is_matched
            && self.bonus_remaining_at(now) > 0.0
    }

    pub fn is_consuming_bonus_time(&self) -> bool {
        self.is_consuming_bonus_time_at(Instant::now())
    }

    pub(crate) fn turn_face_up(&mut self) {
        self.is_face_up = true;
    }

    /// Turns the card down, freezing its accumulated time.
    pub(crate) fn turn_face_down(&mut self, now: Instant) {
        self.is_face_up = false;
        self.stop_using_bonus_time(now);
    }

    pub(crate) fn mark_seen(&mut self) {
        self.has_been_seen = true;
    }

    pub(crate) fn mark_matched(&mut self, now: Instant) {
        self.stop_using_bonus_time(now);
        self.has_earned_bonus = self.bonus_remaining_at(now) > 0.0;
        self.is_matched = true;
    }

    pub(crate) fn start_using_bonus_time(&mut self, now: Instant) {
        if self.last_face_up.is_none() && !self.is_matched && self.bonus_remaining_at(now) > 0.0 {
            self.last_face_up = Some(now);
        }
    }

    pub(crate) fn stop_using_bonus_time(&mut self, now: Instant) {
        self.past_face_up_time = self.face_up_time_at(now);
        self.last_face_up = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(limit_secs: u64) -> Card<&'static str> {
        Card::new(CardId(0), "A", Duration::from_secs(limit_secs))
    }

    #[test]
    fn fresh_card_has_full_bonus() {
        let card = card(10);
        let now = Instant::now();

        assert_eq!(card.face_up_time_at(now), Duration::ZERO);
        assert_eq!(card.bonus_remaining_at(now), 1.0);
        assert!(!card.is_consuming_bonus_time_at(now));
    }

    #[test]
    fn bonus_drains_only_while_timing() {
        let mut card = card(10);
        let start = Instant::now();

        card.turn_face_up();
        card.start_using_bonus_time(start);
        let mid = start + Duration::from_secs(4);
        assert!(card.is_consuming_bonus_time_at(mid));
        assert!((card.bonus_remaining_at(mid) - 0.6).abs() < 1e-9);

        card.turn_face_down(mid);
        let later = mid + Duration::from_secs(60);
        assert_eq!(card.face_up_time_at(later), Duration::from_secs(4));
        assert!(!card.is_consuming_bonus_time_at(later));

        card.turn_face_up();
        card.start_using_bonus_time(later);
        let end = later + Duration::from_secs(3);
        assert_eq!(card.face_up_time_at(end), Duration::from_secs(7));
        assert_eq!(card.bonus_time_remaining_at(end), Duration::from_secs(3));
    }

    #[test]
    fn exhausted_bonus_clamps_to_zero() {
        let mut card = card(2);
        let start = Instant::now();

        card.turn_face_up();
        card.start_using_bonus_time(start);
        let end = start + Duration::from_secs(5);

        assert_eq!(card.bonus_remaining_at(end), 0.0);
        assert!(!card.is_consuming_bonus_time_at(end));
        card.mark_matched(end);
        assert!(!card.has_earned_bonus());
    }

    #[test]
    fn zero_limit_never_grants_bonus() {
        let mut card = card(0);
        let now = Instant::now();

        assert_eq!(card.bonus_remaining_at(now), 0.0);
        card.start_using_bonus_time(now);
        card.mark_matched(now);
        assert!(!card.has_earned_bonus());
    }

    #[test]
    fn matched_bonus_is_frozen() {
        let mut card = card(10);
        let start = Instant::now();

        card.turn_face_up();
        card.start_using_bonus_time(start);
        card.mark_matched(start + Duration::from_secs(1));

        let much_later = start + Duration::from_secs(3600);
        assert!(card.has_earned_bonus());
        assert!((card.bonus_remaining_at(much_later) - 0.9).abs() < 1e-9);
    }
}
