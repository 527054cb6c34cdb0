use core::hash::Hash;
use hashbrown::HashSet;
use rand::prelude::*;

use crate::*;

/// Deals `2 * number_of_pairs` cards, two per pair index, in shuffled order.
///
/// Pair `i` gets ids `2i` and `2i + 1`, assigned before shuffling.
pub(crate) fn deal<C, F>(config: &GameConfig, mut content_factory: F) -> Result<Vec<Card<C>>>
where
    C: Clone + Eq + Hash,
    F: FnMut(usize) -> C,
{
    if config.number_of_pairs == 0 {
        return Err(GameError::NoPairs);
    }
    let total_cards = config
        .number_of_pairs
        .checked_mul(2)
        .and_then(|total| u32::try_from(total).ok())
        .ok_or(GameError::TooManyPairs(config.number_of_pairs))?;

    let mut seen_content = HashSet::with_capacity(config.number_of_pairs);
    let mut cards = Vec::with_capacity(config.number_of_pairs * 2);
    for first_id in (0..total_cards).step_by(2) {
        let pair_index = (first_id / 2) as usize;
        let content = content_factory(pair_index);
        if !seen_content.insert(content.clone()) {
            return Err(GameError::DuplicateContent { pair_index });
        }
        cards.push(Card::new(CardId(first_id), content.clone(), config.bonus_time_limit));
        cards.push(Card::new(CardId(first_id + 1), content, config.bonus_time_limit));
    }

    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    cards.shuffle(&mut rng);
    log::debug!(
        "Dealt {} cards for {} pairs (seed: {:?})",
        cards.len(),
        config.number_of_pairs,
        config.seed
    );

    Ok(cards)
}
