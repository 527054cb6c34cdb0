use core::fmt;
use core::ops::RangeInclusive;
use hashbrown::HashSet;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Pair counts picked from when a theme does not fix one.
pub const RANDOM_PAIRS: RangeInclusive<usize> = 2..=5;

const HALLOWEEN: [&str; 12] = [
    "👻", "🎃", "🕷", "🧛", "🩸", "🧙", "🧟", "🕸", "🦇", "🧄", "🌙", "🦉",
];

/// Named set of emoji to deal cards from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ThemeFields")]
pub struct Theme {
    name: String,
    emojis: Vec<String>,
    number_of_pairs: Option<usize>,
    /// Colour name or hex string the front paints cards with.
    color: Option<String>,
}

/// Unvalidated form of [`Theme`] as it appears in serialized data.
#[derive(Deserialize)]
struct ThemeFields {
    name: String,
    emojis: Vec<String>,
    #[serde(default)]
    number_of_pairs: Option<usize>,
    #[serde(default)]
    color: Option<String>,
}

impl TryFrom<ThemeFields> for Theme {
    type Error = GameError;

    fn try_from(fields: ThemeFields) -> Result<Self> {
        let theme = Self::new(fields.name, fields.emojis)?;
        Ok(Self {
            number_of_pairs: fields.number_of_pairs,
            color: fields.color,
            ..theme
        })
    }
}

impl Theme {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        emojis: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let emojis: Vec<String> = emojis.into_iter().map(Into::into).collect();
        if emojis.is_empty() {
            return Err(GameError::NoPairs);
        }

        {
            let mut unique = HashSet::with_capacity(emojis.len());
            if let Some(pair_index) = emojis.iter().position(|emoji| !unique.insert(emoji)) {
                return Err(GameError::DuplicateContent { pair_index });
            }
        }

        Ok(Self {
            name: name.into(),
            emojis,
            number_of_pairs: None,
            color: None,
        })
    }

    pub fn halloween() -> Self {
        Self {
            name: "Halloween".into(),
            emojis: HALLOWEEN.iter().map(|&emoji| emoji.into()).collect(),
            number_of_pairs: None,
            color: Some("orange".into()),
        }
    }

    /// Always deal this many pairs instead of a random count.
    pub fn with_number_of_pairs(self, number_of_pairs: usize) -> Self {
        Self {
            number_of_pairs: Some(number_of_pairs),
            ..self
        }
    }

    pub fn with_color(self, color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn emojis(&self) -> &[String] {
        &self.emojis
    }

    pub fn number_of_pairs(&self) -> Option<usize> {
        self.number_of_pairs
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::halloween()
    }
}

pub type ChangeCallback = Box<dyn FnMut(&MemoryGame<String>)>;

/// Emoji front for a [`MemoryGame`], the object a UI holds on to.
///
/// Intents go through [`EmojiMemoryGame::choose`] and [`EmojiMemoryGame::new_game`]; every
/// change is pushed to the subscribed callbacks.
pub struct EmojiMemoryGame {
    theme: Theme,
    game: MemoryGame<String>,
    rng: SmallRng,
    subscribers: Vec<ChangeCallback>,
}

impl EmojiMemoryGame {
    pub fn new(theme: Theme) -> Self {
        Self::with_rng(theme, SmallRng::from_os_rng())
    }

    /// Deterministic deals, mostly useful for tests and replays.
    pub fn with_seed(theme: Theme, seed: u64) -> Self {
        Self::with_rng(theme, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(theme: Theme, mut rng: SmallRng) -> Self {
        let game = create_memory_game(&theme, &mut rng);
        Self {
            theme,
            game,
            rng,
            subscribers: Vec::new(),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn game(&self) -> &MemoryGame<String> {
        &self.game
    }

    pub fn cards(&self) -> &[Card<String>] {
        self.game.cards()
    }

    pub fn score(&self) -> i64 {
        self.game.score()
    }

    /// Registers `callback` to run after every change to the game.
    pub fn subscribe(&mut self, callback: impl FnMut(&MemoryGame<String>) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    pub fn choose(&mut self, card: CardId) -> Result<ChooseOutcome> {
        let outcome = self.game.choose(card)?;
        if outcome.has_update() {
            self.notify();
        }
        Ok(outcome)
    }

    /// Throws the current game away and deals a fresh one from the same theme.
    pub fn new_game(&mut self) {
        self.game = create_memory_game(&self.theme, &mut self.rng);
        self.notify();
    }

    fn notify(&mut self) {
        for callback in &mut self.subscribers {
            callback(&self.game);
        }
    }
}

impl fmt::Debug for EmojiMemoryGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmojiMemoryGame")
            .field("theme", &self.theme)
            .field("game", &self.game)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

fn create_memory_game(theme: &Theme, rng: &mut SmallRng) -> MemoryGame<String> {
    let mut emojis = theme.emojis.clone();
    emojis.shuffle(rng);

    let requested = theme
        .number_of_pairs
        .unwrap_or_else(|| rng.random_range(RANDOM_PAIRS));
    let number_of_pairs = if requested > emojis.len() {
        log::warn!(
            "Theme {} only has {} emoji, requested {} pairs",
            theme.name,
            emojis.len(),
            requested
        );
        emojis.len()
    } else {
        requested.max(1)
    };

    log::debug!("New {} game with {} pairs", theme.name, number_of_pairs);
    let config = GameConfig::new(number_of_pairs).with_seed(rng.random());
    MemoryGame::with_config(&config, |pair_index| emojis[pair_index].clone())
}
