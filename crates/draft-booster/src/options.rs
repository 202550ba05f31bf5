use draft_cards::{CardId, Rarity, SetCode};
use std::collections::HashMap;

/// The subset of session configuration the generator needs. Owned
/// separately from the full session options (see `draft-session`) so
/// this crate stays a pure function over plain data.
#[derive(Debug, Clone)]
pub struct BoosterOptions {
    pub set_restriction: Vec<SetCode>,
    pub max_rarity: Rarity,
    pub color_balance: bool,
    pub max_duplicates: HashMap<Rarity, u32>,
    pub foil: bool,
    pub ignore_collections: bool,
    pub custom_card_list: Option<CustomCardList>,
}

impl BoosterOptions {
    pub fn use_custom_card_list(&self) -> bool {
        self.custom_card_list.is_some()
    }

    /// Whether `set` passes the restriction (an empty restriction means
    /// "every set is allowed").
    pub fn allows_set(&self, set: &str) -> bool {
        self.set_restriction.is_empty() || self.set_restriction.iter().any(|s| s == set)
    }

    pub fn max_duplicates(&self, rarity: Rarity) -> u32 {
        self.max_duplicates.get(&rarity).copied().unwrap_or(u32::MAX)
    }
}

impl Default for BoosterOptions {
    fn default() -> Self {
        Self {
            set_restriction: Vec::new(),
            max_rarity: Rarity::Mythic,
            color_balance: false,
            max_duplicates: HashMap::new(),
            foil: false,
            ignore_collections: false,
            custom_card_list: None,
        }
    }
}

/// A custom card list either behaves as a flat 15-card cube, or as a
/// set of named sheets each contributing a fixed count per booster.
#[derive(Debug, Clone)]
pub enum CustomCardList {
    Cube { cards: Vec<(CardId, u32)> },
    Sheets { sheets: HashMap<String, Sheet> },
}

#[derive(Debug, Clone)]
pub struct Sheet {
    pub count: u32,
    pub cards: Vec<(CardId, u32)>,
}

impl CustomCardList {
    /// The name of the widest sheet, used to decide whether color
    /// balancing applies to the custom-sheet path (sheet must be >=5
    /// cards wide to guarantee one-per-color is even possible).
    pub fn largest_sheet(&self) -> Option<(&str, &Sheet)> {
        match self {
            Self::Cube { .. } => None,
            Self::Sheets { sheets } => sheets
                .iter()
                .max_by_key(|(_, s)| s.cards.iter().map(|(_, n)| *n).sum::<u32>())
                .map(|(name, sheet)| (name.as_str(), sheet)),
        }
    }
}
