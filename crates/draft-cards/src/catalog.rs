use crate::card::{CardId, SetCode};
use crate::color::Color;
use crate::rarity::Rarity;
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Everything the booster generator needs to know about one printed card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardFacts {
    pub set: &'static str,
    pub rarity: Rarity,
    pub color: Color,
    pub in_booster: bool,
}

/// A set's dedicated land slot: a handful of basic/dual lands held back
/// from the common pool and handed out one per booster instead of being
/// drawn as an ordinary common.
///
/// `setup` consumes matching cards out of a commons pool (so they are
/// never double-counted as regular commons) and `pick` deterministically
/// cycles through what remains, handing out a land from the table for
/// every pack in a set-restricted booster.
#[derive(Debug, Default)]
pub struct LandSlot {
    cards: Vec<CardId>,
    next: usize,
}

impl LandSlot {
    /// Pulls every card the predicate accepts out of `commons_pool` and
    /// stores them as this set's land slot.
    pub fn setup(commons_pool: &mut BTreeMap<CardId, u32>, members: &[CardId]) -> Self {
        let mut cards = Vec::new();
        for &card in members {
            if commons_pool.remove(&card).is_some() {
                cards.push(card);
            }
        }
        Self { cards, next: 0 }
    }

    pub fn pick(&mut self) -> Option<CardId> {
        if self.cards.is_empty() {
            return None;
        }
        let card = self.cards[self.next % self.cards.len()];
        self.next += 1;
        Some(card)
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Immutable, process-wide card database. Construction is the caller's
/// responsibility (loading from disk is out of scope); this crate only
/// owns the in-memory shape and the read paths the generator needs.
#[derive(Debug, Default)]
pub struct Catalog {
    cards: HashMap<CardId, CardFacts>,
    set_list: Vec<SetCode>,
    land_slot_members: HashMap<SetCode, Vec<CardId>>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn facts(&self, card: CardId) -> Option<&CardFacts> {
        self.cards.get(&card)
    }

    pub fn cards(&self) -> impl Iterator<Item = (&CardId, &CardFacts)> {
        self.cards.iter()
    }

    pub fn set_list(&self) -> &[SetCode] {
        &self.set_list
    }

    /// True if the set has a dedicated land slot (distinct from its
    /// regular common pool).
    pub fn has_land_slot(&self, set: &str) -> bool {
        self.land_slot_members.contains_key(set)
    }

    /// Builds a fresh `LandSlot` for `set`, consuming matching entries
    /// out of `commons_pool`. Returns `None` if the set has no land slot.
    pub fn land_slot(&self, set: &str, commons_pool: &mut BTreeMap<CardId, u32>) -> Option<LandSlot> {
        let members = self.land_slot_members.get(set)?;
        Some(LandSlot::setup(commons_pool, members))
    }
}

#[derive(Default)]
pub struct CatalogBuilder {
    cards: HashMap<CardId, CardFacts>,
    set_list: Vec<SetCode>,
    land_slot_members: HashMap<SetCode, Vec<CardId>>,
}

impl CatalogBuilder {
    pub fn card(mut self, id: CardId, facts: CardFacts) -> Self {
        if !self.set_list.contains(&facts.set.to_string()) {
            self.set_list.push(facts.set.to_string());
        }
        self.cards.insert(id, facts);
        self
    }

    pub fn land_slot(mut self, set: impl Into<SetCode>, members: Vec<CardId>) -> Self {
        self.land_slot_members.insert(set.into(), members);
        self
    }

    pub fn build(self) -> Catalog {
        Catalog {
            cards: self.cards,
            set_list: self.set_list,
            land_slot_members: self.land_slot_members,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(set: &'static str, rarity: Rarity, color: Color) -> CardFacts {
        CardFacts {
            set,
            rarity,
            color,
            in_booster: true,
        }
    }

    #[test]
    fn builder_tracks_set_list_without_duplicates() {
        let catalog = Catalog::builder()
            .card(CardId(1), facts("thb", Rarity::Common, Color::White))
            .card(CardId(2), facts("thb", Rarity::Rare, Color::Blue))
            .card(CardId(3), facts("eld", Rarity::Common, Color::Black))
            .build();
        assert_eq!(catalog.set_list(), &["thb".to_string(), "eld".to_string()]);
    }

    #[test]
    fn land_slot_consumes_from_commons_pool() {
        let catalog = Catalog::builder()
            .card(CardId(10), facts("thb", Rarity::Common, Color::Colorless))
            .land_slot("thb", vec![CardId(10)])
            .build();
        let mut pool: BTreeMap<CardId, u32> = BTreeMap::from([(CardId(10), 5u32), (CardId(11), 3u32)]);
        let mut slot = catalog.land_slot("thb", &mut pool).unwrap();
        assert!(!pool.contains_key(&CardId(10)));
        assert_eq!(pool.get(&CardId(11)), Some(&3));
        assert_eq!(slot.pick(), Some(CardId(10)));
        assert_eq!(slot.pick(), Some(CardId(10)));
    }

    #[test]
    fn sets_without_a_land_slot_return_none() {
        let catalog = Catalog::builder()
            .card(CardId(1), facts("thb", Rarity::Common, Color::White))
            .build();
        let mut pool: BTreeMap<CardId, u32> = BTreeMap::new();
        assert!(catalog.land_slot("thb", &mut pool).is_none());
    }
}
