use crate::commitment::ColorCommitment;
use draft_cards::{CardId, Catalog, Rarity};
use rand::Rng;

#[derive(Debug, Clone, Copy)]
pub struct Choice {
    pub card: CardId,
    pub weight: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Policy {
    choices: Vec<Choice>,
}

impl Policy {
    /// Weighted draw without replacement from the whole choice set.
    pub fn choose(&self, rng: &mut impl Rng) -> Option<CardId> {
        let total: u32 = self.choices.iter().map(|c| c.weight).sum();
        if total == 0 {
            return self.choices.first().map(|c| c.card);
        }
        let mut roll = rng.random_range(0..total);
        for choice in &self.choices {
            if roll < choice.weight {
                return Some(choice.card);
            }
            roll -= choice.weight;
        }
        unreachable!()
    }

    /// The `count` lowest-weighted cards, i.e. the bot's burn candidates.
    pub fn lightest(&self, count: usize) -> Vec<CardId> {
        let mut sorted = self.choices.clone();
        sorted.sort_by_key(|c| c.weight);
        sorted.into_iter().take(count).map(|c| c.card).collect()
    }

    pub fn total_weight(&self) -> u32 {
        self.choices.iter().map(|c| c.weight).sum()
    }
}

fn rarity_weight(rarity: Rarity) -> u32 {
    match rarity {
        Rarity::Mythic => 4000,
        Rarity::Rare => 1500,
        Rarity::Uncommon => 400,
        Rarity::Common => 100,
    }
}

/// Builds a weighted policy over `pack`, rating each card by rarity
/// scaled by how committed the bot already is to that card's color.
/// Cards missing from the catalog are skipped rather than causing a
/// panic, since a malformed pack should degrade, not crash, a bot seat.
pub fn policy_for(pack: &[CardId], catalog: &Catalog, commitment: &ColorCommitment) -> Policy {
    let choices = pack
        .iter()
        .filter_map(|&card| {
            let facts = catalog.facts(card)?;
            let weight = rarity_weight(facts.rarity) * commitment.affinity(facts.color);
            Some(Choice { card, weight })
        })
        .collect();
    Policy { choices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draft_cards::{CardFacts, Color};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn catalog() -> Catalog {
        Catalog::builder()
            .card(CardId(1), CardFacts { set: "thb", rarity: Rarity::Mythic, color: Color::Red, in_booster: true })
            .card(CardId(2), CardFacts { set: "thb", rarity: Rarity::Common, color: Color::Blue, in_booster: true })
            .build()
    }

    #[test]
    fn mythic_dominates_an_uncommitted_bot() {
        let catalog = catalog();
        let commitment = ColorCommitment::default();
        let policy = policy_for(&[CardId(1), CardId(2)], &catalog, &commitment);
        let mut rng = SmallRng::seed_from_u64(1);
        let picks: Vec<_> = (0..50).map(|_| policy.choose(&mut rng)).collect();
        assert!(picks.iter().filter(|p| **p == Some(CardId(1))).count() > 40);
    }

    #[test]
    fn lightest_returns_the_weakest_cards() {
        let catalog = catalog();
        let commitment = ColorCommitment::default();
        let policy = policy_for(&[CardId(1), CardId(2)], &catalog, &commitment);
        assert_eq!(policy.lightest(1), vec![CardId(2)]);
    }

    #[test]
    fn unknown_cards_are_skipped_not_panicked() {
        let catalog = catalog();
        let commitment = ColorCommitment::default();
        let policy = policy_for(&[CardId(999)], &catalog, &commitment);
        assert!(policy.choose(&mut SmallRng::seed_from_u64(1)).is_none());
    }
}
