use draft_cards::Rarity;
use rand::Rng;

/// Probability a pack gets a foil slot at all (15/63).
const FOIL_SLOT_CHANCE: f64 = 15.0 / 63.0;

pub fn rolls_foil_slot(rng: &mut impl Rng) -> bool {
    rng.random_bool(FOIL_SLOT_CHANCE)
}

/// Cumulative weights for the foil card's rarity: mythic 1/128, rare
/// 8/128, uncommon 4/16 (32/128), common the remainder. A single roll
/// against the running thresholds, so every call consumes exactly one
/// draw from `rng` regardless of outcome.
const MYTHIC_CUTOFF: f64 = 1.0 / 128.0;
const RARE_CUTOFF: f64 = MYTHIC_CUTOFF + 8.0 / 128.0;
const UNCOMMON_CUTOFF: f64 = RARE_CUTOFF + 4.0 / 16.0;

pub fn foil_rarity(rng: &mut impl Rng) -> Rarity {
    let roll: f64 = rng.random();
    if roll < MYTHIC_CUTOFF {
        Rarity::Mythic
    } else if roll < RARE_CUTOFF {
        Rarity::Rare
    } else if roll < UNCOMMON_CUTOFF {
        Rarity::Uncommon
    } else {
        Rarity::Common
    }
}

/// Probability a rare slot is promoted to mythic when `maxRarity` is
/// mythic and the mythic pool is non-empty.
pub fn rolls_mythic_promotion(rng: &mut impl Rng) -> bool {
    rng.random_bool(1.0 / 8.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn foil_rarity_is_deterministic_for_a_fixed_seed() {
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);
        let sequence_a: Vec<_> = (0..20).map(|_| foil_rarity(&mut a)).collect();
        let sequence_b: Vec<_> = (0..20).map(|_| foil_rarity(&mut b)).collect();
        assert_eq!(sequence_a, sequence_b);
    }

    #[test]
    fn foil_slot_chance_is_never_guaranteed_or_impossible() {
        let mut rng = SmallRng::seed_from_u64(7);
        let rolls: Vec<_> = (0..200).map(|_| rolls_foil_slot(&mut rng)).collect();
        assert!(rolls.iter().any(|&b| b));
        assert!(rolls.iter().any(|&b| !b));
    }
}
