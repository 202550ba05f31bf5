use draft_cards::CardId;
use rand::Rng;
use std::collections::BTreeMap;

/// A multiset of cards drawn without replacement. Backed by a
/// `BTreeMap` (not `HashMap`) so that iteration order — and therefore
/// which card a given RNG draw lands on — is independent of hash seed,
/// which is what makes `generate` reproducible for a fixed seed.
pub type Bag = BTreeMap<CardId, u32>;

pub fn total(bag: &Bag) -> u32 {
    bag.values().sum()
}

/// Draws one card weighted by remaining count, removing it from the bag.
pub fn draw(bag: &mut Bag, rng: &mut impl Rng) -> Option<CardId> {
    let supply = total(bag);
    if supply == 0 {
        return None;
    }
    let mut roll = rng.random_range(0..supply);
    let mut chosen = None;
    for (&id, &count) in bag.iter() {
        if roll < count {
            chosen = Some(id);
            break;
        }
        roll -= count;
    }
    if let Some(id) = chosen {
        if let Some(count) = bag.get_mut(&id) {
            *count -= 1;
            if *count == 0 {
                bag.remove(&id);
            }
        }
    }
    chosen
}
