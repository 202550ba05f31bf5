use crate::commitment::ColorCommitment;
use crate::policy::policy_for;
use draft_cards::{CardId, Catalog};
use draft_core::UserId;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Mixes a user id and seat index into a 64-bit seed. A fixed-function
/// mix rather than a `Hasher` so the result is stable across process
/// restarts and builds, which is what lets a bot substituted into a
/// disconnected seat reproduce the same picks on replay.
fn seed_from(user: UserId, seat: usize) -> u64 {
    let (high, low) = user.uuid().as_u64_pair();
    let mut x = high ^ low.rotate_left(32) ^ (seat as u64).wrapping_mul(0x9E3779B97F4A7C15);
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

/// A fill-in player for a disconnected or bot-only seat. Deterministic
/// per `(user, seat)` pair: the same substitution always makes the same
/// picks against the same packs, which keeps a resumed or replayed
/// draft log reproducible.
pub struct BotAgent {
    rng: SmallRng,
    commitment: ColorCommitment,
}

impl BotAgent {
    pub fn new(user: UserId, seat: usize) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed_from(user, seat)),
            commitment: ColorCommitment::default(),
        }
    }

    /// Picks one card from an open pack, then remembers its color.
    pub fn pick(&mut self, pack: &[CardId], catalog: &Catalog) -> Option<CardId> {
        let policy = policy_for(pack, catalog, &self.commitment);
        let chosen = policy.choose(&mut self.rng)?;
        if let Some(facts) = catalog.facts(chosen) {
            self.commitment.record(facts.color);
        }
        Some(chosen)
    }

    /// Chooses `count` cards to burn from what's left of a pack after a
    /// pick: the weakest cards by the bot's own rating, never the one
    /// it just picked.
    pub fn burn(&self, remaining: &[CardId], count: usize, catalog: &Catalog) -> Vec<CardId> {
        policy_for(remaining, catalog, &self.commitment).lightest(count)
    }

    /// Winston take/pass: takes the pile if it outweighs a flat common
    /// baseline, otherwise passes to peek the next pile.
    pub fn takes_pile(&self, pile: &[CardId], catalog: &Catalog) -> bool {
        const BASELINE_PER_CARD: u32 = 150;
        if pile.is_empty() {
            return false;
        }
        let policy = policy_for(pile, catalog, &self.commitment);
        policy.total_weight() > BASELINE_PER_CARD * pile.len() as u32
    }
}
