use crate::options::BoosterOptions;
use draft_cards::{CardId, Catalog};
use std::collections::BTreeMap;
use std::collections::HashMap;

/// One participant's owned-card counts, as seen by the generator. A
/// thin projection of `draft_session::Participant` so this crate never
/// depends on the session crate.
#[derive(Debug, Clone)]
pub struct ParticipantCollection {
    pub use_collection: bool,
    pub counts: HashMap<CardId, u32>,
}

/// The intersection (min owned count) across every participant who
/// opts in and owns at least one card, restricted to `inBooster` cards;
/// falls back to `maxDuplicates` copies of every `inBooster` card when
/// nobody opts in or `ignoreCollections` is set.
pub fn effective_collection(
    participants: &[ParticipantCollection],
    catalog: &Catalog,
    options: &BoosterOptions,
) -> BTreeMap<CardId, u32> {
    let contributors: Vec<&ParticipantCollection> = participants
        .iter()
        .filter(|p| p.use_collection && !p.counts.is_empty())
        .collect();

    if options.ignore_collections || contributors.is_empty() {
        return catalog
            .cards()
            .filter(|(_, facts)| facts.in_booster)
            .map(|(id, facts)| (*id, options.max_duplicates(facts.rarity)))
            .collect();
    }

    let mut effective: BTreeMap<CardId, u32> = BTreeMap::new();
    for (id, facts) in catalog.cards().filter(|(_, f)| f.in_booster) {
        let mut min_count: Option<u32> = None;
        for contributor in &contributors {
            let owned = contributor.counts.get(id).copied().unwrap_or(0);
            min_count = Some(min_count.map_or(owned, |m| m.min(owned)));
        }
        if let Some(count) = min_count {
            if count > 0 {
                effective.insert(*id, count);
            }
        }
    }
    effective
}
