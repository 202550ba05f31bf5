use draft_booster::{generate, BoosterError, BoosterOptions, ParticipantCollection};
use draft_cards::{CardId, Catalog};
use rand::seq::SliceRandom;
use rand::Rng;

/// Generates `packs_per_player` boosters for each of `seat_count` seats
/// and flattens each seat's boosters into one card-selection list.
pub fn distribute_sealed(
    participants: &[ParticipantCollection],
    catalog: &Catalog,
    options: &BoosterOptions,
    seat_count: usize,
    packs_per_player: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Vec<CardId>>, BoosterError> {
    let total = seat_count * packs_per_player;
    let packs = generate(participants, catalog, options, total, rng)?;
    Ok(packs
        .chunks(packs_per_player)
        .map(|chunk| chunk.iter().flatten().copied().collect())
        .collect())
}

/// Jumpstart packs come from a static table of pre-built themed packs
/// rather than the rarity-targeted generator; each seat gets two picked
/// independently (themes repeat across seats by design).
pub fn distribute_jumpstart(
    themed_packs: &[Vec<CardId>],
    seat_count: usize,
    rng: &mut impl Rng,
) -> Vec<Vec<CardId>> {
    (0..seat_count)
        .map(|_| {
            let mut selection = Vec::new();
            for _ in 0..2 {
                if let Some(pack) = themed_packs.choose(rng) {
                    selection.extend(pack.iter().copied());
                }
            }
            selection
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use draft_cards::{CardFacts, Color, Rarity};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn catalog() -> Catalog {
        let mut builder = Catalog::builder();
        for i in 1..=300u32 {
            builder = builder.card(
                CardId(i),
                CardFacts { set: "thb", rarity: Rarity::Common, color: Color::White, in_booster: true },
            );
        }
        builder.build()
    }

    #[test]
    fn sealed_gives_each_seat_its_own_flattened_pool() {
        let catalog = catalog();
        let options = BoosterOptions {
            max_rarity: Rarity::Common,
            ignore_collections: true,
            max_duplicates: std::collections::HashMap::from([(Rarity::Common, 10)]),
            ..Default::default()
        };
        let mut rng = SmallRng::seed_from_u64(1);
        let pools = distribute_sealed(&[], &catalog, &options, 3, 6, &mut rng).unwrap();
        assert_eq!(pools.len(), 3);
        for pool in pools {
            assert_eq!(pool.len(), 6 * 14);
        }
    }

    #[test]
    fn jumpstart_gives_each_seat_exactly_two_themed_packs() {
        let themes = vec![vec![CardId(1), CardId(2)], vec![CardId(3), CardId(4), CardId(5)]];
        let mut rng = SmallRng::seed_from_u64(2);
        let selections = distribute_jumpstart(&themes, 4, &mut rng);
        assert_eq!(selections.len(), 4);
        for selection in selections {
            assert!(selection.len() == 4 || selection.len() == 5 || selection.len() == 6);
        }
    }
}
