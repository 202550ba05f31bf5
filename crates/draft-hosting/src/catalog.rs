use draft_cards::{CardFacts, CardId, Catalog, Color, Rarity};

/// Loading a catalog from a real card database is out of scope for this
/// workspace (see SPEC_FULL.md §1/§4.1) — this binary only needs
/// *something* to generate boosters against, so it ships one small
/// synthetic set instead of wiring up a data source. A real deployment
/// swaps this module for one that reads from wherever the card data
/// actually lives; nothing else in the crate depends on how `Catalog`
/// was built.
const SET: &str = "fix";
const COLORS: [Color; 5] = Color::WUBRG;

pub fn bootstrap() -> Catalog {
    let mut builder = Catalog::builder();
    let mut id = 0u32;
    builder = fill(builder, &mut id, Rarity::Common, 24);
    builder = fill(builder, &mut id, Rarity::Uncommon, 12);
    builder = fill(builder, &mut id, Rarity::Rare, 6);
    builder = fill(builder, &mut id, Rarity::Mythic, 3);
    builder.build()
}

type CatalogBuilder = draft_cards::CatalogBuilder;

fn fill(mut builder: CatalogBuilder, id: &mut u32, rarity: Rarity, per_color: u32) -> CatalogBuilder {
    for color in COLORS {
        for _ in 0..per_color {
            *id += 1;
            builder = builder.card(CardId(*id), CardFacts { set: SET, rarity, color, in_booster: true });
        }
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_catalog_has_every_rarity() {
        let catalog = bootstrap();
        let rarities: std::collections::HashSet<Rarity> = catalog.cards().map(|(_, f)| f.rarity).collect();
        assert_eq!(rarities.len(), 4);
    }
}
