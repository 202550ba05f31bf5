use crate::bag::{self, Bag};
use crate::effective::{effective_collection, ParticipantCollection};
use crate::error::BoosterError;
use crate::foil;
use crate::options::{BoosterOptions, CustomCardList, Sheet};
use crate::targets::targets_for;
use draft_cards::{CardId, Catalog, Color, Rarity};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

pub type Booster = Vec<CardId>;

/// Four rarity bags carved out of the effective collection, restricted
/// by `setRestriction`.
struct RarityBags {
    mythic: Bag,
    rare: Bag,
    uncommon: Bag,
    common: Bag,
}

fn bucket_by_rarity(
    effective: BTreeMap<CardId, u32>,
    catalog: &Catalog,
    options: &BoosterOptions,
) -> RarityBags {
    let mut bags = RarityBags {
        mythic: Bag::new(),
        rare: Bag::new(),
        uncommon: Bag::new(),
        common: Bag::new(),
    };
    for (id, count) in effective {
        let Some(facts) = catalog.facts(id) else { continue };
        if !options.allows_set(facts.set) {
            continue;
        }
        let bucket = match facts.rarity {
            Rarity::Mythic => &mut bags.mythic,
            Rarity::Rare => &mut bags.rare,
            Rarity::Uncommon => &mut bags.uncommon,
            Rarity::Common => &mut bags.common,
        };
        bucket.insert(id, count);
    }
    bags
}

fn draw_rare_or_mythic(bags: &mut RarityBags, max_rarity: Rarity, rng: &mut impl Rng) -> Option<CardId> {
    if max_rarity == Rarity::Mythic && bag::total(&bags.mythic) > 0 && foil::rolls_mythic_promotion(rng) {
        if let Some(id) = bag::draw(&mut bags.mythic, rng) {
            return Some(id);
        }
    }
    bag::draw(&mut bags.rare, rng)
}

fn bag_for_rarity<'a>(bags: &'a mut RarityBags, rarity: Rarity) -> &'a mut Bag {
    match rarity {
        Rarity::Mythic => &mut bags.mythic,
        Rarity::Rare => &mut bags.rare,
        Rarity::Uncommon => &mut bags.uncommon,
        Rarity::Common => &mut bags.common,
    }
}

fn draw_color(bag: &mut Bag, catalog: &Catalog, color: Color, rng: &mut impl Rng) -> Option<CardId> {
    let matches = |id: &CardId| catalog.facts(*id).map(|f| f.color) == Some(color);
    let supply: u32 = bag.iter().filter(|(id, _)| matches(id)).map(|(_, c)| *c).sum();
    if supply == 0 {
        return None;
    }
    let mut roll = rng.random_range(0..supply);
    let mut chosen = None;
    for (&id, &count) in bag.iter() {
        if !matches(&id) {
            continue;
        }
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

/// Draws up to one card of each WUBRG color from `bag`, stopping early
/// once `limit` cards have been picked. The shared color-balancing step
/// behind the common block, the cube pack, and the largest custom
/// sheet — any block the spec requires to be balanced the same way.
fn draw_one_of_each_color(bag: &mut Bag, catalog: &Catalog, limit: u32, rng: &mut impl Rng) -> Vec<CardId> {
    let mut picked = Vec::new();
    for color in Color::WUBRG {
        if picked.len() as u32 >= limit {
            break;
        }
        if let Some(id) = draw_color(bag, catalog, color, rng) {
            picked.push(id);
        }
    }
    picked
}

/// Draws a `target`-card block from `bag`: up to one of each WUBRG
/// color first (if `color_balance`), then fills the rest from whatever
/// remains, then shuffles the block so color balance can't be inferred
/// from position.
fn draw_color_balanced(
    bag: &mut Bag,
    catalog: &Catalog,
    target: u32,
    color_balance: bool,
    rng: &mut impl Rng,
) -> Vec<CardId> {
    let mut picked = if color_balance {
        draw_one_of_each_color(bag, catalog, target, rng)
    } else {
        Vec::new()
    };
    while (picked.len() as u32) < target {
        match bag::draw(bag, rng) {
            Some(id) => picked.push(id),
            None => break,
        }
    }
    picked.shuffle(rng);
    picked
}

/// Draws the common block for one pack.
fn draw_commons(bag: &mut Bag, catalog: &Catalog, target: u32, color_balance: bool, rng: &mut impl Rng) -> Vec<CardId> {
    draw_color_balanced(bag, catalog, target, color_balance, rng)
}

/// Verifies there is enough supply across `quantity` packs before
/// generating any of them; this is the only retryable failure mode.
fn check_supply(bags: &RarityBags, max_rarity: Rarity, quantity: u32) -> Result<(), BoosterError> {
    let targets = targets_for(max_rarity);
    let rare_supply = bag::total(&bags.rare)
        + if max_rarity == Rarity::Mythic { bag::total(&bags.mythic) } else { 0 };
    if rare_supply < targets.rare * quantity {
        return Err(BoosterError::shortage(format!(
            "need {} rare/mythic cards for {quantity} packs, have {rare_supply}",
            targets.rare * quantity
        )));
    }
    if bag::total(&bags.uncommon) < targets.uncommon * quantity {
        return Err(BoosterError::shortage(format!(
            "need {} uncommons for {quantity} packs, have {}",
            targets.uncommon * quantity,
            bag::total(&bags.uncommon)
        )));
    }
    if bag::total(&bags.common) < targets.common * quantity {
        return Err(BoosterError::shortage(format!(
            "need {} commons for {quantity} packs, have {}",
            targets.common * quantity,
            bag::total(&bags.common)
        )));
    }
    Ok(())
}

/// Generates `quantity` boosters from participant collections (or the
/// session's custom card list, if configured). Pure given `rng`: the
/// same seed and inputs always produce the same packs.
pub fn generate(
    participants: &[ParticipantCollection],
    catalog: &Catalog,
    options: &BoosterOptions,
    quantity: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Booster>, BoosterError> {
    match &options.custom_card_list {
        Some(CustomCardList::Cube { cards }) => generate_cube(cards, catalog, options, quantity, rng),
        Some(CustomCardList::Sheets { sheets }) => generate_sheets(sheets, catalog, options, quantity, rng),
        None => generate_regular(participants, catalog, options, quantity, rng),
    }
}

fn generate_regular(
    participants: &[ParticipantCollection],
    catalog: &Catalog,
    options: &BoosterOptions,
    quantity: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Booster>, BoosterError> {
    let effective = effective_collection(participants, catalog, options);
    let mut bags = bucket_by_rarity(effective, catalog, options);
    check_supply(&bags, options.max_rarity, quantity as u32)?;

    let targets = targets_for(options.max_rarity);
    let land_slot_set = (options.set_restriction.len() == 1)
        .then(|| options.set_restriction[0].clone())
        .filter(|set| catalog.has_land_slot(set));
    let mut land_slot = land_slot_set
        .as_ref()
        .and_then(|set| catalog.land_slot(set, &mut bags.common));

    let mut packs = Vec::with_capacity(quantity);
    for _ in 0..quantity {
        let mut pack = Vec::new();
        let mut foils_added = 0u32;
        if options.foil && foil::rolls_foil_slot(rng) {
            let rarity = foil::foil_rarity(rng);
            if let Some(id) = bag::draw(bag_for_rarity(&mut bags, rarity), rng) {
                pack.push(id);
                foils_added = 1;
            }
        }
        for _ in 0..targets.rare {
            if let Some(id) = draw_rare_or_mythic(&mut bags, options.max_rarity, rng) {
                pack.push(id);
            }
        }
        for _ in 0..targets.uncommon {
            if let Some(id) = bag::draw(&mut bags.uncommon, rng) {
                pack.push(id);
            }
        }
        let common_target = targets.common.saturating_sub(foils_added);
        pack.extend(draw_commons(&mut bags.common, catalog, common_target, options.color_balance, rng));
        if let Some(slot) = land_slot.as_mut() {
            if let Some(id) = slot.pick() {
                pack.push(id);
            }
        }
        packs.push(pack);
    }
    Ok(packs)
}

fn bag_from_counts(cards: &[(CardId, u32)]) -> Bag {
    cards.iter().copied().collect()
}

fn generate_cube(
    cards: &[(CardId, u32)],
    catalog: &Catalog,
    options: &BoosterOptions,
    quantity: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Booster>, BoosterError> {
    const CUBE_PACK_SIZE: u32 = 15;
    let mut bag = bag_from_counts(cards);
    if bag::total(&bag) < CUBE_PACK_SIZE * quantity as u32 {
        return Err(BoosterError::shortage(format!(
            "need {} cube cards for {quantity} packs, have {}",
            CUBE_PACK_SIZE * quantity as u32,
            bag::total(&bag)
        )));
    }
    let mut packs = Vec::with_capacity(quantity);
    for _ in 0..quantity {
        let pack = draw_color_balanced(&mut bag, catalog, CUBE_PACK_SIZE, options.color_balance, rng);
        packs.push(pack);
    }
    Ok(packs)
}

fn generate_sheets(
    sheets: &std::collections::HashMap<String, Sheet>,
    catalog: &Catalog,
    options: &BoosterOptions,
    quantity: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Booster>, BoosterError> {
    let mut bags: std::collections::HashMap<&str, Bag> = sheets
        .iter()
        .map(|(name, sheet)| (name.as_str(), bag_from_counts(&sheet.cards)))
        .collect();

    for (name, sheet) in sheets {
        let needed = sheet.count * quantity as u32;
        let have = bag::total(bags.get(name.as_str()).unwrap());
        if have < needed {
            return Err(BoosterError::shortage(format!(
                "sheet '{name}' needs {needed} cards for {quantity} packs, has {have}"
            )));
        }
    }

    let largest_sheet_name = sheets
        .iter()
        .max_by_key(|(_, s)| s.cards.iter().map(|(_, n)| *n).sum::<u32>())
        .filter(|(_, s)| s.cards.iter().map(|(_, n)| *n).sum::<u32>() >= 5)
        .map(|(name, _)| name.clone());

    let mut packs = Vec::with_capacity(quantity);
    for _ in 0..quantity {
        let mut pack = Vec::new();
        for (name, sheet) in sheets {
            let bag = bags.get_mut(name.as_str()).unwrap();
            let is_balanced_block = options.color_balance && largest_sheet_name.as_deref() == Some(name.as_str());
            let drawn = draw_color_balanced(bag, catalog, sheet.count, is_balanced_block, rng);
            pack.extend(drawn);
        }
        packs.push(pack);
    }
    Ok(packs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use draft_cards::CardFacts;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashMap as StdHashMap;

    fn catalog_thb() -> Catalog {
        let mut builder = Catalog::builder();
        let mut id = 0u32;
        let mut next = || {
            id += 1;
            CardId(id)
        };
        // 101 commons split across 5 colors, 80 uncommons, 53 rares, 15 mythics.
        for i in 0..101 {
            let color = Color::WUBRG[i % 5];
            builder = builder.card(next(), CardFacts { set: "thb", rarity: Rarity::Common, color, in_booster: true });
        }
        for _ in 0..80 {
            builder = builder.card(next(), CardFacts { set: "thb", rarity: Rarity::Uncommon, color: Color::Multi, in_booster: true });
        }
        for _ in 0..53 {
            builder = builder.card(next(), CardFacts { set: "thb", rarity: Rarity::Rare, color: Color::Multi, in_booster: true });
        }
        for _ in 0..15 {
            builder = builder.card(next(), CardFacts { set: "thb", rarity: Rarity::Mythic, color: Color::Multi, in_booster: true });
        }
        builder.build()
    }

    fn options_thb(color_balance: bool) -> BoosterOptions {
        BoosterOptions {
            set_restriction: vec!["thb".to_string()],
            max_rarity: Rarity::Mythic,
            color_balance,
            max_duplicates: StdHashMap::from([
                (Rarity::Common, 4),
                (Rarity::Uncommon, 4),
                (Rarity::Rare, 1),
                (Rarity::Mythic, 1),
            ]),
            foil: false,
            ignore_collections: true,
            custom_card_list: None,
        }
    }

    fn catalog_cube(cube_cards: &[(CardId, u32)]) -> Catalog {
        let mut builder = Catalog::builder();
        for (i, &(id, _)) in cube_cards.iter().enumerate() {
            let color = Color::WUBRG[i % 5];
            builder = builder.card(id, CardFacts { set: "cube", rarity: Rarity::Common, color, in_booster: true });
        }
        builder.build()
    }

    #[test]
    fn cube_color_balance_places_one_of_each_color_when_the_pool_allows_it() {
        let cube_cards: Vec<(CardId, u32)> = (1..=50u32).map(|i| (CardId(i), 10)).collect();
        let catalog = catalog_cube(&cube_cards);
        let options = BoosterOptions {
            custom_card_list: Some(CustomCardList::Cube { cards: cube_cards.clone() }),
            color_balance: true,
            ..options_thb(true)
        };
        let mut rng = SmallRng::seed_from_u64(9);
        let packs = generate(&[], &catalog, &options, 4, &mut rng).unwrap();
        for pack in &packs {
            for color in Color::WUBRG {
                assert!(pack.iter().any(|id| catalog.facts(*id).unwrap().color == color));
            }
        }
    }

    #[test]
    fn sheet_color_balance_places_one_of_each_color_in_the_largest_sheet() {
        let sheet_cards: Vec<(CardId, u32)> = (1..=50u32).map(|i| (CardId(i), 10)).collect();
        let catalog = catalog_cube(&sheet_cards);
        let mut sheets = StdHashMap::new();
        sheets.insert("Common".to_string(), Sheet { count: 10, cards: sheet_cards.clone() });
        let options = BoosterOptions {
            custom_card_list: Some(CustomCardList::Sheets { sheets }),
            color_balance: true,
            ..options_thb(true)
        };
        let mut rng = SmallRng::seed_from_u64(11);
        let packs = generate(&[], &catalog, &options, 3, &mut rng).unwrap();
        for pack in &packs {
            for color in Color::WUBRG {
                assert!(pack.iter().any(|id| catalog.facts(*id).unwrap().color == color));
            }
        }
    }

    #[test]
    fn pack_size_and_color_balance_hold_for_thb() {
        let catalog = catalog_thb();
        let options = options_thb(true);
        let mut rng = SmallRng::seed_from_u64(1);
        let packs = generate(&[], &catalog, &options, 6, &mut rng).unwrap();
        assert_eq!(packs.len(), 6);
        for pack in &packs {
            assert_eq!(pack.len(), 14);
            for color in Color::WUBRG {
                assert!(pack.iter().any(|id| catalog.facts(*id).unwrap().color == color));
            }
        }
    }

    #[test]
    fn every_card_respects_the_set_restriction() {
        let catalog = catalog_thb();
        let options = options_thb(false);
        let mut rng = SmallRng::seed_from_u64(2);
        let packs = generate(&[], &catalog, &options, 3, &mut rng).unwrap();
        for pack in packs.iter().flatten() {
            assert_eq!(catalog.facts(*pack).unwrap().set, "thb");
        }
    }

    #[test]
    fn same_seed_is_reproducible() {
        let catalog = catalog_thb();
        let options = options_thb(true);
        let mut rng_a = SmallRng::seed_from_u64(123);
        let mut rng_b = SmallRng::seed_from_u64(123);
        let a = generate(&[], &catalog, &options, 4, &mut rng_a).unwrap();
        let b = generate(&[], &catalog, &options, 4, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn shortage_is_reported_without_panicking() {
        let catalog = catalog_thb();
        let options = options_thb(false);
        let mut rng = SmallRng::seed_from_u64(4);
        // Only 15 mythics + 53 rares exist; ask for far more packs than that supports.
        let err = generate(&[], &catalog, &options, 1000, &mut rng).unwrap_err();
        assert!(err.detail.contains("rare"));
    }

    #[test]
    fn rarity_counts_match_targets_exactly_absent_foil() {
        let catalog = catalog_thb();
        let options = options_thb(false);
        let mut rng = SmallRng::seed_from_u64(5);
        let packs = generate(&[], &catalog, &options, 2, &mut rng).unwrap();
        for pack in &packs {
            let rares = pack.iter().filter(|id| matches!(catalog.facts(**id).unwrap().rarity, Rarity::Rare | Rarity::Mythic)).count();
            let uncommons = pack.iter().filter(|id| catalog.facts(**id).unwrap().rarity == Rarity::Uncommon).count();
            let commons = pack.iter().filter(|id| catalog.facts(**id).unwrap().rarity == Rarity::Common).count();
            assert_eq!(rares, 1);
            assert_eq!(uncommons, 3);
            assert_eq!(commons, 10);
        }
    }
}
