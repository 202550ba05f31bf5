use draft_cards::Rarity;

/// Non-custom per-booster slot counts, keyed by the session's `maxRarity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RarityTargets {
    pub rare: u32,
    pub uncommon: u32,
    pub common: u32,
}

pub fn targets_for(max_rarity: Rarity) -> RarityTargets {
    match max_rarity {
        Rarity::Mythic | Rarity::Rare => RarityTargets { rare: 1, uncommon: 3, common: 10 },
        Rarity::Uncommon => RarityTargets { rare: 0, uncommon: 3, common: 11 },
        Rarity::Common => RarityTargets { rare: 0, uncommon: 0, common: 14 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn mythic_and_rare_share_a_target_row() {
        assert_eq!(targets_for(Rarity::Mythic), targets_for(Rarity::Rare));
    }
    #[test]
    fn pack_size_shrinks_as_max_rarity_drops() {
        let t = targets_for(Rarity::Common);
        assert_eq!(t.rare + t.uncommon + t.common, 14);
    }
}
