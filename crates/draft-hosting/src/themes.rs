use draft_cards::CardId;

/// Jumpstart draws from a static table of pre-built themed packs rather
/// than the rarity-targeted generator (spec §4.4). A real deployment
/// would curate these by hand; this binary carves a handful out of the
/// bootstrap catalog's id ranges so the feature is exercisable without
/// an external data file, same rationale as `catalog::bootstrap`.
pub fn fixture() -> Vec<Vec<CardId>> {
    (0..15u32)
        .map(|theme| (1..=8).map(|n| CardId(theme * 8 + n)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_has_several_distinct_themed_packs() {
        let themes = fixture();
        assert!(themes.len() >= 10);
        assert!(themes.iter().all(|pack| pack.len() == 8));
    }
}
