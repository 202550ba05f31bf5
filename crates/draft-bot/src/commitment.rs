use draft_cards::Color;
use std::collections::BTreeMap;

/// Running tally of how many cards of each WUBRG color a bot has picked
/// so far this draft. Used to bias later picks toward colors it's
/// already committed to.
#[derive(Debug, Clone, Default)]
pub struct ColorCommitment {
    counts: BTreeMap<Color, u32>,
}

impl ColorCommitment {
    pub fn record(&mut self, color: Color) {
        if color.is_single() {
            *self.counts.entry(color).or_insert(0) += 1;
        }
    }

    /// 1 for an uncommitted bot, growing toward 3 as picks in `color`
    /// accumulate, capped so a single color can't dominate every choice.
    pub fn affinity(&self, color: Color) -> u32 {
        if !color.is_single() {
            return 1;
        }
        1 + self.counts.get(&color).copied().unwrap_or(0).min(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affinity_grows_with_picks_and_caps_at_three() {
        let mut commitment = ColorCommitment::default();
        assert_eq!(commitment.affinity(Color::Red), 1);
        commitment.record(Color::Red);
        assert_eq!(commitment.affinity(Color::Red), 2);
        commitment.record(Color::Red);
        commitment.record(Color::Red);
        commitment.record(Color::Red);
        assert_eq!(commitment.affinity(Color::Red), 3);
    }

    #[test]
    fn multicolor_and_colorless_never_gain_affinity() {
        let mut commitment = ColorCommitment::default();
        commitment.record(Color::Multi);
        assert_eq!(commitment.affinity(Color::Multi), 1);
    }
}
