use draft_booster::{BoosterOptions, CustomCardList};
use draft_cards::{Rarity, SetCode};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DistributionMode {
    Regular,
    ShufflePlayerBoosters,
    ShuffleBoosterPool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftLogRecipients {
    None,
    Owner,
    Delayed,
    Everyone,
}

/// The closed set of per-session configuration from spec.md §3. Every
/// field here is owner-gated and idempotent: setting it to its current
/// value is a no-op (see `Session::set_option`).
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub set_restriction: Vec<SetCode>,
    pub is_public: bool,
    pub ignore_collections: bool,
    pub boosters_per_player: u32,
    pub bots: u32,
    pub max_players: u32,
    pub max_rarity: Rarity,
    pub color_balance: bool,
    pub max_duplicates: HashMap<Rarity, u32>,
    pub foil: bool,
    pub use_custom_card_list: bool,
    pub custom_card_list: Option<CustomCardList>,
    pub burned_cards_per_round: u32,
    /// One entry per round; `""` means "fall back to `set_restriction`".
    pub custom_boosters: Vec<SetCode>,
    pub distribution_mode: DistributionMode,
    pub draft_log_recipients: DraftLogRecipients,
    /// Seconds per pick, 0 disables the timer.
    pub pick_timer: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            set_restriction: Vec::new(),
            is_public: false,
            ignore_collections: false,
            boosters_per_player: 3,
            bots: 0,
            max_players: 8,
            max_rarity: Rarity::Mythic,
            color_balance: false,
            max_duplicates: HashMap::from([
                (Rarity::Common, 4),
                (Rarity::Uncommon, 4),
                (Rarity::Rare, 1),
                (Rarity::Mythic, 1),
            ]),
            foil: false,
            use_custom_card_list: false,
            custom_card_list: None,
            burned_cards_per_round: 0,
            custom_boosters: Vec::new(),
            distribution_mode: DistributionMode::Regular,
            draft_log_recipients: DraftLogRecipients::Delayed,
            pick_timer: 75,
        }
    }
}

impl SessionOptions {
    /// The set restriction that applies to round `round` (0-indexed):
    /// `customBoosters[round]` if set and non-empty, else the session's
    /// own `setRestriction`.
    pub fn set_restriction_for_round(&self, round: usize) -> Vec<SetCode> {
        match self.custom_boosters.get(round) {
            Some(set) if !set.is_empty() => vec![set.clone()],
            _ => self.set_restriction.clone(),
        }
    }

    pub fn to_booster_options(&self, set_restriction: Vec<SetCode>) -> BoosterOptions {
        BoosterOptions {
            set_restriction,
            max_rarity: self.max_rarity,
            color_balance: self.color_balance,
            max_duplicates: self.max_duplicates.clone(),
            foil: self.foil,
            ignore_collections: self.ignore_collections,
            custom_card_list: if self.use_custom_card_list {
                self.custom_card_list.clone()
            } else {
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_custom_booster_entry_falls_back_to_set_restriction() {
        let mut options = SessionOptions {
            set_restriction: vec!["thb".into()],
            custom_boosters: vec![String::new(), "eld".into()],
            ..Default::default()
        };
        assert_eq!(options.set_restriction_for_round(0), vec!["thb".to_string()]);
        assert_eq!(options.set_restriction_for_round(1), vec!["eld".to_string()]);
        options.custom_boosters.clear();
        assert_eq!(options.set_restriction_for_round(0), vec!["thb".to_string()]);
    }
}
