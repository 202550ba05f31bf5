use std::fmt::{Display, Formatter, Result};

/// Card rarity, ordered common < uncommon < rare < mythic so that
/// `maxRarity` comparisons (`rarity <= max_rarity`) read naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Mythic = 3,
}

impl From<u8> for Rarity {
    fn from(n: u8) -> Self {
        match n {
            0 => Self::Common,
            1 => Self::Uncommon,
            2 => Self::Rare,
            3 => Self::Mythic,
            _ => panic!("invalid rarity ordinal {n}"),
        }
    }
}

impl Display for Rarity {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "{}",
            match self {
                Self::Common => "common",
                Self::Uncommon => "uncommon",
                Self::Rare => "rare",
                Self::Mythic => "mythic",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn ordered_common_to_mythic() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Uncommon < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Mythic);
    }
}
