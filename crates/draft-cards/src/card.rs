use std::fmt::{Display, Formatter, Result};

/// Opaque catalog key. Distinct from `draft_core::ID` because cards are
/// not session-scoped entities — the same `CardId` means the same
/// physical card across every session and every booster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct CardId(pub u32);

impl From<u32> for CardId {
    fn from(n: u32) -> Self {
        Self(n)
    }
}
impl From<CardId> for u32 {
    fn from(c: CardId) -> u32 {
        c.0
    }
}
impl Display for CardId {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "#{}", self.0)
    }
}

/// Set code, e.g. `"thb"`. Kept as a small owned string rather than an
/// enum since the catalog treats sets as opaque external identifiers.
pub type SetCode = String;
