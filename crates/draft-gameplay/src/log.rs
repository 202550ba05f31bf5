use draft_cards::CardId;

/// One pick's audit trail: what was offered, what was kept, what was
/// burned. Assembled into a session's draft log at `endDraft`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PickRecord {
    pub pick: CardId,
    pub burn: Vec<CardId>,
    pub booster_before: Vec<CardId>,
}
