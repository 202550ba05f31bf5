use draft_cards::{CardId, SetCode};
use draft_core::{SessionId, UserId};
use draft_gameplay::PickRecord;
use std::collections::HashMap;

/// One participant's (or bot's) entry in a completed draft's log.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DraftLogUser {
    pub user_name: String,
    pub user_id: Option<UserId>,
    pub is_bot: bool,
    pub picks: Vec<DraftLogPick>,
    pub cards: Vec<CardId>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DraftLogPick {
    pub pick: CardId,
    pub burn: Vec<CardId>,
    pub booster: Vec<CardId>,
}

impl From<&PickRecord> for DraftLogPick {
    fn from(record: &PickRecord) -> Self {
        Self {
            pick: record.pick,
            burn: record.burn.clone(),
            booster: record.booster_before.clone(),
        }
    }
}

/// In-memory draft log assembled at `endDraft`. Persistence is out of
/// scope; this is the object the `draftLog` event carries and nothing
/// more durable than the session itself.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DraftLog {
    pub session_id: SessionId,
    pub set_restriction: Vec<SetCode>,
    pub boosters: Vec<Vec<CardId>>,
    pub users: HashMap<String, DraftLogUser>,
}
