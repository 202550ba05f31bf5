use draft_cards::CardId;
use draft_core::{SessionId, UserId};
use std::collections::HashMap;

/// A connected client. The transport handle itself lives outside this
/// crate (the gateway owns it); `Participant` only carries what the
/// session logic needs to reason about membership and collections.
#[derive(Debug, Clone)]
pub struct Participant {
    pub user_id: UserId,
    pub user_name: String,
    pub session_id: Option<SessionId>,
    pub collection: HashMap<CardId, u32>,
    pub use_collection: bool,
}

impl Participant {
    pub fn new(user_id: UserId, user_name: impl Into<String>) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            session_id: None,
            collection: HashMap::new(),
            use_collection: false,
        }
    }

    pub fn as_booster_collection(&self) -> draft_booster::ParticipantCollection {
        draft_booster::ParticipantCollection {
            use_collection: self.use_collection,
            counts: self.collection.clone(),
        }
    }
}

/// Snapshot of a participant at the moment they disconnect mid-draft,
/// kept under `Session::disconnected` until they reconnect or the
/// owner replaces them with a bot. Enough to restore `users`/`userOrder`
/// membership without re-deriving anything from the draft state.
#[derive(Debug, Clone)]
pub struct ParticipantSnapshot {
    pub user_name: String,
    pub seat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_participant_has_no_session_and_no_collection() {
        let p = Participant::new(UserId::default(), "alice");
        assert!(p.session_id.is_none());
        assert!(p.collection.is_empty());
        assert!(!p.use_collection);
    }
}
