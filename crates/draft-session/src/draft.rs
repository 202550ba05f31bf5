use draft_gameplay::{Traditional, Winston};

/// The three persistent draft formats. Sealed and Jumpstart are
/// single-shot distributions (§4.4) and never occupy this slot — they
/// generate, fan out `setCardSelection`, and leave the session `Idle`.
pub enum ActiveDraft {
    Idle,
    Traditional(Box<Traditional>),
    Winston(Box<Winston>),
}

impl ActiveDraft {
    pub fn is_idle(&self) -> bool {
        matches!(self, ActiveDraft::Idle)
    }

    pub fn as_traditional(&self) -> Option<&Traditional> {
        match self {
            ActiveDraft::Traditional(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_traditional_mut(&mut self) -> Option<&mut Traditional> {
        match self {
            ActiveDraft::Traditional(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_winston(&self) -> Option<&Winston> {
        match self {
            ActiveDraft::Winston(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_winston_mut(&mut self) -> Option<&mut Winston> {
        match self {
            ActiveDraft::Winston(w) => Some(w),
            _ => None,
        }
    }
}
