use std::fmt;

/// Booster generation's only retryable failure. Reported to the owner
/// via a `message` event; the session stays out of `drafting`.
#[derive(Debug, Clone)]
pub struct BoosterError {
    pub detail: String,
}

impl BoosterError {
    pub fn shortage(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        log::warn!("booster shortage: {detail}");
        Self { detail }
    }
}

impl fmt::Display for BoosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "booster shortage: {}", self.detail)
    }
}

impl std::error::Error for BoosterError {}

impl From<BoosterError> for draft_core::DraftError {
    fn from(e: BoosterError) -> Self {
        draft_core::DraftError::shortage(e.detail)
    }
}
