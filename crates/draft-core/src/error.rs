use std::fmt;

/// The five error kinds from the session error-handling design.
///
/// `BadInput` and `Permission` are dropped silently at the gateway
/// (the client never sees them, only a debug log line); `Shortage` is
/// reported to the owner via a `message` event; `Validation` becomes a
/// pick-ack failure; `Fatal` aborts the session.
#[derive(Debug, Clone)]
pub enum DraftError {
    BadInput(String),
    Permission(String),
    Shortage(String),
    Validation(String),
    Fatal(String),
}

impl DraftError {
    pub fn bad_input(detail: impl Into<String>) -> Self {
        Self::BadInput(detail.into())
    }
    pub fn permission(detail: impl Into<String>) -> Self {
        Self::Permission(detail.into())
    }
    pub fn shortage(detail: impl Into<String>) -> Self {
        Self::Shortage(detail.into())
    }
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn fatal(detail: impl Into<String>) -> Self {
        Self::Fatal(detail.into())
    }

    /// Whether this kind should ever reach the client that triggered it.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::BadInput(_) | Self::Permission(_))
    }
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadInput(d) => write!(f, "bad input: {d}"),
            Self::Permission(d) => write!(f, "permission denied: {d}"),
            Self::Shortage(d) => write!(f, "booster shortage: {d}"),
            Self::Validation(d) => write!(f, "validation failed: {d}"),
            Self::Fatal(d) => write!(f, "fatal: {d}"),
        }
    }
}

impl std::error::Error for DraftError {}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn silent_kinds() {
        assert!(DraftError::bad_input("x").is_silent());
        assert!(DraftError::permission("x").is_silent());
        assert!(!DraftError::shortage("x").is_silent());
        assert!(!DraftError::validation("x").is_silent());
        assert!(!DraftError::fatal("x").is_silent());
    }
}
