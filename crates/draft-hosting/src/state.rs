use draft_cards::Catalog;
use draft_core::UserId;
use draft_session::Registry;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;

/// Process-wide state handed to every actix-web worker via `web::Data`.
/// `Registry` is plain synchronous data (see its doc comment); a
/// `std::sync::Mutex` is enough since no handler ever awaits while
/// holding the lock.
pub struct AppState {
    pub registry: Mutex<Registry>,
    pub catalog: Catalog,
    /// One outbound channel per live WebSocket connection. Looked up by
    /// `UserId` rather than by connection so that `ToSession`/`ToAll`
    /// fan-out can address a participant without the gateway task
    /// holding a session handle of its own.
    pub connections: Mutex<HashMap<UserId, UnboundedSender<String>>>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            registry: Mutex::new(Registry::new()),
            catalog,
            connections: Mutex::new(HashMap::new()),
        }
    }
}
