mod error;
mod id;

pub use error::DraftError;
pub use id::ID;

/// Marker types for `ID<T>` — these never get instantiated, they exist
/// only to keep session ids and user ids from being swapped at a call site.
pub struct SessionMarker;
pub struct UserMarker;

pub type SessionId = ID<SessionMarker>;
pub type UserId = ID<UserMarker>;

/// Number of picks after which the per-session timer's deadline starts
/// decaying toward its floor.
pub const TIMER_DECAY_PER_PICKS: u32 = 15;

/// Sets up a terminal logger at info level, quiet on file/line/thread noise.
#[cfg(feature = "server")]
pub fn init_logging() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    let _ = simplelog::CombinedLogger::init(vec![term]);
}
