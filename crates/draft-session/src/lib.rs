mod draft;
mod draft_log;
mod events;
mod options;
mod participant;
mod registry;
mod session;
mod timer;

pub use draft::ActiveDraft;
pub use draft_log::{DraftLog, DraftLogPick, DraftLogUser};
pub use events::{
    dispatch_all, Effect, InboundEvent, OutboundEvent, PickCardPayload, RejoinState, Sink, UpdatedUserProps, UserInfo,
    WinstonSync,
};
pub use options::{DistributionMode, DraftLogRecipients, SessionOptions};
pub use participant::{Participant, ParticipantSnapshot};
pub use registry::Registry;
pub use session::Session;
pub use timer::{seconds_for_pick, PickTimer};
