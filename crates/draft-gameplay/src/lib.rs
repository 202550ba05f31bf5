mod log;
mod sealed;
mod seat;
mod traditional;
mod winston;

pub use log::PickRecord;
pub use sealed::{distribute_jumpstart, distribute_sealed};
pub use seat::{neg_mod, virtual_player_order, Seat};
pub use traditional::{Phase, Traditional};
pub use winston::Winston;
