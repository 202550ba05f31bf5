mod bag;
mod effective;
mod error;
mod foil;
mod generator;
mod options;
mod targets;

pub use effective::ParticipantCollection;
pub use error::BoosterError;
pub use generator::{generate, Booster};
pub use options::{BoosterOptions, CustomCardList, Sheet};
pub use targets::{targets_for, RarityTargets};
