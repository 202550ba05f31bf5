//! Read-only card catalog shared by every session.
//!
//! Loading the catalog from disk happens elsewhere; this crate owns
//! only the in-memory shape (`Catalog`, `CardFacts`) and the small
//! helper types (`CardId`, `Rarity`, `Color`) the rest of the workspace
//! builds on.
mod card;
mod catalog;
mod color;
mod rarity;

pub use card::{CardId, SetCode};
pub use catalog::{Catalog, CatalogBuilder, CardFacts, LandSlot};
pub use color::Color;
pub use rarity::Rarity;
