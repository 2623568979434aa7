//! This file serves as the root for all entity modules.
//! The data models mirror the JSON dossier layout persisted on disk, so
//! every struct serializes with the historical field names (`amountHT`,
//! `docId`, ...). Entities only derive `Serialize`: inbound data always
//! goes through the `normalize` module instead of typed deserialization.

pub mod company;
pub mod contact;
pub mod document;
pub mod dossier;
pub mod entry;
pub mod meta;
pub mod micro_payment;
pub mod piece;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::company::Company;
    pub use super::contact::{Contact, ContactKind};
    pub use super::document::{DocKind, Document, DocumentLine};
    pub use super::dossier::{Contacts, Dossier};
    pub use super::entry::{Entry, EntryKind};
    pub use super::meta::Meta;
    pub use super::micro_payment::MicroPayment;
    pub use super::piece::Piece;
}

/// Generates a fresh entity id. Ids stay plain strings so foreign ids from
/// imported dossiers survive untouched.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
