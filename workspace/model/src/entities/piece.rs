use rust_decimal::Decimal;
use serde::Serialize;

use super::new_id;

/// A supporting document (receipt/invoice photo). Linked to the ledger by
/// free-text reference only, never by id, so its lifecycle is independent
/// from entries.
///
/// `amount` keeps the "no amount entered" sentinel distinct from an
/// explicit amount: `None` means the user never recorded one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub id: String,
    pub date: String,
    pub reference: String,
    pub amount: Option<Decimal>,
    pub linked_entry: String,
    pub notes: String,
    /// Data-URL blob produced by the image optimizer; empty when the piece
    /// has no stored photo.
    pub image: String,
}

impl Default for Piece {
    fn default() -> Self {
        Self {
            id: new_id(),
            date: String::new(),
            reference: String::new(),
            amount: None,
            linked_entry: String::new(),
            notes: String::new(),
            image: String::new(),
        }
    }
}
