use rust_decimal::Decimal;
use serde::Serialize;

use super::new_id;

/// A levy instalment paid to URSSAF.
///
/// `entry_id` is an ownership link: recording a payment synthesizes a
/// matching expense entry, and deleting the payment must delete exactly
/// that entry (cascade, not a weak reference).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroPayment {
    pub id: String,
    pub date: String,
    pub amount: Decimal,
    pub notes: String,
    pub entry_id: String,
}

impl Default for MicroPayment {
    fn default() -> Self {
        Self {
            id: new_id(),
            date: String::new(),
            amount: Decimal::ZERO,
            notes: String::new(),
            entry_id: String::new(),
        }
    }
}
