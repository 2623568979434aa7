use rust_decimal::Decimal;
use serde::Serialize;

use super::new_id;
use crate::config::AccountingDefaults;

/// Income or expense side of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }
}

/// A single ledger line.
///
/// `doc_id` is non-empty iff the entry was derived from an invoice by the
/// synchronizer; such entries are rewritten wholesale on the next sync.
/// Amounts follow the asymmetric HT/TTC policy in `compute::entry`: a
/// positive `amount_ht` is authoritative, otherwise a stored positive
/// `amount_ttc` is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub date: String,
    pub reference: String,
    pub doc_id: String,
    pub contact_id: String,
    pub fallback_contact: String,
    pub micro_activity: String,
    pub category: String,
    #[serde(rename = "amountHT")]
    pub amount_ht: Decimal,
    pub tva_rate: Decimal,
    #[serde(rename = "amountTTC")]
    pub amount_ttc: Decimal,
    pub payment_method: String,
    pub status: String,
    pub piece_id: String,
    pub notes: String,
}

impl Entry {
    /// A fresh entry with the configured defaults for the given side.
    pub fn default_for(kind: EntryKind, defaults: &AccountingDefaults) -> Self {
        let category = match kind {
            EntryKind::Income => defaults.first_income_category(),
            EntryKind::Expense => defaults.first_expense_category(),
        };
        Self {
            id: new_id(),
            kind,
            date: String::new(),
            reference: String::new(),
            doc_id: String::new(),
            contact_id: String::new(),
            fallback_contact: String::new(),
            micro_activity: String::new(),
            category,
            amount_ht: Decimal::ZERO,
            tva_rate: defaults.first_tva_rate(),
            amount_ttc: Decimal::ZERO,
            payment_method: defaults.first_payment_method(),
            status: defaults.first_status(),
            piece_id: String::new(),
            notes: String::new(),
        }
    }

    /// True when this entry is owned by the document synchronizer.
    pub fn is_derived(&self) -> bool {
        !self.doc_id.is_empty()
    }
}
