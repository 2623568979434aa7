use rust_decimal::Decimal;
use serde::Serialize;

use super::new_id;
use crate::config::AccountingDefaults;

/// Quote or invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    Devis,
    Facture,
}

impl DocKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocKind::Devis => "devis",
            DocKind::Facture => "facture",
        }
    }
}

/// A billable line, owned exclusively by its parent document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLine {
    pub id: String,
    pub description: String,
    pub qty: Decimal,
    pub unit: Decimal,
    pub tva: Decimal,
}

impl DocumentLine {
    pub fn default_with(defaults: &AccountingDefaults) -> Self {
        Self {
            id: new_id(),
            description: String::new(),
            qty: Decimal::ONE,
            unit: Decimal::ZERO,
            tva: defaults.first_tva_rate(),
        }
    }
}

/// A quote (`devis`) or invoice (`facture`).
///
/// Totals are always derived from `lines` (see `compute::document`), never
/// stored. A document has at least one line; normalization restores a
/// single empty line when the persisted list is missing or empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DocKind,
    pub number: String,
    pub date: String,
    pub due: String,
    pub client_id: String,
    pub client_free: String,
    pub micro_activity: String,
    pub status: String,
    pub payment_method: String,
    pub deposit_percent: Decimal,
    pub deposit_paid: Decimal,
    pub notes: String,
    pub lines: Vec<DocumentLine>,
}

impl Document {
    pub fn default_with(defaults: &AccountingDefaults) -> Self {
        Self {
            id: new_id(),
            kind: DocKind::Devis,
            number: String::new(),
            date: String::new(),
            due: String::new(),
            client_id: String::new(),
            client_free: String::new(),
            micro_activity: "liberal".to_string(),
            status: defaults.first_status(),
            payment_method: defaults.first_payment_method(),
            deposit_percent: Decimal::ZERO,
            deposit_paid: Decimal::ZERO,
            notes: String::new(),
            lines: vec![DocumentLine::default_with(defaults)],
        }
    }
}
