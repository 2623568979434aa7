//! Quote and invoice totals.

use rust_decimal::Decimal;

use model::entities::prelude::*;

/// Aggregated amounts for a document, plus its deposit terms.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DocTotals {
    pub ht: Decimal,
    pub tva: Decimal,
    pub ttc: Decimal,
    pub deposit_percent: Decimal,
    pub deposit_paid: Decimal,
    pub deposit_due: Decimal,
}

impl DocTotals {
    /// What is still owed on an invoice after the recorded deposit,
    /// floored at zero.
    pub fn remaining_due(&self) -> Decimal {
        (self.ttc - self.deposit_paid).max(Decimal::ZERO)
    }
}

/// HT and TVA for a single document line. Lines only ever carry pre-tax
/// unit prices, so this is always the forward derivation.
pub fn line_amounts(line: &DocumentLine) -> (Decimal, Decimal) {
    let ht = line.unit * line.qty;
    let tva = ht * line.tva / Decimal::ONE_HUNDRED;
    (ht, tva)
}

pub fn compute_doc_totals(doc: &Document) -> DocTotals {
    let mut totals = DocTotals {
        deposit_percent: doc.deposit_percent,
        deposit_paid: doc.deposit_paid,
        ..DocTotals::default()
    };
    for line in &doc.lines {
        let (ht, tva) = line_amounts(line);
        totals.ht += ht;
        totals.tva += tva;
        totals.ttc += ht + tva;
    }
    if !totals.deposit_percent.is_zero() {
        totals.deposit_due = totals.ttc * totals.deposit_percent / Decimal::ONE_HUNDRED;
    }
    totals
}
