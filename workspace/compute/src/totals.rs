//! Dashboard and journal aggregates over the ledger.

use rust_decimal::Decimal;

use model::entities::prelude::*;

use crate::entry::compute_entry_amounts;

/// Headline dashboard figures. TVA is signed: collected on income,
/// deductible on expenses.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashboardTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub tva: Decimal,
}

impl DashboardTotals {
    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }
}

pub fn dashboard_totals(entries: &[Entry]) -> DashboardTotals {
    let mut totals = DashboardTotals::default();
    for entry in entries {
        let amounts = compute_entry_amounts(entry);
        match entry.kind {
            EntryKind::Income => {
                totals.income += amounts.ttc;
                totals.tva += amounts.tva;
            }
            EntryKind::Expense => {
                totals.expense += amounts.ttc;
                totals.tva -= amounts.tva;
            }
        }
    }
    totals
}

/// Journal footer totals. HT sums the raw stored values while TVA/TTC sum
/// the derived ones, matching the journal columns.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JournalTotals {
    pub ht: Decimal,
    pub tva: Decimal,
    pub ttc: Decimal,
}

pub fn journal_totals(entries: &[Entry]) -> JournalTotals {
    let mut totals = JournalTotals::default();
    for entry in entries {
        let amounts = compute_entry_amounts(entry);
        totals.ht += entry.amount_ht;
        totals.tva += amounts.tva;
        totals.ttc += amounts.ttc;
    }
    totals
}

/// Income TTC minus expense TTC over every entry, ignoring status.
pub fn net_balance(entries: &[Entry]) -> Decimal {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for entry in entries {
        let ttc = compute_entry_amounts(entry).ttc;
        match entry.kind {
            EntryKind::Income => income += ttc,
            EntryKind::Expense => expense += ttc,
        }
    }
    income - expense
}
