//! Micro-enterprise social levy (cotisations URSSAF).
//!
//! Turnover is taken from paid income entries, levy rates from a fixed
//! activity table. A manually entered annual turnover overrides the
//! entry-derived figure; that path applies the unweighted average of the
//! per-entry rates, which can differ from the turnover-weighted sum the
//! entry-derived path produces. Both behaviors are load-bearing and kept
//! as-is.

use rust_decimal::Decimal;

use model::entities::prelude::*;
use model::Dossier;

use crate::entry::compute_entry_amounts;

pub const DEFAULT_ACTIVITY: &str = "liberal";

#[derive(Debug, Clone, PartialEq)]
pub struct MicroActivity {
    pub value: &'static str,
    pub label: &'static str,
    pub rate: Decimal,
}

/// The activity table with 2024 levy rates: ventes 12.8%, BIC 21.2%,
/// BNC/libéral 22%.
pub fn micro_activities() -> Vec<MicroActivity> {
    vec![
        MicroActivity {
            value: "ventes",
            label: "Ventes / commerce",
            rate: Decimal::new(128, 1),
        },
        MicroActivity {
            value: "bic",
            label: "Prestations artisanales (BIC)",
            rate: Decimal::new(212, 1),
        },
        MicroActivity {
            value: "liberal",
            label: "Libéral / BNC",
            rate: Decimal::new(22, 0),
        },
    ]
}

/// Rate for an activity key, zero when unknown.
pub fn activity_rate(activity: &str) -> Decimal {
    micro_activities()
        .into_iter()
        .find(|a| a.value == activity)
        .map(|a| a.rate)
        .unwrap_or(Decimal::ZERO)
}

pub fn activity_label(activity: &str) -> String {
    micro_activities()
        .into_iter()
        .find(|a| a.value == activity)
        .map(|a| a.label.to_string())
        .unwrap_or_else(|| "Activité".to_string())
}

/// Whether a status string counts as settled. An empty status does: a
/// derived entry with no explicit status is treated as paid.
pub fn is_paid(status: &str) -> bool {
    if status.is_empty() {
        return true;
    }
    let value = status.to_lowercase();
    value.contains("pay") || value == "enregistré"
}

fn entry_activity(entry: &Entry) -> &str {
    if entry.micro_activity.is_empty() {
        DEFAULT_ACTIVITY
    } else {
        &entry.micro_activity
    }
}

fn paid_income(entries: &[Entry]) -> impl Iterator<Item = &Entry> {
    entries
        .iter()
        .filter(|e| e.kind == EntryKind::Income && is_paid(&e.status))
}

/// Unweighted mean of the levy rates applicable to paid income entries.
/// With no such entries, the first table rate applies.
pub fn average_rate(entries: &[Entry]) -> Decimal {
    let rates: Vec<Decimal> = paid_income(entries)
        .map(|e| activity_rate(entry_activity(e)))
        .collect();
    if rates.is_empty() {
        return micro_activities()
            .first()
            .map(|a| a.rate)
            .unwrap_or(Decimal::ZERO);
    }
    let count = Decimal::from(rates.len() as u64);
    rates.iter().sum::<Decimal>() / count
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MicroDue {
    pub turnover: Decimal,
    pub due: Decimal,
}

/// Turnover and levy due, derived from paid income entries only.
pub fn due_from_entries(entries: &[Entry]) -> MicroDue {
    let mut acc = MicroDue::default();
    for entry in paid_income(entries) {
        let amount = compute_entry_amounts(entry).ttc;
        let rate = activity_rate(entry_activity(entry));
        acc.turnover += amount;
        acc.due += amount * rate / Decimal::ONE_HUNDRED;
    }
    acc
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityDue {
    pub value: &'static str,
    pub label: &'static str,
    pub turnover: Decimal,
    pub due: Decimal,
}

/// Per-activity turnover and due, one row per table activity even when
/// no entry contributed to it.
pub fn due_breakdown(entries: &[Entry]) -> Vec<ActivityDue> {
    micro_activities()
        .into_iter()
        .map(|activity| {
            let mut row = ActivityDue {
                value: activity.value,
                label: activity.label,
                turnover: Decimal::ZERO,
                due: Decimal::ZERO,
            };
            for entry in paid_income(entries) {
                if entry_activity(entry) == activity.value {
                    let amount = compute_entry_amounts(entry).ttc;
                    row.turnover += amount;
                    row.due += amount * activity.rate / Decimal::ONE_HUNDRED;
                }
            }
            row
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MicroSummary {
    pub turnover: Decimal,
    pub due: Decimal,
    pub paid: Decimal,
    pub balance: Decimal,
    pub net: Decimal,
}

/// The micro-enterprise panel figures for a whole dossier.
pub fn micro_summary(dossier: &Dossier) -> MicroSummary {
    let from_entries = due_from_entries(&dossier.entries);
    let (turnover, due) = if dossier.meta.micro_turnover.is_zero() {
        (from_entries.turnover, from_entries.due)
    } else {
        let turnover = dossier.meta.micro_turnover;
        (
            turnover,
            turnover * average_rate(&dossier.entries) / Decimal::ONE_HUNDRED,
        )
    };
    let paid: Decimal = dossier.micro_payments.iter().map(|p| p.amount).sum();
    MicroSummary {
        turnover,
        due,
        paid,
        balance: due - paid,
        net: turnover - due,
    }
}
