//! One-way projection of documents onto the ledger.
//!
//! A paid invoice materializes exactly one income entry carrying its
//! totals; any other document state removes that entry. The projection is
//! idempotent: re-running it never duplicates entries and an updated
//! derived entry keeps its id.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use model::config::AccountingDefaults;
use model::entities::prelude::*;
use model::Dossier;

use crate::document::compute_doc_totals;
use crate::error::{ComputeError, Result};
use crate::micro::{is_paid, DEFAULT_ACTIVITY};

/// Builds the income entry a document projects to, or `None` when the
/// document does not qualify (not an invoice, or not paid) and `force` is
/// off. The effective TVA rate is backed out from the document totals and
/// rounded to two decimals.
pub fn derive_entry(
    doc: &Document,
    category: &str,
    force: bool,
    defaults: &AccountingDefaults,
) -> Option<Entry> {
    if !force && (doc.kind != DocKind::Facture || !is_paid(&doc.status)) {
        return None;
    }
    let status = if doc.status.is_empty() {
        "payé".to_string()
    } else {
        doc.status.clone()
    };
    let micro_activity = if doc.micro_activity.is_empty() {
        DEFAULT_ACTIVITY.to_string()
    } else {
        doc.micro_activity.clone()
    };
    let totals = compute_doc_totals(doc);
    let rate = if totals.ht > Decimal::ZERO {
        (totals.tva / totals.ht * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    };
    let mut entry = Entry::default_for(EntryKind::Income, defaults);
    entry.doc_id = doc.id.clone();
    entry.date = doc.date.clone();
    entry.reference = doc.number.clone();
    entry.contact_id = doc.client_id.clone();
    entry.fallback_contact = doc.client_free.clone();
    entry.micro_activity = micro_activity;
    entry.category = category.to_string();
    entry.amount_ht = totals.ht;
    entry.tva_rate = rate;
    entry.amount_ttc = totals.ttc;
    entry.payment_method = doc.payment_method.clone();
    entry.status = status;
    entry.notes = doc.notes.clone();
    Some(entry)
}

/// Drops every ledger entry derived from the given document.
pub fn remove_derived(dossier: &mut Dossier, doc_id: &str) {
    dossier.entries.retain(|entry| entry.doc_id != doc_id);
}

fn derived_category(dossier: &Dossier, defaults: &AccountingDefaults) -> String {
    dossier
        .meta
        .income_categories
        .first()
        .or_else(|| defaults.income_categories.first())
        .cloned()
        .unwrap_or_else(|| "Recettes".to_string())
}

/// Re-projects one document onto the ledger. With `force` the projection
/// materializes regardless of type and status, which backs the explicit
/// "mark paid" action on quotes.
pub fn sync_document(
    dossier: &mut Dossier,
    doc_id: &str,
    force: bool,
    defaults: &AccountingDefaults,
) -> Result<()> {
    let doc = dossier
        .document_by_id(doc_id)
        .cloned()
        .ok_or_else(|| ComputeError::UnknownDocument(doc_id.to_string()))?;
    let category = derived_category(dossier, defaults);
    match derive_entry(&doc, &category, force, defaults) {
        None => {
            remove_derived(dossier, doc_id);
        }
        Some(mut payload) => {
            match dossier.entries.iter_mut().find(|e| e.doc_id == doc_id) {
                Some(existing) => {
                    payload.id = existing.id.clone();
                    *existing = payload;
                }
                None => {
                    debug!(doc_id, "materializing ledger entry for document");
                    dossier.entries.push(payload);
                }
            }
        }
    }
    Ok(())
}

/// Re-projects every document, never forced. Run after load and import so
/// the ledger agrees with the documents before anything is displayed.
pub fn sync_all(dossier: &mut Dossier, defaults: &AccountingDefaults) {
    let ids: Vec<String> = dossier.documents.iter().map(|d| d.id.clone()).collect();
    for id in ids {
        // Ids come straight from dossier.documents.
        let _ = sync_document(dossier, &id, false, defaults);
    }
}
