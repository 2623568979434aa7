//! Owns the in-memory dossier and its JSON file.
//!
//! Every mutation writes through to disk. A failed write never loses the
//! in-memory state; it is logged, loudly once per session, and the next
//! successful save clears the flag. Loading tolerates a missing or corrupt
//! file by starting over from defaults.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use compute::sync::{remove_derived, sync_all, sync_document};
use model::config::{AccountingDefaults, ImageLimits};
use model::entities::prelude::*;
use model::normalize::normalize_dossier;
use model::{merge_unique, Dossier};

use crate::images::{ImageBudget, ImageOptimizer};

pub const URSSAF_CATEGORY: &str = "Cotisations URSSAF";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Image exceeds its budget and was rejected")]
    ImageRejected,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Fields of the dossier header the settings form edits.
#[derive(Debug, Clone, Default)]
pub struct DossierInfo {
    pub company: String,
    pub dossier_title: String,
    pub period_start: String,
    pub period_end: String,
    pub currency: String,
    pub observations: String,
}

pub struct DossierStore<O: ImageOptimizer> {
    dossier: Dossier,
    path: PathBuf,
    defaults: AccountingDefaults,
    limits: ImageLimits,
    optimizer: O,
    storage_error_notified: bool,
}

impl<O: ImageOptimizer> DossierStore<O> {
    /// Loads the dossier from disk, or starts from defaults when the file
    /// is absent or unreadable, then reconciles documents and ledger.
    pub fn open(path: impl Into<PathBuf>, optimizer: O) -> Self {
        let path = path.into();
        let defaults = AccountingDefaults::default();
        let mut dossier = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(value) => {
                    info!(path = %path.display(), "loaded dossier");
                    normalize_dossier(&value, &defaults)
                }
                Err(error) => {
                    warn!(path = %path.display(), %error, "dossier file is not valid JSON, starting from defaults");
                    Dossier::default_with(&defaults)
                }
            },
            Err(error) => {
                warn!(path = %path.display(), %error, "dossier file unavailable, starting from defaults");
                Dossier::default_with(&defaults)
            }
        };
        sync_all(&mut dossier, &defaults);
        Self {
            dossier,
            path,
            defaults,
            limits: ImageLimits::default(),
            optimizer,
            storage_error_notified: false,
        }
    }

    pub fn dossier(&self) -> &Dossier {
        &self.dossier
    }

    pub fn defaults(&self) -> &AccountingDefaults {
        &self.defaults
    }

    /// Writes the current state to disk. The in-memory state stays current
    /// even when the write fails.
    pub fn save(&mut self) {
        let payload = match serde_json::to_string_pretty(&self.dossier) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(%error, "dossier could not be serialized");
                return;
            }
        };
        match fs::write(&self.path, payload) {
            Ok(()) => {
                self.storage_error_notified = false;
            }
            Err(error) => {
                if self.storage_error_notified {
                    debug!(%error, "saving the dossier failed again");
                } else {
                    warn!(
                        path = %self.path.display(),
                        %error,
                        "saving the dossier failed; reduce image sizes or remove some pieces"
                    );
                    self.storage_error_notified = true;
                }
            }
        }
    }

    /// Discards everything and persists a fresh default dossier.
    pub fn reset(&mut self) {
        self.dossier = Dossier::default_with(&self.defaults);
        self.save();
    }

    /// Replaces the state with an imported dossier. Piece images and the
    /// signature are re-validated against their budgets; an image that no
    /// longer fits is blanked while its piece is kept. A parse failure
    /// leaves the current state untouched.
    pub fn import_json(&mut self, payload: &str) -> Result<()> {
        let value: Value = serde_json::from_str(payload)?;
        let mut imported = normalize_dossier(&value, &self.defaults);

        let ticket = ImageBudget::ticket(&self.limits);
        for piece in &mut imported.pieces {
            if piece.image.is_empty() {
                continue;
            }
            match self.optimizer.optimize(&piece.image, &ticket) {
                Some(image) => piece.image = image,
                None => {
                    warn!(piece_id = %piece.id, "imported piece image exceeds the budget, dropping the image");
                    piece.image = String::new();
                }
            }
        }
        if !imported.signature.is_empty() {
            let budget = ImageBudget::signature(&self.limits);
            match self.optimizer.optimize(&imported.signature, &budget) {
                Some(signature) => imported.signature = signature,
                None => {
                    warn!("imported signature exceeds the budget, dropping it");
                    imported.signature = String::new();
                }
            }
        }

        self.dossier = imported;
        sync_all(&mut self.dossier, &self.defaults);
        self.save();
        info!(
            entries = self.dossier.entries.len(),
            documents = self.dossier.documents.len(),
            "dossier imported"
        );
        Ok(())
    }

    pub fn export_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.dossier)?)
    }

    /// `{prefix}-{periodStart}.json`, with a literal `periode` placeholder
    /// when no period start is set.
    pub fn export_file_name(&self, prefix: &str) -> String {
        let period = if self.dossier.meta.period_start.is_empty() {
            "periode"
        } else {
            &self.dossier.meta.period_start
        };
        format!("{prefix}-{period}.json")
    }

    pub fn export_to(&self, dir: &Path, prefix: &str) -> Result<PathBuf> {
        let target = dir.join(self.export_file_name(prefix));
        fs::write(&target, self.export_string()?)?;
        info!(path = %target.display(), "dossier exported");
        Ok(target)
    }

    // Entries

    pub fn upsert_entry(&mut self, entry: Entry) {
        match self.dossier.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.dossier.entries.push(entry),
        }
        self.save();
    }

    pub fn remove_entry(&mut self, id: &str) {
        self.dossier.entries.retain(|entry| entry.id != id);
        self.save();
    }

    // Contacts

    pub fn add_contact(&mut self, contact: Contact) {
        match contact.kind {
            ContactKind::Client => self.dossier.contacts.clients.push(contact),
            ContactKind::Fournisseur => self.dossier.contacts.fournisseurs.push(contact),
        }
        self.save();
    }

    /// Entries referencing the contact keep their `contactId`; labels fall
    /// back to the free-text contact when the reference dangles.
    pub fn remove_contact(&mut self, id: &str) {
        self.dossier.contacts.clients.retain(|c| c.id != id);
        self.dossier.contacts.fournisseurs.retain(|c| c.id != id);
        self.save();
    }

    // Pieces and signature

    /// Adds a piece. An attached image must fit the ticket budget or the
    /// whole submission is rejected.
    pub fn add_piece(&mut self, mut piece: Piece) -> Result<()> {
        if !piece.image.is_empty() {
            let budget = ImageBudget::ticket(&self.limits);
            piece.image = self
                .optimizer
                .optimize(&piece.image, &budget)
                .ok_or(StoreError::ImageRejected)?;
        }
        self.dossier.pieces.push(piece);
        self.save();
        Ok(())
    }

    pub fn remove_piece(&mut self, id: &str) {
        self.dossier.pieces.retain(|piece| piece.id != id);
        self.save();
    }

    pub fn set_signature(&mut self, data_url: &str) -> Result<()> {
        let budget = ImageBudget::signature(&self.limits);
        self.dossier.signature = self
            .optimizer
            .optimize(data_url, &budget)
            .ok_or(StoreError::ImageRejected)?;
        self.save();
        Ok(())
    }

    pub fn clear_signature(&mut self) {
        self.dossier.signature = String::new();
        self.save();
    }

    // Documents

    /// Inserts or replaces a document, then re-projects it onto the
    /// ledger. A document stripped of all lines gets one empty line back.
    pub fn upsert_document(&mut self, mut doc: Document) {
        if doc.lines.is_empty() {
            doc.lines.push(DocumentLine::default_with(&self.defaults));
        }
        let id = doc.id.clone();
        match self.dossier.documents.iter_mut().find(|d| d.id == id) {
            Some(existing) => *existing = doc,
            None => self.dossier.documents.push(doc),
        }
        let _ = sync_document(&mut self.dossier, &id, false, &self.defaults);
        self.save();
    }

    pub fn remove_document(&mut self, id: &str) {
        self.dossier.documents.retain(|d| d.id != id);
        remove_derived(&mut self.dossier, id);
        self.save();
    }

    /// Updates a document's status and re-projects it. Unknown ids are a
    /// no-op.
    pub fn set_document_status(&mut self, id: &str, status: &str, force: bool) {
        let Some(doc) = self.dossier.documents.iter_mut().find(|d| d.id == id) else {
            return;
        };
        doc.status = status.to_string();
        let _ = sync_document(&mut self.dossier, id, force, &self.defaults);
        self.save();
    }

    /// The "paid" checkbox on a document row. Checking forces the ledger
    /// projection with status "payé"; unchecking keeps the prior status
    /// (or "enregistré" when none) and lets the normal rules apply.
    pub fn mark_document_paid(&mut self, id: &str, paid: bool) {
        let Some(doc) = self.dossier.documents.iter().find(|d| d.id == id) else {
            return;
        };
        let status = if paid {
            "payé".to_string()
        } else if doc.status.is_empty() {
            "enregistré".to_string()
        } else {
            doc.status.clone()
        };
        self.set_document_status(id, &status, paid);
    }

    // Categories and payment methods

    pub fn add_income_category(&mut self, value: &str) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return;
        }
        self.dossier.meta.income_categories = merge_unique(
            &self.dossier.meta.income_categories,
            &[trimmed.to_string()],
        );
        self.save();
    }

    pub fn add_expense_category(&mut self, value: &str) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return;
        }
        self.dossier.meta.expense_categories = merge_unique(
            &self.dossier.meta.expense_categories,
            &[trimmed.to_string()],
        );
        self.save();
    }

    pub fn add_payment_method(&mut self, value: &str) {
        let trimmed = value.trim();
        if trimmed.is_empty() || self.dossier.meta.payment_methods.iter().any(|m| m == trimmed) {
            return;
        }
        self.dossier.meta.payment_methods.push(trimmed.to_string());
        self.save();
    }

    pub fn category_in_use(&self, kind: EntryKind, category: &str) -> bool {
        self.dossier
            .entries
            .iter()
            .any(|entry| entry.kind == kind && entry.category == category)
    }

    pub fn payment_method_in_use(&self, method: &str) -> bool {
        self.dossier
            .entries
            .iter()
            .any(|entry| entry.payment_method == method)
    }

    /// Drops the category and blanks it on every income entry that used
    /// it. The caller is expected to confirm when `category_in_use`.
    pub fn remove_income_category(&mut self, value: &str) {
        self.remove_category(EntryKind::Income, value);
    }

    pub fn remove_expense_category(&mut self, value: &str) {
        self.remove_category(EntryKind::Expense, value);
    }

    fn remove_category(&mut self, kind: EntryKind, value: &str) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return;
        }
        let list = match kind {
            EntryKind::Income => &mut self.dossier.meta.income_categories,
            EntryKind::Expense => &mut self.dossier.meta.expense_categories,
        };
        list.retain(|cat| cat != trimmed);
        for entry in &mut self.dossier.entries {
            if entry.kind == kind && entry.category == trimmed {
                entry.category = String::new();
            }
        }
        self.save();
    }

    /// Drops the payment method and blanks it on every entry, income and
    /// expense alike.
    pub fn remove_payment_method(&mut self, value: &str) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return;
        }
        self.dossier.meta.payment_methods.retain(|m| m != trimmed);
        for entry in &mut self.dossier.entries {
            if entry.payment_method == trimmed {
                entry.payment_method = String::new();
            }
        }
        self.save();
    }

    // Micro-enterprise levy

    /// Records a levy payment and synthesizes its expense counterpart in
    /// the ledger. The payment owns that entry through `entryId`.
    pub fn add_micro_payment(&mut self, payment: MicroPayment) {
        self.dossier.meta.expense_categories = merge_unique(
            &self.dossier.meta.expense_categories,
            &[URSSAF_CATEGORY.to_string()],
        );

        let mut expense = Entry::default_for(EntryKind::Expense, &self.defaults);
        expense.date = payment.date.clone();
        expense.reference = if payment.notes.is_empty() {
            "URSSAF".to_string()
        } else {
            format!("URSSAF - {}", payment.notes)
        };
        expense.category = URSSAF_CATEGORY.to_string();
        expense.tva_rate = Decimal::ZERO;
        expense.amount_ht = payment.amount;
        expense.amount_ttc = payment.amount;
        if let Some(method) = self.dossier.meta.payment_methods.first() {
            expense.payment_method = method.clone();
        }
        expense.status = "payé".to_string();
        expense.notes = payment.notes.clone();
        let entry_id = expense.id.clone();
        self.dossier.entries.push(expense);

        let MicroPayment {
            id, date, amount, notes, ..
        } = payment;
        let id = if id.is_empty() { model::new_id() } else { id };
        self.dossier.micro_payments.push(MicroPayment {
            id,
            date,
            amount,
            notes,
            entry_id,
        });
        self.save();
    }

    /// Removes a levy payment and cascade-deletes the expense entry it
    /// owns.
    pub fn remove_micro_payment(&mut self, id: &str) {
        let entry_id = self
            .dossier
            .micro_payments
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.entry_id.clone());
        if let Some(entry_id) = entry_id {
            if !entry_id.is_empty() {
                self.dossier.entries.retain(|e| e.id != entry_id);
            }
            self.dossier.micro_payments.retain(|p| p.id != id);
            self.save();
        }
    }

    pub fn set_micro_turnover(&mut self, amount: Decimal) {
        self.dossier.meta.micro_turnover = amount;
        self.save();
    }

    // Header and company

    pub fn set_dossier_info(&mut self, info: DossierInfo) {
        let meta = &mut self.dossier.meta;
        meta.company = info.company;
        meta.dossier_title = info.dossier_title;
        meta.period_start = info.period_start;
        meta.period_end = info.period_end;
        meta.currency = info.currency;
        meta.observations = info.observations;
        self.save();
    }

    pub fn set_company(&mut self, company: Company) {
        self.dossier.company = company;
        self.save();
    }
}
