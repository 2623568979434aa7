use serde::Serialize;

use super::prelude::*;
use crate::config::AccountingDefaults;

/// The contact book, split by side as persisted on disk.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Contacts {
    pub clients: Vec<Contact>,
    pub fournisseurs: Vec<Contact>,
}

/// The aggregate root: one full bookkeeping workspace.
///
/// Mutations go through the application store, which re-normalizes
/// affected entities and persists the whole dossier after every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dossier {
    pub meta: Meta,
    pub company: Company,
    pub entries: Vec<Entry>,
    pub contacts: Contacts,
    pub pieces: Vec<Piece>,
    pub documents: Vec<Document>,
    #[serde(rename = "microPayments")]
    pub micro_payments: Vec<MicroPayment>,
    /// Data-URL signature blob shown on the printed journal.
    pub signature: String,
}

impl Dossier {
    pub fn default_with(defaults: &AccountingDefaults) -> Self {
        Self {
            meta: Meta::default_with(defaults),
            company: Company::default(),
            entries: Vec::new(),
            contacts: Contacts::default(),
            pieces: Vec::new(),
            documents: Vec::new(),
            micro_payments: Vec::new(),
            signature: String::new(),
        }
    }

    /// Display label for an entry's counterparty: the referenced contact's
    /// name when it still exists, else the free-text fallback, else "-".
    /// Income entries resolve against clients, expenses against suppliers.
    pub fn entry_contact_label(&self, entry: &Entry) -> String {
        if !entry.contact_id.is_empty() {
            let pool = match entry.kind {
                EntryKind::Income => &self.contacts.clients,
                EntryKind::Expense => &self.contacts.fournisseurs,
            };
            if let Some(contact) = pool.iter().find(|c| c.id == entry.contact_id) {
                return contact.name.clone();
            }
        }
        if entry.fallback_contact.is_empty() {
            "-".to_string()
        } else {
            entry.fallback_contact.clone()
        }
    }

    /// Display label for a document's client, with the same fallback rule.
    pub fn document_client_label(&self, doc: &Document) -> String {
        if !doc.client_id.is_empty() {
            if let Some(contact) = self.contacts.clients.iter().find(|c| c.id == doc.client_id) {
                return contact.name.clone();
            }
        }
        if doc.client_free.is_empty() {
            "-".to_string()
        } else {
            doc.client_free.clone()
        }
    }

    pub fn document_by_id(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }
}
