use serde::Serialize;

use super::new_id;

/// Client or supplier side of the contact book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Client,
    Fournisseur,
}

/// A reusable client/supplier card. Entries and documents reference
/// contacts by id only; deleting a contact leaves those references
/// dangling and display falls back to the free-text contact field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContactKind,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub siret: String,
    pub address: String,
    pub zip: String,
    pub city: String,
    pub notes: String,
}

impl Contact {
    pub fn default_for(kind: ContactKind) -> Self {
        Self {
            id: new_id(),
            kind,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            siret: String::new(),
            address: String::new(),
            zip: String::new(),
            city: String::new(),
            notes: String::new(),
        }
    }
}
