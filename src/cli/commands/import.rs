use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Settings;
use crate::images::DataUrlOptimizer;
use crate::store::DossierStore;

/// Replaces the dossier with the content of a JSON export.
pub fn import_dossier(settings: &Settings, json_path: &Path) -> Result<()> {
    let payload = fs::read_to_string(json_path)
        .with_context(|| format!("Impossible de lire {}", json_path.display()))?;
    let mut store = DossierStore::open(&settings.data_file, DataUrlOptimizer);
    store.import_json(&payload)?;
    let dossier = store.dossier();
    println!(
        "Import terminé : {} écritures, {} contacts, {} pièces, {} documents",
        dossier.entries.len(),
        dossier.contacts.clients.len() + dossier.contacts.fournisseurs.len(),
        dossier.pieces.len(),
        dossier.documents.len()
    );
    Ok(())
}
