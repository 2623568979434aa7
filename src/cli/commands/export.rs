use std::path::Path;

use anyhow::Result;

use crate::config::Settings;
use crate::images::DataUrlOptimizer;
use crate::store::DossierStore;

/// Writes the dossier as pretty-printed JSON into the export directory.
pub fn export_dossier(settings: &Settings, output: Option<&Path>) -> Result<()> {
    let store = DossierStore::open(&settings.data_file, DataUrlOptimizer);
    let dir = output.unwrap_or(&settings.export_dir);
    let target = store.export_to(dir, &settings.export_prefix)?;
    println!("Export écrit dans {}", target.display());
    Ok(())
}
