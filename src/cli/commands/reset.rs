use anyhow::Result;

use crate::config::Settings;
use crate::images::DataUrlOptimizer;
use crate::store::DossierStore;

/// Resets the dossier to defaults. Destructive, so it only acts with an
/// explicit `--yes`.
pub fn reset_dossier(settings: &Settings, yes: bool) -> Result<()> {
    if !yes {
        println!("La remise à zéro supprime toutes les données. Relancez avec --yes pour confirmer.");
        return Ok(());
    }
    let mut store = DossierStore::open(&settings.data_file, DataUrlOptimizer);
    store.reset();
    println!("Dossier remis à zéro.");
    Ok(())
}
