use anyhow::Result;

use model::entities::prelude::EntryKind;

use crate::cli::CategoryKind;
use crate::config::Settings;
use crate::images::DataUrlOptimizer;
use crate::store::DossierStore;

/// Removes a category from the dossier. Entries still using it keep their
/// other fields but the category is blanked, so removal of an in-use
/// category requires `--yes`.
pub fn remove_category(settings: &Settings, kind: CategoryKind, name: &str, yes: bool) -> Result<()> {
    let mut store = DossierStore::open(&settings.data_file, DataUrlOptimizer);
    let entry_kind = match kind {
        CategoryKind::Income => EntryKind::Income,
        CategoryKind::Expense => EntryKind::Expense,
    };
    if store.category_in_use(entry_kind, name) && !yes {
        println!(
            "La catégorie \"{name}\" est utilisée dans vos écritures. Relancez avec --yes pour la supprimer ; les lignes liées seront vidées."
        );
        return Ok(());
    }
    match entry_kind {
        EntryKind::Income => store.remove_income_category(name),
        EntryKind::Expense => store.remove_expense_category(name),
    }
    println!("Catégorie \"{name}\" supprimée.");
    Ok(())
}

/// Removes a payment method; the same confirmation gate applies.
pub fn remove_payment_method(settings: &Settings, name: &str, yes: bool) -> Result<()> {
    let mut store = DossierStore::open(&settings.data_file, DataUrlOptimizer);
    if store.payment_method_in_use(name) && !yes {
        println!(
            "Le moyen de paiement \"{name}\" est utilisé dans vos écritures. Relancez avec --yes pour le supprimer ; les lignes liées seront vidées."
        );
        return Ok(());
    }
    store.remove_payment_method(name);
    println!("Moyen de paiement \"{name}\" supprimé.");
    Ok(())
}
