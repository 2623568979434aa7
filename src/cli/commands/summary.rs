use anyhow::Result;

use common::{format_currency, format_date_fr};
use compute::micro::{due_breakdown, micro_summary};
use compute::totals::{dashboard_totals, journal_totals};

use crate::config::Settings;
use crate::images::DataUrlOptimizer;
use crate::store::DossierStore;

/// Prints the dashboard figures, journal totals and the micro-enterprise
/// levy summary for the dossier.
pub fn summary(settings: &Settings) -> Result<()> {
    let store = DossierStore::open(&settings.data_file, DataUrlOptimizer);
    let dossier = store.dossier();
    let currency = &dossier.meta.currency;

    println!("Dossier : {}", dossier.meta.dossier_title);
    if !dossier.meta.period_start.is_empty() || !dossier.meta.period_end.is_empty() {
        println!(
            "Période : {} – {}",
            format_date_fr(&dossier.meta.period_start),
            format_date_fr(&dossier.meta.period_end)
        );
    }
    println!();

    let dashboard = dashboard_totals(&dossier.entries);
    println!("Recettes TTC : {}", format_currency(dashboard.income, currency));
    println!("Dépenses TTC : {}", format_currency(dashboard.expense, currency));
    println!("Solde        : {}", format_currency(dashboard.balance(), currency));
    println!("TVA nette    : {}", format_currency(dashboard.tva, currency));
    println!();

    let journal = journal_totals(&dossier.entries);
    println!(
        "Journal ({} écritures) — HT {} / TVA {} / TTC {}",
        dossier.entries.len(),
        format_currency(journal.ht, currency),
        format_currency(journal.tva, currency),
        format_currency(journal.ttc, currency)
    );
    println!();

    let micro = micro_summary(dossier);
    println!("Micro-entreprise");
    println!("  CA encaissé : {}", format_currency(micro.turnover, currency));
    println!("  Cotisations : {}", format_currency(micro.due, currency));
    println!("  Déjà versé  : {}", format_currency(micro.paid, currency));
    println!("  Reste dû    : {}", format_currency(micro.balance, currency));
    println!("  Net estimé  : {}", format_currency(micro.net, currency));
    for activity in due_breakdown(&dossier.entries) {
        if !activity.turnover.is_zero() {
            println!(
                "  {} — recettes {} / dû {}",
                activity.label,
                format_currency(activity.turnover, currency),
                format_currency(activity.due, currency)
            );
        }
    }
    Ok(())
}
