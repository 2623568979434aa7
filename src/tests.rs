#[cfg(test)]
mod integration_tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    use compute::micro::micro_summary;
    use compute::totals::dashboard_totals;
    use model::config::{AccountingDefaults, ImageLimits};
    use model::entities::prelude::*;

    use crate::images::DataUrlOptimizer;
    use crate::store::{DossierStore, StoreError, URSSAF_CATEGORY};

    fn defaults() -> AccountingDefaults {
        AccountingDefaults::default()
    }

    fn data_file(dir: &TempDir) -> PathBuf {
        dir.path().join("compta.json")
    }

    fn open_store(path: &Path) -> DossierStore<DataUrlOptimizer> {
        DossierStore::open(path, DataUrlOptimizer)
    }

    fn paid_invoice() -> Document {
        let mut doc = Document::default_with(&defaults());
        doc.kind = DocKind::Facture;
        doc.status = "payé".to_string();
        doc.number = "F-2024-007".to_string();
        doc.date = "2024-04-05".to_string();
        doc.lines[0].qty = Decimal::new(2, 0);
        doc.lines[0].unit = Decimal::new(50, 0);
        doc.lines[0].tva = Decimal::new(20, 0);
        doc
    }

    fn data_url(bytes: &[u8]) -> String {
        format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes))
    }

    #[test]
    fn test_paid_invoice_projects_one_entry() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&data_file(&dir));
        let doc = paid_invoice();
        let doc_id = doc.id.clone();

        store.upsert_document(doc);

        let entries = &store.dossier().entries;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].doc_id, doc_id);
        assert_eq!(entries[0].amount_ht, Decimal::new(100, 0));
        assert_eq!(entries[0].tva_rate, Decimal::new(20, 0));
        assert_eq!(entries[0].amount_ttc, Decimal::new(120, 0));
    }

    #[test]
    fn test_resaving_a_document_never_duplicates_its_entry() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&data_file(&dir));
        let doc = paid_invoice();
        store.upsert_document(doc.clone());
        let entry_id = store.dossier().entries[0].id.clone();

        let mut updated = doc;
        updated.lines[0].unit = Decimal::new(80, 0);
        store.upsert_document(updated);

        let entries = &store.dossier().entries;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, entry_id);
        assert_eq!(entries[0].amount_ht, Decimal::new(160, 0));
    }

    #[test]
    fn test_unpaying_an_invoice_withdraws_its_entry() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&data_file(&dir));
        let doc = paid_invoice();
        let doc_id = doc.id.clone();
        store.upsert_document(doc);
        assert_eq!(store.dossier().entries.len(), 1);

        store.set_document_status(&doc_id, "prévu", false);
        assert!(store.dossier().entries.is_empty());
    }

    #[test]
    fn test_deleting_a_document_cascades_to_its_entry() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&data_file(&dir));
        let doc = paid_invoice();
        let doc_id = doc.id.clone();
        store.upsert_document(doc);
        let manual = Entry::default_for(EntryKind::Expense, store.defaults());
        store.upsert_entry(manual.clone());

        store.remove_document(&doc_id);

        let entries = &store.dossier().entries;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, manual.id);
    }

    #[test]
    fn test_mark_paid_forces_a_quote_into_the_ledger() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&data_file(&dir));
        let mut doc = paid_invoice();
        doc.kind = DocKind::Devis;
        doc.status = "prévu".to_string();
        let doc_id = doc.id.clone();
        store.upsert_document(doc);
        assert!(store.dossier().entries.is_empty());

        store.mark_document_paid(&doc_id, true);
        assert_eq!(store.dossier().entries.len(), 1);
        assert_eq!(store.dossier().entries[0].status, "payé");

        // Unchecking keeps the (now "payé") status but stops forcing, and
        // a quote does not qualify on its own.
        store.mark_document_paid(&doc_id, false);
        assert!(store.dossier().entries.is_empty());
    }

    #[test]
    fn test_removing_an_income_category_blanks_matching_entries() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&data_file(&dir));
        let mut income = Entry::default_for(EntryKind::Income, store.defaults());
        income.category = "Formation".to_string();
        let mut expense = Entry::default_for(EntryKind::Expense, store.defaults());
        expense.category = "Formation".to_string();
        store.upsert_entry(income.clone());
        store.upsert_entry(expense.clone());
        assert!(store.category_in_use(EntryKind::Income, "Formation"));

        store.remove_income_category("Formation");

        let dossier = store.dossier();
        assert!(!dossier.meta.income_categories.contains(&"Formation".to_string()));
        let by_id = |id: &str| dossier.entries.iter().find(|e| e.id == id).unwrap();
        assert_eq!(by_id(&income.id).category, "");
        // Expense entries keep their category; only the income list shrank.
        assert_eq!(by_id(&expense.id).category, "Formation");
    }

    #[test]
    fn test_removing_a_payment_method_blanks_every_entry() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&data_file(&dir));
        let mut income = Entry::default_for(EntryKind::Income, store.defaults());
        income.payment_method = "Virement".to_string();
        let mut expense = Entry::default_for(EntryKind::Expense, store.defaults());
        expense.payment_method = "Virement".to_string();
        store.upsert_entry(income);
        store.upsert_entry(expense);

        store.remove_payment_method("Virement");

        let dossier = store.dossier();
        assert!(!dossier.meta.payment_methods.contains(&"Virement".to_string()));
        assert!(dossier.entries.iter().all(|e| e.payment_method.is_empty()));
    }

    #[test]
    fn test_added_categories_survive_reload() {
        let dir = TempDir::new().unwrap();
        let path = data_file(&dir);
        let mut store = open_store(&path);
        store.add_income_category("Dons");
        store.add_payment_method("Crypto");
        drop(store);

        let reloaded = open_store(&path);
        assert!(reloaded.dossier().meta.income_categories.contains(&"Dons".to_string()));
        assert!(reloaded.dossier().meta.payment_methods.contains(&"Crypto".to_string()));
    }

    #[test]
    fn test_micro_payment_owns_its_urssaf_expense() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&data_file(&dir));
        store.add_micro_payment(MicroPayment {
            date: "2024-04-30".to_string(),
            amount: Decimal::new(220, 0),
            notes: "T1".to_string(),
            ..MicroPayment::default()
        });

        let dossier = store.dossier();
        assert!(dossier.meta.expense_categories.contains(&URSSAF_CATEGORY.to_string()));
        assert_eq!(dossier.micro_payments.len(), 1);
        let payment = &dossier.micro_payments[0];
        assert!(!payment.entry_id.is_empty());

        let expense = dossier
            .entries
            .iter()
            .find(|e| e.id == payment.entry_id)
            .unwrap();
        assert_eq!(expense.kind, EntryKind::Expense);
        assert_eq!(expense.category, URSSAF_CATEGORY);
        assert_eq!(expense.reference, "URSSAF - T1");
        assert_eq!(expense.amount_ht, Decimal::new(220, 0));
        assert_eq!(expense.amount_ttc, Decimal::new(220, 0));
        assert_eq!(expense.tva_rate, Decimal::ZERO);
        assert_eq!(expense.status, "payé");
        assert_eq!(expense.payment_method, "CB");

        let payment_id = payment.id.clone();
        store.remove_micro_payment(&payment_id);
        assert!(store.dossier().micro_payments.is_empty());
        assert!(store.dossier().entries.is_empty());
    }

    #[test]
    fn test_micro_payment_without_notes_gets_bare_reference() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&data_file(&dir));
        store.add_micro_payment(MicroPayment {
            amount: Decimal::new(50, 0),
            ..MicroPayment::default()
        });
        assert_eq!(store.dossier().entries[0].reference, "URSSAF");
    }

    #[test]
    fn test_micro_turnover_override_changes_the_summary() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&data_file(&dir));
        let mut income = Entry::default_for(EntryKind::Income, store.defaults());
        income.micro_activity = "liberal".to_string();
        income.amount_ttc = Decimal::new(1000, 0);
        income.status = "payé".to_string();
        store.upsert_entry(income);

        assert_eq!(micro_summary(store.dossier()).due, Decimal::new(220, 0));

        store.set_micro_turnover(Decimal::new(500, 0));
        assert_eq!(micro_summary(store.dossier()).turnover, Decimal::new(500, 0));
        assert_eq!(micro_summary(store.dossier()).due, Decimal::new(110, 0));
    }

    #[test]
    fn test_export_import_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&data_file(&dir));
        store.upsert_document(paid_invoice());
        let mut entry = Entry::default_for(EntryKind::Expense, store.defaults());
        entry.amount_ht = Decimal::new(4550, 2);
        entry.tva_rate = Decimal::new(20, 0);
        store.upsert_entry(entry);
        let mut client = Contact::default_for(ContactKind::Client);
        client.name = "Atelier Dupont".to_string();
        store.add_contact(client);
        store
            .add_piece(Piece {
                reference: "T-42".to_string(),
                amount: Some(Decimal::new(1999, 2)),
                ..Piece::default()
            })
            .unwrap();
        let exported = store.export_string().unwrap();

        let mut other = open_store(&dir.path().join("other.json"));
        other.import_json(&exported).unwrap();

        assert_eq!(other.dossier(), store.dossier());
        assert_eq!(other.export_string().unwrap(), exported);
    }

    #[test]
    fn test_import_rejects_invalid_json_and_keeps_state() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&data_file(&dir));
        let mut entry = Entry::default_for(EntryKind::Income, store.defaults());
        entry.reference = "avant".to_string();
        store.upsert_entry(entry);

        let err = store.import_json("{not json").unwrap_err();
        assert!(matches!(err, StoreError::InvalidJson(_)));
        assert_eq!(store.dossier().entries.len(), 1);
        assert_eq!(store.dossier().entries[0].reference, "avant");
    }

    #[test]
    fn test_import_reconciles_documents_with_the_ledger() {
        let dir = TempDir::new().unwrap();
        let doc = paid_invoice();
        let payload = serde_json::json!({
            "documents": [serde_json::to_value(&doc).unwrap()],
            "entries": []
        });

        let mut store = open_store(&data_file(&dir));
        store.import_json(&payload.to_string()).unwrap();

        assert_eq!(store.dossier().entries.len(), 1);
        assert_eq!(store.dossier().entries[0].doc_id, doc.id);
    }

    #[test]
    fn test_oversized_piece_image_rejects_the_submission() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&data_file(&dir));
        let oversized = data_url(&vec![0u8; ImageLimits::default().ticket_max_bytes + 1]);

        let err = store
            .add_piece(Piece {
                image: oversized,
                ..Piece::default()
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::ImageRejected));
        assert!(store.dossier().pieces.is_empty());

        store
            .add_piece(Piece {
                image: data_url(b"small"),
                ..Piece::default()
            })
            .unwrap();
        assert_eq!(store.dossier().pieces.len(), 1);
    }

    #[test]
    fn test_import_keeps_pieces_but_drops_oversized_images() {
        let dir = TempDir::new().unwrap();
        let oversized = data_url(&vec![0u8; ImageLimits::default().ticket_max_bytes + 1]);
        let payload = serde_json::json!({
            "pieces": [{"reference": "T-1", "image": oversized}],
            "signature": oversized
        });

        let mut store = open_store(&data_file(&dir));
        store.import_json(&payload.to_string()).unwrap();

        let dossier = store.dossier();
        assert_eq!(dossier.pieces.len(), 1);
        assert_eq!(dossier.pieces[0].reference, "T-1");
        assert!(dossier.pieces[0].image.is_empty());
        assert!(dossier.signature.is_empty());
    }

    #[test]
    fn test_signature_budget_applies_on_set() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&data_file(&dir));
        let oversized = data_url(&vec![0u8; ImageLimits::default().signature_max_bytes + 1]);
        assert!(matches!(
            store.set_signature(&oversized),
            Err(StoreError::ImageRejected)
        ));

        store.set_signature(&data_url(b"paraphe")).unwrap();
        assert!(!store.dossier().signature.is_empty());
        store.clear_signature();
        assert!(store.dossier().signature.is_empty());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = data_file(&dir);
        fs::write(&path, "ceci n'est pas du JSON").unwrap();

        let mut store = open_store(&path);
        assert!(store.dossier().entries.is_empty());
        assert_eq!(store.dossier().meta.currency, "EUR");

        // The store stays fully usable and the next save repairs the file.
        store.upsert_entry(Entry::default_for(EntryKind::Income, store.defaults()));
        let reloaded = open_store(&path);
        assert_eq!(reloaded.dossier().entries.len(), 1);
    }

    #[test]
    fn test_missing_file_starts_empty_without_creating_it() {
        let dir = TempDir::new().unwrap();
        let path = data_file(&dir);
        let store = open_store(&path);
        assert!(store.dossier().entries.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_reset_persists_a_fresh_dossier() {
        let dir = TempDir::new().unwrap();
        let path = data_file(&dir);
        let mut store = open_store(&path);
        store.upsert_entry(Entry::default_for(EntryKind::Income, store.defaults()));
        store.reset();

        assert!(store.dossier().entries.is_empty());
        let reloaded = open_store(&path);
        assert!(reloaded.dossier().entries.is_empty());
    }

    #[test]
    fn test_persisted_json_keeps_historical_field_names() {
        let dir = TempDir::new().unwrap();
        let path = data_file(&dir);
        let mut store = open_store(&path);
        store.upsert_entry(Entry::default_for(EntryKind::Income, store.defaults()));
        store.add_micro_payment(MicroPayment::default());

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"amountHT\""));
        assert!(raw.contains("\"amountTTC\""));
        assert!(raw.contains("\"tvaRate\""));
        assert!(raw.contains("\"microPayments\""));
        assert!(raw.contains("\"incomeCategories\""));
    }

    #[test]
    fn test_export_file_name_uses_period_start() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&data_file(&dir));
        assert_eq!(store.export_file_name("compta"), "compta-periode.json");

        let info = crate::store::DossierInfo {
            dossier_title: "Exercice 2024".to_string(),
            period_start: "2024-01-01".to_string(),
            currency: "EUR".to_string(),
            ..crate::store::DossierInfo::default()
        };
        store.set_dossier_info(info);
        assert_eq!(store.export_file_name("compta"), "compta-2024-01-01.json");

        let target = store.export_to(dir.path(), "compta").unwrap();
        assert!(target.ends_with("compta-2024-01-01.json"));
        assert!(target.exists());
    }

    #[test]
    fn test_removed_contact_leaves_a_fallback_label() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&data_file(&dir));
        let mut client = Contact::default_for(ContactKind::Client);
        client.name = "Atelier Dupont".to_string();
        let client_id = client.id.clone();
        store.add_contact(client);

        let mut entry = Entry::default_for(EntryKind::Income, store.defaults());
        entry.contact_id = client_id.clone();
        entry.fallback_contact = "Dupont (libre)".to_string();
        store.upsert_entry(entry.clone());
        assert_eq!(
            store.dossier().entry_contact_label(&store.dossier().entries[0]),
            "Atelier Dupont"
        );

        store.remove_contact(&client_id);
        let dossier = store.dossier();
        assert_eq!(dossier.entries[0].contact_id, client_id);
        assert_eq!(dossier.entry_contact_label(&dossier.entries[0]), "Dupont (libre)");
    }

    #[test]
    fn test_dashboard_totals_after_document_sync() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&data_file(&dir));
        store.upsert_document(paid_invoice());
        let mut expense = Entry::default_for(EntryKind::Expense, store.defaults());
        expense.amount_ht = Decimal::new(50, 0);
        expense.tva_rate = Decimal::new(20, 0);
        store.upsert_entry(expense);

        let totals = dashboard_totals(&store.dossier().entries);
        assert_eq!(totals.income, Decimal::new(120, 0));
        assert_eq!(totals.expense, Decimal::new(60, 0));
        assert_eq!(totals.balance(), Decimal::new(60, 0));
        assert_eq!(totals.tva, Decimal::new(10, 0));
    }
}
