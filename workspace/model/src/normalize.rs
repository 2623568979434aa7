//! Shape coercion for persisted and imported dossiers.
//!
//! Every function here is total: whatever the raw JSON looks like, the
//! result is a fully-shaped entity with type-appropriate defaults filled
//! in. The same pipeline runs at initial load, on JSON import and when
//! constructing in-place defaults, so the rest of the system never has to
//! reason about missing or mistyped fields. Normalization is idempotent:
//! re-normalizing a serialized entity is a no-op.

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use common::parse_decimal;

use crate::config::AccountingDefaults;
use crate::entities::new_id;
use crate::entities::prelude::*;

/// Unions two string lists, deduplicating while preserving first-seen
/// order and skipping empty values. User-added categories and payment
/// methods are merged with configured defaults this way so none is ever
/// silently dropped.
pub fn merge_unique(base: &[String], extra: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for item in base.iter().chain(extra.iter()) {
        if !item.is_empty() && !merged.iter().any(|existing| existing == item) {
            merged.push(item.clone());
        }
    }
    merged
}

/// `merge_unique` over a raw JSON value: arrays contribute their items, a
/// bare truthy scalar counts as a one-element list, anything else as empty.
fn merge_unique_value(base: &[String], extra: &Value) -> Vec<String> {
    let extra_list: Vec<String> = match extra {
        Value::Array(items) => items.iter().filter_map(coerce_string).collect(),
        other => coerce_string(other).into_iter().collect(),
    };
    merge_unique(base, &extra_list)
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// JS-style truthiness, for the flags persisted dossiers keep loose.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}

/// A present field overrides the default even when empty; only an absent
/// field falls back. Non-string scalars are coerced to their text form.
fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).map(|value| match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn string_or(map: &Map<String, Value>, key: &str, default: String) -> String {
    string_field(map, key).unwrap_or(default)
}

fn string_or_empty(map: &Map<String, Value>, key: &str) -> String {
    string_field(map, key).unwrap_or_default()
}

fn decimal_field(map: &Map<String, Value>, key: &str) -> Decimal {
    map.get(key).map(parse_decimal).unwrap_or(Decimal::ZERO)
}

pub fn normalize_entry(raw: &Value, defaults: &AccountingDefaults) -> Entry {
    let kind = match raw.get("type").and_then(Value::as_str) {
        Some("expense") => EntryKind::Expense,
        _ => EntryKind::Income,
    };
    let base = Entry::default_for(kind, defaults);
    let Some(map) = raw.as_object() else {
        return base;
    };
    Entry {
        id: string_or(map, "id", base.id),
        kind,
        date: string_or_empty(map, "date"),
        reference: string_or(map, "reference", base.reference),
        doc_id: string_or_empty(map, "docId"),
        contact_id: string_or(map, "contactId", base.contact_id),
        fallback_contact: string_or(map, "fallbackContact", base.fallback_contact),
        micro_activity: string_or_empty(map, "microActivity"),
        category: string_or(map, "category", base.category),
        amount_ht: decimal_field(map, "amountHT"),
        tva_rate: decimal_field(map, "tvaRate"),
        amount_ttc: decimal_field(map, "amountTTC"),
        payment_method: string_or(map, "paymentMethod", base.payment_method),
        status: string_or(map, "status", base.status),
        piece_id: string_or(map, "pieceId", base.piece_id),
        notes: string_or(map, "notes", base.notes),
    }
}

pub fn normalize_contact(raw: &Value, fallback_kind: ContactKind) -> Contact {
    let Some(map) = raw.as_object() else {
        return Contact::default_for(fallback_kind);
    };
    let kind = match map.get("type").and_then(Value::as_str) {
        Some("fournisseur") => ContactKind::Fournisseur,
        _ => ContactKind::Client,
    };
    let base = Contact::default_for(kind);
    Contact {
        id: string_or(map, "id", base.id),
        kind,
        name: string_or(map, "name", base.name),
        email: string_or(map, "email", base.email),
        phone: string_or(map, "phone", base.phone),
        siret: string_or_empty(map, "siret"),
        address: string_or_empty(map, "address"),
        zip: string_or_empty(map, "zip"),
        city: string_or_empty(map, "city"),
        notes: string_or(map, "notes", base.notes),
    }
}

pub fn normalize_piece(raw: &Value) -> Piece {
    let base = Piece::default();
    let Some(map) = raw.as_object() else {
        return base;
    };
    // "No amount entered" is a real state: only a truthy raw amount
    // becomes a number, everything else keeps the None sentinel.
    let amount = match map.get("amount") {
        Some(value) if truthy(value) => Some(parse_decimal(value)),
        _ => None,
    };
    Piece {
        id: string_or(map, "id", base.id),
        date: string_or(map, "date", base.date),
        reference: string_or(map, "reference", base.reference),
        amount,
        linked_entry: string_or(map, "linkedEntry", base.linked_entry),
        notes: string_or(map, "notes", base.notes),
        image: string_or(map, "image", base.image),
    }
}

pub fn normalize_doc_line(raw: &Value, defaults: &AccountingDefaults) -> DocumentLine {
    let base = DocumentLine::default_with(defaults);
    let Some(map) = raw.as_object() else {
        return base;
    };
    DocumentLine {
        id: string_or(map, "id", base.id),
        description: string_or(map, "description", base.description),
        qty: map.get("qty").map(parse_decimal).unwrap_or(base.qty),
        unit: decimal_field(map, "unit"),
        tva: map.get("tva").map(parse_decimal).unwrap_or(base.tva),
    }
}

pub fn normalize_document(raw: &Value, defaults: &AccountingDefaults) -> Document {
    let base = Document::default_with(defaults);
    let Some(map) = raw.as_object() else {
        return base;
    };
    let kind = match map.get("type").and_then(Value::as_str) {
        Some("facture") => DocKind::Facture,
        _ => DocKind::Devis,
    };
    let lines = match map.get("lines").and_then(Value::as_array) {
        Some(items) if !items.is_empty() => items
            .iter()
            .map(|line| normalize_doc_line(line, defaults))
            .collect(),
        // A document with zero lines is invalid and gets one empty line.
        _ => vec![DocumentLine::default_with(defaults)],
    };
    Document {
        id: string_or(map, "id", base.id),
        kind,
        number: string_or(map, "number", base.number),
        date: string_or(map, "date", base.date),
        due: string_or(map, "due", base.due),
        client_id: string_or(map, "clientId", base.client_id),
        client_free: string_or(map, "clientFree", base.client_free),
        micro_activity: string_or(map, "microActivity", base.micro_activity),
        status: string_or(map, "status", base.status),
        payment_method: string_or(map, "paymentMethod", base.payment_method),
        deposit_percent: decimal_field(map, "depositPercent"),
        deposit_paid: decimal_field(map, "depositPaid"),
        notes: string_or(map, "notes", base.notes),
        lines,
    }
}

pub fn normalize_micro_payment(raw: &Value) -> MicroPayment {
    let Some(map) = raw.as_object() else {
        return MicroPayment::default();
    };
    let id = string_field(map, "id")
        .filter(|s| !s.is_empty())
        .unwrap_or_else(new_id);
    MicroPayment {
        id,
        date: string_or_empty(map, "date"),
        amount: decimal_field(map, "amount"),
        notes: string_or_empty(map, "notes"),
        entry_id: string_or_empty(map, "entryId"),
    }
}

pub fn normalize_company(raw: &Value) -> Company {
    let Some(map) = raw.as_object() else {
        return Company::default();
    };
    Company {
        legal_name: string_or_empty(map, "legalName"),
        status: string_or_empty(map, "status"),
        siren: string_or_empty(map, "siren"),
        vat: string_or_empty(map, "vat"),
        phone: string_or_empty(map, "phone"),
        email: string_or_empty(map, "email"),
        address: string_or_empty(map, "address"),
        logo: string_or_empty(map, "logo"),
        micro_tva_exempt: map.get("microTvaExempt").map(truthy).unwrap_or(false),
        iban: string_or_empty(map, "iban"),
    }
}

pub fn normalize_meta(raw: &Value, defaults: &AccountingDefaults) -> Meta {
    let base = Meta::default_with(defaults);
    let Some(map) = raw.as_object() else {
        return base;
    };
    Meta {
        company: string_or(map, "company", base.company),
        dossier_title: string_or(map, "dossierTitle", base.dossier_title),
        period_start: string_or(map, "periodStart", base.period_start),
        period_end: string_or(map, "periodEnd", base.period_end),
        currency: string_or(map, "currency", base.currency),
        observations: string_or(map, "observations", base.observations),
        income_categories: merge_unique_value(
            &defaults.income_categories,
            map.get("incomeCategories").unwrap_or(&Value::Null),
        ),
        expense_categories: merge_unique_value(
            &defaults.expense_categories,
            map.get("expenseCategories").unwrap_or(&Value::Null),
        ),
        payment_methods: merge_unique_value(
            &defaults.payment_methods,
            map.get("paymentMethods").unwrap_or(&Value::Null),
        ),
        micro_turnover: decimal_field(map, "microTurnover"),
    }
}

/// Normalizes a whole persisted or imported dossier. Any subset of fields
/// may be absent or mis-shaped; the result is always a consistent dossier.
pub fn normalize_dossier(raw: &Value, defaults: &AccountingDefaults) -> Dossier {
    let Some(map) = raw.as_object() else {
        return Dossier::default_with(defaults);
    };
    let entity_list = |key: &str| map.get(key).and_then(Value::as_array);
    let contacts = map.get("contacts").and_then(Value::as_object);
    let contact_list = |key: &str, kind: ContactKind| -> Vec<Contact> {
        contacts
            .and_then(|c| c.get(key))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|item| normalize_contact(item, kind))
                    .collect()
            })
            .unwrap_or_default()
    };
    Dossier {
        meta: normalize_meta(map.get("meta").unwrap_or(&Value::Null), defaults),
        company: normalize_company(map.get("company").unwrap_or(&Value::Null)),
        entries: entity_list("entries")
            .map(|items| {
                items
                    .iter()
                    .map(|item| normalize_entry(item, defaults))
                    .collect()
            })
            .unwrap_or_default(),
        contacts: Contacts {
            clients: contact_list("clients", ContactKind::Client),
            fournisseurs: contact_list("fournisseurs", ContactKind::Fournisseur),
        },
        pieces: entity_list("pieces")
            .map(|items| items.iter().map(normalize_piece).collect())
            .unwrap_or_default(),
        documents: entity_list("documents")
            .map(|items| {
                items
                    .iter()
                    .map(|item| normalize_document(item, defaults))
                    .collect()
            })
            .unwrap_or_default(),
        micro_payments: entity_list("microPayments")
            .map(|items| items.iter().map(normalize_micro_payment).collect())
            .unwrap_or_default(),
        signature: string_or_empty(map, "signature"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> AccountingDefaults {
        AccountingDefaults::default()
    }

    #[test]
    fn test_merge_unique_preserves_order_and_dedupes() {
        let base = vec!["CB".to_string(), "Espèces".to_string()];
        let extra = vec!["Virement".to_string(), "CB".to_string(), String::new()];
        assert_eq!(merge_unique(&base, &extra), vec!["CB", "Espèces", "Virement"]);
    }

    #[test]
    fn test_merge_unique_value_accepts_bare_scalar() {
        let base = vec!["CB".to_string()];
        assert_eq!(
            merge_unique_value(&base, &json!("Chèque")),
            vec!["CB", "Chèque"]
        );
        assert_eq!(merge_unique_value(&base, &json!(null)), vec!["CB"]);
    }

    #[test]
    fn test_normalize_entry_coerces_type_and_numbers() {
        let entry = normalize_entry(
            &json!({
                "type": "EXPENSE",
                "amountHT": "100.50",
                "tvaRate": null,
                "amountTTC": "n/a",
                "date": "2024-01-15"
            }),
            &defaults(),
        );
        // Only the exact string "expense" selects the expense side.
        assert_eq!(entry.kind, EntryKind::Income);
        assert_eq!(entry.amount_ht, Decimal::new(10050, 2));
        assert_eq!(entry.tva_rate, Decimal::ZERO);
        assert_eq!(entry.amount_ttc, Decimal::ZERO);
        assert_eq!(entry.date, "2024-01-15");
        assert_eq!(entry.category, "Ventes produits");
        assert!(!entry.id.is_empty());

        let expense = normalize_entry(&json!({"type": "expense"}), &defaults());
        assert_eq!(expense.kind, EntryKind::Expense);
        assert_eq!(expense.category, "Achats marchandises");
    }

    #[test]
    fn test_normalize_entry_is_idempotent() {
        let raw = json!({
            "type": "expense",
            "amountHT": 40,
            "tvaRate": 20,
            "category": "",
            "reference": "F-2024-001"
        });
        let once = normalize_entry(&raw, &defaults());
        let twice = normalize_entry(&serde_json::to_value(&once).unwrap(), &defaults());
        assert_eq!(once, twice);
        // A present-but-empty category is kept, not replaced by a default.
        assert_eq!(once.category, "");
    }

    #[test]
    fn test_normalize_entry_non_object_gets_defaults() {
        let entry = normalize_entry(&json!(null), &defaults());
        assert_eq!(entry.kind, EntryKind::Income);
        assert_eq!(entry.status, "prévu");
    }

    #[test]
    fn test_normalize_contact_kind_from_record_not_list() {
        let contact = normalize_contact(
            &json!({"type": "fournisseur", "name": "Grossiste"}),
            ContactKind::Client,
        );
        assert_eq!(contact.kind, ContactKind::Fournisseur);
        assert_eq!(contact.name, "Grossiste");

        let fallback = normalize_contact(&json!(null), ContactKind::Fournisseur);
        assert_eq!(fallback.kind, ContactKind::Fournisseur);
    }

    #[test]
    fn test_normalize_piece_amount_sentinel() {
        let no_amount = normalize_piece(&json!({"reference": "T-1"}));
        assert_eq!(no_amount.amount, None);

        let zero = normalize_piece(&json!({"amount": 0}));
        assert_eq!(zero.amount, None);

        let empty = normalize_piece(&json!({"amount": ""}));
        assert_eq!(empty.amount, None);

        let textual_zero = normalize_piece(&json!({"amount": "0"}));
        assert_eq!(textual_zero.amount, Some(Decimal::ZERO));

        let real = normalize_piece(&json!({"amount": "12.30"}));
        assert_eq!(real.amount, Some(Decimal::new(1230, 2)));
    }

    #[test]
    fn test_normalize_piece_is_idempotent() {
        let once = normalize_piece(&json!({"amount": 25, "image": "data:image/jpeg;base64,Zg=="}));
        let twice = normalize_piece(&serde_json::to_value(&once).unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_document_restores_missing_lines() {
        let no_lines = normalize_document(&json!({"type": "facture"}), &defaults());
        assert_eq!(no_lines.kind, DocKind::Facture);
        assert_eq!(no_lines.lines.len(), 1);
        assert_eq!(no_lines.lines[0].qty, Decimal::ONE);

        let empty_lines = normalize_document(&json!({"lines": []}), &defaults());
        assert_eq!(empty_lines.lines.len(), 1);

        let bogus_lines = normalize_document(&json!({"lines": "oops"}), &defaults());
        assert_eq!(bogus_lines.lines.len(), 1);
    }

    #[test]
    fn test_normalize_document_keeps_line_ids() {
        let doc = normalize_document(
            &json!({"lines": [{"id": "line-1", "qty": "2", "unit": 50, "tva": 20}]}),
            &defaults(),
        );
        assert_eq!(doc.lines[0].id, "line-1");
        assert_eq!(doc.lines[0].qty, Decimal::new(2, 0));
        assert_eq!(doc.lines[0].unit, Decimal::new(50, 0));
    }

    #[test]
    fn test_normalize_micro_payment_regenerates_empty_id() {
        let payment = normalize_micro_payment(&json!({"id": "", "amount": "150"}));
        assert!(!payment.id.is_empty());
        assert_eq!(payment.amount, Decimal::new(150, 0));
    }

    #[test]
    fn test_normalize_meta_merges_category_sets() {
        let meta = normalize_meta(
            &json!({"incomeCategories": ["Ventes produits", "Dons"], "paymentMethods": "Crypto"}),
            &defaults(),
        );
        assert_eq!(meta.income_categories.len(), defaults().income_categories.len() + 1);
        assert_eq!(meta.income_categories.last().unwrap(), "Dons");
        assert!(meta.payment_methods.contains(&"Crypto".to_string()));
        assert_eq!(meta.currency, "EUR");
    }

    #[test]
    fn test_normalize_dossier_tolerates_any_subset() {
        let dossier = normalize_dossier(&json!({"entries": [{"type": "expense"}]}), &defaults());
        assert_eq!(dossier.entries.len(), 1);
        assert!(dossier.documents.is_empty());
        assert_eq!(dossier.meta.dossier_title, "Comptabilité locale");

        let garbage = normalize_dossier(&json!("not a dossier"), &defaults());
        assert!(garbage.entries.is_empty());
    }

    #[test]
    fn test_normalize_company_flag_truthiness() {
        assert!(normalize_company(&json!({"microTvaExempt": true})).micro_tva_exempt);
        assert!(normalize_company(&json!({"microTvaExempt": 1})).micro_tva_exempt);
        assert!(!normalize_company(&json!({"microTvaExempt": ""})).micro_tva_exempt);
        assert!(!normalize_company(&json!({})).micro_tva_exempt);
    }
}
