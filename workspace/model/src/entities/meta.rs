use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::AccountingDefaults;

/// Dossier-level settings. The category and payment-method lists are
/// order-preserving sets seeded from configuration defaults and unioned
/// with user-added values on every load and import.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub company: String,
    pub dossier_title: String,
    pub period_start: String,
    pub period_end: String,
    pub currency: String,
    pub observations: String,
    pub income_categories: Vec<String>,
    pub expense_categories: Vec<String>,
    pub payment_methods: Vec<String>,
    /// Manual turnover override for the micro-enterprise levy; zero means
    /// "derive turnover from paid income entries".
    pub micro_turnover: Decimal,
}

impl Meta {
    pub fn default_with(defaults: &AccountingDefaults) -> Self {
        Self {
            company: String::new(),
            dossier_title: "Comptabilité locale".to_string(),
            period_start: String::new(),
            period_end: String::new(),
            currency: defaults.currency.clone(),
            observations: String::new(),
            income_categories: defaults.income_categories.clone(),
            expense_categories: defaults.expense_categories.clone(),
            payment_methods: defaults.payment_methods.clone(),
            micro_turnover: Decimal::ZERO,
        }
    }
}
