//! Compiled-in accounting seeds. These are the read-only defaults every
//! dossier starts from; user-added categories and payment methods are
//! unioned with them on every load and import, never replaced.

use rust_decimal::Decimal;

/// Default lists for statuses, categories, payment methods and TVA rates.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountingDefaults {
    pub currency: String,
    pub statuses: Vec<String>,
    pub payment_methods: Vec<String>,
    pub tva_rates: Vec<Decimal>,
    pub income_categories: Vec<String>,
    pub expense_categories: Vec<String>,
}

impl Default for AccountingDefaults {
    fn default() -> Self {
        let to_strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            currency: "EUR".to_string(),
            statuses: to_strings(&["prévu", "enregistré", "payé"]),
            payment_methods: to_strings(&["CB", "Espèces", "Virement", "Chèque", "Prélèvement"]),
            tva_rates: vec![
                Decimal::ZERO,
                Decimal::new(55, 1),
                Decimal::new(10, 0),
                Decimal::new(20, 0),
            ],
            income_categories: to_strings(&[
                "Ventes produits",
                "Prestations de services",
                "Abonnements",
                "Locations",
                "Formation",
                "Commissions",
                "Licence logicielle",
                "Maintenance / support",
                "Subventions / primes",
                "Autre recette",
            ]),
            expense_categories: to_strings(&[
                "Achats marchandises",
                "Matières premières",
                "Sous-traitance / prestations",
                "Abonnements & logiciels",
                "Loyer / charges / énergie",
                "Télécom & internet",
                "Transport / carburant / livraison",
                "Marketing / publicité",
                "Honoraires (compta / juridique)",
                "Impôts / taxes / cotisations",
                "Investissements / matériel",
                "Autre dépense",
            ]),
        }
    }
}

impl AccountingDefaults {
    pub fn first_status(&self) -> String {
        self.statuses
            .first()
            .cloned()
            .unwrap_or_else(|| "enregistré".to_string())
    }

    pub fn first_payment_method(&self) -> String {
        self.payment_methods.first().cloned().unwrap_or_default()
    }

    pub fn first_tva_rate(&self) -> Decimal {
        self.tva_rates.first().copied().unwrap_or(Decimal::ZERO)
    }

    pub fn first_income_category(&self) -> String {
        self.income_categories
            .first()
            .cloned()
            .unwrap_or_else(|| "Autre recette".to_string())
    }

    pub fn first_expense_category(&self) -> String {
        self.expense_categories
            .first()
            .cloned()
            .unwrap_or_else(|| "Autre dépense".to_string())
    }
}

/// Byte and dimension budgets for embedded images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageLimits {
    pub ticket_max_dimension: u32,
    pub ticket_max_bytes: usize,
    pub signature_max_dimension: u32,
    pub signature_max_bytes: usize,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            ticket_max_dimension: 1600,
            ticket_max_bytes: 700 * 1024,
            signature_max_dimension: 1000,
            signature_max_bytes: 450 * 1024,
        }
    }
}
