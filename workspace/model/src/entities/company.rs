use serde::Serialize;

/// Identity of the business running the dossier, shown on documents.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub legal_name: String,
    pub status: String,
    pub siren: String,
    pub vat: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Data-URL logo blob, optimized like piece images.
    pub logo: String,
    /// TVA franchise (article 293 B du CGI); toggles the exemption mention
    /// on printed documents.
    pub micro_tva_exempt: bool,
    pub iban: String,
}
