pub mod categories;
pub mod export;
pub mod import;
pub mod reset;
pub mod summary;

pub use categories::{remove_category, remove_payment_method};
pub use export::export_dossier;
pub use import::import_dossier;
pub use reset::reset_dossier;
pub use summary::summary;
