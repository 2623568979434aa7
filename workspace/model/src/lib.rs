pub mod config;
pub mod entities;
pub mod normalize;

pub use entities::dossier::{Contacts, Dossier};
pub use entities::new_id;
pub use normalize::merge_unique;

// Re-export tracing for use in this crate
pub use tracing;
