//! Derived computations over a dossier: tax amounts, document totals,
//! micro-enterprise levies, dashboard aggregates and the document-to-ledger
//! projection. Everything here is pure; persistence lives with the caller.

pub mod document;
pub mod entry;
pub mod error;
pub mod micro;
pub mod sync;
pub mod totals;

pub use document::{compute_doc_totals, DocTotals};
pub use entry::{compute_entry_amounts, EntryAmounts};
pub use error::{ComputeError, Result};
pub use micro::is_paid;
