use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

use commands::{
    export_dossier, import_dossier, remove_category, remove_payment_method, reset_dossier, summary,
};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "compta-locale")]
#[command(about = "Local-first bookkeeping ledger for French micro-businesses")]
#[command(version)]
pub struct Cli {
    /// Path of the dossier JSON file (overrides settings and COMPTA_DATA_FILE)
    #[arg(short, long, global = true)]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the dashboard totals and the micro-enterprise levy summary
    Summary,
    /// Export the dossier as pretty-printed JSON
    ///
    /// The file is named {prefix}-{period start}.json, with "periode" as
    /// the placeholder when no period start is set.
    Export {
        /// Directory to write the export to (overrides settings)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a dossier from a JSON export, replacing the current one
    Import {
        /// Path to the JSON file to import
        json_path: PathBuf,
    },
    /// Discard the dossier and start over from defaults
    Reset {
        /// Confirm the reset; without it nothing happens
        #[arg(long)]
        yes: bool,
    },
    /// Remove a category, blanking it on the entries that used it
    RemoveCategory {
        /// Which category list the value belongs to
        #[arg(value_enum)]
        kind: CategoryKind,
        /// The category label to remove
        name: String,
        /// Confirm removal even when entries still use the category
        #[arg(long)]
        yes: bool,
    },
    /// Remove a payment method, blanking it on the entries that used it
    RemovePaymentMethod {
        /// The payment method label to remove
        name: String,
        /// Confirm removal even when entries still use the method
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryKind {
    Income,
    Expense,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let mut settings = Settings::load()?;
        if let Some(path) = self.data_file {
            settings.data_file = path;
        }
        match self.command {
            Commands::Summary => summary(&settings)?,
            Commands::Export { output } => export_dossier(&settings, output.as_deref())?,
            Commands::Import { json_path } => import_dossier(&settings, &json_path)?,
            Commands::Reset { yes } => reset_dossier(&settings, yes)?,
            Commands::RemoveCategory { kind, name, yes } => {
                remove_category(&settings, kind, &name, yes)?
            }
            Commands::RemovePaymentMethod { name, yes } => {
                remove_payment_method(&settings, &name, yes)?
            }
        }
        Ok(())
    }
}
