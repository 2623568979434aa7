//! Application settings: where the dossier lives and how exports are
//! named. Values come from an optional `compta.toml` in the working
//! directory, overridden by `COMPTA_*` environment variables.

use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Path of the dossier JSON file.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Directory exports are written to.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    /// File name prefix for exports.
    #[serde(default = "default_export_prefix")]
    pub export_prefix: String,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("compta.json")
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_export_prefix() -> String {
    "compta".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            export_dir: default_export_dir(),
            export_prefix: default_export_prefix(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let settings = config::Config::builder()
            .add_source(config::File::with_name("compta").required(false))
            .add_source(config::Environment::with_prefix("COMPTA"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
