//! Run configuration.
//!
//! A [`DatasetConfig`] is plain JSON; every field has a default so a config
//! file only needs to name what differs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How the raw `can_express` column is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanExpressPolicy {
    /// `"1"` means "can", every other value means "cannot".
    #[default]
    Lenient,
    /// Only `"0"` and `"1"` are accepted.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConvertOptions {
    #[serde(default)]
    pub can_express: CanExpressPolicy,
}

/// On-disk format of the language catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogFormat {
    /// Glottolog CLDF `languages.csv`.
    #[default]
    GlottologCsv,
    /// JSON array of [`crate::catalog::LanguageMetadata`].
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Raw observations table
    pub observations_path: PathBuf,
    /// Local copy of the language catalog
    pub catalog_path: PathBuf,
    pub catalog_format: CatalogFormat,
    /// Directory the CLDF tables are written to
    pub output_dir: PathBuf,
    pub convert: ConvertOptions,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            observations_path: PathBuf::from("raw/all_observations.csv"),
            catalog_path: PathBuf::from("etc/languages.csv"),
            catalog_format: CatalogFormat::GlottologCsv,
            output_dir: PathBuf::from("cldf"),
            convert: ConvertOptions::default(),
        }
    }
}

impl DatasetConfig {
    /// Load a JSON config file. Relative paths inside it are resolved against
    /// the directory containing the file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config: DatasetConfig = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    fn rebase(&mut self, base: &Path) {
        for p in [
            &mut self.observations_path,
            &mut self.catalog_path,
            &mut self.output_dir,
        ] {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
    }
}
