//! Language catalog: Glottocode → canonical language metadata.
//!
//! The converter only sees the [`LanguageResolver`] trait. [`LanguageCatalog`]
//! is the in-memory implementation, loadable from a local Glottolog CLDF
//! `languages.csv` or from a JSON array.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Catalog entry for one languoid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageMetadata {
    pub id: String,
    pub name: String,
    /// Ordered; the first entry is the one reported.
    #[serde(default)]
    pub macroareas: Vec<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    pub glottocode: String,
    #[serde(default)]
    pub iso_code: Option<String>,
}

impl LanguageMetadata {
    pub fn primary_macroarea(&self) -> Option<&str> {
        self.macroareas.first().map(String::as_str)
    }
}

/// Maps a language id to its catalog metadata.
pub trait LanguageResolver {
    fn resolve(&self, language_id: &str) -> Option<&LanguageMetadata>;
}

impl LanguageResolver for BTreeMap<String, LanguageMetadata> {
    fn resolve(&self, language_id: &str) -> Option<&LanguageMetadata> {
        self.get(language_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LanguageCatalog {
    by_id: BTreeMap<String, LanguageMetadata>,
}

impl LanguageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, rejecting duplicate ids.
    pub fn from_entries(
        entries: impl IntoIterator<Item = LanguageMetadata>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.insert(entry)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, entry: LanguageMetadata) -> Result<(), CatalogError> {
        if self.by_id.contains_key(&entry.id) {
            return Err(CatalogError::DuplicateLanguage(entry.id));
        }
        self.by_id.insert(entry.id.clone(), entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let entries: Vec<LanguageMetadata> = serde_json::from_reader(reader)?;
        Self::from_entries(entries)
    }

    pub fn from_json_path(path: &Path) -> Result<Self, CatalogError> {
        Self::from_json_reader(File::open(path)?)
    }

    /// Parse a Glottolog CLDF `languages.csv`.
    ///
    /// `Macroarea` may list several areas separated by `;`. Empty cells are
    /// absent values; an empty `Glottocode` falls back to `ID`.
    pub fn from_glottolog_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut catalog = Self::new();
        for (idx, result) in csv_reader.deserialize::<GlottologLanguageRow>().enumerate() {
            let entry = result?.into_metadata(idx + 1)?;
            catalog.insert(entry)?;
        }
        Ok(catalog)
    }

    pub fn from_glottolog_csv_path(path: &Path) -> Result<Self, CatalogError> {
        Self::from_glottolog_csv_reader(File::open(path)?)
    }
}

impl LanguageResolver for LanguageCatalog {
    fn resolve(&self, language_id: &str) -> Option<&LanguageMetadata> {
        self.by_id.get(language_id)
    }
}

impl FromIterator<LanguageMetadata> for LanguageCatalog {
    /// Later entries replace earlier ones with the same id.
    fn from_iter<T: IntoIterator<Item = LanguageMetadata>>(iter: T) -> Self {
        let by_id = iter
            .into_iter()
            .map(|entry| (entry.id.clone(), entry))
            .collect();
        Self { by_id }
    }
}

#[derive(Debug, Deserialize)]
struct GlottologLanguageRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Macroarea", default)]
    macroarea: String,
    #[serde(rename = "Latitude", default)]
    latitude: String,
    #[serde(rename = "Longitude", default)]
    longitude: String,
    #[serde(rename = "Glottocode", default)]
    glottocode: String,
    #[serde(rename = "ISO639P3code", default)]
    iso_code: String,
}

impl GlottologLanguageRow {
    fn into_metadata(self, row: usize) -> Result<LanguageMetadata, CatalogError> {
        let macroareas = self
            .macroarea
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        let glottocode = if self.glottocode.trim().is_empty() {
            self.id.clone()
        } else {
            self.glottocode
        };
        Ok(LanguageMetadata {
            latitude: parse_coordinate(&self.latitude, "Latitude", row)?,
            longitude: parse_coordinate(&self.longitude, "Longitude", row)?,
            id: self.id,
            name: self.name,
            macroareas,
            glottocode,
            iso_code: non_empty(self.iso_code),
        })
    }
}

fn parse_coordinate(
    raw: &str,
    field: &'static str,
    row: usize,
) -> Result<Option<f64>, CatalogError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| CatalogError::InvalidCoordinate {
            row,
            field,
            value: raw.to_string(),
        })
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GLOTTOLOG_CSV: &str = "\
ID,Name,Macroarea,Latitude,Longitude,Glottocode,ISO639P3code,Family_ID
stan1293,English,Eurasia,53.0,-1.0,stan1293,eng,indo1319
gitx1241,Gitxsan,North America; Eurasia,55.5,-128.0,gitx1241,git,tsim1256
unkn0001,Unlocated,,,,,,
";

    #[test]
    fn glottolog_csv_rows_become_metadata() {
        let catalog = LanguageCatalog::from_glottolog_csv_reader(GLOTTOLOG_CSV.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 3);

        let english = catalog.resolve("stan1293").unwrap();
        assert_eq!(english.name, "English");
        assert_eq!(english.primary_macroarea(), Some("Eurasia"));
        assert_eq!(english.latitude, Some(53.0));
        assert_eq!(english.iso_code.as_deref(), Some("eng"));

        let gitxsan = catalog.resolve("gitx1241").unwrap();
        assert_eq!(gitxsan.macroareas, vec!["North America", "Eurasia"]);

        let unlocated = catalog.resolve("unkn0001").unwrap();
        assert_eq!(unlocated.glottocode, "unkn0001");
        assert_eq!(unlocated.latitude, None);
        assert_eq!(unlocated.iso_code, None);
        assert_eq!(unlocated.primary_macroarea(), None);
    }

    #[test]
    fn bad_coordinate_reports_row() {
        let text = "ID,Name,Latitude\nabcd1234,A,north\n";
        let err = LanguageCatalog::from_glottolog_csv_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidCoordinate { row: 1, field: "Latitude", .. }
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let text = "ID,Name\nabcd1234,A\nabcd1234,B\n";
        let err = LanguageCatalog::from_glottolog_csv_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateLanguage(id) if id == "abcd1234"));
    }

    #[test]
    fn json_catalog_defaults_optional_fields() {
        let json = r#"[{"id": "xxxx1234", "name": "Xish", "glottocode": "xxxx1234"}]"#;
        let catalog = LanguageCatalog::from_json_reader(json.as_bytes()).unwrap();
        let xish = catalog.resolve("xxxx1234").unwrap();
        assert!(xish.macroareas.is_empty());
        assert_eq!(xish.longitude, None);
        assert!(catalog.resolve("zzzz").is_none());
    }
}
