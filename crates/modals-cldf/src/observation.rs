//! Raw observation records and the reader for the observations table.
//!
//! The raw table is a header-led CSV with (at least) the columns
//! `lang_ID, expression, can_express, force, flavor`. Column names are part of
//! the input contract; additional columns are ignored.

use crate::config::CanExpressPolicy;
use crate::error::ConvertError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One judgment: can `expression` in `language_id` express `force`/`flavor`?
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObservationRecord {
    #[serde(rename = "lang_ID")]
    pub language_id: String,
    pub expression: String,
    pub can_express: String,
    pub force: String,
    pub flavor: String,
}

impl ObservationRecord {
    pub fn new(
        language_id: impl Into<String>,
        expression: impl Into<String>,
        force: impl Into<String>,
        flavor: impl Into<String>,
        can_express: impl Into<String>,
    ) -> Self {
        Self {
            language_id: language_id.into(),
            expression: expression.into(),
            can_express: can_express.into(),
            force: force.into(),
            flavor: flavor.into(),
        }
    }

    /// Reject records whose identifier-bearing fields are blank.
    ///
    /// `row` is 1-based and only used for the error.
    pub fn validate(&self, row: usize) -> Result<(), ConvertError> {
        let required = [
            ("lang_ID", &self.language_id),
            ("expression", &self.expression),
            ("force", &self.force),
            ("flavor", &self.flavor),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConvertError::MalformedRecord {
                    row,
                    field: format!("missing `{name}`"),
                });
            }
        }
        Ok(())
    }

    /// Interpret `can_express` under `policy`.
    ///
    /// Lenient: `"1"` is true, anything else false. Strict: only `"0"`/`"1"`.
    pub fn can_express_flag(
        &self,
        policy: CanExpressPolicy,
        row: usize,
    ) -> Result<bool, ConvertError> {
        match (policy, self.can_express.as_str()) {
            (_, "1") => Ok(true),
            (CanExpressPolicy::Lenient, _) | (CanExpressPolicy::Strict, "0") => Ok(false),
            (CanExpressPolicy::Strict, other) => Err(ConvertError::InvalidCanExpress {
                row,
                value: other.to_string(),
            }),
        }
    }

    /// `"{force}.{flavor}"`, the id of the unit-parameter this row tests.
    pub fn unit_parameter_id(&self) -> String {
        unit_parameter_id(&self.force, &self.flavor)
    }
}

pub(crate) fn unit_parameter_id(force: &str, flavor: &str) -> String {
    format!("{force}.{flavor}")
}

/// Read observations from any CSV source, in file order.
///
/// Rows that do not fit the record shape fail with
/// [`ConvertError::MalformedRecord`] (reachable via `downcast_ref`).
pub fn read_observations_from_reader<R: Read>(reader: R) -> Result<Vec<ObservationRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, result) in csv_reader.deserialize::<ObservationRecord>().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(err) if err.is_io_error() => {
                return Err(err).context("failed to read observations table");
            }
            Err(err) => {
                return Err(ConvertError::MalformedRecord {
                    row: idx + 1,
                    field: err.to_string(),
                }
                .into());
            }
        }
    }
    Ok(records)
}

/// Read the observations table at `path`.
pub fn read_observations(path: &Path) -> Result<Vec<ObservationRecord>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open observations table {}", path.display()))?;
    let records = read_observations_from_reader(file)
        .with_context(|| format!("failed to load observations from {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        rows = records.len(),
        "loaded observations"
    );
    Ok(records)
}
