//! Error types for conversion and catalog loading.

use thiserror::Error;

/// Failure of a conversion run. Any error aborts the whole run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("language `{language_id}` is not in the language catalog")]
    UnresolvedLanguage { language_id: String },

    /// `row` is the 1-based position of the record in the input.
    #[error("malformed observation on row {row}: {field}")]
    MalformedRecord { row: usize, field: String },

    #[error("observation on row {row} has can_express `{value}` (expected `0` or `1`)")]
    InvalidCanExpress { row: usize, value: String },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog row {row}: invalid {field} `{value}`")]
    InvalidCoordinate {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("duplicate language id `{0}` in catalog")]
    DuplicateLanguage(String),
}
