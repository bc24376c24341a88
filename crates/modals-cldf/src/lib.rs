//! Modal observations → CLDF StructureDataset
//!
//! Turns a flat table of modal judgments
//! (`lang_ID, expression, can_express, force, flavor`) into normalized tables:
//! - `languages.csv`: one row per language, resolved through a Glottolog catalog
//! - `parameters.csv`: the single `modal` parameter
//! - `values.csv`: one row per (language, expression)
//! - `unit-values.csv`: one can/cannot row per raw observation
//! - `unit-parameters.csv`, `forces.csv`, `flavors.csv`: the force×flavor vocabulary
//!
//! [`convert`] is the pure core; [`make_cldf`] wraps it with file loading,
//! integrity checking and writing.

pub mod catalog;
pub mod config;
pub mod convert;
pub mod dataset;
pub mod error;
pub mod grouping;
pub mod integrity;
pub mod observation;
pub mod schema;
pub mod tables;
pub mod writer;

pub use catalog::{LanguageCatalog, LanguageMetadata, LanguageResolver};
pub use config::{CanExpressPolicy, CatalogFormat, ConvertOptions, DatasetConfig};
pub use convert::convert;
pub use dataset::{build_dataset, load_catalog, make_cldf};
pub use error::{CatalogError, ConvertError};
pub use integrity::{check_integrity, IntegrityViolation};
pub use observation::{read_observations, read_observations_from_reader, ObservationRecord};
pub use schema::TableId;
pub use tables::*;
pub use writer::{write_dataset, WriteSummary};
