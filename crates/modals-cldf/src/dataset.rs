//! Load → convert → check → write.

use crate::catalog::LanguageCatalog;
use crate::config::{CatalogFormat, DatasetConfig};
use crate::convert::convert;
use crate::integrity::check_integrity;
use crate::observation::read_observations;
use crate::schema::TableId;
use crate::tables::ModalsDataset;
use crate::writer::{write_dataset, WriteSummary};
use anyhow::{anyhow, Context, Result};

pub fn load_catalog(config: &DatasetConfig) -> Result<LanguageCatalog> {
    let path = &config.catalog_path;
    let catalog = match config.catalog_format {
        CatalogFormat::GlottologCsv => LanguageCatalog::from_glottolog_csv_path(path),
        CatalogFormat::Json => LanguageCatalog::from_json_path(path),
    }
    .with_context(|| format!("failed to load language catalog {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        languages = catalog.len(),
        "loaded language catalog"
    );
    Ok(catalog)
}

/// Build the dataset in memory. Nothing is written.
pub fn build_dataset(config: &DatasetConfig) -> Result<ModalsDataset> {
    let observations = read_observations(&config.observations_path)?;
    let catalog = load_catalog(config)?;

    let dataset = convert(&observations, &catalog, &config.convert)?;

    let violations = check_integrity(&dataset);
    if let Some(first) = violations.first() {
        return Err(anyhow!(
            "dataset failed integrity check ({} violations, first: {first})",
            violations.len()
        ));
    }

    tracing::info!(
        languages = dataset.row_count(TableId::Languages),
        values = dataset.row_count(TableId::Values),
        unit_values = dataset.row_count(TableId::UnitValues),
        unit_parameters = dataset.row_count(TableId::UnitParameters),
        "converted observations"
    );
    Ok(dataset)
}

/// Build the dataset and write it to `config.output_dir`.
pub fn make_cldf(config: &DatasetConfig) -> Result<WriteSummary> {
    let span = tracing::info_span!("make_cldf", output = %config.output_dir.display());
    let _enter = span.enter();

    let dataset = build_dataset(config)?;
    let summary = write_dataset(&dataset, &config.output_dir)?;
    tracing::info!(tables = summary.tables.len(), "wrote CLDF dataset");
    Ok(summary)
}
