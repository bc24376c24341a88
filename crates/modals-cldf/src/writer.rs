//! Writes a [`ModalsDataset`] as a directory of CSV tables plus the JSON
//! metadata descriptor.

use crate::schema::{self, TableId, TableSpec};
use crate::tables::ModalsDataset;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub dir: PathBuf,
    pub metadata_path: PathBuf,
    /// `(table url, data rows written)` in write order
    pub tables: Vec<(&'static str, usize)>,
}

impl WriteSummary {
    pub fn rows_written(&self, table: TableId) -> Option<usize> {
        self.tables
            .iter()
            .find(|(url, _)| *url == table.url())
            .map(|(_, n)| *n)
    }
}

/// Write every table and the metadata file into `dir`, creating it if needed.
///
/// Existing files with the same names are replaced.
pub fn write_dataset(dataset: &ModalsDataset, dir: &Path) -> Result<WriteSummary> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let mut tables = Vec::new();
    for spec in schema::dataset_schema() {
        let path = dir.join(spec.table.url());
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let rows = write_table(dataset, &spec, file)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::debug!(table = spec.table.url(), rows, "wrote table");
        tables.push((spec.table.url(), rows));
    }

    let metadata_path = dir.join(schema::METADATA_FILE_NAME);
    write_metadata(schema::DATASET_ID, &metadata_path)?;

    Ok(WriteSummary {
        dir: dir.to_path_buf(),
        metadata_path,
        tables,
    })
}

/// Write one table, header first, columns in declared order.
pub fn write_table<W: Write>(dataset: &ModalsDataset, spec: &TableSpec, out: W) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(spec.column_names())?;

    let rows = dataset.rows(spec.table);
    for row in &rows {
        let record: Vec<String> = spec
            .column_names()
            .map(|column| row.cell(column).unwrap_or_default().into_owned())
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(rows.len())
}

pub fn write_metadata(dataset_id: &str, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, &schema::metadata(dataset_id))
        .with_context(|| format!("failed to write {}", path.display()))?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::table_spec;
    use crate::tables::{ParameterRow, VocabularyRow};

    #[test]
    fn table_has_header_even_when_empty() {
        let mut buf = Vec::new();
        let rows = write_table(
            &ModalsDataset::default(),
            &table_spec(TableId::UnitValues),
            &mut buf,
        )
        .unwrap();
        assert_eq!(rows, 0);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "ID,Parameter_ID,Value,UnitParameter_ID,UnitValue,Comment,Source\n"
        );
    }

    #[test]
    fn cells_follow_declared_columns() {
        let dataset = ModalsDataset {
            parameters: vec![ParameterRow::modal()],
            forces: vec![
                VocabularyRow {
                    id: 0,
                    name: "necessity".to_string(),
                },
                VocabularyRow {
                    id: 1,
                    name: "possibility, weak".to_string(),
                },
            ],
            ..ModalsDataset::default()
        };

        let mut buf = Vec::new();
        write_table(&dataset, &table_spec(TableId::Forces), &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "ID,Name,Description\n0,necessity,\n1,\"possibility, weak\",\n"
        );

        let mut buf = Vec::new();
        write_table(&dataset, &table_spec(TableId::Parameters), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "ID,Name,Description\nmodal,,\n");
    }

    #[test]
    fn writes_every_table_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("cldf");
        let summary = write_dataset(&ModalsDataset::default(), &out).unwrap();

        assert_eq!(summary.tables.len(), 7);
        for table in TableId::ALL {
            assert!(out.join(table.url()).is_file(), "{}", table.url());
        }
        let metadata: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&summary.metadata_path).unwrap())
                .unwrap();
        assert_eq!(metadata["rdf:ID"], "steinertthrelkeldmodals");
        assert_eq!(summary.rows_written(TableId::Values), Some(0));
    }
}
