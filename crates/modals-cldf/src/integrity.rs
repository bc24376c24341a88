//! Referential checks of a dataset against its declared schema.

use crate::schema::{dataset_schema, TableId};
use crate::tables::ModalsDataset;
use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityViolation {
    #[error("{}: duplicate primary key `{key}`", .table.url())]
    DuplicateKey { table: TableId, key: String },

    #[error(
        "{}: row `{row_id}` has {column} = `{value}` with no match in {}.{target_column}",
        .table.url(),
        .target.url()
    )]
    DanglingReference {
        table: TableId,
        row_id: String,
        column: &'static str,
        value: String,
        target: TableId,
        target_column: &'static str,
    },
}

/// Check primary-key uniqueness and every declared foreign key.
///
/// Empty cells are nulls and never dangle.
pub fn check_integrity(dataset: &ModalsDataset) -> Vec<IntegrityViolation> {
    let mut violations = Vec::new();

    for spec in dataset_schema() {
        let rows = dataset.rows(spec.table);

        let mut seen = HashSet::new();
        for row in &rows {
            let key = row.cell(spec.primary_key).unwrap_or_default();
            if !seen.insert(key.clone()) {
                violations.push(IntegrityViolation::DuplicateKey {
                    table: spec.table,
                    key: key.into_owned(),
                });
            }
        }

        for fk in &spec.foreign_keys {
            let targets: BTreeSet<String> = dataset
                .rows(fk.reference)
                .iter()
                .filter_map(|r| r.cell(fk.reference_column))
                .map(|c| c.into_owned())
                .collect();

            for row in &rows {
                let value = row.cell(fk.column).unwrap_or_default();
                if value.is_empty() || targets.contains(&*value) {
                    continue;
                }
                violations.push(IntegrityViolation::DanglingReference {
                    table: spec.table,
                    row_id: row.cell(spec.primary_key).unwrap_or_default().into_owned(),
                    column: fk.column,
                    value: value.into_owned(),
                    target: fk.reference,
                    target_column: fk.reference_column,
                });
            }
        }
    }

    violations
}
