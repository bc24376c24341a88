//! Table, column and foreign-key declarations of the StructureDataset.
//!
//! Three CLDF components (`LanguageTable`, `ParameterTable`, `ValueTable`)
//! plus four dataset-specific tables linking each value to its force/flavor
//! judgments. [`metadata`] renders the declarations as the JSON descriptor
//! written next to the CSV files.

use serde::Serialize;

pub const CLDF_TERMS: &str = "http://cldf.clld.org/v1.0/terms.rdf#";
pub const METADATA_FILE_NAME: &str = "StructureDataset-metadata.json";
pub const DATASET_ID: &str = "steinertthrelkeldmodals";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableId {
    Languages,
    Parameters,
    Values,
    UnitValues,
    UnitParameters,
    Forces,
    Flavors,
}

impl TableId {
    /// Declaration order; also the order tables are written in.
    pub const ALL: [TableId; 7] = [
        TableId::Values,
        TableId::Parameters,
        TableId::Languages,
        TableId::UnitParameters,
        TableId::UnitValues,
        TableId::Flavors,
        TableId::Forces,
    ];

    pub fn url(self) -> &'static str {
        match self {
            TableId::Languages => "languages.csv",
            TableId::Parameters => "parameters.csv",
            TableId::Values => "values.csv",
            TableId::UnitValues => "unit-values.csv",
            TableId::UnitParameters => "unit-parameters.csv",
            TableId::Forces => "forces.csv",
            TableId::Flavors => "flavors.csv",
        }
    }

    /// CLDF component name, for the standard tables only.
    pub fn component(self) -> Option<&'static str> {
        match self {
            TableId::Languages => Some("LanguageTable"),
            TableId::Parameters => Some("ParameterTable"),
            TableId::Values => Some("ValueTable"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    /// CLDF term (fragment after `#`) this column is declared as, if any.
    pub term: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeySpec {
    pub column: &'static str,
    pub reference: TableId,
    pub reference_column: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub table: TableId,
    pub columns: Vec<ColumnSpec>,
    pub primary_key: &'static str,
    pub foreign_keys: Vec<ForeignKeySpec>,
}

impl TableSpec {
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }
}

fn col(name: &'static str, term: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        term: Some(term),
    }
}

fn plain(name: &'static str) -> ColumnSpec {
    ColumnSpec { name, term: None }
}

fn fk(column: &'static str, reference: TableId, reference_column: &'static str) -> ForeignKeySpec {
    ForeignKeySpec {
        column,
        reference,
        reference_column,
    }
}

pub fn table_spec(table: TableId) -> TableSpec {
    let (columns, foreign_keys) = match table {
        TableId::Languages => (
            vec![
                col("ID", "id"),
                col("Name", "name"),
                col("Macroarea", "macroarea"),
                col("Latitude", "latitude"),
                col("Longitude", "longitude"),
                col("Glottocode", "glottocode"),
                col("ISO639P3code", "iso639P3code"),
            ],
            vec![],
        ),
        TableId::Parameters => (
            vec![
                col("ID", "id"),
                col("Name", "name"),
                col("Description", "description"),
            ],
            vec![],
        ),
        TableId::Values => (
            vec![
                col("ID", "id"),
                col("Language_ID", "languageReference"),
                col("Parameter_ID", "parameterReference"),
                col("Value", "value"),
                col("Code_ID", "codeReference"),
                col("Comment", "comment"),
                col("Source", "source"),
            ],
            vec![
                fk("Language_ID", TableId::Languages, "ID"),
                fk("Parameter_ID", TableId::Parameters, "ID"),
            ],
        ),
        TableId::UnitValues => (
            vec![
                col("ID", "id"),
                col("Parameter_ID", "parameterReference"),
                plain("Value"),
                plain("UnitParameter_ID"),
                plain("UnitValue"),
                plain("Comment"),
                plain("Source"),
            ],
            vec![
                fk("Parameter_ID", TableId::Parameters, "ID"),
                fk("Value", TableId::Values, "ID"),
                fk("UnitParameter_ID", TableId::UnitParameters, "ID"),
            ],
        ),
        TableId::UnitParameters => (
            vec![
                col("ID", "id"),
                plain("Name"),
                plain("Description"),
                plain("force"),
                plain("flavor"),
            ],
            vec![
                fk("flavor", TableId::Flavors, "Name"),
                fk("force", TableId::Forces, "Name"),
            ],
        ),
        TableId::Forces | TableId::Flavors => (
            vec![col("ID", "id"), plain("Name"), plain("Description")],
            vec![],
        ),
    };
    TableSpec {
        table,
        columns,
        primary_key: "ID",
        foreign_keys,
    }
}

pub fn dataset_schema() -> Vec<TableSpec> {
    TableId::ALL.into_iter().map(table_spec).collect()
}

// ============================================================================
// Metadata descriptor
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MetadataDocument {
    #[serde(rename = "@context")]
    pub context: Vec<serde_json::Value>,
    #[serde(rename = "rdf:ID")]
    pub id: String,
    #[serde(rename = "dc:conformsTo")]
    pub conforms_to: String,
    pub tables: Vec<TableDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableDescriptor {
    pub url: String,
    #[serde(rename = "dc:conformsTo", skip_serializing_if = "Option::is_none")]
    pub conforms_to: Option<String>,
    #[serde(rename = "tableSchema")]
    pub table_schema: TableSchemaDescriptor,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSchemaDescriptor {
    pub columns: Vec<ColumnDescriptor>,
    #[serde(rename = "primaryKey")]
    pub primary_key: Vec<String>,
    #[serde(rename = "foreignKeys", skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<ForeignKeyDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "propertyUrl", skip_serializing_if = "Option::is_none")]
    pub property_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForeignKeyDescriptor {
    #[serde(rename = "columnReference")]
    pub column_reference: Vec<String>,
    pub reference: ReferenceDescriptor,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferenceDescriptor {
    pub resource: String,
    #[serde(rename = "columnReference")]
    pub column_reference: Vec<String>,
}

pub fn metadata(dataset_id: &str) -> MetadataDocument {
    let tables = dataset_schema()
        .into_iter()
        .map(|spec| TableDescriptor {
            url: spec.table.url().to_string(),
            conforms_to: spec
                .table
                .component()
                .map(|c| format!("{CLDF_TERMS}{c}")),
            table_schema: TableSchemaDescriptor {
                columns: spec
                    .columns
                    .iter()
                    .map(|c| ColumnDescriptor {
                        name: c.name.to_string(),
                        property_url: c.term.map(|t| format!("{CLDF_TERMS}{t}")),
                    })
                    .collect(),
                primary_key: vec![spec.primary_key.to_string()],
                foreign_keys: spec
                    .foreign_keys
                    .iter()
                    .map(|k| ForeignKeyDescriptor {
                        column_reference: vec![k.column.to_string()],
                        reference: ReferenceDescriptor {
                            resource: k.reference.url().to_string(),
                            column_reference: vec![k.reference_column.to_string()],
                        },
                    })
                    .collect(),
            },
        })
        .collect();

    MetadataDocument {
        context: vec![
            serde_json::Value::from("http://www.w3.org/ns/csvw"),
            serde_json::json!({ "@language": "en" }),
        ],
        id: dataset_id.to_string(),
        conforms_to: format!("{CLDF_TERMS}StructureDataset"),
        tables,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_foreign_key_targets_a_declared_column() {
        let schema = dataset_schema();
        for spec in &schema {
            for key in &spec.foreign_keys {
                assert!(spec.column_names().any(|c| c == key.column));
                let target = table_spec(key.reference);
                assert!(
                    target.column_names().any(|c| c == key.reference_column),
                    "{} -> {}.{}",
                    key.column,
                    key.reference.url(),
                    key.reference_column
                );
            }
        }
    }

    #[test]
    fn metadata_marks_only_components() {
        let doc = serde_json::to_value(metadata(DATASET_ID)).unwrap();
        let tables = doc["tables"].as_array().unwrap();
        assert_eq!(tables.len(), 7);

        let values = tables.iter().find(|t| t["url"] == "values.csv").unwrap();
        assert_eq!(
            values["dc:conformsTo"],
            "http://cldf.clld.org/v1.0/terms.rdf#ValueTable"
        );

        let forces = tables.iter().find(|t| t["url"] == "forces.csv").unwrap();
        assert!(forces.get("dc:conformsTo").is_none());
        assert!(forces["tableSchema"].get("foreignKeys").is_none());

        let unit_values = tables
            .iter()
            .find(|t| t["url"] == "unit-values.csv")
            .unwrap();
        let keys = unit_values["tableSchema"]["foreignKeys"].as_array().unwrap();
        assert!(keys.iter().any(|k| k["columnReference"][0] == "UnitParameter_ID"
            && k["reference"]["resource"] == "unit-parameters.csv"));
    }
}
