//! Output rows and the dataset that owns them.
//!
//! Rows carry only the data the conversion produces; [`TableRow::cell`] maps
//! them onto the column names declared in [`crate::schema`]. Declared columns
//! the conversion never fills (`Comment`, `Source`, ...) read as empty.

use crate::schema::TableId;
use std::borrow::Cow;

/// Column access by declared column name.
pub trait TableRow {
    /// `None` if `column` is not a column of this row's table.
    fn cell(&self, column: &str) -> Option<Cow<'_, str>>;
}

/// The single parameter every value belongs to.
pub const MODAL_PARAMETER_ID: &str = "modal";

pub const UNIT_VALUE_CAN: &str = "can";
pub const UNIT_VALUE_CANNOT: &str = "cannot";

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRow {
    pub id: String,
    pub name: String,
    pub macroarea: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub glottocode: String,
    pub iso_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterRow {
    pub id: String,
}

impl ParameterRow {
    pub fn modal() -> Self {
        Self {
            id: MODAL_PARAMETER_ID.to_string(),
        }
    }
}

/// One modal expression of one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRow {
    pub id: String,
    pub language_id: String,
    pub parameter_id: String,
    pub value: String,
}

/// One can/cannot judgment of a modal for a force/flavor pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitValueRow {
    /// `{modal_id}-{n}`
    pub id: String,
    pub parameter_id: String,
    /// Id of the owning [`ValueRow`]
    pub value: String,
    pub unit_parameter_id: String,
    pub unit_value: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitParameterRow {
    pub id: String,
    pub name: String,
    pub force: String,
    pub flavor: String,
}

/// A row of `forces.csv` or `flavors.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyRow {
    pub id: usize,
    pub name: String,
}

/// Everything one conversion run produces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModalsDataset {
    pub languages: Vec<LanguageRow>,
    pub parameters: Vec<ParameterRow>,
    pub values: Vec<ValueRow>,
    pub unit_values: Vec<UnitValueRow>,
    pub unit_parameters: Vec<UnitParameterRow>,
    pub forces: Vec<VocabularyRow>,
    pub flavors: Vec<VocabularyRow>,
}

impl ModalsDataset {
    pub fn rows(&self, table: TableId) -> Vec<&dyn TableRow> {
        fn erase<R: TableRow>(rows: &[R]) -> Vec<&dyn TableRow> {
            rows.iter().map(|r| r as &dyn TableRow).collect()
        }
        match table {
            TableId::Languages => erase(&self.languages),
            TableId::Parameters => erase(&self.parameters),
            TableId::Values => erase(&self.values),
            TableId::UnitValues => erase(&self.unit_values),
            TableId::UnitParameters => erase(&self.unit_parameters),
            TableId::Forces => erase(&self.forces),
            TableId::Flavors => erase(&self.flavors),
        }
    }

    pub fn row_count(&self, table: TableId) -> usize {
        match table {
            TableId::Languages => self.languages.len(),
            TableId::Parameters => self.parameters.len(),
            TableId::Values => self.values.len(),
            TableId::UnitValues => self.unit_values.len(),
            TableId::UnitParameters => self.unit_parameters.len(),
            TableId::Forces => self.forces.len(),
            TableId::Flavors => self.flavors.len(),
        }
    }
}

fn borrowed(s: &str) -> Option<Cow<'_, str>> {
    Some(Cow::Borrowed(s))
}

fn optional(s: &Option<String>) -> Option<Cow<'_, str>> {
    borrowed(s.as_deref().unwrap_or(""))
}

fn coordinate(c: Option<f64>) -> Option<Cow<'static, str>> {
    Some(c.map_or(Cow::Borrowed(""), |v| Cow::Owned(v.to_string())))
}

impl TableRow for LanguageRow {
    fn cell(&self, column: &str) -> Option<Cow<'_, str>> {
        match column {
            "ID" => borrowed(&self.id),
            "Name" => borrowed(&self.name),
            "Macroarea" => optional(&self.macroarea),
            "Latitude" => coordinate(self.latitude),
            "Longitude" => coordinate(self.longitude),
            "Glottocode" => borrowed(&self.glottocode),
            "ISO639P3code" => optional(&self.iso_code),
            _ => None,
        }
    }
}

impl TableRow for ParameterRow {
    fn cell(&self, column: &str) -> Option<Cow<'_, str>> {
        match column {
            "ID" => borrowed(&self.id),
            "Name" | "Description" => borrowed(""),
            _ => None,
        }
    }
}

impl TableRow for ValueRow {
    fn cell(&self, column: &str) -> Option<Cow<'_, str>> {
        match column {
            "ID" => borrowed(&self.id),
            "Language_ID" => borrowed(&self.language_id),
            "Parameter_ID" => borrowed(&self.parameter_id),
            "Value" => borrowed(&self.value),
            "Code_ID" | "Comment" | "Source" => borrowed(""),
            _ => None,
        }
    }
}

impl TableRow for UnitValueRow {
    fn cell(&self, column: &str) -> Option<Cow<'_, str>> {
        match column {
            "ID" => borrowed(&self.id),
            "Parameter_ID" => borrowed(&self.parameter_id),
            "Value" => borrowed(&self.value),
            "UnitParameter_ID" => borrowed(&self.unit_parameter_id),
            "UnitValue" => borrowed(self.unit_value),
            "Comment" | "Source" => borrowed(""),
            _ => None,
        }
    }
}

impl TableRow for UnitParameterRow {
    fn cell(&self, column: &str) -> Option<Cow<'_, str>> {
        match column {
            "ID" => borrowed(&self.id),
            "Name" => borrowed(&self.name),
            "Description" => borrowed(""),
            "force" => borrowed(&self.force),
            "flavor" => borrowed(&self.flavor),
            _ => None,
        }
    }
}

impl TableRow for VocabularyRow {
    fn cell(&self, column: &str) -> Option<Cow<'_, str>> {
        match column {
            "ID" => Some(Cow::Owned(self.id.to_string())),
            "Name" => borrowed(&self.name),
            "Description" => borrowed(""),
            _ => None,
        }
    }
}
