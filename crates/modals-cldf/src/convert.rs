//! Observations → normalized tables.
//!
//! One pass over the observations sorted by `(lang_ID, expression,
//! can_express)`:
//!
//! ```text
//! language  ──► LanguageRow            (resolved through the catalog)
//!  └ expression ──► ValueRow            (id = running modal counter)
//!     └ can_express ──► UnitValueRow    (one per raw row, id = "{modal}-{n}")
//! ```
//!
//! (force, flavor) pairs seen along the way feed the unit-parameter, force
//! and flavor tables once the pass is over. All of those are emitted in
//! sorted order, so the output depends only on the multiset of input rows
//! plus the input order of rows that share a sort key.

use crate::catalog::LanguageResolver;
use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::grouping::group_runs;
use crate::observation::{unit_parameter_id, ObservationRecord};
use crate::tables::{
    LanguageRow, ModalsDataset, ParameterRow, UnitParameterRow, UnitValueRow, ValueRow,
    VocabularyRow, MODAL_PARAMETER_ID, UNIT_VALUE_CAN, UNIT_VALUE_CANNOT,
};
use std::collections::BTreeSet;

/// An observation tagged with its 1-based input position.
struct Numbered<'a> {
    row: usize,
    record: &'a ObservationRecord,
}

/// Convert observations into a [`ModalsDataset`].
///
/// Fails without producing anything if a record is malformed or a language
/// does not resolve. The resolver is asked once per distinct language.
pub fn convert(
    observations: &[ObservationRecord],
    resolver: &dyn LanguageResolver,
    options: &ConvertOptions,
) -> Result<ModalsDataset, ConvertError> {
    let mut sorted = Vec::with_capacity(observations.len());
    for (idx, record) in observations.iter().enumerate() {
        record.validate(idx + 1)?;
        sorted.push(Numbered {
            row: idx + 1,
            record,
        });
    }
    // Stable: rows with equal keys keep input order.
    sorted.sort_by(|a, b| {
        let (a, b) = (a.record, b.record);
        (&a.language_id, &a.expression, &a.can_express).cmp(&(
            &b.language_id,
            &b.expression,
            &b.can_express,
        ))
    });

    let mut dataset = ModalsDataset {
        parameters: vec![ParameterRow::modal()],
        ..ModalsDataset::default()
    };
    let mut pairs: BTreeSet<(&str, &str)> = BTreeSet::new();
    let mut modal_id: usize = 0;

    for (language_id, language_rows) in group_runs(&sorted, |n| n.record.language_id.as_str()) {
        let language = resolver
            .resolve(language_id)
            .ok_or_else(|| ConvertError::UnresolvedLanguage {
                language_id: language_id.to_string(),
            })?;
        if language.primary_macroarea().is_none() {
            tracing::warn!(language_id, "catalog entry has no macroarea");
        }
        dataset.languages.push(LanguageRow {
            id: language_id.to_string(),
            name: language.name.clone(),
            macroarea: language.primary_macroarea().map(str::to_string),
            latitude: language.latitude,
            longitude: language.longitude,
            glottocode: language.glottocode.clone(),
            iso_code: language.iso_code.clone(),
        });

        let modals_before = modal_id;
        for (expression, modal_rows) in group_runs(language_rows, |n| n.record.expression.as_str())
        {
            let value_id = modal_id.to_string();
            dataset.values.push(ValueRow {
                id: value_id.clone(),
                language_id: language_id.to_string(),
                parameter_id: MODAL_PARAMETER_ID.to_string(),
                value: expression.to_string(),
            });

            let mut unit_obs_id: usize = 0;
            for (_, judged_rows) in group_runs(modal_rows, |n| n.record.can_express.as_str()) {
                for n in judged_rows {
                    unit_obs_id += 1;
                    let can = n.record.can_express_flag(options.can_express, n.row)?;
                    dataset.unit_values.push(UnitValueRow {
                        id: format!("{value_id}-{unit_obs_id}"),
                        parameter_id: MODAL_PARAMETER_ID.to_string(),
                        value: value_id.clone(),
                        unit_parameter_id: n.record.unit_parameter_id(),
                        unit_value: if can { UNIT_VALUE_CAN } else { UNIT_VALUE_CANNOT },
                    });
                    pairs.insert((n.record.force.as_str(), n.record.flavor.as_str()));
                }
            }
            modal_id += 1;
        }

        tracing::debug!(
            language_id,
            modals = modal_id - modals_before,
            observations = language_rows.len(),
            "converted language"
        );
    }

    dataset.unit_parameters = pairs
        .iter()
        .map(|&(force, flavor)| {
            let id = unit_parameter_id(force, flavor);
            UnitParameterRow {
                name: id.clone(),
                id,
                force: force.to_string(),
                flavor: flavor.to_string(),
            }
        })
        .collect();
    dataset.forces = vocabulary(pairs.iter().map(|&(force, _)| force));
    dataset.flavors = vocabulary(pairs.iter().map(|&(_, flavor)| flavor));

    Ok(dataset)
}

/// Distinct names, sorted, with dense ids in that order.
fn vocabulary<'a>(names: impl Iterator<Item = &'a str>) -> Vec<VocabularyRow> {
    names
        .collect::<BTreeSet<_>>()
        .into_iter()
        .enumerate()
        .map(|(id, name)| VocabularyRow {
            id,
            name: name.to_string(),
        })
        .collect()
}
