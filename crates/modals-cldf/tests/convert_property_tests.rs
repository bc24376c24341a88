//! Property tests for the observation → table conversion.

use modals_cldf::{
    check_integrity, convert, ConvertOptions, LanguageCatalog, LanguageMetadata,
    ObservationRecord,
};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// Strategies
// ============================================================================

const LANGUAGES: [&str; 3] = ["gitx1241", "stan1293", "nucl1301"];
const EXPRESSIONS: [&str; 4] = ["can", "must", "may", "ought"];
const FORCES: [&str; 3] = ["possibility", "necessity", "weak_necessity"];
const FLAVORS: [&str; 3] = ["epistemic", "deontic", "circumstantial"];

fn catalog() -> LanguageCatalog {
    LANGUAGES
        .iter()
        .map(|id| LanguageMetadata {
            id: id.to_string(),
            name: format!("Language {id}"),
            macroareas: vec!["Eurasia".to_string()],
            latitude: Some(1.5),
            longitude: Some(-2.5),
            glottocode: id.to_string(),
            iso_code: None,
        })
        .collect()
}

fn record_strategy() -> impl Strategy<Value = ObservationRecord> {
    (
        prop::sample::select(LANGUAGES.to_vec()),
        prop::sample::select(EXPRESSIONS.to_vec()),
        prop::sample::select(FORCES.to_vec()),
        prop::sample::select(FLAVORS.to_vec()),
        prop::sample::select(vec!["0", "1"]),
    )
        .prop_map(|(lang, expr, force, flavor, can)| {
            ObservationRecord::new(lang, expr, force, flavor, can)
        })
}

fn records_strategy() -> impl Strategy<Value = Vec<ObservationRecord>> {
    prop::collection::vec(record_strategy(), 0..40)
}

fn run(records: &[ObservationRecord]) -> modals_cldf::ModalsDataset {
    convert(records, &catalog(), &ConvertOptions::default()).expect("all languages resolve")
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn one_value_per_language_expression_pair(records in records_strategy()) {
        let ds = run(&records);
        let pairs: BTreeSet<(&str, &str)> = records
            .iter()
            .map(|r| (r.language_id.as_str(), r.expression.as_str()))
            .collect();
        prop_assert_eq!(ds.values.len(), pairs.len());
    }

    #[test]
    fn one_unit_value_per_input_row(records in records_strategy()) {
        let ds = run(&records);
        prop_assert_eq!(ds.unit_values.len(), records.len());
    }

    #[test]
    fn value_ids_are_dense(records in records_strategy()) {
        let ds = run(&records);
        for (idx, value) in ds.values.iter().enumerate() {
            prop_assert_eq!(&value.id, &idx.to_string());
        }
    }

    #[test]
    fn unit_value_ids_count_up_per_value(records in records_strategy()) {
        let ds = run(&records);
        let mut per_value: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for unit in &ds.unit_values {
            per_value.entry(unit.value.as_str()).or_default().push(unit.id.as_str());
        }
        for (value, ids) in per_value {
            let expected: Vec<String> = (1..=ids.len()).map(|n| format!("{value}-{n}")).collect();
            prop_assert_eq!(ids, expected);
        }
    }

    #[test]
    fn foreign_keys_hold(records in records_strategy()) {
        let ds = run(&records);
        let violations = check_integrity(&ds);
        prop_assert!(violations.is_empty(), "{:?}", violations);
    }

    #[test]
    fn vocabularies_are_sorted_with_dense_ids(records in records_strategy()) {
        let ds = run(&records);
        for table in [&ds.forces, &ds.flavors] {
            for (idx, row) in table.iter().enumerate() {
                prop_assert_eq!(row.id, idx);
            }
            prop_assert!(table.windows(2).all(|w| w[0].name < w[1].name));
        }
    }

    #[test]
    fn conversion_is_idempotent(records in records_strategy()) {
        prop_assert_eq!(run(&records), run(&records));
    }

    #[test]
    fn lookup_tables_ignore_input_order(
        (records, shuffled) in records_strategy()
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let a = run(&records);
        let b = run(&shuffled);
        prop_assert_eq!(a.languages, b.languages);
        prop_assert_eq!(a.values, b.values);
        prop_assert_eq!(a.unit_parameters, b.unit_parameters);
        prop_assert_eq!(a.forces, b.forces);
        prop_assert_eq!(a.flavors, b.flavors);
    }
}
