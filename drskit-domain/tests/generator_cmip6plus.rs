//! Mapping and bag-of-terms generation against the cmip6plus schema.

mod common;

use common::{DATASET_ID, FILE_NAME, PROJECT, file_name_mapping, oracle, store};
use drskit_domain::{DrsGenerator, DrsValidator, GeneratorConfig};
use drskit_types::{DrsType, GenerationIssue};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn missing(collection_id: &str, position: usize) -> GenerationIssue {
    GenerationIssue::MissingTerm {
        collection_id: collection_id.into(),
        position,
    }
}

fn dataset_terms() -> Vec<&'static str> {
    DATASET_ID.split('.').collect()
}

#[test]
fn complete_mapping_builds_file_name() {
    let oracle = oracle();
    let generator = DrsGenerator::new(&store(), &oracle, PROJECT).unwrap();

    let report = generator
        .generate_file_name_from_mapping(&file_name_mapping())
        .unwrap();

    assert!(report.is_valid());
    assert_eq!(report.nb_warnings(), 0);
    assert_eq!(report.computed_expression.as_deref(), Some(FILE_NAME));
    assert_eq!(report.mapping_used, file_name_mapping());
}

#[test]
fn mapping_with_invalid_and_missing_terms() {
    let oracle = oracle();
    let generator = DrsGenerator::new(&store(), &oracle, PROJECT).unwrap();
    let mut mapping = file_name_mapping();
    mapping.remove("member_id");
    mapping.remove("time_range");
    mapping.insert("source_id".into(), "MiRoC6".into());

    let report = generator.generate_file_name_from_mapping(&mapping).unwrap();

    assert_eq!(
        report.errors,
        vec![
            GenerationIssue::InvalidTerm {
                value: "MiRoC6".into(),
                collection_id: "source_id".into(),
                position: 2,
            },
            missing("member_id", 4),
        ]
    );
    assert_eq!(report.warnings, vec![missing("time_range", 6)]);
    assert_eq!(
        report.computed_expression.as_deref(),
        Some("od550aer_ACmon_[INVALID]_amip_[MISSING]_gn.nc")
    );
}

#[test]
fn pedantic_mapping_without_optional_slot_fails() {
    let oracle = oracle();
    let generator = DrsGenerator::new(&store(), &oracle, PROJECT)
        .unwrap()
        .with_config(GeneratorConfig { pedantic: true });
    let mut mapping = file_name_mapping();
    mapping.remove("time_range");

    let report = generator.generate_file_name_from_mapping(&mapping).unwrap();

    assert_eq!(report.errors, vec![missing("time_range", 6)]);
    assert_eq!(
        report.computed_expression.as_deref(),
        Some("od550aer_ACmon_MIROC6_amip_r2i2p1f2_gn.nc")
    );
}

#[test]
fn directory_mapping_uses_slash() {
    let oracle = oracle();
    let generator = DrsGenerator::new(&store(), &oracle, PROJECT).unwrap();
    let mapping: BTreeMap<String, String> = [
        ("mip_era", "CMIP6Plus"),
        ("activity_id", "CMIP"),
        ("institution_id", "NCC"),
        ("source_id", "MIROC6"),
        ("experiment_id", "amip"),
        ("member_id", "r2i2p1f2"),
        ("table_id", "ACmon"),
        ("variable_id", "od550aer"),
        ("grid_label", "gn"),
        ("version", "v20190923"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let report = generator.generate_directory_from_mapping(&mapping).unwrap();

    assert!(report.is_valid());
    assert_eq!(report.computed_expression.as_deref(), Some(common::DIRECTORY));
}

#[test]
fn bag_of_terms_resolves_unambiguous_collections() {
    let oracle = oracle();
    let generator = DrsGenerator::new(&store(), &oracle, PROJECT).unwrap();
    let mut terms = dataset_terms();
    terms.reverse();

    let report = generator
        .generate_dataset_id_from_bag_of_terms(terms)
        .unwrap();

    assert!(report.is_valid());
    assert_eq!(report.nb_warnings(), 0);
    assert_eq!(report.computed_expression.as_deref(), Some(DATASET_ID));
}

#[test]
fn ambiguous_collection_is_left_unfilled() {
    let oracle = oracle();
    let generator = DrsGenerator::new(&store(), &oracle, PROJECT).unwrap();
    let mut terms = dataset_terms();
    terms.push("UA");

    let report = generator
        .generate_dataset_id_from_bag_of_terms(terms)
        .unwrap();

    assert_eq!(
        report.errors,
        vec![
            GenerationIssue::AmbiguousCollection {
                collection_id: "institution_id".into(),
                candidates: ["IPSL".to_string(), "UA".to_string()].into_iter().collect(),
            },
            missing("institution_id", 2),
        ]
    );
    let expression = report.computed_expression.unwrap();
    assert_eq!(
        expression,
        "CMIP6Plus.CMIP.[MISSING].MIROC6.amip.r2i2p1f2.ACmon.od550aer.gn"
    );
    assert!(!expression.contains("IPSL"));
    assert!(!expression.contains("UA"));
    assert!(!report.mapping_used.contains_key("institution_id"));
}

#[test]
fn term_claimed_by_two_collections_conflicts() {
    let oracle = oracle().with_terms(PROJECT, "source_id", ["IPSL"]);
    let generator = DrsGenerator::new(&store(), &oracle, PROJECT).unwrap();
    let terms: Vec<&str> = dataset_terms()
        .into_iter()
        .filter(|t| *t != "MIROC6")
        .collect();

    let report = generator
        .generate_dataset_id_from_bag_of_terms(terms)
        .unwrap();

    assert_eq!(
        report.errors,
        vec![
            GenerationIssue::ConflictingCollections {
                collection_ids: vec!["institution_id".into(), "source_id".into()],
                term: "IPSL".into(),
            },
            missing("institution_id", 2),
            missing("source_id", 3),
        ]
    );
}

#[test]
fn unknown_bag_term_is_a_warning() {
    let oracle = oracle();
    let generator = DrsGenerator::new(&store(), &oracle, PROJECT).unwrap();
    let mut terms = dataset_terms();
    terms.push("hello");

    let report = generator
        .generate_dataset_id_from_bag_of_terms(terms.clone())
        .unwrap();
    assert!(report.is_valid());
    assert_eq!(
        report.warnings,
        vec![GenerationIssue::ExtraTerm {
            value: "hello".into()
        }]
    );

    let pedantic = DrsGenerator::new(&store(), &oracle, PROJECT)
        .unwrap()
        .with_config(GeneratorConfig { pedantic: true });
    let report = pedantic
        .generate_dataset_id_from_bag_of_terms(terms)
        .unwrap();
    assert_eq!(report.nb_errors(), 1);
}

#[test]
fn generated_file_name_validates_cleanly() {
    let oracle = oracle();
    let generator = DrsGenerator::new(&store(), &oracle, PROJECT).unwrap();
    let validator = DrsValidator::new(&store(), &oracle, PROJECT).unwrap();

    let report = generator
        .generate_from_mapping(&file_name_mapping(), DrsType::FileName)
        .unwrap();
    let expression = report.computed_expression.unwrap();
    let validation = validator.validate_file_name(&expression).unwrap();

    assert!(validation.is_valid());
    assert_eq!(validation.nb_warnings(), 0);
}
