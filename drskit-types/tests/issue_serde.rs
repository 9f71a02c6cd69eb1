//! Property tests for the JSON shape of validation issues.

use drskit_types::{DrsType, ValidationIssue};
use proptest::prelude::*;

fn arb_name() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[A-Za-z0-9_ -]{0,12}").unwrap()
}

fn arb_drs_type() -> impl Strategy<Value = DrsType> {
    prop_oneof![
        Just(DrsType::Directory),
        Just(DrsType::DatasetId),
        Just(DrsType::FileName),
    ]
}

fn arb_issue() -> impl Strategy<Value = ValidationIssue> {
    prop_oneof![
        Just(ValidationIssue::Space),
        arb_drs_type().prop_map(|expected| ValidationIssue::Unparsable { expected }),
        any::<u16>().prop_map(|c| ValidationIssue::ExtraSeparator { column: c.into() }),
        any::<u16>().prop_map(|c| ValidationIssue::ExtraChar { column: c.into() }),
        any::<u16>().prop_map(|c| ValidationIssue::BlankTerm { column: c.into() }),
        arb_name().prop_map(|expected| ValidationIssue::FileNameExtension { expected }),
        (arb_name(), arb_name(), any::<u8>()).prop_map(|(value, collection_id, p)| {
            ValidationIssue::InvalidTerm {
                value,
                collection_id,
                position: p.into(),
            }
        }),
        (arb_name(), any::<u8>(), proptest::option::of(arb_name())).prop_map(
            |(value, p, collection_id)| ValidationIssue::ExtraTerm {
                value,
                position: p.into(),
                collection_id,
            }
        ),
        (arb_name(), any::<u8>()).prop_map(|(collection_id, p)| ValidationIssue::MissingTerm {
            collection_id,
            position: p.into(),
        }),
    ]
}

proptest! {
    /// The `kind` tag matches `kind()` and the issue reads back unchanged.
    #[test]
    fn issue_json_is_tagged_and_reversible(issue in arb_issue()) {
        let value = serde_json::to_value(&issue).unwrap();
        prop_assert_eq!(value["kind"].as_str(), Some(issue.kind()));

        let back: ValidationIssue = serde_json::from_value(value).unwrap();
        prop_assert_eq!(back, issue);
    }

    /// An extra term without a blamed collection omits the field entirely.
    #[test]
    fn unattributed_extra_term_has_no_collection_field(value in arb_name(), p in any::<u8>()) {
        let issue = ValidationIssue::ExtraTerm { value, position: p.into(), collection_id: None };
        let json = serde_json::to_value(&issue).unwrap();
        prop_assert!(json.get("collection_id").is_none());
    }
}
