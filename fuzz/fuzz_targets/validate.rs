#![no_main]

use arbitrary::Arbitrary;
use drskit_domain::{DrsValidator, InMemoryTermOracle, ValidatorConfig};
use drskit_types::DrsType;
use libfuzzer_sys::fuzz_target;

const SPECS: &str = include_str!("../../tests/fixtures/specs/cmip6plus/project_specs.yaml");

#[derive(Debug, Arbitrary)]
struct Input {
    expression: String,
    drs_type: u8,
    pedantic: bool,
}

fuzz_target!(|input: Input| {
    let Ok(project) = drskit_specs::parse_project_specs(SPECS) else {
        return;
    };
    let oracle = InMemoryTermOracle::new()
        .with_terms("cmip6plus", "institution_id", ["IPSL", "NCC"])
        .with_terms("cmip6plus", "grid_label", ["gn"]);
    let validator = DrsValidator::from_specification(project, &oracle).with_config(ValidatorConfig {
        pedantic: input.pedantic,
    });

    let drs_type = DrsType::ALL[usize::from(input.drs_type) % DrsType::ALL.len()];
    let Ok(report) = validator.validate(&input.expression, drs_type) else {
        return;
    };

    let len = input.expression.chars().count();
    for issue in report.errors.iter().chain(report.warnings.iter()) {
        if let drskit_types::ValidationIssue::ExtraSeparator { column }
        | drskit_types::ValidationIssue::ExtraChar { column }
        | drskit_types::ValidationIssue::BlankTerm { column } = issue
        {
            assert!(*column < len.max(1));
        }
    }
    if input.pedantic {
        assert!(report.warnings.is_empty());
    }
    assert_eq!(report.is_valid(), report.errors.is_empty());
});
