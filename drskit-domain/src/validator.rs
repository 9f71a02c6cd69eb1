use crate::error::DrsError;
use crate::parse::parse_expression;
use crate::ports::{SpecificationStore, TermOracle, is_compliant};
use crate::sink::IssueSink;
use drskit_types::{
    CollectionSlot, DrsInput, DrsReport, DrsSpecification, DrsType, DrsValidationReport,
    ProjectDrsSpecification, Token, ValidationIssue,
};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatorConfig {
    /// Report every warning as an error.
    pub pedantic: bool,
}

/// Validates DRS expressions of one project.
///
/// The project schema is loaded once at construction; each call builds a
/// fresh report and leaves the validator untouched.
pub struct DrsValidator<'a> {
    project: ProjectDrsSpecification,
    oracle: &'a dyn TermOracle,
    config: ValidatorConfig,
}

impl<'a> DrsValidator<'a> {
    pub fn new(
        store: &dyn SpecificationStore,
        oracle: &'a dyn TermOracle,
        project_id: &str,
    ) -> Result<Self, DrsError> {
        let project = store.load_project(project_id)?;
        debug!(project = %project_id, types = project.specs.len(), "validator ready");
        Ok(Self::from_specification(project, oracle))
    }

    pub fn from_specification(project: ProjectDrsSpecification, oracle: &'a dyn TermOracle) -> Self {
        Self {
            project,
            oracle,
            config: ValidatorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project.project_id
    }

    pub fn specification(&self) -> &ProjectDrsSpecification {
        &self.project
    }

    pub fn validate(
        &self,
        expression: &str,
        drs_type: DrsType,
    ) -> Result<DrsValidationReport, DrsError> {
        let spec = self
            .project
            .get(drs_type)
            .ok_or_else(|| DrsError::UnsupportedDrsType {
                project_id: self.project.project_id.clone(),
                drs_type,
            })?;
        Ok(self.validate_with(expression, spec))
    }

    pub fn validate_directory(&self, expression: &str) -> Result<DrsValidationReport, DrsError> {
        self.validate(expression, DrsType::Directory)
    }

    pub fn validate_dataset_id(&self, expression: &str) -> Result<DrsValidationReport, DrsError> {
        self.validate(expression, DrsType::DatasetId)
    }

    pub fn validate_file_name(&self, expression: &str) -> Result<DrsValidationReport, DrsError> {
        self.validate(expression, DrsType::FileName)
    }

    fn validate_with(&self, expression: &str, spec: &DrsSpecification) -> DrsValidationReport {
        let mut sink = IssueSink::new(self.config.pedantic);
        let mut report = DrsReport::new(
            self.project.project_id.clone(),
            spec.drs_type,
            DrsInput::Expression(expression.to_string()),
        );

        if let Some(tokens) = parse_expression(expression, spec, &mut sink) {
            report.mapping_used = self.align(spec, &tokens, &mut sink);
        }

        let (errors, warnings) = sink.into_parts();
        report.errors = errors;
        report.warnings = warnings;
        debug!(
            project = %self.project.project_id,
            drs_type = %spec.drs_type,
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "validated expression"
        );
        report
    }

    /// Walk slots and tokens together. Returns the compliant assignments.
    fn align(
        &self,
        spec: &DrsSpecification,
        tokens: &[Token],
        sink: &mut IssueSink<ValidationIssue>,
    ) -> BTreeMap<String, String> {
        let project_id = self.project.project_id.as_str();
        let mut matched = BTreeMap::new();
        // Optional slots that rejected a token, with the index of that token.
        let mut skipped: Vec<(usize, &CollectionSlot)> = Vec::new();

        let mut token_index = 0;
        let mut slot_index = 0;
        while slot_index < spec.slots.len() && token_index < tokens.len() {
            let slot = &spec.slots[slot_index];
            let token = &tokens[token_index];
            if is_compliant(self.oracle, project_id, &slot.collection_id, &token.value) {
                matched.insert(slot.collection_id.clone(), token.value.clone());
                token_index += 1;
                slot_index += 1;
            } else if slot.required {
                sink.error(ValidationIssue::InvalidTerm {
                    value: token.value.clone(),
                    collection_id: slot.collection_id.clone(),
                    position: token_index,
                });
                token_index += 1;
                slot_index += 1;
            } else {
                debug!(collection = %slot.collection_id, token = %token.value, "optional slot skipped");
                skipped.push((token_index, slot));
                slot_index += 1;
            }
        }

        // A leftover token is blamed on the first optional slot that rejected it.
        let blamed: Vec<Option<usize>> = (token_index..tokens.len())
            .map(|position| skipped.iter().position(|(index, _)| *index == position))
            .collect();

        for (i, (_, slot)) in skipped.iter().enumerate() {
            if !blamed.contains(&Some(i)) {
                sink.warning(ValidationIssue::MissingTerm {
                    collection_id: slot.collection_id.clone(),
                    position: slot.position,
                });
            }
        }

        for slot in &spec.slots[slot_index..] {
            let issue = ValidationIssue::MissingTerm {
                collection_id: slot.collection_id.clone(),
                position: slot.position,
            };
            if slot.required {
                sink.error(issue);
            } else {
                sink.warning(issue);
            }
        }

        for ((position, token), blame) in tokens.iter().enumerate().skip(token_index).zip(blamed) {
            sink.error(ValidationIssue::ExtraTerm {
                value: token.value.clone(),
                position,
                collection_id: blame.map(|i| skipped[i].1.collection_id.clone()),
            });
        }

        matched
    }
}
