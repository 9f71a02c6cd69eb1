use crate::error::DrsError;
use crate::ports::{SpecificationStore, TermOracle, is_compliant};
use crate::resolve::{candidates, resolve};
use crate::sink::IssueSink;
use drskit_types::placeholder::{INVALID, MISSING};
use drskit_types::{
    DrsGenerationReport, DrsInput, DrsReport, DrsSpecification, DrsType, GenerationIssue,
    ProjectDrsSpecification,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratorConfig {
    /// Report every warning as an error.
    pub pedantic: bool,
}

/// Builds DRS expressions of one project from mappings or bags of terms.
///
/// `computed_expression` is always set, with `[MISSING]` and `[INVALID]`
/// standing in for required slots that could not be filled.
pub struct DrsGenerator<'a> {
    project: ProjectDrsSpecification,
    oracle: &'a dyn TermOracle,
    config: GeneratorConfig,
}

impl<'a> DrsGenerator<'a> {
    pub fn new(
        store: &dyn SpecificationStore,
        oracle: &'a dyn TermOracle,
        project_id: &str,
    ) -> Result<Self, DrsError> {
        let project = store.load_project(project_id)?;
        debug!(project = %project_id, "generator ready");
        Ok(Self::from_specification(project, oracle))
    }

    pub fn from_specification(project: ProjectDrsSpecification, oracle: &'a dyn TermOracle) -> Self {
        Self {
            project,
            oracle,
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project.project_id
    }

    fn spec(&self, drs_type: DrsType) -> Result<&DrsSpecification, DrsError> {
        self.project
            .get(drs_type)
            .ok_or_else(|| DrsError::UnsupportedDrsType {
                project_id: self.project.project_id.clone(),
                drs_type,
            })
    }

    /// Every slot value is checked against its collection. Keys that name no
    /// slot are ignored.
    pub fn generate_from_mapping(
        &self,
        mapping: &BTreeMap<String, String>,
        drs_type: DrsType,
    ) -> Result<DrsGenerationReport, DrsError> {
        let spec = self.spec(drs_type)?;
        let mut sink = IssueSink::new(self.config.pedantic);
        let mut report = DrsReport::new(
            self.project.project_id.clone(),
            drs_type,
            DrsInput::Mapping(mapping.clone()),
        );
        self.assemble(spec, mapping, true, &mut sink, &mut report);
        Ok(finish(report, sink))
    }

    /// Resolves which collection each term belongs to, then builds the
    /// expression from the unambiguous assignments only.
    pub fn generate_from_bag_of_terms<I, S>(
        &self,
        terms: I,
        drs_type: DrsType,
    ) -> Result<DrsGenerationReport, DrsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let spec = self.spec(drs_type)?;
        let terms: BTreeSet<String> = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        let mut sink = IssueSink::new(self.config.pedantic);
        let mut report = DrsReport::new(
            self.project.project_id.clone(),
            drs_type,
            DrsInput::BagOfTerms(terms.clone()),
        );

        let candidates = candidates(self.oracle, &self.project.project_id, spec, &terms);
        let resolution = resolve(spec, &terms, &candidates, &mut sink);
        self.assemble(spec, &resolution.assigned, false, &mut sink, &mut report);
        Ok(finish(report, sink))
    }

    pub fn generate_directory_from_mapping(
        &self,
        mapping: &BTreeMap<String, String>,
    ) -> Result<DrsGenerationReport, DrsError> {
        self.generate_from_mapping(mapping, DrsType::Directory)
    }

    pub fn generate_dataset_id_from_mapping(
        &self,
        mapping: &BTreeMap<String, String>,
    ) -> Result<DrsGenerationReport, DrsError> {
        self.generate_from_mapping(mapping, DrsType::DatasetId)
    }

    pub fn generate_file_name_from_mapping(
        &self,
        mapping: &BTreeMap<String, String>,
    ) -> Result<DrsGenerationReport, DrsError> {
        self.generate_from_mapping(mapping, DrsType::FileName)
    }

    pub fn generate_directory_from_bag_of_terms<I, S>(
        &self,
        terms: I,
    ) -> Result<DrsGenerationReport, DrsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.generate_from_bag_of_terms(terms, DrsType::Directory)
    }

    pub fn generate_dataset_id_from_bag_of_terms<I, S>(
        &self,
        terms: I,
    ) -> Result<DrsGenerationReport, DrsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.generate_from_bag_of_terms(terms, DrsType::DatasetId)
    }

    pub fn generate_file_name_from_bag_of_terms<I, S>(
        &self,
        terms: I,
    ) -> Result<DrsGenerationReport, DrsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.generate_from_bag_of_terms(terms, DrsType::FileName)
    }

    fn assemble(
        &self,
        spec: &DrsSpecification,
        values: &BTreeMap<String, String>,
        check: bool,
        sink: &mut IssueSink<GenerationIssue>,
        report: &mut DrsGenerationReport,
    ) {
        let project_id = self.project.project_id.as_str();
        let mut parts: Vec<&str> = Vec::with_capacity(spec.slots.len());
        for slot in &spec.slots {
            match values.get(&slot.collection_id) {
                Some(value)
                    if !check || is_compliant(self.oracle, project_id, &slot.collection_id, value) =>
                {
                    parts.push(value);
                    report
                        .mapping_used
                        .insert(slot.collection_id.clone(), value.clone());
                }
                Some(value) => {
                    sink.error(GenerationIssue::InvalidTerm {
                        value: value.clone(),
                        collection_id: slot.collection_id.clone(),
                        position: slot.position,
                    });
                    parts.push(INVALID);
                }
                None if slot.required => {
                    sink.error(GenerationIssue::MissingTerm {
                        collection_id: slot.collection_id.clone(),
                        position: slot.position,
                    });
                    parts.push(MISSING);
                }
                None => sink.warning(GenerationIssue::MissingTerm {
                    collection_id: slot.collection_id.clone(),
                    position: slot.position,
                }),
            }
        }

        let separator = spec.separator.to_string();
        let mut expression = parts.join(separator.as_str());
        if let Some(extension) = &spec.extension {
            expression.push_str(&extension.full());
        }
        debug!(drs_type = %spec.drs_type, expression = %expression, "generated expression");
        report.computed_expression = Some(expression);
    }
}

fn finish(
    mut report: DrsGenerationReport,
    sink: IssueSink<GenerationIssue>,
) -> DrsGenerationReport {
    let (errors, warnings) = sink.into_parts();
    report.errors = errors;
    report.warnings = warnings;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::InMemoryTermOracle;
    use drskit_types::{CollectionSlot, FileNameExtension};

    fn project() -> ProjectDrsSpecification {
        let mut specs = BTreeMap::new();
        specs.insert(
            DrsType::FileName,
            DrsSpecification {
                drs_type: DrsType::FileName,
                separator: '_',
                slots: vec![
                    CollectionSlot {
                        collection_id: "a".into(),
                        required: true,
                        position: 0,
                    },
                    CollectionSlot {
                        collection_id: "b".into(),
                        required: false,
                        position: 1,
                    },
                ],
                extension: Some(FileNameExtension {
                    separator: ".".into(),
                    value: "nc".into(),
                }),
            },
        );
        ProjectDrsSpecification {
            project_id: "p".into(),
            description: None,
            specs,
        }
    }

    #[test]
    fn optional_missing_slot_is_omitted() {
        let oracle = InMemoryTermOracle::new()
            .with_terms("p", "a", ["x"])
            .with_terms("p", "b", ["y"]);
        let generator = DrsGenerator::from_specification(project(), &oracle);
        let mapping = BTreeMap::from([("a".to_string(), "x".to_string())]);

        let report = generator.generate_file_name_from_mapping(&mapping).unwrap();

        assert!(report.is_valid());
        assert_eq!(report.computed_expression.as_deref(), Some("x.nc"));
        assert_eq!(report.nb_warnings(), 1);
    }

    #[test]
    fn superset_mapping_is_tolerated() {
        let oracle = InMemoryTermOracle::new()
            .with_terms("p", "a", ["x"])
            .with_terms("p", "b", ["y"]);
        let generator = DrsGenerator::from_specification(project(), &oracle);
        let mapping = BTreeMap::from([
            ("a".to_string(), "x".to_string()),
            ("b".to_string(), "y".to_string()),
            ("unrelated".to_string(), "whatever".to_string()),
        ]);

        let report = generator.generate_file_name_from_mapping(&mapping).unwrap();

        assert!(report.is_valid());
        assert_eq!(report.nb_warnings(), 0);
        assert_eq!(report.computed_expression.as_deref(), Some("x_y.nc"));
    }

    #[test]
    fn bag_of_terms_ignores_blank_entries() {
        let oracle = InMemoryTermOracle::new()
            .with_terms("p", "a", ["x"])
            .with_terms("p", "b", ["y"]);
        let generator = DrsGenerator::from_specification(project(), &oracle);

        let report = generator
            .generate_file_name_from_bag_of_terms(["y", " ", "x"])
            .unwrap();

        assert!(report.is_valid());
        assert_eq!(report.computed_expression.as_deref(), Some("x_y.nc"));
        assert_eq!(report.mapping_used.len(), 2);
    }

    #[test]
    fn lookup_failure_marks_only_its_slot() {
        // "b" is unknown to the oracle, so its lookups fail.
        let oracle = InMemoryTermOracle::new().with_terms("p", "a", ["x"]);
        let generator = DrsGenerator::from_specification(project(), &oracle);
        let mapping = BTreeMap::from([
            ("a".to_string(), "x".to_string()),
            ("b".to_string(), "y".to_string()),
        ]);

        let report = generator.generate_file_name_from_mapping(&mapping).unwrap();

        assert_eq!(
            report.errors,
            vec![GenerationIssue::InvalidTerm {
                value: "y".into(),
                collection_id: "b".into(),
                position: 1
            }]
        );
        assert_eq!(report.computed_expression.as_deref(), Some("x_[INVALID].nc"));
        assert_eq!(report.mapping_used.get("a").map(String::as_str), Some("x"));

        let report = generator
            .generate_file_name_from_bag_of_terms(["x", "y"])
            .unwrap();

        assert!(report.is_valid());
        assert_eq!(report.computed_expression.as_deref(), Some("x.nc"));
        assert_eq!(
            report.warnings,
            vec![
                GenerationIssue::ExtraTerm { value: "y".into() },
                GenerationIssue::MissingTerm {
                    collection_id: "b".into(),
                    position: 1
                },
            ]
        );
    }
}
