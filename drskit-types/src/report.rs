use crate::drs::DrsType;
use crate::issue::{GenerationIssue, Severity, ValidationIssue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// What the caller handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DrsInput {
    Expression(String),
    Mapping(BTreeMap<String, String>),
    BagOfTerms(BTreeSet<String>),
}

/// Outcome of one validate or generate call.
///
/// Valid iff `errors` is empty; warnings never affect validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrsReport<I> {
    pub project_id: String,
    pub drs_type: DrsType,
    pub input: DrsInput,

    #[serde(default)]
    pub errors: Vec<I>,

    #[serde(default)]
    pub warnings: Vec<I>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_expression: Option<String>,

    /// Collection to term assignment used to build `computed_expression`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mapping_used: BTreeMap<String, String>,
}

pub type DrsValidationReport = DrsReport<ValidationIssue>;
pub type DrsGenerationReport = DrsReport<GenerationIssue>;

impl<I> DrsReport<I> {
    pub fn new(project_id: impl Into<String>, drs_type: DrsType, input: DrsInput) -> Self {
        Self {
            project_id: project_id.into(),
            drs_type,
            input,
            errors: Vec::new(),
            warnings: Vec::new(),
            computed_expression: None,
            mapping_used: BTreeMap::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn nb_errors(&self) -> usize {
        self.errors.len()
    }

    pub fn nb_warnings(&self) -> usize {
        self.warnings.len()
    }

    /// Errors first, then warnings, each in report order.
    pub fn issues(&self) -> impl Iterator<Item = (Severity, &I)> {
        self.errors
            .iter()
            .map(|i| (Severity::Error, i))
            .chain(self.warnings.iter().map(|i| (Severity::Warning, i)))
    }

    /// The expression this report talks about: the generated one when there
    /// is one, otherwise the validated input.
    pub fn subject(&self) -> String {
        if let Some(expr) = &self.computed_expression {
            return expr.clone();
        }
        match &self.input {
            DrsInput::Expression(expr) => expr.clone(),
            DrsInput::Mapping(map) => map
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(" "),
            DrsInput::BagOfTerms(bag) => bag.iter().cloned().collect::<Vec<_>>().join(" "),
        }
    }
}

impl<I> From<&DrsReport<I>> for bool {
    fn from(report: &DrsReport<I>) -> bool {
        report.is_valid()
    }
}

impl<I> fmt::Display for DrsReport<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' has {} error(s) and {} warning(s)",
            self.subject(),
            self.nb_errors(),
            self.nb_warnings()
        )
    }
}
