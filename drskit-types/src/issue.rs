//! Issue taxonomy for validation and generation.
//!
//! Issues are closed enums. Callers that want per-kind handling implement one
//! of the visitor traits; every method is required, so forgetting a kind is a
//! compile error rather than a silent no-op.

use crate::drs::DrsType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// Something wrong with an expression under validation.
///
/// Columns are 0-based character offsets into the raw input. Positions are
/// 0-based: token positions index the aligned token sequence, slot positions
/// index the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// Leading or trailing whitespace around the whole expression.
    Space,
    Unparsable {
        expected: DrsType,
    },
    ExtraSeparator {
        column: usize,
    },
    /// Trailing run of separators mixed with whitespace.
    ExtraChar {
        column: usize,
    },
    BlankTerm {
        column: usize,
    },
    FileNameExtension {
        expected: String,
    },
    InvalidTerm {
        value: String,
        collection_id: String,
        position: usize,
    },
    ExtraTerm {
        value: String,
        position: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        collection_id: Option<String>,
    },
    MissingTerm {
        collection_id: String,
        position: usize,
    },
}

impl ValidationIssue {
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationIssue::Space => "space",
            ValidationIssue::Unparsable { .. } => "unparsable",
            ValidationIssue::ExtraSeparator { .. } => "extra_separator",
            ValidationIssue::ExtraChar { .. } => "extra_char",
            ValidationIssue::BlankTerm { .. } => "blank_term",
            ValidationIssue::FileNameExtension { .. } => "file_name_extension",
            ValidationIssue::InvalidTerm { .. } => "invalid_term",
            ValidationIssue::ExtraTerm { .. } => "extra_term",
            ValidationIssue::MissingTerm { .. } => "missing_term",
        }
    }

    pub fn accept<V: ValidationIssueVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            ValidationIssue::Space => visitor.visit_space(),
            ValidationIssue::Unparsable { expected } => visitor.visit_unparsable(*expected),
            ValidationIssue::ExtraSeparator { column } => visitor.visit_extra_separator(*column),
            ValidationIssue::ExtraChar { column } => visitor.visit_extra_char(*column),
            ValidationIssue::BlankTerm { column } => visitor.visit_blank_term(*column),
            ValidationIssue::FileNameExtension { expected } => {
                visitor.visit_file_name_extension(expected)
            }
            ValidationIssue::InvalidTerm {
                value,
                collection_id,
                position,
            } => visitor.visit_invalid_term(value, collection_id, *position),
            ValidationIssue::ExtraTerm {
                value,
                position,
                collection_id,
            } => visitor.visit_extra_term(value, *position, collection_id.as_deref()),
            ValidationIssue::MissingTerm {
                collection_id,
                position,
            } => visitor.visit_missing_term(collection_id, *position),
        }
    }
}

pub trait ValidationIssueVisitor {
    type Output;

    fn visit_space(&mut self) -> Self::Output;
    fn visit_unparsable(&mut self, expected: DrsType) -> Self::Output;
    fn visit_extra_separator(&mut self, column: usize) -> Self::Output;
    fn visit_extra_char(&mut self, column: usize) -> Self::Output;
    fn visit_blank_term(&mut self, column: usize) -> Self::Output;
    fn visit_file_name_extension(&mut self, expected: &str) -> Self::Output;
    fn visit_invalid_term(&mut self, value: &str, collection_id: &str, position: usize)
    -> Self::Output;
    fn visit_extra_term(
        &mut self,
        value: &str,
        position: usize,
        collection_id: Option<&str>,
    ) -> Self::Output;
    fn visit_missing_term(&mut self, collection_id: &str, position: usize) -> Self::Output;
}

/// Something wrong with a generated expression or its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationIssue {
    InvalidTerm {
        value: String,
        collection_id: String,
        position: usize,
    },
    MissingTerm {
        collection_id: String,
        position: usize,
    },
    /// Several bag terms are compliant with one collection.
    AmbiguousCollection {
        collection_id: String,
        candidates: BTreeSet<String>,
    },
    /// One bag term is the only candidate of several collections.
    ConflictingCollections {
        collection_ids: Vec<String>,
        term: String,
    },
    /// A bag term compliant with no collection of the schema.
    ExtraTerm {
        value: String,
    },
}

impl GenerationIssue {
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationIssue::InvalidTerm { .. } => "invalid_term",
            GenerationIssue::MissingTerm { .. } => "missing_term",
            GenerationIssue::AmbiguousCollection { .. } => "ambiguous_collection",
            GenerationIssue::ConflictingCollections { .. } => "conflicting_collections",
            GenerationIssue::ExtraTerm { .. } => "extra_term",
        }
    }

    pub fn accept<V: GenerationIssueVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            GenerationIssue::InvalidTerm {
                value,
                collection_id,
                position,
            } => visitor.visit_invalid_term(value, collection_id, *position),
            GenerationIssue::MissingTerm {
                collection_id,
                position,
            } => visitor.visit_missing_term(collection_id, *position),
            GenerationIssue::AmbiguousCollection {
                collection_id,
                candidates,
            } => visitor.visit_ambiguous_collection(collection_id, candidates),
            GenerationIssue::ConflictingCollections {
                collection_ids,
                term,
            } => visitor.visit_conflicting_collections(collection_ids, term),
            GenerationIssue::ExtraTerm { value } => visitor.visit_extra_term(value),
        }
    }
}

pub trait GenerationIssueVisitor {
    type Output;

    fn visit_invalid_term(&mut self, value: &str, collection_id: &str, position: usize)
    -> Self::Output;
    fn visit_missing_term(&mut self, collection_id: &str, position: usize) -> Self::Output;
    fn visit_ambiguous_collection(
        &mut self,
        collection_id: &str,
        candidates: &BTreeSet<String>,
    ) -> Self::Output;
    fn visit_conflicting_collections(&mut self, collection_ids: &[String], term: &str)
    -> Self::Output;
    fn visit_extra_term(&mut self, value: &str) -> Self::Output;
}

fn join_quoted<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items
        .into_iter()
        .map(|s| format!("'{s}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::Space => f.write_str("expression is surrounded by white space(s)"),
            ValidationIssue::Unparsable { expected } => {
                write!(f, "unable to parse this expression as a {expected}")
            }
            ValidationIssue::ExtraSeparator { column } => {
                write!(f, "extra separator(s) at column {column}")
            }
            ValidationIssue::ExtraChar { column } => {
                write!(f, "extra character(s) at column {column}")
            }
            ValidationIssue::BlankTerm { column } => write!(f, "blank token at column {column}"),
            ValidationIssue::FileNameExtension { expected } => {
                write!(f, "filename extension missing or not compliant with '{expected}'")
            }
            ValidationIssue::InvalidTerm {
                value,
                collection_id,
                position,
            } => write!(
                f,
                "token '{value}' not compliant with {collection_id} at position {position}"
            ),
            ValidationIssue::ExtraTerm {
                value,
                position,
                collection_id: Some(collection_id),
            } => write!(
                f,
                "extra token '{value}' at position {position} (not compliant with {collection_id})"
            ),
            ValidationIssue::ExtraTerm {
                value,
                position,
                collection_id: None,
            } => write!(f, "extra token '{value}' at position {position}"),
            ValidationIssue::MissingTerm {
                collection_id,
                position,
            } => write!(f, "missing token for {collection_id} at position {position}"),
        }
    }
}

impl fmt::Display for GenerationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationIssue::InvalidTerm {
                value,
                collection_id,
                position,
            } => write!(
                f,
                "term '{value}' not compliant with {collection_id} at position {position}"
            ),
            GenerationIssue::MissingTerm {
                collection_id,
                position,
            } => write!(f, "missing term for {collection_id} at position {position}"),
            GenerationIssue::AmbiguousCollection {
                collection_id,
                candidates,
            } => write!(
                f,
                "collection {collection_id} has more than one term ({})",
                join_quoted(candidates)
            ),
            GenerationIssue::ConflictingCollections {
                collection_ids,
                term,
            } => write!(
                f,
                "collections {} are competing for the same term '{term}'",
                join_quoted(collection_ids)
            ),
            GenerationIssue::ExtraTerm { value } => {
                write!(f, "term '{value}' is not compliant with any collection")
            }
        }
    }
}
