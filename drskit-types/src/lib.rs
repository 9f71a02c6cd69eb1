//! Shared DTOs for the drskit workspace.
//!
//! # Design constraints
//! - Reports and run envelopes are serialized to disk and consumed by other tools.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod drs;
pub mod issue;
pub mod report;
pub mod run;
pub mod token;

pub use drs::{
    CollectionSlot, DrsSpecification, DrsType, FileNameExtension, MatchingTerm,
    ProjectDrsSpecification,
};
pub use issue::{
    GenerationIssue, GenerationIssueVisitor, Severity, ValidationIssue, ValidationIssueVisitor,
};
pub use report::{DrsGenerationReport, DrsInput, DrsReport, DrsValidationReport};
pub use token::Token;

/// Schema identifiers.
pub mod schema {
    pub const DRSKIT_VALIDATION_V1: &str = "drskit.validation.v1";
    pub const DRSKIT_GENERATION_V1: &str = "drskit.generation.v1";
}

/// Placeholders substituted into generated expressions.
pub mod placeholder {
    pub const MISSING: &str = "[MISSING]";
    pub const INVALID: &str = "[INVALID]";
}
