use drskit_specs::SpecLoadError;
use drskit_types::DrsType;
use thiserror::Error;

/// Failure of a single compliance lookup.
///
/// The engine never propagates these: a failed lookup is logged and the
/// value is treated as non-compliant for that position.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("unknown project '{project_id}'")]
    UnknownProject { project_id: String },

    #[error("unknown collection '{collection_id}' in project '{project_id}'")]
    UnknownCollection {
        project_id: String,
        collection_id: String,
    },

    #[error("term lookup failed: {message}")]
    Backend { message: String },
}

/// Environment-level failures. Defects in the expression itself are never
/// reported through this type; they land in the report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrsError {
    #[error(transparent)]
    Specification(#[from] SpecLoadError),

    #[error("project '{project_id}' declares no {drs_type} specification")]
    UnsupportedDrsType {
        project_id: String,
        drs_type: DrsType,
    },
}
