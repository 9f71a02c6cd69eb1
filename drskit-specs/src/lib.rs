//! Project DRS schema loading.
//!
//! A store is a directory holding one `<project_id>/project_specs.yaml` per
//! project. Files are parsed tolerantly (unknown keys are ignored) and then
//! checked strictly: slot positions must be contiguous, only trailing slots may
//! be optional, separators are single characters and file names carry an
//! extension.

pub mod load;
pub mod raw;

pub use load::{
    FsSpecificationStore, PROJECT_SPECS_FILE, SpecLoadError, load_project_specs,
    parse_project_specs,
};
