//! Port traits abstracting I/O away from the pipeline.

use camino::Utf8Path;

pub use drskit_domain::{SpecificationStore, TermOracle};

/// File-system write operations.
///
/// `write_file` creates missing parent directories.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
}
