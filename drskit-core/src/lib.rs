//! Embeddable core library for drskit.
//!
//! Provides a clap-free, I/O-abstracted entry point for batch validation and
//! generation of DRS expressions.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`SpecificationStore`](ports::SpecificationStore): load project schemas
//! - [`TermOracle`](ports::TermOracle): answer term compliance questions
//! - [`WritePort`](ports::WritePort): write rendered output
//!
//! The [`adapters`] module provides filesystem and in-memory writers, and
//! [`catalog`] a YAML-backed term oracle.
//!
//! # Entry points
//!
//! - [`run_validate`](pipeline::run_validate): validate a batch of expressions
//! - [`run_generate`](pipeline::run_generate): generate expressions from mappings or bags of terms

pub mod adapters;
pub mod batch;
pub mod catalog;
pub mod pipeline;
pub mod ports;
pub mod settings;

pub use drskit_specs::{FsSpecificationStore, SpecLoadError};
pub use drskit_types::{DrsType, run::ToolInfo};
