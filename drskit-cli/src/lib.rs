//! Library half of the `drskit` CLI: configuration discovery and merging.

pub mod config;
