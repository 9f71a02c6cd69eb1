//! DRS engine: tokenize, align, check and generate.
//!
//! This crate owns *what* makes an expression compliant. It never touches the
//! network or persisted vocabulary data; term lookups go through the
//! [`TermOracle`] port and schemas through [`SpecificationStore`].

mod error;
mod generator;
mod parse;
mod ports;
mod resolve;
mod sink;
mod tokenizer;
mod validator;

pub use error::{DrsError, OracleError};
pub use generator::{DrsGenerator, GeneratorConfig};
pub use ports::{InMemorySpecificationStore, InMemoryTermOracle, SpecificationStore, TermOracle};
pub use tokenizer::{tokenize, tokenize_at};
pub use validator::{DrsValidator, ValidatorConfig};
