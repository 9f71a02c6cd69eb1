//! Clap-free settings for validate and generate runs.

use camino::Utf8PathBuf;
use std::fmt;
use std::str::FromStr;

/// Where schemas and vocabulary come from, and how strict to be.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Directory holding `<project_id>/project_specs.yaml`.
    pub specs_dir: Utf8PathBuf,
    /// YAML vocabulary catalog answering compliance questions.
    pub vocabulary: Utf8PathBuf,
    pub pedantic: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            specs_dir: Utf8PathBuf::from("specs"),
            vocabulary: Utf8PathBuf::from("vocabulary.yaml"),
            pedantic: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub verbose: bool,
    /// Write to this file instead of stdout.
    pub output: Option<Utf8PathBuf>,
}
