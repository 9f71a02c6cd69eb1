//! Configuration file loading for drskit.
//!
//! Discovers and loads `drskit.toml` from the working directory (or an
//! explicit `--config` path). Merges config file settings with CLI arguments
//! (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use drskit_core::settings::{EngineSettings, OutputFormat, OutputSettings};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "drskit.toml";

/// Top-level configuration from drskit.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DrskitConfig {
    pub engine: EngineConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding `<project_id>/project_specs.yaml`.
    pub specs_dir: Option<Utf8PathBuf>,

    /// Vocabulary catalog file.
    pub vocabulary: Option<Utf8PathBuf>,

    /// Promote warnings to errors.
    pub pedantic: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// `text`, `markdown` or `json`.
    pub format: Option<String>,
    pub verbose: bool,
}

pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

pub fn load_config(path: &Utf8Path) -> anyhow::Result<DrskitConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<DrskitConfig> {
    let config: DrskitConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// An explicit path must exist; otherwise fall back to discovery, then defaults.
pub fn load_or_default(explicit: Option<&Utf8Path>, dir: &Utf8Path) -> anyhow::Result<DrskitConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(DrskitConfig::default()),
    }
}

/// Values given on the command line. `None`/`false` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub specs_dir: Option<Utf8PathBuf>,
    pub vocabulary: Option<Utf8PathBuf>,
    pub pedantic: bool,
    pub format: Option<OutputFormat>,
    pub verbose: bool,
    pub output: Option<Utf8PathBuf>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: DrskitConfig,
}

impl ConfigMerger {
    pub fn new(config: DrskitConfig) -> Self {
        Self { config }
    }

    /// Paths from the CLI replace config values; boolean flags can only turn
    /// a setting on.
    pub fn merge(self, cli: CliOverrides) -> anyhow::Result<(EngineSettings, OutputSettings)> {
        let defaults = EngineSettings::default();
        let engine = EngineSettings {
            specs_dir: cli
                .specs_dir
                .or(self.config.engine.specs_dir)
                .unwrap_or(defaults.specs_dir),
            vocabulary: cli
                .vocabulary
                .or(self.config.engine.vocabulary)
                .unwrap_or(defaults.vocabulary),
            pedantic: cli.pedantic || self.config.engine.pedantic,
        };

        let format = match (cli.format, self.config.output.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(raw)) => raw
                .parse::<OutputFormat>()
                .map_err(|e| anyhow::anyhow!("[output] format: {e}"))?,
            (None, None) => OutputFormat::default(),
        };
        let output = OutputSettings {
            format,
            verbose: cli.verbose || self.config.output.verbose,
            output: cli.output,
        };
        Ok((engine, output))
    }
}
