//! Batch validate and generate pipelines.
//!
//! These entry points are I/O-agnostic: schemas and term lookups come through
//! the port traits, output goes through [`WritePort`].

use crate::batch::{BatchItem, GenerationRequest, generation_request};
use crate::ports::{SpecificationStore, TermOracle, WritePort};
use crate::settings::{EngineSettings, OutputFormat, OutputSettings};
use anyhow::Context;
use camino::Utf8Path;
use chrono::Utc;
use drskit_domain::{DrsGenerator, DrsValidator, GeneratorConfig, ValidatorConfig};
use drskit_render::{RenderIssue, render_run_md, render_run_text};
use drskit_types::run::{DrsRun, RunInfo, RunVerdict, ToolInfo};
use drskit_types::schema::{DRSKIT_GENERATION_V1, DRSKIT_VALIDATION_V1};
use drskit_types::{DrsReport, GenerationIssue, ValidationIssue};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Error type for pipeline results. Exit code 2 = invalid expressions, 1 = tool error.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("one or more expressions are not compliant")]
    Invalid,
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ToolError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::Invalid => 2,
            ToolError::Internal(_) => 1,
        }
    }
}

/// Validate every item, loading each project's schema once.
pub fn run_validate(
    settings: &EngineSettings,
    store: &dyn SpecificationStore,
    oracle: &dyn TermOracle,
    items: &[BatchItem],
    tool: ToolInfo,
) -> Result<DrsRun<ValidationIssue>, ToolError> {
    let started_at = Utc::now();
    let config = ValidatorConfig {
        pedantic: settings.pedantic,
    };
    let mut validators: BTreeMap<String, DrsValidator<'_>> = BTreeMap::new();
    let mut reports = Vec::with_capacity(items.len());

    for item in items {
        if !validators.contains_key(&item.project_id) {
            let validator = DrsValidator::new(store, oracle, &item.project_id)
                .with_context(|| format!("load project '{}'", item.project_id))?
                .with_config(config);
            validators.insert(item.project_id.clone(), validator);
        }
        let validator = validators
            .get(&item.project_id)
            .context("validator cache")?;
        let report = validator
            .validate(&item.payload, item.drs_type)
            .with_context(|| format!("validate '{}'", item.payload))?;
        debug!(expression = %item.payload, valid = report.is_valid(), "validated");
        reports.push(report);
    }

    let run = envelope(DRSKIT_VALIDATION_V1, tool, started_at, reports);
    info!(
        reports = run.verdict.counts.reports,
        errors = run.verdict.counts.errors,
        "validation run finished"
    );
    Ok(run)
}

/// Generate one expression per item. Payloads made only of `key=value`
/// words are mappings; anything else is a bag of terms.
pub fn run_generate(
    settings: &EngineSettings,
    store: &dyn SpecificationStore,
    oracle: &dyn TermOracle,
    items: &[BatchItem],
    tool: ToolInfo,
) -> Result<DrsRun<GenerationIssue>, ToolError> {
    let started_at = Utc::now();
    let config = GeneratorConfig {
        pedantic: settings.pedantic,
    };
    let mut generators: BTreeMap<String, DrsGenerator<'_>> = BTreeMap::new();
    let mut reports = Vec::with_capacity(items.len());

    for item in items {
        if !generators.contains_key(&item.project_id) {
            let generator = DrsGenerator::new(store, oracle, &item.project_id)
                .with_context(|| format!("load project '{}'", item.project_id))?
                .with_config(config);
            generators.insert(item.project_id.clone(), generator);
        }
        let generator = generators
            .get(&item.project_id)
            .context("generator cache")?;
        let request = generation_request(&item.payload).context("parse generation entry")?;
        let report = match request {
            GenerationRequest::Mapping(mapping) => {
                generator.generate_from_mapping(&mapping, item.drs_type)
            }
            GenerationRequest::BagOfTerms(terms) => {
                generator.generate_from_bag_of_terms(&terms, item.drs_type)
            }
        }
        .with_context(|| format!("generate from '{}'", item.payload))?;
        debug!(
            expression = report.computed_expression.as_deref().unwrap_or_default(),
            valid = report.is_valid(),
            "generated"
        );
        reports.push(report);
    }

    let run = envelope(DRSKIT_GENERATION_V1, tool, started_at, reports);
    info!(
        reports = run.verdict.counts.reports,
        errors = run.verdict.counts.errors,
        "generation run finished"
    );
    Ok(run)
}

fn envelope<I>(
    schema: &str,
    tool: ToolInfo,
    started_at: chrono::DateTime<Utc>,
    reports: Vec<DrsReport<I>>,
) -> DrsRun<I> {
    let ended_at = Utc::now();
    let duration_ms = (ended_at - started_at).num_milliseconds().max(0) as u64;
    DrsRun {
        schema: schema.to_string(),
        tool,
        run: RunInfo {
            started_at,
            ended_at: Some(ended_at),
            duration_ms: Some(duration_ms),
        },
        verdict: RunVerdict::from_reports(&reports),
        reports,
    }
}

pub fn render_run<I>(run: &DrsRun<I>, output: &OutputSettings) -> anyhow::Result<String>
where
    I: RenderIssue + Serialize,
{
    match output.format {
        OutputFormat::Text => Ok(render_run_text(run, output.verbose)),
        OutputFormat::Markdown => Ok(render_run_md(run)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(run).context("serialize run")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Write rendered output through the port.
pub fn write_output(write: &dyn WritePort, path: &Utf8Path, contents: &str) -> anyhow::Result<()> {
    debug!(path = %path, bytes = contents.len(), "writing run output");
    write.write_file(path, contents.as_bytes())
}
