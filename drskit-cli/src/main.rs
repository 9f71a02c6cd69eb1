use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use drskit_cli::config::{self, CliOverrides, ConfigMerger};
use drskit_core::adapters::FsWritePort;
use drskit_core::batch::{BatchItem, generation_entries, parse_entries, validation_entries};
use drskit_core::catalog::CatalogOracle;
use drskit_core::pipeline::{ToolError, render_run, run_generate, run_validate, write_output};
use drskit_core::ports::TermOracle;
use drskit_core::settings::{EngineSettings, OutputFormat, OutputSettings};
use drskit_core::{FsSpecificationStore, ToolInfo};
use drskit_render::RenderIssue;
use drskit_types::ProjectDrsSpecification;
use drskit_types::run::DrsRun;
use fs_err as fs;
use serde::Serialize;
use std::collections::BTreeSet;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "drskit",
    version,
    about = "Validate and generate Data Reference Syntax expressions against project vocabularies."
)]
struct Cli {
    /// Config file (default: ./drskit.toml when present).
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    /// Directory holding <project_id>/project_specs.yaml.
    #[arg(long, global = true, env = "DRSKIT_SPECS_DIR")]
    specs_dir: Option<Utf8PathBuf>,

    /// Vocabulary catalog (YAML).
    #[arg(long, global = true, env = "DRSKIT_VOCABULARY")]
    vocabulary: Option<Utf8PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate expressions. Project ids and DRS types switch context.
    Validate(RunArgs),
    /// Generate expressions from `collection=value` mappings or bags of terms.
    Generate(RunArgs),
    /// Print a project's DRS schemas.
    Describe(DescribeArgs),
    /// List the term ids of one collection.
    ListTerms(ListTermsArgs),
}

#[derive(Debug, Parser)]
struct RunArgs {
    /// Project ids, DRS types (directory, filename, dataset) and payloads, in order.
    entries: Vec<String>,

    /// Read more entries from this file.
    #[arg(long)]
    file: Option<Utf8PathBuf>,

    /// Report every warning as an error.
    #[arg(long, default_value_t = false)]
    pedantic: bool,

    /// Output format (text, markdown, json).
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Write the rendered run here instead of stdout.
    #[arg(long)]
    output: Option<Utf8PathBuf>,

    /// List every issue, not just the summary line per expression.
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

#[derive(Debug, Parser)]
struct DescribeArgs {
    project: String,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: ListFormat,
}

#[derive(Debug, Parser)]
struct ListTermsArgs {
    project: String,
    collection: String,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: ListFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ListFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Validate,
    Generate,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::from(0),
        Err(ToolError::Invalid) => ExitCode::from(2),
        Err(e) => {
            error!("{:?}", e);
            eprintln!("drskit: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn real_main() -> Result<(), ToolError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let globals = Globals {
        config: cli.config,
        specs_dir: cli.specs_dir,
        vocabulary: cli.vocabulary,
    };
    match cli.cmd {
        Command::Validate(args) => cmd_run(&globals, args, Mode::Validate),
        Command::Generate(args) => cmd_run(&globals, args, Mode::Generate),
        Command::Describe(args) => Ok(cmd_describe(&globals, args)?),
        Command::ListTerms(args) => Ok(cmd_list_terms(&globals, args)?),
    }
}

struct Globals {
    config: Option<Utf8PathBuf>,
    specs_dir: Option<Utf8PathBuf>,
    vocabulary: Option<Utf8PathBuf>,
}

impl Globals {
    fn settings(
        &self,
        run: Option<&RunArgs>,
    ) -> anyhow::Result<(EngineSettings, OutputSettings)> {
        let cwd = Utf8PathBuf::from(".");
        let file_config = config::load_or_default(self.config.as_deref(), &cwd)
            .context("load drskit.toml config")?;
        let overrides = CliOverrides {
            specs_dir: self.specs_dir.clone(),
            vocabulary: self.vocabulary.clone(),
            pedantic: run.is_some_and(|r| r.pedantic),
            format: run.and_then(|r| r.format),
            verbose: run.is_some_and(|r| r.verbose),
            output: run.and_then(|r| r.output.clone()),
        };
        let (engine, output) = ConfigMerger::new(file_config).merge(overrides)?;
        debug!(
            "merged config: specs_dir={}, vocabulary={}, pedantic={}, format={}",
            engine.specs_dir, engine.vocabulary, engine.pedantic, output.format
        );
        Ok((engine, output))
    }
}

fn cmd_run(globals: &Globals, args: RunArgs, mode: Mode) -> Result<(), ToolError> {
    let (engine, output) = globals.settings(Some(&args))?;
    let store = FsSpecificationStore::new(engine.specs_dir.clone());
    let oracle = load_oracle(&engine.vocabulary)?;
    let projects: BTreeSet<String> = store
        .list_projects()
        .with_context(|| format!("list projects under {}", engine.specs_dir))?
        .into_iter()
        .collect();

    let mut entries = args.entries.clone();
    if let Some(path) = &args.file {
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path))?;
        match mode {
            Mode::Validate => entries.extend(validation_entries(&text)),
            Mode::Generate => entries.extend(generation_entries(&text, &projects)),
        }
    }
    let items: Vec<BatchItem> = parse_entries(&entries, &projects).context("read entries")?;
    info!(entries = items.len(), "running {:?}", mode);

    let valid = match mode {
        Mode::Validate => {
            let run = run_validate(&engine, &store, &oracle, &items, tool_info())?;
            emit(&run, &output)?;
            run.is_valid()
        }
        Mode::Generate => {
            let run = run_generate(&engine, &store, &oracle, &items, tool_info())?;
            emit(&run, &output)?;
            run.is_valid()
        }
    };

    if valid { Ok(()) } else { Err(ToolError::Invalid) }
}

fn emit<I>(run: &DrsRun<I>, output: &OutputSettings) -> anyhow::Result<()>
where
    I: RenderIssue + Serialize,
{
    let rendered = render_run(run, output)?;
    match &output.output {
        Some(path) => {
            write_output(&FsWritePort, path, &rendered)?;
            info!("wrote run to {}", path);
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn load_oracle(path: &Utf8Path) -> anyhow::Result<CatalogOracle> {
    CatalogOracle::load(path).with_context(|| format!("load vocabulary catalog {}", path))
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "drskit".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

fn cmd_describe(globals: &Globals, args: DescribeArgs) -> anyhow::Result<()> {
    let (engine, _) = globals.settings(None)?;
    let store = FsSpecificationStore::new(engine.specs_dir.clone());
    let project = store
        .load_project(&args.project)
        .with_context(|| format!("load project '{}'", args.project))?;

    match args.format {
        ListFormat::Text => print!("{}", describe_text(&project)),
        ListFormat::Json => println!("{}", serde_json::to_string_pretty(&project)?),
    }
    Ok(())
}

fn describe_text(project: &ProjectDrsSpecification) -> String {
    let mut out = String::new();
    match &project.description {
        Some(description) => out.push_str(&format!("{}: {}\n", project.project_id, description)),
        None => out.push_str(&format!("{}\n", project.project_id)),
    }
    for (drs_type, spec) in &project.specs {
        out.push('\n');
        match &spec.extension {
            Some(ext) => out.push_str(&format!(
                "{} (separator '{}', extension '{}')\n",
                drs_type,
                spec.separator,
                ext.full()
            )),
            None => out.push_str(&format!("{} (separator '{}')\n", drs_type, spec.separator)),
        }
        for slot in &spec.slots {
            out.push_str(&format!(
                "  {:<3} {:<24} {}\n",
                slot.position,
                slot.collection_id,
                if slot.required { "required" } else { "optional" }
            ));
        }
    }
    out
}

fn cmd_list_terms(globals: &Globals, args: ListTermsArgs) -> anyhow::Result<()> {
    let (engine, _) = globals.settings(None)?;
    let oracle = load_oracle(&engine.vocabulary)?;
    let terms = oracle
        .list_terms(&args.project, &args.collection)
        .with_context(|| format!("list terms of {}/{}", args.project, args.collection))?;

    match args.format {
        ListFormat::Text => {
            for term in &terms {
                println!("{term}");
            }
        }
        ListFormat::Json => println!("{}", serde_json::to_string_pretty(&terms)?),
    }
    Ok(())
}
