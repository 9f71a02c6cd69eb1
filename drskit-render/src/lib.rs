//! Rendering helpers (text and markdown) for DRS reports and batch runs.

use drskit_types::run::{DrsRun, RunStatus};
use drskit_types::{
    DrsReport, DrsType, GenerationIssue, GenerationIssueVisitor, ValidationIssue,
    ValidationIssueVisitor,
};
use std::collections::BTreeSet;
use std::fmt::Display;

/// What the renderers need from an issue besides its message.
pub trait RenderIssue: Display {
    fn kind(&self) -> &'static str;
    fn location(&self) -> String;
}

impl RenderIssue for ValidationIssue {
    fn kind(&self) -> &'static str {
        ValidationIssue::kind(self)
    }

    fn location(&self) -> String {
        self.accept(&mut Locator)
    }
}

impl RenderIssue for GenerationIssue {
    fn kind(&self) -> &'static str {
        GenerationIssue::kind(self)
    }

    fn location(&self) -> String {
        self.accept(&mut Locator)
    }
}

/// Short "where" label for the markdown tables.
struct Locator;

impl ValidationIssueVisitor for Locator {
    type Output = String;

    fn visit_space(&mut self) -> String {
        "-".to_string()
    }

    fn visit_unparsable(&mut self, _expected: DrsType) -> String {
        "-".to_string()
    }

    fn visit_extra_separator(&mut self, column: usize) -> String {
        format!("col {column}")
    }

    fn visit_extra_char(&mut self, column: usize) -> String {
        format!("col {column}")
    }

    fn visit_blank_term(&mut self, column: usize) -> String {
        format!("col {column}")
    }

    fn visit_file_name_extension(&mut self, _expected: &str) -> String {
        "extension".to_string()
    }

    fn visit_invalid_term(&mut self, _value: &str, collection_id: &str, position: usize) -> String {
        format!("pos {position} ({collection_id})")
    }

    fn visit_extra_term(
        &mut self,
        _value: &str,
        position: usize,
        collection_id: Option<&str>,
    ) -> String {
        match collection_id {
            Some(c) => format!("pos {position} ({c})"),
            None => format!("pos {position}"),
        }
    }

    fn visit_missing_term(&mut self, collection_id: &str, position: usize) -> String {
        format!("pos {position} ({collection_id})")
    }
}

impl GenerationIssueVisitor for Locator {
    type Output = String;

    fn visit_invalid_term(&mut self, _value: &str, collection_id: &str, position: usize) -> String {
        format!("pos {position} ({collection_id})")
    }

    fn visit_missing_term(&mut self, collection_id: &str, position: usize) -> String {
        format!("pos {position} ({collection_id})")
    }

    fn visit_ambiguous_collection(
        &mut self,
        collection_id: &str,
        _candidates: &BTreeSet<String>,
    ) -> String {
        collection_id.to_string()
    }

    fn visit_conflicting_collections(&mut self, collection_ids: &[String], _term: &str) -> String {
        collection_ids.join(", ")
    }

    fn visit_extra_term(&mut self, _value: &str) -> String {
        "-".to_string()
    }
}

/// One summary line, plus one line per issue when `verbose`.
pub fn render_report_text<I: RenderIssue>(report: &DrsReport<I>, verbose: bool) -> String {
    let mut out = format!("{report}\n");
    if verbose {
        for (severity, issue) in report.issues() {
            out.push_str(&format!("  [{severity}] {issue}\n"));
        }
        if let Some(expr) = &report.computed_expression
            && !matches!(report.input, drskit_types::DrsInput::Expression(_))
        {
            out.push_str(&format!("  generated: {expr}\n"));
        }
    }
    out
}

pub fn render_run_text<I: RenderIssue>(run: &DrsRun<I>, verbose: bool) -> String {
    let mut out = String::new();
    for report in &run.reports {
        out.push_str(&render_report_text(report, verbose));
    }
    out.push_str(&format!(
        "{}: {} report(s), {} error(s), {} warning(s)\n",
        status_label(run.verdict.status),
        run.verdict.counts.reports,
        run.verdict.counts.errors,
        run.verdict.counts.warnings
    ));
    out
}

pub fn render_run_md<I: RenderIssue>(run: &DrsRun<I>) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", run.schema));
    out.push_str(&format!(
        "- Status: `{}`\n- Reports: {}\n- Errors: {}\n- Warnings: {}\n\n",
        status_label(run.verdict.status),
        run.verdict.counts.reports,
        run.verdict.counts.errors,
        run.verdict.counts.warnings
    ));

    out.push_str("## Reports\n\n");
    if run.reports.is_empty() {
        out.push_str("_No expressions processed._\n");
        return out;
    }

    for (i, report) in run.reports.iter().enumerate() {
        out.push_str(&format!(
            "### {}. `{}`\n\n",
            i + 1,
            escape_md(&report.subject())
        ));
        out.push_str(&format!(
            "- Project: `{}`\n- Type: `{}`\n- Valid: `{}`\n",
            report.project_id,
            report.drs_type,
            report.is_valid()
        ));
        if report.nb_errors() + report.nb_warnings() > 0 {
            out.push_str("\n| Severity | Kind | Where | Message |\n");
            out.push_str("|---|---|---|---|\n");
            for (severity, issue) in report.issues() {
                out.push_str(&format!(
                    "| {} | `{}` | {} | {} |\n",
                    severity,
                    issue.kind(),
                    issue.location(),
                    escape_md(&issue.to_string())
                ));
            }
        }
        out.push('\n');
    }

    out
}

fn status_label(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Pass => "pass",
        RunStatus::Warn => "warn",
        RunStatus::Fail => "fail",
    }
}

fn escape_md(s: &str) -> String {
    s.replace('|', "\\|").replace('`', "'")
}
