use crate::report::DrsReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope written by batch validate/generate runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrsRun<I> {
    pub schema: String,
    pub tool: ToolInfo,
    pub run: RunInfo,
    pub verdict: RunVerdict,

    #[serde(default)]
    pub reports: Vec<DrsReport<I>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    pub started_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounts {
    pub reports: u64,
    pub errors: u64,
    pub warnings: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunVerdict {
    pub status: RunStatus,
    pub counts: RunCounts,
}

impl RunVerdict {
    pub fn from_reports<I>(reports: &[DrsReport<I>]) -> Self {
        let counts = RunCounts {
            reports: reports.len() as u64,
            errors: reports.iter().map(|r| r.nb_errors() as u64).sum(),
            warnings: reports.iter().map(|r| r.nb_warnings() as u64).sum(),
        };
        let status = if counts.errors > 0 {
            RunStatus::Fail
        } else if counts.warnings > 0 {
            RunStatus::Warn
        } else {
            RunStatus::Pass
        };
        Self { status, counts }
    }
}

impl<I> DrsRun<I> {
    pub fn is_valid(&self) -> bool {
        self.verdict.status != RunStatus::Fail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drs::DrsType;
    use crate::issue::ValidationIssue;
    use crate::report::DrsInput;

    #[test]
    fn verdict_is_worst_of_reports() {
        let clean: DrsReport<ValidationIssue> =
            DrsReport::new("p", DrsType::DatasetId, DrsInput::Expression("a.b".into()));
        let mut warned = clean.clone();
        warned.warnings.push(ValidationIssue::Space);
        let mut failed = clean.clone();
        failed.errors.push(ValidationIssue::BlankTerm { column: 1 });

        assert_eq!(RunVerdict::from_reports(&[clean.clone()]).status, RunStatus::Pass);
        assert_eq!(
            RunVerdict::from_reports(&[clean.clone(), warned.clone()]).status,
            RunStatus::Warn
        );
        let verdict = RunVerdict::from_reports(&[clean, warned, failed]);
        assert_eq!(verdict.status, RunStatus::Fail);
        assert_eq!(
            verdict.counts,
            RunCounts {
                reports: 3,
                errors: 1,
                warnings: 1
            }
        );
    }
}
