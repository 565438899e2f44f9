//! Validation report model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Overall outcome of validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// No issues and no warnings.
    Pass,
    /// Warnings only.
    Warn,
    /// At least one issue.
    Fail,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Warn => "WARN",
            Status::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a finding is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Hard failure, contributes to FAIL.
    #[default]
    Issue,
    /// Soft note, contributes to WARN.
    Warning,
}

/// Result of validating an extracted record and its line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub status: Status,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    /// Present key fields over total key fields, e.g. `"4/5"`.
    pub field_coverage: String,
}

impl ValidationReport {
    /// Build a report, deriving the status from the findings.
    pub fn new(issues: Vec<String>, warnings: Vec<String>, present: usize, total: usize) -> Self {
        let status = if !issues.is_empty() {
            Status::Fail
        } else if !warnings.is_empty() {
            Status::Warn
        } else {
            Status::Pass
        };

        Self {
            status,
            issues,
            warnings,
            field_coverage: format!("{}/{}", present, total),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.status == Status::Pass
    }

    pub fn is_fail(&self) -> bool {
        self.status == Status::Fail
    }
}
