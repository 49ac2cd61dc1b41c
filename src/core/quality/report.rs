//! Data quality report structures

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of one quality check.
#[derive(Debug, Clone, Serialize)]
pub struct QualityCheck {
    /// Check name (e.g. `patient.volumetrics`)
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Number of violating rows (0 when passed)
    pub violations: usize,
    /// Human-readable outcome
    pub detail: String,
}

/// Aggregate pass/fail report over all quality checks.
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    /// When the checks were run
    pub checked_at: DateTime<Utc>,
    /// Individual check results
    pub checks: Vec<QualityCheck>,
}

impl QualityReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self {
            checked_at: Utc::now(),
            checks: Vec::new(),
        }
    }

    /// Records a passed check.
    pub fn record_pass(&mut self, name: &str, detail: impl Into<String>) {
        self.checks.push(QualityCheck {
            name: name.to_string(),
            passed: true,
            violations: 0,
            detail: detail.into(),
        });
    }

    /// Records a failed check with its violation count.
    pub fn record_failure(&mut self, name: &str, violations: usize, detail: impl Into<String>) {
        self.checks.push(QualityCheck {
            name: name.to_string(),
            passed: false,
            violations,
            detail: detail.into(),
        });
    }

    /// True when every check passed.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Total number of violations across all checks.
    pub fn total_violations(&self) -> usize {
        self.checks.iter().map(|c| c.violations).sum()
    }

    /// Number of failed checks.
    pub fn failed_checks(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }
}

impl Default for QualityReport {
    fn default() -> Self {
        Self::new()
    }
}
