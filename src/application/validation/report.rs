// src/application/validation/report.rs
use serde::Serialize;

use super::checks::CheckId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub id: CheckId,
    pub description: &'static str,
    pub passed: bool,
    pub critical: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Outcome of running every constraint check against one article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub results: Vec<CheckResult>,
    pub score: f64,
    pub is_valid: bool,
}

impl ValidationReport {
    pub fn from_results(results: Vec<CheckResult>, pass_score: f64) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let score = if total == 0 {
            0.0
        } else {
            passed as f64 * 100.0 / total as f64
        };
        let critical_failure = results.iter().any(|r| r.critical && !r.passed);
        Self {
            results,
            score,
            is_valid: score >= pass_score && !critical_failure,
        }
    }

    pub fn passed(&self, id: CheckId) -> bool {
        self.results.iter().any(|r| r.id == id && r.passed)
    }

    pub fn has_critical_failure(&self) -> bool {
        self.results.iter().any(|r| r.critical && !r.passed)
    }

    pub fn violations(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    /// `"<check id>: <message>"` for every failed check.
    pub fn violation_messages(&self) -> Vec<String> {
        self.violations()
            .map(|r| match &r.message {
                Some(message) => format!("{}: {message}", r.id),
                None => r.id.to_string(),
            })
            .collect()
    }
}
