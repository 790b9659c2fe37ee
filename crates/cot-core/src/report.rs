//! Consistency report types
//!
//! Per-step check outcomes, categorized findings and the aggregate score.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Checks run against every step
pub const CHECKS_PER_STEP: usize = 5;

/// Score weight of an issue relative to a warning
pub const ISSUE_WEIGHT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Calculation,
    Dependency,
    Magnitude,
    Structure,
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    /// Nothing to report either way
    Neutral,
    Warn,
    Fail,
    /// The check itself could not run
    Indeterminate,
}

impl CheckStatus {
    pub fn symbol(self) -> &'static str {
        match self {
            CheckStatus::Pass => "✓",
            CheckStatus::Neutral => "○",
            CheckStatus::Warn | CheckStatus::Indeterminate => "!",
            CheckStatus::Fail => "✗",
        }
    }
}

/// Single check result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub kind: CheckKind,
    pub status: CheckStatus,
    pub label: String,
}

impl CheckOutcome {
    pub fn new(kind: CheckKind, status: CheckStatus, label: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            label: label.into(),
        }
    }
}

/// All check outcomes for one step (one row of the analysis table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    pub index: usize,
    pub expression: String,
    pub result: f64,
    pub checks: Vec<CheckOutcome>,
}

impl StepReport {
    pub fn check(&self, kind: CheckKind) -> Option<&CheckOutcome> {
        self.checks.iter().find(|c| c.kind == kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// Substantiated numeric error
    Issue,
    /// Non-fatal anomaly
    Warning,
    /// Positive observation
    Insight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub step: usize,
    pub message: String,
}

impl Finding {
    pub fn issue(step: usize, message: impl Into<String>) -> Self {
        Self {
            kind: FindingKind::Issue,
            step,
            message: message.into(),
        }
    }

    pub fn warning(step: usize, message: impl Into<String>) -> Self {
        Self {
            kind: FindingKind::Warning,
            step,
            message: message.into(),
        }
    }

    pub fn insight(step: usize, message: impl Into<String>) -> Self {
        Self {
            kind: FindingKind::Insight,
            step,
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Coarse grading of a consistency score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score > 80.0 {
            ScoreBand::Good
        } else if score > 60.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }
}

/// Result of one consistency analysis run.
///
/// Built once through [`ConsistencyReport::assemble`], which derives the
/// check counts and the score from the finding lists. There are no setters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyReport {
    steps: Vec<StepReport>,
    issues: Vec<Finding>,
    warnings: Vec<Finding>,
    insights: Vec<Finding>,
    total_checks: usize,
    passed_checks: i64,
    consistency_score: f64,
    input_hash: String,
}

impl ConsistencyReport {
    /// Score = 100 × (total − (2 × issues + warnings)) / total, unclamped.
    /// An empty run has nothing to fail and scores 100.
    pub fn assemble(
        steps: Vec<StepReport>,
        issues: Vec<Finding>,
        warnings: Vec<Finding>,
        insights: Vec<Finding>,
        input_hash: impl Into<String>,
    ) -> Self {
        let total_checks = CHECKS_PER_STEP * steps.len();
        let penalty = (ISSUE_WEIGHT * issues.len() + warnings.len()) as i64;
        let passed_checks = total_checks as i64 - penalty;
        let consistency_score = if total_checks == 0 {
            100.0
        } else {
            100.0 * passed_checks as f64 / total_checks as f64
        };

        Self {
            steps,
            issues,
            warnings,
            insights,
            total_checks,
            passed_checks,
            consistency_score,
            input_hash: input_hash.into(),
        }
    }

    pub fn steps(&self) -> &[StepReport] {
        &self.steps
    }

    pub fn issues(&self) -> &[Finding] {
        &self.issues
    }

    pub fn warnings(&self) -> &[Finding] {
        &self.warnings
    }

    pub fn insights(&self) -> &[Finding] {
        &self.insights
    }

    pub fn total_checks(&self) -> usize {
        self.total_checks
    }

    pub fn passed_checks(&self) -> i64 {
        self.passed_checks
    }

    pub fn consistency_score(&self) -> f64 {
        self.consistency_score
    }

    pub fn input_hash(&self) -> &str {
        &self.input_hash
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.consistency_score)
    }

    pub fn summary(&self) -> ReportSummary {
        let messages = |findings: &[Finding]| -> Vec<String> {
            findings.iter().map(|f| f.message.clone()).collect()
        };
        ReportSummary {
            consistency_score: self.consistency_score,
            issues: messages(&self.issues),
            warnings: messages(&self.warnings),
            insights: messages(&self.insights),
        }
    }
}

/// Wire form returned by the `check_consistency` tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub consistency_score: f64,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub insights: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<StepReport> {
        (1..=n)
            .map(|index| StepReport {
                index,
                expression: "1".to_string(),
                result: 1.0,
                checks: vec![],
            })
            .collect()
    }

    #[test]
    fn test_issue_weighs_double() {
        let report = ConsistencyReport::assemble(
            rows(2),
            vec![Finding::issue(2, "Step 2: Calculation mismatch")],
            vec![],
            vec![Finding::insight(2, "Step 2 builds on step 1")],
            "blake3:x",
        );
        assert_eq!(report.total_checks(), 10);
        assert_eq!(report.passed_checks(), 8);
        assert_eq!(report.consistency_score(), 80.0);
        assert_eq!(report.band(), ScoreBand::Fair);
    }

    #[test]
    fn test_score_is_not_clamped() {
        let warnings = (0..4).map(|_| Finding::warning(1, "w")).collect();
        let issues = (0..2).map(|_| Finding::issue(1, "i")).collect();
        let report = ConsistencyReport::assemble(rows(1), issues, warnings, vec![], "");
        assert_eq!(report.passed_checks(), -3);
        assert_eq!(report.consistency_score(), -60.0);
        assert_eq!(report.band(), ScoreBand::Poor);
    }

    #[test]
    fn test_empty_run() {
        let report = ConsistencyReport::assemble(vec![], vec![], vec![], vec![], "");
        assert_eq!(report.total_checks(), 0);
        assert_eq!(report.consistency_score(), 100.0);
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(100.0), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(80.0), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(60.0), ScoreBand::Poor);
    }
}
