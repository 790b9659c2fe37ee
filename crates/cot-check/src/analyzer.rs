//! Consistency analysis over a whole step sequence
//!
//! Every step goes through five checks (calculation, dependency, magnitude,
//! structure, range). Outcomes are collected per step, findings per run, and
//! the score is derived from the finding counts when the report is assembled.

use crate::profile::ConsistencyProfile;
use cot_core::{
    CheckKind, CheckOutcome, CheckStatus, ConsistencyReport, Finding, Step,
    StepReport, StepSequence,
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Operator and parenthesis characters
    static ref OPERATORS: Regex = Regex::new(r"[+\-*/()]").unwrap();
}

/// Findings accumulated during one run
#[derive(Default)]
struct Findings {
    issues: Vec<Finding>,
    warnings: Vec<Finding>,
    insights: Vec<Finding>,
}

/// Analyzer that checks step sequences against a profile
pub struct ConsistencyAnalyzer {
    profile: ConsistencyProfile,
}

impl ConsistencyAnalyzer {
    pub fn new(profile: ConsistencyProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &ConsistencyProfile {
        &self.profile
    }

    /// Analyze a step sequence. Never fails: a step whose expression cannot
    /// be evaluated is reported as indeterminate and analysis continues.
    pub fn analyze(&self, sequence: &StepSequence) -> ConsistencyReport {
        let mut findings = Findings::default();
        let mut rows = Vec::with_capacity(sequence.len());

        for (index, step, previous) in sequence.iter_with_previous() {
            let mut checks = Vec::new();

            checks.push(self.check_calculation(index, step, &mut findings));

            if let Some(previous) = previous {
                checks.push(check_dependency(index, step, previous, &mut findings));
                checks.extend(self.check_magnitude(index, step, previous, &mut findings));
            }

            checks.extend(check_structure(index, step, &mut findings));
            checks.extend(self.check_range(index, step, &mut findings));

            tracing::debug!(
                step = index,
                expression = %step.expression,
                result = step.result,
                checks = checks.len(),
                "analyzed step"
            );

            rows.push(StepReport {
                index,
                expression: step.expression.clone(),
                result: step.result,
                checks,
            });
        }

        let report = ConsistencyReport::assemble(
            rows,
            findings.issues,
            findings.warnings,
            findings.insights,
            sequence.fingerprint(),
        );

        tracing::info!(
            steps = sequence.len(),
            issues = report.issues().len(),
            warnings = report.warnings().len(),
            insights = report.insights().len(),
            score = report.consistency_score(),
            "consistency analysis complete"
        );

        report
    }

    // === Calculation ===
    fn check_calculation(
        &self,
        index: usize,
        step: &Step,
        findings: &mut Findings,
    ) -> CheckOutcome {
        match cot_eval::evaluate(&step.expression) {
            Ok(actual) if (actual - step.result).abs() < self.profile.tolerance => {
                CheckOutcome::new(CheckKind::Calculation, CheckStatus::Pass, "Calculation verified")
            }
            Ok(_) => {
                findings
                    .issues
                    .push(Finding::issue(index, format!("Step {}: Calculation mismatch", index)));
                CheckOutcome::new(CheckKind::Calculation, CheckStatus::Fail, "Calculation error")
            }
            Err(e) => {
                tracing::debug!(step = index, error = %e, "could not evaluate step");
                findings.warnings.push(Finding::warning(
                    index,
                    format!("Step {}: Couldn't verify calculation", index),
                ));
                CheckOutcome::new(
                    CheckKind::Calculation,
                    CheckStatus::Indeterminate,
                    "Verification failed",
                )
            }
        }
    }

    // === Magnitude ===
    fn check_magnitude(
        &self,
        index: usize,
        step: &Step,
        previous: &Step,
        findings: &mut Findings,
    ) -> Option<CheckOutcome> {
        if step.result == 0.0 || previous.result == 0.0 {
            return None;
        }

        let ratio = (step.result / previous.result).abs();
        if ratio > self.profile.max_ratio {
            findings.warnings.push(Finding::warning(
                index,
                format!("Step {}: Large increase ({:.2}x)", index, ratio),
            ));
            Some(CheckOutcome::new(
                CheckKind::Magnitude,
                CheckStatus::Warn,
                "Large magnitude increase",
            ))
        } else if ratio < self.profile.min_ratio {
            findings.warnings.push(Finding::warning(
                index,
                format!("Step {}: Large decrease ({:.2}x)", index, 1.0 / ratio),
            ));
            Some(CheckOutcome::new(
                CheckKind::Magnitude,
                CheckStatus::Warn,
                "Large magnitude decrease",
            ))
        } else {
            None
        }
    }

    // === Range ===
    fn check_range(
        &self,
        index: usize,
        step: &Step,
        findings: &mut Findings,
    ) -> Option<CheckOutcome> {
        let magnitude = step.result.abs();
        if magnitude > self.profile.large_result {
            findings
                .warnings
                .push(Finding::warning(index, format!("Step {}: Very large result", index)));
            Some(CheckOutcome::new(CheckKind::Range, CheckStatus::Warn, "Large result"))
        } else if magnitude < self.profile.small_result && step.result != 0.0 {
            findings
                .warnings
                .push(Finding::warning(index, format!("Step {}: Very small result", index)));
            Some(CheckOutcome::new(CheckKind::Range, CheckStatus::Warn, "Small result"))
        } else {
            None
        }
    }
}

impl Default for ConsistencyAnalyzer {
    fn default() -> Self {
        Self::new(ConsistencyProfile::default())
    }
}

// === Dependency ===
// Literal substring match on the previous result as it was written.
fn check_dependency(
    index: usize,
    step: &Step,
    previous: &Step,
    findings: &mut Findings,
) -> CheckOutcome {
    if step.expression.contains(&*previous.result_text()) {
        findings.insights.push(Finding::insight(
            index,
            format!("Step {} builds on step {}", index, index - 1),
        ));
        CheckOutcome::new(CheckKind::Dependency, CheckStatus::Pass, "Uses previous result")
    } else {
        CheckOutcome::new(CheckKind::Dependency, CheckStatus::Neutral, "Independent step")
    }
}

// === Structure ===
// Coarse lexical scan: flags an opening parenthesis only when no closing one
// appears anywhere in the expression.
fn check_structure(index: usize, step: &Step, findings: &mut Findings) -> Option<CheckOutcome> {
    let mut has_open = false;
    let mut has_close = false;
    for m in OPERATORS.find_iter(&step.expression) {
        match m.as_str() {
            "(" => has_open = true,
            ")" => has_close = true,
            _ => {}
        }
    }

    if has_open && !has_close {
        findings
            .warnings
            .push(Finding::warning(index, format!("Step {}: Mismatched parentheses", index)));
        Some(CheckOutcome::new(CheckKind::Structure, CheckStatus::Fail, "Invalid parentheses"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(steps: &[(&str, f64)]) -> StepSequence {
        steps.iter().map(|(e, r)| (*e, *r)).collect()
    }

    fn analyze(steps: &[(&str, f64)]) -> ConsistencyReport {
        ConsistencyAnalyzer::default().analyze(&sequence(steps))
    }

    #[test]
    fn test_dependency_uses_rendered_number() {
        let report = analyze(&[("2 + 3", 5.0), ("5 * 4", 20.0)]);
        let row = &report.steps()[1];
        assert_eq!(row.check(CheckKind::Dependency).unwrap().status, CheckStatus::Pass);
        assert_eq!(report.insights()[0].message, "Step 2 builds on step 1");
    }

    #[test]
    fn test_dependency_is_a_plain_substring_match() {
        // "2" occurs inside "12", so this counts as building on the previous step.
        let report = analyze(&[("1 + 1", 2.0), ("12 - 1", 11.0)]);
        assert_eq!(report.insights().len(), 1);

        let report = analyze(&[("1 + 1", 2.0), ("3 + 4", 7.0)]);
        assert!(report.insights().is_empty());
        let row = &report.steps()[1];
        assert_eq!(row.check(CheckKind::Dependency).unwrap().status, CheckStatus::Neutral);
    }

    #[test]
    fn test_first_step_has_no_dependency_check() {
        let report = ConsistencyAnalyzer::default().analyze(&sequence(&[("2 + 2", 4.0)]));
        assert!(report.steps()[0].check(CheckKind::Dependency).is_none());
        assert!(report.steps()[0].check(CheckKind::Magnitude).is_none());
    }

    #[test]
    fn test_structure_scan_is_coarse() {
        let analyzer = ConsistencyAnalyzer::default();

        let report = analyzer.analyze(&sequence(&[("2 * (3 + 4", 14.0)]));
        assert_eq!(report.warnings().len(), 2);
        assert_eq!(
            report.steps()[0].check(CheckKind::Structure).unwrap().status,
            CheckStatus::Fail
        );

        // Unbalanced, but a closing parenthesis is present: not flagged by the scan.
        let report = analyzer.analyze(&sequence(&[("((2 + 3)", 5.0)]));
        assert!(report.steps()[0].check(CheckKind::Structure).is_none());
        assert_eq!(
            report.steps()[0].check(CheckKind::Calculation).unwrap().status,
            CheckStatus::Indeterminate
        );
    }

    #[test]
    fn test_magnitude_decrease() {
        let report = analyze(&[("50000", 50000.0), ("50000 / 100000", 0.5)]);
        let messages: Vec<_> = report.warnings().iter().map(|w| w.message.as_str()).collect();
        assert_eq!(messages, vec!["Step 2: Large decrease (100000.00x)"]);
    }

    #[test]
    fn test_zero_results_skip_magnitude() {
        let report = analyze(&[("0", 0.0), ("5000", 5000.0), ("0 * 1", 0.0)]);
        assert!(report.warnings().is_empty());
        assert_eq!(report.consistency_score(), 100.0);
    }

    #[test]
    fn test_custom_profile() {
        let profile = ConsistencyProfile {
            large_result: 100.0,
            ..ConsistencyProfile::standard()
        };
        let report = ConsistencyAnalyzer::new(profile).analyze(&sequence(&[("200", 200.0)]));
        assert_eq!(report.warnings()[0].message, "Step 1: Very large result");
    }
}
