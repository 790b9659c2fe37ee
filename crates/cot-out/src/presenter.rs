//! Console presenter
//!
//! Renders checker results through the console templates and writes them to
//! any `io::Write` sink.

use std::io::{self, Write};
use std::sync::Mutex;

use cot_core::{
    render_number, ConsistencyReport, CotError, Presenter, ReasoningTrace, ScoreBand, Verification,
};
use serde_json::{json, Value};

use crate::renderer::TemplateRenderer;
use crate::RenderError;

pub struct ConsolePresenter<W: Write + Send> {
    renderer: TemplateRenderer<'static>,
    out: Mutex<W>,
}

impl ConsolePresenter<io::Stderr> {
    /// Presenter writing to stderr with the built-in templates
    pub fn stderr() -> Result<Self, RenderError> {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> ConsolePresenter<W> {
    pub fn new(out: W) -> Result<Self, RenderError> {
        let renderer = TemplateRenderer::embedded().map_err(RenderError::Template)?;
        Ok(Self::with_renderer(renderer, out))
    }

    pub fn with_renderer(renderer: TemplateRenderer<'static>, out: W) -> Self {
        Self {
            renderer,
            out: Mutex::new(out),
        }
    }

    /// Consume the presenter and return its sink
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn emit(&self, template: &str, data: &Value) -> Result<(), CotError> {
        let text = self
            .renderer
            .render(template, data)
            .map_err(RenderError::Render)?;

        let mut out = self
            .out
            .lock()
            .map_err(|_| CotError::Display("output lock poisoned".to_string()))?;
        writeln!(out, "{}", text.trim_end()).map_err(|e| CotError::Display(e.to_string()))?;
        out.flush().map_err(|e| CotError::Display(e.to_string()))
    }
}

impl<W: Write + Send> Presenter for ConsolePresenter<W> {
    fn tool_call(&self, tool: &str) -> Result<(), CotError> {
        self.emit("tool_call", &json!({ "tool": tool }))
    }

    fn reasoning(&self, trace: &ReasoningTrace) -> Result<(), CotError> {
        self.emit("reasoning", &json!(trace))
    }

    fn calculation(
        &self,
        expression: &str,
        outcome: &Result<f64, CotError>,
    ) -> Result<(), CotError> {
        match outcome {
            Ok(value) => self.emit(
                "calculation_ok",
                &json!({ "expression": expression, "result": render_number(*value) }),
            ),
            Err(e) => self.emit(
                "calculation_error",
                &json!({ "expression": expression, "error": e.to_string() }),
            ),
        }
    }

    fn verification(&self, verification: &Verification) -> Result<(), CotError> {
        self.emit(
            "verification",
            &json!({
                "expression": verification.expression,
                "expected": render_number(verification.expected),
                "actual": render_number(verification.actual),
                "is_correct": verification.is_correct,
            }),
        )
    }

    fn report(&self, report: &ConsistencyReport) -> Result<(), CotError> {
        self.emit("report", &report_view(report))
    }

    fn error(&self, tool: &str, error: &CotError) -> Result<(), CotError> {
        self.emit("error", &json!({ "tool": tool, "error": error.to_string() }))
    }
}

fn band_name(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::Good => "good",
        ScoreBand::Fair => "fair",
        ScoreBand::Poor => "poor",
    }
}

/// Flatten a report into the shape the `report` template expects.
pub fn report_view(report: &ConsistencyReport) -> Value {
    let steps: Vec<Value> = report
        .steps()
        .iter()
        .map(|row| {
            let checks: Vec<Value> = row
                .checks
                .iter()
                .map(|c| {
                    json!({ "symbol": c.status.symbol(), "label": c.label, "status": c.status })
                })
                .collect();
            json!({
                "index": row.index,
                "expression": row.expression,
                "result": render_number(row.result),
                "checks": checks,
            })
        })
        .collect();

    let summary = report.summary();
    json!({
        "steps": steps,
        "issues": summary.issues,
        "warnings": summary.warnings,
        "insights": summary.insights,
        "score": report.consistency_score(),
        "passed_checks": report.passed_checks(),
        "total_checks": report.total_checks(),
        "issue_count": report.issues().len(),
        "warning_count": report.warnings().len(),
        "insight_count": report.insights().len(),
        "band": band_name(report.band()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cot_core::{Finding, StepReport};

    fn output(presenter: ConsolePresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn test_tool_call_banner() {
        let presenter = ConsolePresenter::new(Vec::new()).unwrap();
        presenter.tool_call("calculate").unwrap();
        assert_eq!(output(presenter), "FUNCTION CALL: calculate()\n");
    }

    #[test]
    fn test_verification_verdicts() {
        let presenter = ConsolePresenter::new(Vec::new()).unwrap();
        presenter
            .verification(&Verification {
                expression: "2 + 3".to_string(),
                expected: 5.0,
                actual: 5.0,
                is_correct: true,
            })
            .unwrap();
        presenter
            .verification(&Verification {
                expression: "5 * 4".to_string(),
                expected: 21.0,
                actual: 20.0,
                is_correct: false,
            })
            .unwrap();

        let text = output(presenter);
        assert!(text.contains("✓ Correct! 2 + 3 = 5"));
        assert!(text.contains("✗ Incorrect! 5 * 4 should be 20, got 21"));
    }

    #[test]
    fn test_report_view_shape() {
        let report = ConsistencyReport::assemble(
            vec![StepReport {
                index: 1,
                expression: "2 + 2".to_string(),
                result: 5.0,
                checks: vec![],
            }],
            vec![Finding::issue(1, "Step 1: Calculation mismatch")],
            vec![],
            vec![],
            "blake3:x",
        );
        let view = report_view(&report);
        assert_eq!(view["score"], json!(60.0));
        assert_eq!(view["passed_checks"], json!(3));
        assert_eq!(view["band"], json!("poor"));
        assert_eq!(view["steps"][0]["result"], json!("5"));
    }
}
