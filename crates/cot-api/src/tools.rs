//! Tool dispatch
//!
//! Every tool takes a JSON arguments object and answers with a single text
//! payload. Failures never escape as errors: they are rendered as text
//! prefixed with `Error:`.

use std::sync::Arc;

use cot_check::{record, verify_with, ConsistencyAnalyzer};
use cot_core::{render_number, CotError, Presenter, StepSequence};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::metrics::Metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    ShowReasoning,
    Calculate,
    Verify,
    CheckConsistency,
}

impl Tool {
    pub const ALL: [Tool; 4] = [
        Tool::ShowReasoning,
        Tool::Calculate,
        Tool::Verify,
        Tool::CheckConsistency,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::ShowReasoning => "show_reasoning",
            Tool::Calculate => "calculate",
            Tool::Verify => "verify",
            Tool::CheckConsistency => "check_consistency",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::ShowReasoning => "Show the step-by-step reasoning process",
            Tool::Calculate => "Calculate the result of an expression",
            Tool::Verify => "Verify if a calculation is correct",
            Tool::CheckConsistency => "Check if calculation steps are consistent with each other",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

/// Text payload returned by every tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub r#type: String,
    pub text: String,
}

impl TextContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            r#type: "text".to_string(),
            text: text.into(),
        }
    }

    pub fn error(error: &CotError) -> Self {
        Self::text(format!("Error: {}", error))
    }

    pub fn is_error(&self) -> bool {
        self.text.starts_with("Error:")
    }
}

/// Generic call envelope: `{"name": "...", "arguments": {...}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// The four checker tools bound to an analyzer and a presenter
pub struct Toolbox {
    analyzer: ConsistencyAnalyzer,
    presenter: Arc<dyn Presenter>,
    metrics: Arc<Metrics>,
}

impl Toolbox {
    pub fn new(
        analyzer: ConsistencyAnalyzer,
        presenter: Arc<dyn Presenter>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            analyzer,
            presenter,
            metrics,
        }
    }

    /// Run a tool by name. Unknown names are a format error.
    pub fn call_by_name(&self, name: &str, arguments: &Value) -> TextContent {
        match Tool::from_name(name) {
            Some(tool) => self.call(tool, arguments),
            None => {
                let err = CotError::format(format!("unknown tool '{}'", name));
                self.metrics.record_call(name, false);
                self.present_error(name, &err);
                TextContent::error(&err)
            }
        }
    }

    pub fn call(&self, tool: Tool, arguments: &Value) -> TextContent {
        self.present(|p| p.tool_call(tool.name()));

        let result = match tool {
            Tool::ShowReasoning => self.show_reasoning(arguments),
            Tool::Calculate => self.calculate(arguments),
            Tool::Verify => self.verify(arguments),
            Tool::CheckConsistency => self.check_consistency(arguments),
        };

        self.metrics.record_call(tool.name(), result.is_ok());
        match result {
            Ok(text) => TextContent::text(text),
            Err(err) => {
                tracing::info!(tool = tool.name(), kind = err.kind(), error = %err, "tool failed");
                self.present_error(tool.name(), &err);
                TextContent::error(&err)
            }
        }
    }

    fn show_reasoning(&self, arguments: &Value) -> Result<String, CotError> {
        let steps = required(arguments, "steps")?
            .as_array()
            .ok_or_else(|| CotError::format("'steps' must be a list"))?;

        let statements: Vec<String> = steps
            .iter()
            .map(|step| match step {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();

        record(statements.as_slice(), self.presenter.as_ref())
    }

    fn calculate(&self, arguments: &Value) -> Result<String, CotError> {
        let expression = string_argument(arguments, "expression")?;
        let outcome = cot_eval::evaluate(expression).map_err(CotError::from);
        self.present(|p| p.calculation(expression, &outcome));
        outcome.map(render_number)
    }

    fn verify(&self, arguments: &Value) -> Result<String, CotError> {
        let expression = string_argument(arguments, "expression")?;
        let expected = number_argument(arguments, "expected")?;

        let verification = verify_with(self.analyzer.profile(), expression, expected)?;
        self.present(|p| p.verification(&verification));

        Ok(if verification.is_correct { "True" } else { "False" }.to_string())
    }

    fn check_consistency(&self, arguments: &Value) -> Result<String, CotError> {
        let sequence = StepSequence::from_value(required(arguments, "steps")?)?;
        if sequence.is_empty() {
            return Err(CotError::format("no steps to analyze"));
        }

        let report = self.analyzer.analyze(&sequence);
        self.metrics.observe_score(report.consistency_score());
        self.present(|p| p.report(&report));

        serde_json::to_string(&report.summary()).map_err(|e| CotError::format(e.to_string()))
    }

    /// Presentation is a side effect: failures are logged, not returned.
    fn present<F>(&self, show: F)
    where
        F: FnOnce(&dyn Presenter) -> Result<(), CotError>,
    {
        if let Err(e) = show(self.presenter.as_ref()) {
            tracing::warn!(error = %e, "presentation failed");
        }
    }

    fn present_error(&self, tool: &str, err: &CotError) {
        self.present(|p| p.error(tool, err));
    }
}

fn required<'a>(arguments: &'a Value, key: &str) -> Result<&'a Value, CotError> {
    arguments
        .get(key)
        .ok_or_else(|| CotError::format(format!("missing argument '{}'", key)))
}

fn string_argument<'a>(arguments: &'a Value, key: &str) -> Result<&'a str, CotError> {
    required(arguments, key)?
        .as_str()
        .ok_or_else(|| CotError::format(format!("'{}' must be a string", key)))
}

/// Numbers may also arrive as numeric strings (`"20"`).
fn number_argument(arguments: &Value, key: &str) -> Result<f64, CotError> {
    let value = required(arguments, key)?;
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
        .ok_or_else(|| CotError::format(format!("'{}' must be a number, got {}", key, value)))
}
