//! Data Model: Step, StepSequence, Verification, ReasoningTrace
use std::borrow::Cow;

use crate::error::CotError;
use crate::render_number;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One claimed `(expression, result)` pair in a solution trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub expression: String,
    /// The value the producer claims the expression evaluates to
    pub result: f64,
    /// The claim as written on the wire (`5` and `5.0` stay distinct)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,
}

impl Step {
    pub fn new(expression: impl Into<String>, result: f64) -> Self {
        Self {
            expression: expression.into(),
            result,
            literal: None,
        }
    }

    /// Textual form of the claimed result, used when later steps are
    /// searched for it. Falls back to [`render_number`] without a literal.
    pub fn result_text(&self) -> Cow<'_, str> {
        match &self.literal {
            Some(text) => Cow::Borrowed(text.as_str()),
            None => Cow::Owned(render_number(self.result)),
        }
    }

    /// Parse a step from either `["2 + 3", 5]` or
    /// `{"expression": "2 + 3", "result": 5}`.
    pub fn from_value(value: &Value) -> Result<Self, CotError> {
        match value {
            Value::Array(pair) => {
                if pair.len() != 2 {
                    return Err(CotError::format(format!(
                        "expected an [expression, result] pair, got {} element(s)",
                        pair.len()
                    )));
                }
                Self::parsed(&pair[0], &pair[1])
            }
            Value::Object(map) => {
                let expression = map
                    .get("expression")
                    .ok_or_else(|| CotError::format("step is missing 'expression'"))?;
                let result = map
                    .get("result")
                    .ok_or_else(|| CotError::format("step is missing 'result'"))?;
                Self::parsed(expression, result)
            }
            other => Err(CotError::format(format!(
                "expected an [expression, result] pair, got {}",
                other
            ))),
        }
    }

    fn parsed(expression: &Value, result: &Value) -> Result<Self, CotError> {
        let Value::Number(number) = result else {
            return Err(CotError::format(format!("result must be a number, got {}", result)));
        };
        let value = number
            .as_f64()
            .ok_or_else(|| CotError::format(format!("result out of range: {}", number)))?;

        Ok(Self {
            expression: expression_of(expression)?,
            result: value,
            literal: Some(number.to_string()),
        })
    }
}

fn expression_of(value: &Value) -> Result<String, CotError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CotError::format(format!("expression must be a string, got {}", value)))
}

/// Ordered, read-only list of steps. Position encodes solving order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StepSequence {
    steps: Vec<Step>,
}

impl StepSequence {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Parse a JSON array of steps. Fails on the first malformed element.
    pub fn from_value(value: &Value) -> Result<Self, CotError> {
        let items = value
            .as_array()
            .ok_or_else(|| CotError::format(format!("steps must be a list, got {}", value)))?;

        let steps = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                Step::from_value(item)
                    .map_err(|e| CotError::format(format!("step {}: {}", i + 1, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Iterate as `(index, step, previous)` with 1-based indices.
    pub fn iter_with_previous(&self) -> impl Iterator<Item = (usize, &Step, Option<&Step>)> + '_ {
        self.steps.iter().enumerate().map(move |(i, step)| {
            let previous = if i == 0 { None } else { self.steps.get(i - 1) };
            (i + 1, step, previous)
        })
    }

    /// Content hash of the sequence (`blake3:<hex>`).
    pub fn fingerprint(&self) -> String {
        let bytes = serde_json::to_vec(&self.steps).unwrap_or_default();
        format!("blake3:{}", blake3::hash(&bytes))
    }
}

impl From<Vec<Step>> for StepSequence {
    fn from(steps: Vec<Step>) -> Self {
        Self::new(steps)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for StepSequence {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(e, r)| Step::new(e, r)).collect())
    }
}

/// Outcome of checking one expression against a claimed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub expression: String,
    pub expected: f64,
    pub actual: f64,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// 1-based position
    pub ordinal: usize,
    pub text: String,
}

/// Numbered free-text reasoning statements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReasoningTrace {
    pub entries: Vec<TraceEntry>,
}

impl ReasoningTrace {
    pub fn from_statements<S: AsRef<str>>(statements: &[S]) -> Self {
        let entries = statements
            .iter()
            .enumerate()
            .map(|(i, s)| TraceEntry {
                ordinal: i + 1,
                text: s.as_ref().to_string(),
            })
            .collect();
        Self { entries }
    }
}
