//! Unified Error Model
use cot_eval::EvalError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CotError {
    /// The expression is not valid arithmetic.
    #[error("{0}")]
    Evaluation(String),

    /// Input did not have the expected shape.
    #[error("{0}")]
    Format(String),

    /// The presentation collaborator failed.
    #[error("display failed: {0}")]
    Display(String),
}

impl CotError {
    pub fn format(message: impl Into<String>) -> Self {
        CotError::Format(message.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CotError::Evaluation(_) => "evaluation",
            CotError::Format(_) => "format",
            CotError::Display(_) => "display",
        }
    }
}

impl From<EvalError> for CotError {
    fn from(err: EvalError) -> Self {
        CotError::Evaluation(err.to_string())
    }
}
