//! Reasoning trace recording
use cot_core::{CotError, Presenter, ReasoningTrace};

/// Acknowledgement returned once a trace has been handed to the presenter
pub const REASONING_ACK: &str = "Reasoning shown";

/// Number the statements from 1 and forward them to the presenter.
pub fn record<S: AsRef<str>>(
    statements: &[S],
    presenter: &dyn Presenter,
) -> Result<String, CotError> {
    let trace = ReasoningTrace::from_statements(statements);
    presenter.reasoning(&trace)?;
    tracing::debug!(statements = trace.entries.len(), "recorded reasoning");
    Ok(REASONING_ACK.to_string())
}
