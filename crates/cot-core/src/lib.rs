//! COT Core: data model, errors and the presentation boundary
//!
//! Shared types for the chain-of-thought arithmetic checker. Nothing here
//! performs analysis; see `cot-check` for the verifier and analyzer.

pub mod data_model;
pub mod error;
pub mod presenter;
pub mod report;

pub use data_model::{ReasoningTrace, Step, StepSequence, TraceEntry, Verification};
pub use error::CotError;
pub use presenter::{NullPresenter, Presenter};
pub use report::{
    CheckKind, CheckOutcome, CheckStatus, ConsistencyReport, Finding, FindingKind, ReportSummary,
    ScoreBand, StepReport, CHECKS_PER_STEP, ISSUE_WEIGHT,
};

/// Checker version
pub const COT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render a number the way step results are compared as text.
///
/// Uses the shortest round-trip form, so `5.0` renders as `5`.
pub fn render_number(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_number() {
        assert_eq!(render_number(5.0), "5");
        assert_eq!(render_number(0.5), "0.5");
        assert_eq!(render_number(-20.0), "-20");
        assert_eq!(render_number(1e6), "1000000");
    }
}
