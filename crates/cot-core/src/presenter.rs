//! Presentation boundary
//!
//! The checker never formats anything for humans itself. Everything that
//! would be shown on a console is handed to a [`Presenter`].

use crate::data_model::{ReasoningTrace, Verification};
use crate::error::CotError;
use crate::report::ConsistencyReport;

pub trait Presenter: Send + Sync {
    /// Announce that a tool was invoked
    fn tool_call(&self, tool: &str) -> Result<(), CotError>;

    fn reasoning(&self, trace: &ReasoningTrace) -> Result<(), CotError>;

    fn calculation(
        &self,
        expression: &str,
        outcome: &Result<f64, CotError>,
    ) -> Result<(), CotError>;

    fn verification(&self, verification: &Verification) -> Result<(), CotError>;

    fn report(&self, report: &ConsistencyReport) -> Result<(), CotError>;

    fn error(&self, tool: &str, error: &CotError) -> Result<(), CotError>;
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn tool_call(&self, _tool: &str) -> Result<(), CotError> {
        Ok(())
    }

    fn reasoning(&self, _trace: &ReasoningTrace) -> Result<(), CotError> {
        Ok(())
    }

    fn calculation(
        &self,
        _expression: &str,
        _outcome: &Result<f64, CotError>,
    ) -> Result<(), CotError> {
        Ok(())
    }

    fn verification(&self, _verification: &Verification) -> Result<(), CotError> {
        Ok(())
    }

    fn report(&self, _report: &ConsistencyReport) -> Result<(), CotError> {
        Ok(())
    }

    fn error(&self, _tool: &str, _error: &CotError) -> Result<(), CotError> {
        Ok(())
    }
}
