//! COT-OUT: console presentation for checker results
//!
//! Turns reasoning traces, verifications and consistency reports into
//! human-readable text via Handlebars templates. The checker itself only
//! produces structured values; this crate is the presenter it talks to.
//!
//! # Example
//!
//! ```
//! use cot_core::Presenter;
//! use cot_out::ConsolePresenter;
//!
//! let presenter = ConsolePresenter::new(Vec::new()).unwrap();
//! presenter.tool_call("calculate").unwrap();
//! assert_eq!(presenter.into_inner(), b"FUNCTION CALL: calculate()\n");
//! ```

pub mod presenter;
pub mod renderer;
pub mod templates;

pub use presenter::{report_view, ConsolePresenter};
pub use renderer::TemplateRenderer;
pub use templates::TemplatesFile;

use cot_core::{ConsistencyReport, CotError};
use thiserror::Error;

/// Errors that can occur during rendering
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template load failed: {0}")]
    Template(String),
    #[error("Render failed: {0}")]
    Render(String),
}

impl From<RenderError> for CotError {
    fn from(err: RenderError) -> Self {
        CotError::Display(err.to_string())
    }
}

/// Presenter writing to stderr, using templates from `path` when given
pub fn console(path: Option<&str>) -> Result<ConsolePresenter<std::io::Stderr>, RenderError> {
    let Some(path) = path else {
        return ConsolePresenter::stderr();
    };

    let templates = TemplatesFile::load(path).map_err(RenderError::Template)?;
    let missing = templates.missing();
    if !missing.is_empty() {
        return Err(RenderError::Template(format!(
            "{} is missing templates: {}",
            path,
            missing.join(", ")
        )));
    }

    let renderer = TemplateRenderer::new(templates).map_err(RenderError::Template)?;
    Ok(ConsolePresenter::with_renderer(renderer, std::io::stderr()))
}

/// Render a report to text with the built-in templates
pub fn render_report(report: &ConsistencyReport) -> Result<String, RenderError> {
    let renderer = TemplateRenderer::embedded().map_err(RenderError::Template)?;
    renderer
        .render("report", &report_view(report))
        .map_err(RenderError::Render)
}
