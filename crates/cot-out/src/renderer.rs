//! Template rendering for console output.
//!
//! Uses Handlebars with output escaping disabled (the target is a terminal,
//! not HTML) and a couple of formatting helpers:
//! - fixed: format a number with N decimals (`{{fixed score 1}}`)
//! - upper: uppercase a string

use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde_json::Value;

use crate::templates::TemplatesFile;

handlebars_helper!(fixed: |value: f64, digits: u64| format!("{:.*}", digits as usize, value));
handlebars_helper!(upper: |text: str| text.to_uppercase());

/// Compiled renderer with registered helpers
pub struct TemplateRenderer<'a> {
    handlebars: Handlebars<'a>,
    templates: TemplatesFile,
}

impl<'a> TemplateRenderer<'a> {
    /// Create a renderer, compiling every template in the file
    pub fn new(templates: TemplatesFile) -> Result<Self, String> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(no_escape);

        handlebars.register_helper("fixed", Box::new(fixed));
        handlebars.register_helper("upper", Box::new(upper));

        for (name, template) in &templates.templates {
            handlebars
                .register_template_string(name, &template.template)
                .map_err(|e| format!("Template '{}' is invalid: {}", name, e))?;
        }

        Ok(TemplateRenderer { handlebars, templates })
    }

    /// Renderer over the compiled-in console templates
    pub fn embedded() -> Result<Self, String> {
        Self::new(TemplatesFile::embedded()?)
    }

    /// Load from a file path
    pub fn load(path: &str) -> Result<Self, String> {
        Self::new(TemplatesFile::load(path)?)
    }

    /// Render a named template with data
    pub fn render(&self, template_name: &str, data: &Value) -> Result<String, String> {
        self.handlebars
            .render(template_name, data)
            .map_err(|e| format!("Render error: {}", e))
    }

    /// List available template names
    pub fn list_templates(&self) -> Vec<&str> {
        self.templates.list_templates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_templates() -> TemplatesFile {
        TemplatesFile::from_yaml(r#"
version: "1.0"
templates:
  greeting:
    description: Simple greeting
    template: "Hello, {{name}}!"
  score:
    description: Score display
    template: "Score: {{fixed score 1}}% [{{upper band}}]"
"#).unwrap()
    }

    #[test]
    fn test_simple_render() {
        let renderer = TemplateRenderer::new(test_templates()).unwrap();
        let result = renderer.render("greeting", &json!({ "name": "World" })).unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_fixed_and_upper_helpers() {
        let renderer = TemplateRenderer::new(test_templates()).unwrap();
        let result = renderer.render("score", &json!({ "score": 83.333, "band": "good" })).unwrap();
        assert_eq!(result, "Score: 83.3% [GOOD]");
    }

    #[test]
    fn test_no_html_escaping() {
        let renderer = TemplateRenderer::new(test_templates()).unwrap();
        let data = json!({ "name": "__import__('os') <x>" });
        let result = renderer.render("greeting", &data).unwrap();
        assert_eq!(result, "Hello, __import__('os') <x>!");
    }

    #[test]
    fn test_invalid_template_rejected() {
        let file = TemplatesFile::from_yaml(r#"
version: "1.0"
templates:
  broken:
    description: Unclosed block
    template: "{{#if x}}never closed"
"#).unwrap();
        assert!(TemplateRenderer::new(file).is_err());
    }

    #[test]
    fn test_unknown_template() {
        let renderer = TemplateRenderer::new(test_templates()).unwrap();
        assert!(renderer.render("missing", &json!({})).is_err());
    }
}
