//! Template loading for console output.
//!
//! Templates live in a YAML file of named Handlebars templates. A default set
//! is compiled into the crate; a file on disk can replace it.

use serde::Deserialize;
use std::collections::HashMap;

/// Built-in console templates
const EMBEDDED_TEMPLATES: &str = include_str!("../templates/console.yaml");

/// Templates every presenter expects to find
pub const REQUIRED_TEMPLATES: [&str; 7] = [
    "tool_call",
    "reasoning",
    "calculation_ok",
    "calculation_error",
    "verification",
    "report",
    "error",
];

/// Top-level templates file structure
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesFile {
    pub version: String,
    pub templates: HashMap<String, Template>,
}

/// A single template definition
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub description: String,
    pub template: String,
}

impl TemplatesFile {
    /// The compiled-in console templates
    pub fn embedded() -> Result<Self, String> {
        Self::from_yaml(EMBEDDED_TEMPLATES)
    }

    /// Load templates from a YAML file
    pub fn load(path: &str) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read templates file: {}", e))?;
        Self::from_yaml(&content)
    }

    /// Parse templates from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str::<TemplatesFile>(yaml)
            .map_err(|e| format!("Failed to parse templates YAML: {}", e))
    }

    /// Names from [`REQUIRED_TEMPLATES`] that this file does not define
    pub fn missing(&self) -> Vec<&'static str> {
        REQUIRED_TEMPLATES
            .iter()
            .copied()
            .filter(|name| !self.templates.contains_key(*name))
            .collect()
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// List all template names
    pub fn list_templates(&self) -> Vec<&str> {
        self.templates.keys().map(|s| s.as_str()).collect()
    }
}
