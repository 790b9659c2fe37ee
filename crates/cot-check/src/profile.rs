//! Consistency profiles
//!
//! Numeric thresholds used by the verifier and analyzer. The defaults are
//! the reference values; a YAML file may override any subset of them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsistencyProfile {
    /// Profile name (e.g., "standard@1.0")
    pub name: String,

    /// Absolute tolerance when comparing evaluated and claimed results
    pub tolerance: f64,

    // === Magnitude ===

    /// Step-to-step ratio above which a jump is flagged
    pub max_ratio: f64,

    /// Step-to-step ratio below which a drop is flagged
    pub min_ratio: f64,

    // === Range ===

    /// Results with a larger magnitude are flagged (exclusive bound)
    pub large_result: f64,

    /// Non-zero results with a smaller magnitude are flagged (exclusive bound)
    pub small_result: f64,
}

impl ConsistencyProfile {
    pub fn standard() -> Self {
        Self {
            name: "standard@1.0".to_string(),
            tolerance: 1e-10,
            max_ratio: 1000.0,
            min_ratio: 0.001,
            large_result: 1e6,
            small_result: 1e-6,
        }
    }

    /// Load profile from YAML. Missing fields keep their standard values.
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| e.to_string())
    }

    /// Load profile from a YAML file
    pub fn load(path: &str) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read profile file: {}", e))?;
        Self::from_yaml(&content)
    }
}

impl Default for ConsistencyProfile {
    fn default() -> Self {
        Self::standard()
    }
}
