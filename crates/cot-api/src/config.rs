//! Server configuration from environment variables.
//!
//! - `COT_ADDR`: listen address (default `127.0.0.1:8788`)
//! - `COT_PROFILE`: YAML consistency profile
//! - `COT_TEMPLATES`: YAML console templates
//! - `COT_QUIET`: disable console presentation

use cot_check::ConsistencyProfile;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8788";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub addr: String,
    pub profile_path: Option<String>,
    pub templates_path: Option<String>,
    pub quiet: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            addr: non_empty("COT_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            profile_path: non_empty("COT_PROFILE"),
            templates_path: non_empty("COT_TEMPLATES"),
            quiet: non_empty("COT_QUIET")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    /// The configured profile, or the standard one
    pub fn load_profile(&self) -> Result<ConsistencyProfile, String> {
        match &self.profile_path {
            Some(path) => ConsistencyProfile::load(path),
            None => Ok(ConsistencyProfile::standard()),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            profile_path: None,
            templates_path: None,
            quiet: false,
        }
    }
}
