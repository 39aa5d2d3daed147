//! Search settings, loadable from TOML.
//!
//! ```
//! use grid_navigation::SearchConfig;
//!
//! let config = SearchConfig::from_toml_str(
//!     r#"
//!     component_precheck = true
//!     max_expansions = 400
//! "#,
//! )
//! .unwrap();
//! assert!(config.component_precheck);
//! assert!(!config.notify_endpoints);
//! assert_eq!(config.max_expansions, Some(400));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Also report the start cell to the observer. By default only cells between the endpoints
    /// are reported, since a visualisation draws the endpoints itself.
    pub notify_endpoints: bool,

    /// Reject start/goal pairs on different connected components before exploring. The outcome
    /// is unchanged but the observer then sees no expansions.
    pub component_precheck: bool,

    /// Abort with [SearchError::ExpansionLimit](crate::SearchError::ExpansionLimit) after this
    /// many expansions.
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_expansions == Some(0) {
            return Err(ConfigError::Invalid(
                "max_expansions must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn with_notify_endpoints(mut self, notify: bool) -> Self {
        self.notify_endpoints = notify;
        self
    }

    pub fn with_component_precheck(mut self, precheck: bool) -> Self {
        self.component_precheck = precheck;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}
