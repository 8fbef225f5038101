//! Configuration System
//!
//! Settings for navigation stores: the deep-link scheme, deep-push pacing,
//! the default stack policy for URL navigation, and logging. Loaded from
//! layered TOML files with `NAVSTACK_*` environment overrides.

use crate::error::ConfigError;
use crate::link::is_valid_scheme;
use crate::logging::LoggingConfig;
use crate::types::StackPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

mod loader;
mod merge;
mod sources;

pub use loader::ConfigLoader;

/// Upper bound for the pause between deep-push steps.
pub const MAX_STEP_DELAY_MS: u64 = 1000;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// URL scheme for links built and accepted by the store
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Reject links whose scheme differs from `scheme`
    #[serde(default)]
    pub strict_scheme: bool,

    /// Policy used by `navigate(url)`
    #[serde(default)]
    pub default_policy: StackPolicy,

    #[serde(default)]
    pub deep_push: DeepPushConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Incremental deep-link push settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepPushConfig {
    /// Push deep-link destinations one per step instead of all at once
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Pause between steps (milliseconds)
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
}

fn default_scheme() -> String {
    "app".to_string()
}

fn default_true() -> bool {
    true
}

fn default_step_delay_ms() -> u64 {
    50
}

impl Default for DeepPushConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            step_delay_ms: default_step_delay_ms(),
        }
    }
}

impl DeepPushConfig {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.step_delay_ms == 0 {
            return Err("step_delay_ms must be greater than zero".to_string());
        }
        if self.step_delay_ms > MAX_STEP_DELAY_MS {
            return Err(format!(
                "step_delay_ms must be at most {} (got {})",
                MAX_STEP_DELAY_MS, self.step_delay_ms
            ));
        }
        Ok(())
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            strict_scheme: false,
            default_policy: StackPolicy::default(),
            deep_push: DeepPushConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl NavigationConfig {
    /// Default configuration with a custom scheme.
    pub fn with_scheme(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            ..Self::default()
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !is_valid_scheme(&self.scheme) {
            errors.push(format!("scheme '{}' is not a valid URL scheme", self.scheme));
        }
        if let Err(e) = self.deep_push.validate() {
            errors.push(format!("deep_push: {}", e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(format!("logging: {}", e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors.join("\n")))
        }
    }
}
