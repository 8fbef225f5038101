//! Merge rules: built-in defaults underneath every other source.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Create a Config builder with defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("scheme", "app")?
        .set_default("strict_scheme", false)?
        .set_default("default_policy", "replace")?
        .set_default("deep_push.enabled", true)?
        .set_default("deep_push.step_delay_ms", 50)
}
