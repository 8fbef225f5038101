//! Layered configuration loading.

use super::merge::builder_with_defaults;
use super::sources::{global_file, project_file};
use super::NavigationConfig;
use crate::error::ConfigError;
use config::{Environment, File};
use std::path::{Path, PathBuf};

/// Loads [`NavigationConfig`] from files and the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a project rooted at `root`.
    ///
    /// Precedence (highest last): defaults, global file, `config/navstack.toml`,
    /// `config/navstack.{NAVSTACK_ENV}.toml`, `NAVSTACK_*` environment
    /// variables (nested keys separated by `__`, e.g.
    /// `NAVSTACK_DEEP_PUSH__STEP_DELAY_MS`).
    pub fn load(root: &Path) -> Result<NavigationConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = project_file::add_to_builder(builder, root)?;
        let builder = builder.add_source(Self::environment());

        let config: NavigationConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<NavigationConfig, ConfigError> {
        let config: NavigationConfig = builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Location of the global config file, if any.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    fn environment() -> Environment {
        Environment::with_prefix("NAVSTACK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }
}
