//! Project config file source: `config/navstack.toml` and
//! `config/navstack.{NAVSTACK_ENV}.toml` under the project root.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::{Path, PathBuf};

/// Base and environment-specific config paths under `root`.
pub fn project_config_paths(root: &Path) -> (PathBuf, PathBuf) {
    let config_dir = root.join("config");
    let env_name = std::env::var("NAVSTACK_ENV").unwrap_or_else(|_| "development".to_string());
    (
        config_dir.join("navstack.toml"),
        config_dir.join(format!("navstack.{}.toml", env_name)),
    )
}

/// Add project config files to `builder`; the environment-specific file wins.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
    root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let (base, env_specific) = project_config_paths(root);

    if base.exists() {
        builder = builder.add_source(File::from(base).required(false));
    }
    if env_specific.exists() {
        builder = builder.add_source(File::from(env_specific).required(false));
    }

    Ok(builder)
}
