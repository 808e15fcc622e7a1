use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use shared::config::SiteConfig;
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "site.toml";
const ENV_PREFIX: &str = "SITE";

/// Defaults, then the TOML file, then `SITE__*` environment variables
/// (`SITE__MAX_GUESTS=8`, `SITE__CEREMONY__NAME=...`,
/// `SITE__MEAL_OPTIONS=Beef,Fish`). An explicitly named file must exist.
pub fn load_settings(explicit_path: Option<&Path>) -> Result<SiteConfig> {
    let (path, required) = match explicit_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    build_settings(&path, required, Environment::with_prefix(ENV_PREFIX))
}

fn build_settings(path: &Path, required: bool, env: Environment) -> Result<SiteConfig> {
    let settings: SiteConfig = Config::builder()
        .add_source(
            File::from(path.to_path_buf())
                .format(FileFormat::Toml)
                .required(required),
        )
        .add_source(
            env.prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("meal_options"),
        )
        .build()
        .with_context(|| {
            format!(
                "failed to read site configuration from '{}'",
                path.display()
            )
        })?
        .try_deserialize()
        .context("failed to parse site configuration")?;

    if let Err(err) = settings.validate() {
        warn!(code = ?err.code(), error = %err, "rejecting site configuration");
        return Err(err).context("invalid site configuration");
    }
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
