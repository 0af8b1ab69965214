use config::{Config, Environment, File};
use folio_domain::config::FolioConfig;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File stem looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_STEM: &str = "folio";
/// Prefix of environment overrides (`FOLIO__PROBE__NARROW_BREAKPOINT_PX=640`).
pub const ENV_PREFIX: &str = "FOLIO";

/// Custom error type for config loading.
#[folio_derive::folio_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration structure from a file plus `FOLIO__` environment overrides.
///
/// Layering:
/// 1. **Base File**: an explicit `path` must exist. Without a path the loader looks for an
///    optional `folio.{toml,json,yaml,...}` in the working directory and silently skips it
///    when absent, so every field falls back to its `#[serde(default)]`.
/// 2. **Environment Overrides**: variables prefixed with `FOLIO__`; nesting uses double
///    underscores (`FOLIO__RESIZE__DEBOUNCE_MS` maps to `resize.debounce_ms`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a source cannot be parsed,
/// or the merged values do not match `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (source, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_STEM), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    if required {
        info!(path = %source.display(), "Loading config");
    } else {
        debug!(stem = DEFAULT_CONFIG_STEM, "Looking for optional config in working directory");
    }

    Config::builder()
        .add_source(File::from(source.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .convert_case(config::Case::Snake),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

/// Loads the workspace [`FolioConfig`].
///
/// # Errors
/// See [`load_config`].
pub fn load_folio_config(path: Option<impl AsRef<Path>>) -> Result<FolioConfig, ConfigError> {
    load_config::<FolioConfig>(path)
}
