//! Config file discovery and layered loading.
//!
//! Implements the `Config::load()` algorithm:
//! 1. Parse `defaults.toml` → base
//! 2. Merge the config file (explicit path, else `$MARQUEE_CONFIG`)
//! 3. Apply env var fallbacks for fields the file did not set
//! 4. Deserialize merged tree → `Config`
//! 5. Validate
//! 6. Return `ResolvedConfig`

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::{CONFIG_PATH_VAR, apply_env_fallbacks, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::merge::{ConfigLayer, FieldSources, deep_merge_tracking, record_leaves};
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Config files larger than this are rejected.
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// A loaded configuration together with where each field came from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The final, validated configuration.
    pub config: Config,
    /// Layer that set each leaf field (dotted path).
    pub sources: FieldSources,
    /// Config files merged, in order.
    pub loaded_files: Vec<String>,
}

impl ResolvedConfig {
    /// Layer that set `field` (e.g. `"logging.level"`).
    #[must_use]
    pub fn source_of(&self, field: &str) -> Option<&ConfigLayer> {
        self.sources.get(field)
    }
}

/// Load the configuration using the process environment.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the config file is missing or malformed, an
/// env var does not parse, or the merged configuration fails validation.
pub fn load(path: Option<&Path>) -> ConfigResult<ResolvedConfig> {
    load_with_env(path, &collect_env_vars())
}

/// Load the configuration against an explicit environment map.
///
/// `path` wins over `$MARQUEE_CONFIG`. When neither is given only defaults
/// and env fallbacks apply.
///
/// # Errors
///
/// Same as [`load`].
pub fn load_with_env<S: BuildHasher>(
    path: Option<&Path>,
    env_vars: &HashMap<String, String, S>,
) -> ConfigResult<ResolvedConfig> {
    // 1. Parse embedded defaults.
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::Parse {
            origin: "<embedded defaults>".to_owned(),
            source: e,
        })?;

    let mut sources = FieldSources::new();
    record_leaves(&merged, "", &ConfigLayer::Defaults, &mut sources);

    // 2. Config file.
    let file_path = path
        .map(Path::to_path_buf)
        .or_else(|| env_vars.get(CONFIG_PATH_VAR).map(PathBuf::from));

    let mut loaded_files = Vec::new();
    if let Some(file_path) = file_path {
        let overlay = read_toml(&file_path)?;
        let shown = file_path.display().to_string();
        deep_merge_tracking(
            &mut merged,
            &overlay,
            "",
            &ConfigLayer::File(shown.clone()),
            &mut sources,
        );
        info!(path = %shown, "loaded config file");
        loaded_files.push(shown);
    }

    // 3. Env fallbacks.
    let applied = apply_env_fallbacks(&mut merged, &mut sources, env_vars)?;
    if applied > 0 {
        debug!(count = applied, "applied env var fallbacks");
    }

    // 4. Deserialize.
    let config = merged.try_into::<Config>().map_err(|e| ConfigError::Parse {
        origin: "<merged configuration>".to_owned(),
        source: e,
    })?;

    // 5. Validate.
    validate::validate(&config)?;

    Ok(ResolvedConfig {
        config,
        sources,
        loaded_files,
    })
}

/// Load configuration from a single file (no layering, no env fallbacks).
///
/// Fields missing from the file take their default values.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
/// validation.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let content = read_bounded(path)?;
    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        origin: path.display().to_string(),
        source: e,
    })?;
    validate::validate(&config)?;
    Ok(config)
}

/// Parse and validate configuration from a TOML string.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the string is not valid TOML or fails
/// validation.
pub fn from_toml_str(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
        origin: "<string>".to_owned(),
        source: e,
    })?;
    validate::validate(&config)?;
    Ok(config)
}

fn read_toml(path: &Path) -> ConfigResult<toml::Value> {
    let content = read_bounded(path)?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        origin: path.display().to_string(),
        source: e,
    })
}

/// Read a config file, checking its size before anything is loaded.
fn read_bounded(path: &Path) -> ConfigResult<String> {
    let read_err = |source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    };

    let size = std::fs::metadata(path).map_err(read_err)?.len();
    if size > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::FileTooLarge {
            path: path.display().to_string(),
            size,
            limit: MAX_CONFIG_FILE_SIZE,
        });
    }

    std::fs::read_to_string(path).map_err(read_err)
}
