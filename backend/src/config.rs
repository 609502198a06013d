//! Loading of `ExpenseTrackerConfig` from an optional YAML file.
//!
//! Every field has a default, so a config file only needs to list what it
//! changes:
//!
//! ```yaml
//! bucket_key: category
//! layout:
//!   cell_size: 180
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use shared::ExpenseTrackerConfig;
use tracing::info;

/// Environment variable naming the config file used by the binary
pub const CONFIG_ENV_VAR: &str = "EXPENSE_TRACKER_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Load the config at `path`, or the defaults when no path is given
pub fn load_config(path: Option<&Path>) -> Result<ExpenseTrackerConfig, ConfigError> {
    let Some(path) = path else {
        info!("No config file given, using defaults");
        return Ok(ExpenseTrackerConfig::default());
    };

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&contents).map_err(|err| match err {
        ConfigError::Parse { source, .. } => ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load the config named by `EXPENSE_TRACKER_CONFIG`, if set
pub fn load_config_from_env() -> Result<ExpenseTrackerConfig, ConfigError> {
    let path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    load_config(path.as_deref())
}

pub fn parse_config(contents: &str) -> Result<ExpenseTrackerConfig, ConfigError> {
    // an empty file deserializes to null, which means "all defaults"
    let config: ExpenseTrackerConfig = if contents.trim().is_empty() {
        ExpenseTrackerConfig::default()
    } else {
        serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?
    };

    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &ExpenseTrackerConfig) -> Result<(), ConfigError> {
    let layout = &config.layout;
    if !layout.cell_size.is_finite() || layout.cell_size <= 0.0 {
        return Err(ConfigError::Invalid(format!(
            "layout.cell_size must be positive, got {}",
            layout.cell_size
        )));
    }
    if !layout.padding_x.is_finite() || !layout.padding_y.is_finite() {
        return Err(ConfigError::Invalid("layout padding must be finite".to_string()));
    }
    if layout.default_columns == 0 {
        return Err(ConfigError::Invalid(
            "layout.default_columns must be at least 1".to_string(),
        ));
    }
    if config.default_category.trim().is_empty() {
        return Err(ConfigError::Invalid("default_category cannot be empty".to_string()));
    }
    if config.max_name_length == 0 {
        return Err(ConfigError::Invalid("max_name_length must be at least 1".to_string()));
    }
    Ok(())
}
