use std::{
    env::VarError,
    fs,
    path::{Path, PathBuf},
};

pub use clockface_proto::config::*;

use log::{info, warn};
use masterror::AppError;
use shellexpand::{LookupError, full};
use thiserror::Error;

/// Failures while locating or loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to expand config path `{path}`: {source}")]
    Expand {
        path: String,
        #[source]
        source: LookupError<VarError>,
    },
    #[error("config file does not exist: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(#[from] ConfigValidationError),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::internal(err.to_string())
    }
}

/// Resolve the config location and load it.
///
/// An explicit `path` must exist. Without one the default location is used and a
/// missing file yields the default config. A file that fails to parse is logged
/// and replaced by defaults; a parsed file that fails validation is an error.
pub fn get_config(path: Option<PathBuf>) -> Result<(Config, PathBuf), ConfigError> {
    match path {
        Some(path) => {
            info!("Config path provided {path:?}");
            let expanded = expand_path(&path)?;

            if !expanded.exists() {
                return Err(ConfigError::NotFound(expanded));
            }

            Ok((load_or_default(&expanded)?, expanded))
        }
        None => {
            let expanded = expand_path(Path::new(DEFAULT_CONFIG_FILE_PATH))?;

            if let Some(parent) = expanded.parent()
                && !parent.exists()
            {
                fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }

            if !expanded.exists() {
                info!("No config file at {expanded:?}, using defaults");
                return Ok((Config::default(), expanded));
            }

            Ok((load_or_default(&expanded)?, expanded))
        }
    }
}

fn expand_path(path: &Path) -> Result<PathBuf, ConfigError> {
    let str_path = path.to_string_lossy();
    let expanded = full(&str_path).map_err(|source| ConfigError::Expand {
        path: str_path.to_string(),
        source,
    })?;

    Ok(PathBuf::from(expanded.into_owned()))
}

fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    let config = match read_config(path) {
        Ok(config) => config,
        Err(err @ ConfigError::Parse { .. }) => {
            warn!("{err}, falling back to defaults");
            Config::default()
        }
        Err(err) => return Err(err),
    };

    config.validate()?;
    Ok(config)
}

/// Read and decode the TOML file at `path` without validating it.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Decoding config file {path:?}");

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
