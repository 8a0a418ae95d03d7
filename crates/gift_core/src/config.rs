//! Runtime configuration for embedding processes and the CLI.
//!
//! Defaults can be overridden with `GIFT_DB_PATH`, `GIFT_LOG_LEVEL` and
//! `GIFT_LOG_DIR`.

use crate::logging::{default_log_level, LogLevel, LoggingError};
use std::collections::HashMap;
use std::error::Error;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DEFAULT_DB_FILE_NAME: &str = "gift.sqlite3";

const ENV_PREFIX: &str = "GIFT_";

pub const ENV_DB_PATH: &str = "GIFT_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "GIFT_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "GIFT_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: LogLevel,
    /// File logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyValue(&'static str),
    NonUnicodeValue(String),
    InvalidLogLevel(LoggingError),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue(key) => write!(f, "`{key}` is set but empty"),
            Self::NonUnicodeValue(key) => write!(f, "`{key}` is not valid UTF-8"),
            Self::InvalidLogLevel(err) => write!(f, "{err}"),
            Self::RelativeLogDir(path) => write!(
                f,
                "`{ENV_LOG_DIR}` must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidLogLevel(err) => Some(err),
            _ => None,
        }
    }
}

impl CoreConfig {
    /// Loads configuration from process environment variables.
    ///
    /// Variables outside the `GIFT_` prefix are skipped without decoding, so
    /// unrelated non-UTF-8 entries never fail the load.
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars = gift_vars(std::env::vars_os())?;
        Self::from_vars(&vars)
    }

    /// Loads configuration from an explicit key/value map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = non_empty(vars, ENV_DB_PATH)? {
            config.db_path = PathBuf::from(value);
        }
        if let Some(value) = non_empty(vars, ENV_LOG_LEVEL)? {
            config.log_level = LogLevel::parse(value).map_err(ConfigError::InvalidLogLevel)?;
        }
        if let Some(value) = non_empty(vars, ENV_LOG_DIR)? {
            let dir = PathBuf::from(value);
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir));
            }
            config.log_dir = Some(dir);
        }

        Ok(config)
    }
}

fn gift_vars<I>(vars: I) -> Result<HashMap<String, String>, ConfigError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut selected = HashMap::new();
    for (key, value) in vars {
        let Some(key) = key.to_str().filter(|key| key.starts_with(ENV_PREFIX)) else {
            continue;
        };
        let value = value
            .into_string()
            .map_err(|_| ConfigError::NonUnicodeValue(key.to_string()))?;
        selected.insert(key.to_string(), value);
    }
    Ok(selected)
}

fn non_empty<'a>(
    vars: &'a HashMap<String, String>,
    key: &'static str,
) -> Result<Option<&'a str>, ConfigError> {
    match vars.get(key).map(|value| value.trim()) {
        None => Ok(None),
        Some("") => Err(ConfigError::EmptyValue(key)),
        Some(value) => Ok(Some(value)),
    }
}
