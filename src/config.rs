//! Scanner configuration.
//!
//! A single `Config` value is built at startup (defaults, optionally a YAML
//! file, then environment overrides) and passed explicitly to the walker.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default per-file size cap (1 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;
/// Default entry budget for a walk.
pub const DEFAULT_MAX_FILES: usize = 200;
/// Hard ceiling on the entry budget.
pub const DEFAULT_MAX_FILES_LIMIT: usize = 500;

/// Environment variable names.
pub mod env {
    pub const MAX_FILE_BYTES: &str = "MAX_FILE_BYTES";
    pub const DEFAULT_MAX_FILES: &str = "DEFAULT_MAX_FILES";
    pub const MAX_FILES_LIMIT: &str = "MAX_FILES_LIMIT";
    pub const PARALLEL: &str = "AUTODOCX_PARALLEL";
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("default_max_files ({default}) exceeds max_files_limit ({limit})")]
    DefaultAboveLimit { default: usize, limit: usize },
}

/// Scanner settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Files larger than this are skipped without being read into a parser.
    pub max_file_bytes: u64,
    /// Entry budget used when the caller does not request one.
    pub default_max_files: usize,
    /// Ceiling applied to any requested budget.
    pub max_files_limit: usize,
    /// Run extraction on the rayon pool.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            default_max_files: DEFAULT_MAX_FILES,
            max_files_limit: DEFAULT_MAX_FILES_LIMIT,
            parallel: false,
        }
    }
}

impl Config {
    /// Parse a config from a YAML file. Missing keys keep their defaults.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().display().to_string();
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io {
            path: path_str.clone(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path_str,
            source,
        })
    }

    /// Build the process configuration: file (or defaults), then the real
    /// environment, then validation.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match file {
            Some(path) => Self::parse_file(path)?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Defaults plus overrides from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().with_overrides(lookup)
    }

    /// Apply overrides from `lookup` and validate.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_var(&lookup, env::MAX_FILE_BYTES)? {
            self.max_file_bytes = v;
        }
        if let Some(v) = parse_var(&lookup, env::DEFAULT_MAX_FILES)? {
            self.default_max_files = v;
        }
        if let Some(v) = parse_var(&lookup, env::MAX_FILES_LIMIT)? {
            self.max_files_limit = v;
        }
        if let Some(raw) = lookup(env::PARALLEL) {
            self.parallel = parse_bool(&raw).ok_or(ConfigError::InvalidEnv {
                key: env::PARALLEL,
                value: raw,
            })?;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_file_bytes == 0 {
            return Err(ConfigError::Zero("max_file_bytes"));
        }
        if self.max_files_limit == 0 {
            return Err(ConfigError::Zero("max_files_limit"));
        }
        if self.default_max_files == 0 {
            return Err(ConfigError::Zero("default_max_files"));
        }
        if self.default_max_files > self.max_files_limit {
            return Err(ConfigError::DefaultAboveLimit {
                default: self.default_max_files,
                limit: self.max_files_limit,
            });
        }
        Ok(())
    }

    /// Budget for a walk: the request (or the default), capped at the limit.
    pub fn effective_max_files(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_max_files)
            .min(self.max_files_limit)
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { key, value: raw }),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
