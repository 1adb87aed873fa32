//! Configuration file loading and CLI precedence.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use dockscope_source::{DockerSource, FileSource, Source, StdinSource};

use crate::cli::{Args, SourceKind};

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "DOCKSCOPE_CONFIG";

const DEFAULT_DOCKER_BIN: &str = "docker";
const DEFAULT_TICK_RATE_MS: u64 = 250;

/// Errors that can occur during config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("failed to read config file at {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    /// The file is not valid TOML or has unknown keys
    #[error("invalid config file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// TOML configuration file structure.
///
/// Every key is optional; missing keys fall back to built-in defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub wrap: Option<bool>,
    pub errors_only: Option<bool>,
    pub tail: Option<usize>,
    pub docker_bin: Option<String>,
    pub log_file: Option<PathBuf>,
    pub tick_rate_ms: Option<u64>,
}

/// Settings for one session after applying CLI > file > default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub target: String,
    pub source: SourceKind,
    pub errors_only: bool,
    pub tail: usize,
    pub wrap: bool,
    pub docker_bin: String,
    pub log_file: Option<PathBuf>,
    pub tick_rate: Duration,
}

impl ResolvedConfig {
    /// Build the log source for this session
    pub fn log_source(&self) -> Source {
        match self.source {
            SourceKind::Docker => Source::Docker(DockerSource::new(self.docker_bin.clone())),
            SourceKind::File => Source::File(FileSource::new()),
            SourceKind::Stdin => Source::Stdin(StdinSource::new()),
        }
    }
}

/// Load a config file.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::Read {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// `<config dir>/dockscope/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dockscope").join("config.toml"))
}

/// Config path taken from the environment
pub fn env_config_path() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV).map(PathBuf::from)
}

/// Load the config file with precedence: explicit path, then the
/// environment, then the default location.
pub fn load_config_with_precedence(
    explicit: Option<PathBuf>,
    from_env: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    match explicit.or(from_env).or_else(default_config_path) {
        Some(path) => load_config_file(path),
        None => Ok(None),
    }
}

/// Merge CLI arguments over the config file over defaults
pub fn resolve(args: &Args, file: Option<ConfigFile>) -> ResolvedConfig {
    let file = file.unwrap_or_default();

    ResolvedConfig {
        target: args.target.clone(),
        source: args.source,
        errors_only: args.errors_only || file.errors_only.unwrap_or(false),
        tail: args.tail.or(file.tail).unwrap_or(0),
        wrap: !args.no_wrap && file.wrap.unwrap_or(true),
        docker_bin: args
            .docker_bin
            .clone()
            .or(file.docker_bin)
            .unwrap_or_else(|| DEFAULT_DOCKER_BIN.to_string()),
        log_file: args.log_file.clone().or(file.log_file),
        tick_rate: Duration::from_millis(file.tick_rate_ms.unwrap_or(DEFAULT_TICK_RATE_MS)),
    }
}
