//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.eventspot/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use chrono::format::{Item, StrftimeItems};
use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EventSpotConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub loading_delay_ms: Option<u64>,
    pub date_format: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ImagesConfig {
    pub asset_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

/// Values given on the command line (None = flag not passed).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub loading_delay_ms: Option<u64>,
    pub asset_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOADING_DELAY_MS: u64 = 1000;
/// Month/day/year without zero padding, e.g. `12/5/2024`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";
pub const DEFAULT_LOG_FILE: &str = "eventspot.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub loading_delay: Duration,
    pub date_format: String,
    pub asset_dir: Option<PathBuf>,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            loading_delay: Duration::from_millis(DEFAULT_LOADING_DELAY_MS),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            asset_dir: None,
            log_level: DEFAULT_LOG_LEVEL,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.eventspot/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".eventspot").join("config.toml"))
}

/// How the config file was obtained.
///
/// Loading runs before the logger exists, so the caller logs this once
/// logging is set up.
#[derive(Debug)]
pub enum ConfigStatus {
    Loaded(PathBuf),
    /// No file existed; a commented-out default was written
    Generated(PathBuf),
    /// No file existed and writing the default failed
    GenerateFailed(PathBuf, std::io::Error),
    NoHomeDir,
}

impl ConfigStatus {
    pub fn log(&self) {
        match self {
            ConfigStatus::Loaded(path) => info!("Loaded config from {}", path.display()),
            ConfigStatus::Generated(path) => {
                info!("No config file found, generated default at {}", path.display())
            }
            ConfigStatus::GenerateFailed(path, e) => {
                warn!("Failed to write default config to {}: {}", path.display(), e)
            }
            ConfigStatus::NoHomeDir => {
                warn!("Could not determine home directory, using default config")
            }
        }
    }
}

/// Load config from `~/.eventspot/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `EventSpotConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<(EventSpotConfig, ConfigStatus), ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Ok((EventSpotConfig::default(), ConfigStatus::NoHomeDir)),
    }
}

/// Load config from an explicit path, generating a default file if missing.
pub fn load_config_from(path: &Path) -> Result<(EventSpotConfig, ConfigStatus), ConfigError> {
    if !path.exists() {
        let status = match generate_default_config(path) {
            Ok(()) => ConfigStatus::Generated(path.to_path_buf()),
            Err(e) => ConfigStatus::GenerateFailed(path.to_path_buf(), e),
        };
        return Ok((EventSpotConfig::default(), status));
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: EventSpotConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    debug!("Config: {:?}", config);
    Ok((config, ConfigStatus::Loaded(path.to_path_buf())))
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# EventSpot Lite Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# loading_delay_ms = 1000             # Or set EVENTSPOT_LOADING_DELAY_MS
# date_format = "%-m/%-d/%Y"          # strftime pattern for event dates

# [images]
# asset_dir = "/home/me/eventspot/images"   # Or set EVENTSPOT_ASSET_DIR

# [logging]
# level = "info"                      # "off", "error", "warn", "info", "debug", "trace"
# file = "eventspot.log"
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Environment variables consulted during resolution.
///
/// Read through a lookup function so tests don't have to touch the process
/// environment.
pub const ENV_LOADING_DELAY_MS: &str = "EVENTSPOT_LOADING_DELAY_MS";
pub const ENV_ASSET_DIR: &str = "EVENTSPOT_ASSET_DIR";
pub const ENV_LOG_LEVEL: &str = "EVENTSPOT_LOG_LEVEL";

/// Resolve the final config: defaults → config file → env vars → CLI.
pub fn resolve(config: &EventSpotConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

pub fn resolve_with_env<F>(config: &EventSpotConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Loading delay: CLI → env → config → default
    let loading_delay_ms = cli
        .loading_delay_ms
        .or_else(|| env(ENV_LOADING_DELAY_MS).and_then(|v| parse_env_u64(ENV_LOADING_DELAY_MS, &v)))
        .or(config.general.loading_delay_ms)
        .unwrap_or(DEFAULT_LOADING_DELAY_MS);

    // Asset dir: CLI → env → config
    let asset_dir = cli
        .asset_dir
        .clone()
        .or_else(|| env(ENV_ASSET_DIR).map(PathBuf::from))
        .or_else(|| config.images.asset_dir.clone());

    let log_level = log_level_setting(config, cli, &env)
        .map(|level| parse_level(&level))
        .unwrap_or(DEFAULT_LOG_LEVEL);
    let log_file = log_file_setting(config, cli);

    ResolvedConfig {
        loading_delay: Duration::from_millis(loading_delay_ms),
        date_format: resolve_date_format(config),
        asset_dir,
        log_level,
        log_file,
    }
}

/// Just the logger settings, without warnings.
///
/// Used to set up the logger before the full `resolve`, whose warnings then
/// reach the log.
pub fn resolve_logging(config: &EventSpotConfig, cli: &CliOverrides) -> (LevelFilter, PathBuf) {
    resolve_logging_with_env(config, cli, |key| std::env::var(key).ok())
}

pub fn resolve_logging_with_env<F>(
    config: &EventSpotConfig,
    cli: &CliOverrides,
    env: F,
) -> (LevelFilter, PathBuf)
where
    F: Fn(&str) -> Option<String>,
{
    let level = log_level_setting(config, cli, &env)
        .and_then(|level| level.parse().ok())
        .unwrap_or(DEFAULT_LOG_LEVEL);
    (level, log_file_setting(config, cli))
}

// Log level: CLI → env → config
fn log_level_setting<F>(config: &EventSpotConfig, cli: &CliOverrides, env: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    cli.log_level
        .clone()
        .or_else(|| env(ENV_LOG_LEVEL))
        .or_else(|| config.logging.level.clone())
}

// Log file: CLI → config → default
fn log_file_setting(config: &EventSpotConfig, cli: &CliOverrides) -> PathBuf {
    cli.log_file
        .clone()
        .or_else(|| config.logging.file.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
}

fn parse_env_u64(key: &str, value: &str) -> Option<u64> {
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a number of milliseconds", key, value);
            None
        }
    }
}

fn parse_level(level: &str) -> LevelFilter {
    match level.parse() {
        Ok(filter) => filter,
        Err(_) => {
            warn!("Unknown log level {:?}, using {}", level, DEFAULT_LOG_LEVEL);
            DEFAULT_LOG_LEVEL
        }
    }
}

/// Uses the configured date pattern if chrono accepts it, else the default.
///
/// Formatting with an invalid pattern panics at display time, so bad patterns
/// are rejected up front.
fn resolve_date_format(config: &EventSpotConfig) -> String {
    match config.general.date_format.as_deref() {
        Some(pattern) if is_valid_date_format(pattern) => pattern.to_string(),
        Some(pattern) => {
            warn!(
                "Invalid date_format {:?}, using {}",
                pattern, DEFAULT_DATE_FORMAT
            );
            DEFAULT_DATE_FORMAT.to_string()
        }
        None => DEFAULT_DATE_FORMAT.to_string(),
    }
}

pub fn is_valid_date_format(pattern: &str) -> bool {
    !pattern.is_empty() && !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}
