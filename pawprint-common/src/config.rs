//! Configuration loading and config file resolution
//!
//! Config file resolution follows a fixed priority order:
//! 1. Command-line argument (highest priority)
//! 2. `PAWPRINT_CONFIG` environment variable
//! 3. Per-user config file (`<config_dir>/pawprint/<module>.toml`)
//! 4. Compiled defaults (fallback)
//!
//! A file named explicitly (CLI or environment) must load; failures are
//! configuration faults. Only the implicit per-user file may be missing.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "PAWPRINT_CONFIG";

/// Logging section of the TOML config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Optional log file; stdout when absent
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_file: None,
        }
    }
}

/// Module TOML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Threshold configuration file; compiled thresholds when absent
    #[serde(default)]
    pub thresholds_file: Option<PathBuf>,

    /// Per-call timeout for evidence providers (milliseconds)
    #[serde(default = "default_provider_timeout_ms")]
    pub provider_timeout_ms: u64,

    /// Report cache window per content identifier (seconds)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            thresholds_file: None,
            provider_timeout_ms: default_provider_timeout_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_provider_timeout_ms() -> u64 {
    8_000
}

fn default_cache_ttl_secs() -> u64 {
    300
}

impl TomlConfig {
    /// Reject values that would make the service unusable
    pub fn validate(&self) -> Result<()> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(Error::Config(format!(
                "logging.level must be one of {:?}, got {:?}",
                LEVELS, self.logging.level
            )));
        }
        if self.provider_timeout_ms == 0 {
            return Err(Error::Config(
                "provider_timeout_ms must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where a resolved config came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine(PathBuf),
    Environment(PathBuf),
    UserFile(PathBuf),
    CompiledDefaults,
}

/// Resolves the config file for one module
pub struct ConfigResolver {
    module_name: String,
}

impl ConfigResolver {
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
        }
    }

    /// Default per-user config path for this module, if the platform has one
    pub fn user_config_path(&self) -> Option<PathBuf> {
        dirs::config_dir().map(|d| {
            d.join("pawprint")
                .join(format!("{}.toml", self.module_name))
        })
    }

    /// Determine which config source applies, without loading it
    pub fn source(&self, cli_arg: Option<&Path>) -> ConfigSource {
        if let Some(path) = cli_arg {
            return ConfigSource::CommandLine(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return ConfigSource::Environment(PathBuf::from(path));
            }
        }

        match self.user_config_path() {
            Some(path) if path.exists() => ConfigSource::UserFile(path),
            _ => ConfigSource::CompiledDefaults,
        }
    }

    /// Resolve and load the module config
    ///
    /// # Errors
    /// `Error::Config` when an explicitly named or existing file cannot be
    /// read, parsed or validated.
    pub fn resolve(&self, cli_arg: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
        let source = self.source(cli_arg);
        let config = match &source {
            ConfigSource::CommandLine(path)
            | ConfigSource::Environment(path)
            | ConfigSource::UserFile(path) => {
                info!("Loading {} config from {}", self.module_name, path.display());
                load_toml_config(path)?
            }
            ConfigSource::CompiledDefaults => {
                warn!(
                    "No config file found for {}; using compiled defaults",
                    self.module_name
                );
                TomlConfig::default()
            }
        };
        config.validate()?;
        Ok((config, source))
    }
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Write a TOML config file atomically (temp file + rename)
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, content)?;
    std::fs::rename(&tmp_path, path)?;
    debug!("Config written to {}", path.display());
    Ok(())
}
