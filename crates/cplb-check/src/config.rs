//! Settings for the cplb-check tool

use cplb::RouteTableResolver;
use cplb::nic::{PROC_NET_IPV6_ROUTE, PROC_NET_ROUTE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingSettings,

    #[serde(default)]
    pub output: OutputSettings,

    #[serde(default)]
    pub nic: NicSettings,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), validator::ValidationErrors> {
        self.logging.validate()?;
        self.nic.validate()?;
        Ok(())
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Fallback level when RUST_LOG is not set
    #[validate(custom = "validate_log_level")]
    pub level: String,

    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// What to print on success
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,

    /// Print the defaulted document to stdout
    #[serde(default)]
    pub print_defaulted: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Where the default interface lookup reads routing tables from
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NicSettings {
    #[validate(length(min = 1), custom = "validate_absolute_path")]
    pub route_table: String,

    #[validate(length(min = 1), custom = "validate_absolute_path")]
    pub ipv6_route_table: String,
}

impl NicSettings {
    pub fn resolver(&self) -> RouteTableResolver {
        RouteTableResolver::with_paths(&self.route_table, &self.ipv6_route_table)
    }
}

// Default implementations

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl Default for NicSettings {
    fn default() -> Self {
        Self {
            route_table: PROC_NET_ROUTE.to_string(),
            ipv6_route_table: PROC_NET_IPV6_ROUTE.to_string(),
        }
    }
}

// Custom validators

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    if LOG_LEVELS.contains(&level.trim().to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ValidationError::new("log_level_unknown"))
    }
}

fn validate_absolute_path(path: &str) -> Result<(), ValidationError> {
    if !Path::new(path.trim()).is_absolute() {
        return Err(ValidationError::new("path_not_absolute"));
    }
    Ok(())
}

/// Settings given on the command line, applied over the loaded file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub output_format: Option<OutputFormat>,
    pub print_defaulted: bool,
}

impl Config {
    /// Apply command line overrides and validate the result.
    pub fn apply_overrides(&mut self, overrides: Overrides) -> Result<(), ConfigError> {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
        if let Some(format) = overrides.output_format {
            self.output.format = format;
        }
        self.output.print_defaulted |= overrides.print_defaulted;

        self.validate()?;
        Ok(())
    }
}

// Configuration loading implementation

impl Config {
    /// Load configuration from default search paths
    ///
    /// Runs before logging is set up, so callers report the chosen file
    /// themselves (see [`Config::find_config_file`]).
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path if given, otherwise search the default paths.
    ///
    /// An explicit path that does not exist is an error.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if !path.is_file() => Err(ConfigError::FileNotFound(path.to_path_buf())),
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    pub fn find_config_file() -> Option<PathBuf> {
        let mut paths = vec![PathBuf::from("/etc/cplb/cplb-check.yaml")];

        if let Some(home_path) = Self::home_config_path() {
            paths.push(home_path);
        }

        paths.push(PathBuf::from("./cplb-check.yaml"));

        paths.into_iter().find(|p: &PathBuf| p.exists() && p.is_file())
    }

    /// Get home directory config path
    fn home_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/cplb/cplb-check.yaml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.output.format, OutputFormat::Yaml);
        assert!(!config.output.print_defaulted);
        assert_eq!(config.nic.route_table, "/proc/net/route");
    }

    #[test]
    fn test_valid_yaml_parsing() {
        let yaml = r#"
logging:
  level: debug
  format: json

output:
  format: json
  print_defaulted: true

nic:
  route_table: /host/proc/net/route
  ipv6_route_table: /host/proc/net/ipv6_route
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.print_defaulted);
        assert_eq!(config.nic.route_table, "/host/proc/net/route");
    }

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let yaml = r#"
output:
  print_defaulted: true
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.output.format, OutputFormat::Yaml);
        assert_eq!(config.nic.ipv6_route_table, "/proc/net/ipv6_route");
    }

    #[test]
    fn test_invalid_log_level() {
        let yaml = r#"
logging:
  level: loud
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_relative_route_table_rejected() {
        let yaml = r#"
nic:
  route_table: proc/net/route
  ipv6_route_table: /proc/net/ipv6_route
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_output_format_fails_to_parse() {
        let yaml = r#"
output:
  format: toml
"#;

        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_path_validators() {
        assert!(validate_absolute_path("/proc/net/route").is_ok());
        assert!(validate_absolute_path("./route").is_err());
        assert!(validate_absolute_path("").is_err());

        assert!(validate_log_level("INFO").is_ok());
        assert!(validate_log_level("warn").is_ok());
        assert!(validate_log_level("verbose").is_err());
    }

    #[test]
    fn test_overrides_are_applied() {
        let mut config = Config::default();
        config
            .apply_overrides(Overrides {
                log_level: Some("debug".to_string()),
                log_format: Some(LogFormat::Json),
                output_format: Some(OutputFormat::Json),
                print_defaulted: true,
            })
            .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.print_defaulted);
    }

    #[test]
    fn test_empty_overrides_keep_file_values() {
        let mut config: Config = serde_yaml::from_str("output:\n  print_defaulted: true\n").unwrap();
        config.apply_overrides(Overrides::default()).unwrap();

        assert_eq!(config.logging.level, "info");
        assert!(config.output.print_defaulted);
    }

    #[test]
    fn test_invalid_log_level_override_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(Overrides {
                log_level: Some("loud".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load_from(Some(Path::new("/nonexistent/cplb-check.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
