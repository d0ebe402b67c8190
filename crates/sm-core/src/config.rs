//! Configuration structures for the smartui-migrate tool.
//!
//! This module provides configuration types for the components of the
//! application:
//!
//! - [`ScanConfig`] - Detector settings (root path, skip dirs, extensions)
//! - [`ReportConfig`] - Report output settings
//! - [`Config`] - Root configuration combining all settings
//!
//! All configuration types implement [`Default`] with sensible values and
//! round-trip through JSON via serde.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::signatures::SOURCE_EXTENSIONS;

/// Configuration for the project scanner.
///
/// Controls where the detector walks and which files it considers.
///
/// # Examples
///
/// ```
/// use sm_core::ScanConfig;
///
/// let config = ScanConfig::default();
/// assert!(config.source_extensions.iter().any(|e| e == "js"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Root path of the project to scan.
    pub root_path: Utf8PathBuf,

    /// Additional directory names to skip, on top of the built-in noise
    /// list (node_modules, .git, dist, build, coverage, ...).
    pub skip_dirs: Vec<String>,

    /// Whether to follow symbolic links during traversal.
    pub follow_links: bool,

    /// Source file extensions considered by the content searcher.
    pub source_extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root_path: Utf8PathBuf::new(),
            skip_dirs: Vec::new(),
            follow_links: false,
            source_extensions: SOURCE_EXTENSIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Output format for detection reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ReportFormat {
    /// JSON format.
    #[default]
    Json,
    /// CSV format (file buckets only).
    Csv,
}

/// Configuration for report generation.
///
/// # Examples
///
/// ```
/// use sm_core::{ReportConfig, ReportFormat};
///
/// let config = ReportConfig::default();
/// assert_eq!(config.format, ReportFormat::Json);
/// assert!(config.pretty);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format.
    pub format: ReportFormat,

    /// Output file path. `None` writes to stdout.
    pub output: Option<Utf8PathBuf>,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Json,
            output: None,
            pretty: true,
        }
    }
}

/// Root configuration for the smartui-migrate tool.
///
/// Combines all component configurations into a single structure that can
/// be loaded from a configuration file or constructed programmatically.
///
/// # Examples
///
/// ```
/// use sm_core::Config;
///
/// let config = Config::default();
/// let json = serde_json::to_string_pretty(&config).unwrap();
/// let parsed: Config = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, parsed);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scanner configuration.
    pub scan: ScanConfig,

    /// Report configuration.
    pub report: ReportConfig,
}

impl Config {
    /// Loads and validates configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file can't be read,
    /// [`ConfigError::Parse`] if it isn't valid JSON, and a validation
    /// error if the loaded values are unusable.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_std_path())?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    ///
    /// An empty `root_path` is allowed here; callers fill it in from
    /// their own defaults before scanning.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDirectory`] if a configured root
    /// doesn't exist and [`ConfigError::InvalidOption`] for unusable
    /// option values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scan.root_path.as_str().is_empty() && !self.scan.root_path.is_dir() {
            return Err(ConfigError::MissingDirectory(self.scan.root_path.clone()));
        }

        if self.scan.source_extensions.is_empty() {
            return Err(ConfigError::InvalidOption {
                option: "scan.source_extensions".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_config_defaults() {
        let config = ScanConfig::default();
        assert!(config.root_path.as_str().is_empty());
        assert!(config.skip_dirs.is_empty());
        assert!(!config.follow_links);
        assert_eq!(config.source_extensions.len(), SOURCE_EXTENSIONS.len());
    }

    #[test]
    fn test_report_config_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.format, ReportFormat::Json);
        assert!(config.output.is_none());
        assert!(config.pretty);
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_deserialize_with_missing_fields() {
        let json = r#"{"scan": {"root_path": "/tmp/project"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.scan.root_path.as_str(), "/tmp/project");
        // Other fields should have defaults
        assert!(!config.scan.follow_links);
        assert_eq!(config.report.format, ReportFormat::Json);
    }

    #[test]
    fn test_validate_rejects_empty_extensions() {
        let mut config = Config::default();
        config.scan.source_extensions.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_missing_root() {
        let mut config = Config::default();
        config.scan.root_path = Utf8PathBuf::from("/nonexistent/path/for/tests");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingDirectory(_))
        ));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        // Parse errors must surface as ConfigError::Parse, not panics
        let parsed: Result<Config, _> = serde_json::from_str("{not json");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_report_format_serialization() {
        assert_eq!(
            serde_json::to_string(&ReportFormat::Json).unwrap(),
            r#""json""#
        );
        assert_eq!(
            serde_json::to_string(&ReportFormat::Csv).unwrap(),
            r#""csv""#
        );
    }
}
