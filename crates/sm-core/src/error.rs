//! Errors for configuration loading and validation.
//!
//! [`ConfigError`] covers the failure modes of [`Config::load`] and
//! [`Config::validate`]: the file itself (I/O, JSON), and loaded values
//! that can't drive a scan.
//!
//! [`Config::load`]: crate::Config::load
//! [`Config::validate`]: crate::Config::validate

use camino::Utf8PathBuf;

/// Errors from loading or validating a configuration file.
///
/// # Examples
///
/// ```
/// use sm_core::ConfigError;
/// use camino::Utf8PathBuf;
///
/// let error = ConfigError::MissingDirectory(Utf8PathBuf::from("/some/path"));
/// assert!(error.to_string().contains("/some/path"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configured scan root does not exist or is not a directory.
    #[error("missing required directory: {0}")]
    MissingDirectory(Utf8PathBuf),

    /// An option carries a value a scan can't run with, such as an empty
    /// source extension list.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_display() {
        let error = ConfigError::MissingDirectory(Utf8PathBuf::from("/missing/dir"));
        assert!(error.to_string().contains("/missing/dir"));
    }

    #[test]
    fn test_invalid_option_display() {
        let error = ConfigError::InvalidOption {
            option: "source_extensions".to_owned(),
            reason: "must not be empty".to_owned(),
        };
        let msg = error.to_string();
        assert!(msg.contains("source_extensions"));
        assert!(msg.contains("must not be empty"));
    }

    #[test]
    fn test_io_and_parse_conversions() {
        let io: ConfigError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file").into();
        assert!(matches!(io, ConfigError::Io(_)));

        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let parse: ConfigError = parse_err.into();
        assert!(matches!(parse, ConfigError::Parse(_)));
    }
}
