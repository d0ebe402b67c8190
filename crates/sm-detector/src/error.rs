//! Error types for the sm-detector crate.
//!
//! This module provides the [`DetectError`] type covering every failure
//! mode of a detection run.
//!
//! # Error Recovery Strategy
//!
//! - **Terminal, user-facing** ([`DetectError::PlatformNotDetected`],
//!   [`DetectError::MultiplePlatforms`]): the CLI exits non-zero with a
//!   clear message. These are deliberate refusals, not crashes.
//! - **Transient per-file errors** ([`DetectError::Read`]): logged at debug
//!   level and skipped; one unreadable file never aborts the scan.
//! - **Generic scanner failures** ([`DetectError::Walk`],
//!   [`DetectError::Config`], [`DetectError::NonUtf8Path`]): propagate
//!   immediately, non-recoverable for the invocation.

use camino::Utf8PathBuf;
use sm_core::Platform;

/// Errors that can occur during a detection run.
///
/// # Examples
///
/// ```
/// use sm_detector::DetectError;
///
/// let err = DetectError::PlatformNotDetected;
/// assert!(err.is_fatal());
/// assert!(err.to_string().contains("no supported"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    /// No dependency, config-file, or content evidence identified a
    /// platform. The project doesn't appear to use a supported
    /// visual-testing platform.
    #[error("no supported visual-testing platform detected in this project")]
    PlatformNotDetected,

    /// More than one distinct platform candidate was found.
    ///
    /// Raised the instant a second platform appears, whether within one
    /// manifest or across ecosystems. The tool never guesses between two
    /// simultaneously-installed platforms: transforming the wrong one
    /// would corrupt working tests.
    #[error("multiple visual-testing platforms detected: {}", format_platforms(platforms))]
    MultiplePlatforms {
        /// The distinct platforms found, in discovery order.
        platforms: Vec<Platform>,
    },

    /// Failed to walk a directory.
    ///
    /// This is a fatal error that prevents scanning from continuing.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Failed to read a file.
    ///
    /// Contains the path that failed and the underlying I/O error.
    /// Scanning continues by skipping this file.
    #[error("failed to read file {path}: {source}")]
    Read {
        /// The path of the file that couldn't be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid detector configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A path is not valid UTF-8.
    ///
    /// This crate uses UTF-8 paths throughout. If a non-UTF-8 path is
    /// encountered, it cannot be processed.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),
}

fn format_platforms(platforms: &[Platform]) -> String {
    platforms
        .iter()
        .map(|p| p.label())
        .collect::<Vec<_>>()
        .join(", ")
}

impl DetectError {
    /// Creates a new [`DetectError::Read`] error.
    #[inline]
    pub fn read(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`DetectError::Config`] error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a new [`DetectError::MultiplePlatforms`] error.
    #[inline]
    #[must_use]
    pub fn multiple_platforms(platforms: Vec<Platform>) -> Self {
        Self::MultiplePlatforms { platforms }
    }

    /// Returns `true` if this error is recoverable (scanning can continue).
    ///
    /// Only per-file read failures are recoverable; they become "no
    /// evidence from this file" rather than a scan failure.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Read { .. })
    }

    /// Returns `true` if this error is fatal (scanning should stop).
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Returns `true` if this error is one of the two terminal,
    /// user-facing detection outcomes.
    #[inline]
    #[must_use]
    pub const fn is_detection_failure(&self) -> bool {
        matches!(
            self,
            Self::PlatformNotDetected | Self::MultiplePlatforms { .. }
        )
    }

    /// Returns the file path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::Read { path, .. } => Some(path),
            _ => None,
        }
    }
}
