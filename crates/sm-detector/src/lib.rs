//! Platform and framework detection engine for smartui-migrate.
//!
//! This crate answers one question about a project directory: which
//! visual-testing platform, test framework, and language is it using?
//! The answer drives every downstream migration step, so detection is
//! conservative: it refuses with a typed error rather than guess.
//!
//! # Overview
//!
//! The main entry point is [`Detector`], which runs a two-phase
//! "anchor and search" scan:
//!
//! - **Anchor**: cheap, high-confidence evidence first. Package manifests
//!   (`package.json`, `pom.xml`, `requirements.txt`) are read for known
//!   platform SDK dependencies; well-known configuration files are the
//!   fallback.
//! - **Search**: source files are read in parallel and tested for the
//!   anchor's magic strings. With no anchor at all, a cold scan over every
//!   platform's vocabulary feeds the classifier instead.
//!
//! # Example
//!
//! ```ignore
//! use sm_detector::{Detector, DetectorConfig};
//! use camino::Utf8Path;
//!
//! let config = DetectorConfig::new(Utf8Path::new("./my-project"));
//! let detector = Detector::new(config)?;
//!
//! let result = detector.detect()?;
//! println!(
//!     "{} / {} / {}",
//!     result.platform, result.framework, result.language
//! );
//!
//! let stats = detector.stats();
//! println!("Scanned {} files", stats.scanned);
//! ```
//!
//! # Architecture
//!
//! ```text
//! Detector (main entry point)
//!     │
//!     ├── anchor::resolve_anchor (phase 1)
//!     │       │
//!     │       ├── manifest (package.json / pom.xml / requirements.txt)
//!     │       └── locator (well-known config files)
//!     │
//!     ├── search::search_sources (phase 2)
//!     │       │
//!     │       └── FileWalker (ignore crate) + rayon reads
//!     │
//!     ├── classifier (framework / language / cold platform)
//!     │
//!     └── assembler (DetectionResult + file buckets)
//! ```
//!
//! # Failure Model
//!
//! Two outcomes are deliberate refusals, not crashes:
//! [`DetectError::PlatformNotDetected`] and
//! [`DetectError::MultiplePlatforms`]. Everything else is either a
//! recoverable per-file read error (skipped) or a scanner failure.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod anchor;
mod assembler;
mod classifier;
mod error;
mod locator;
mod manifest;
mod search;
mod stats;
mod walker;

pub use error::DetectError;
pub use search::SearchMatch;
pub use stats::{ScanStats, StatsSnapshot};
pub use walker::FileWalker;

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use sm_core::DetectionResult;
use tracing::{debug, info};

/// Configuration for the detector.
///
/// # Examples
///
/// ```
/// use sm_detector::DetectorConfig;
/// use camino::Utf8Path;
///
/// let config = DetectorConfig::new(Utf8Path::new("./my-project"))
///     .with_skip_dirs(&["vendor", "third_party"]);
/// ```
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Root directory to scan.
    pub root: Utf8PathBuf,
    /// Additional directories to skip.
    pub skip_dirs: Vec<String>,
    /// Source extensions to scan; empty means the built-in list.
    pub source_extensions: Vec<String>,
    /// Whether to follow symbolic links.
    pub follow_links: bool,
}

impl DetectorConfig {
    /// Creates a new detector configuration for the given project root.
    #[must_use]
    pub fn new(root: &Utf8Path) -> Self {
        Self {
            root: root.to_owned(),
            skip_dirs: Vec::new(),
            source_extensions: Vec::new(),
            follow_links: false,
        }
    }

    /// Adds directories to skip during scanning.
    #[must_use]
    pub fn with_skip_dirs(mut self, dirs: &[&str]) -> Self {
        self.skip_dirs.extend(dirs.iter().map(ToString::to_string));
        self
    }

    /// Replaces the source extension list the walker scans.
    #[must_use]
    pub fn with_source_extensions(mut self, extensions: &[String]) -> Self {
        self.source_extensions = extensions.to_vec();
        self
    }

    /// Configures whether to follow symbolic links.
    #[must_use]
    pub const fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }
}

/// The main detection engine.
///
/// Combines anchor resolution, parallel content search, classification,
/// and result assembly into a single interface.
///
/// # Cloning
///
/// `Detector` is cheaply cloneable via an internal `Arc`; clones share
/// the same statistics counters.
///
/// # Examples
///
/// ```ignore
/// use sm_detector::{Detector, DetectorConfig};
/// use camino::Utf8Path;
///
/// let detector = Detector::new(DetectorConfig::new(Utf8Path::new(".")))?;
/// match detector.detect() {
///     Ok(result) => println!("Detected {}", result.platform),
///     Err(e) if e.is_detection_failure() => eprintln!("{e}"),
///     Err(e) => return Err(e.into()),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Detector {
    /// Detector configuration.
    config: DetectorConfig,
    /// Statistics counters (shared via Arc for cloning).
    stats: Arc<ScanStats>,
}

impl Detector {
    /// Creates a new detector with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::Config`] if the root directory doesn't
    /// exist or isn't a directory.
    pub fn new(config: DetectorConfig) -> Result<Self, DetectError> {
        // Validate up front so detect() failures always mean a real scan
        // problem rather than a typo in the path.
        if !config.root.exists() {
            return Err(DetectError::config(format!(
                "root path does not exist: {}",
                config.root
            )));
        }
        if !config.root.is_dir() {
            return Err(DetectError::config(format!(
                "root path is not a directory: {}",
                config.root
            )));
        }

        info!(root = %config.root, "Creating detector");

        Ok(Self {
            config,
            stats: Arc::new(ScanStats::new()),
        })
    }

    /// Runs a full detection scan.
    ///
    /// The scan is one-shot and side-effect free: it only reads the tree.
    /// Repeated calls on an unchanged tree produce identical results.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::PlatformNotDetected`] when no platform
    /// evidence exists anywhere, [`DetectError::MultiplePlatforms`] when
    /// evidence names more than one platform, and scanner errors for
    /// traversal failures.
    pub fn detect(&self) -> Result<DetectionResult, DetectError> {
        info!(root = %self.config.root, "Starting detection");
        self.stats.reset();

        let walker = self.build_walker()?;

        let result = match anchor::resolve_anchor(&walker, &self.stats)? {
            Some(resolved) => {
                debug!(
                    platform = %resolved.platform,
                    source = ?resolved.source,
                    "Anchor resolved, running confirmatory search"
                );
                let matches =
                    search::search_sources(&walker, &resolved.magic_strings, &self.stats)?;
                assembler::assemble(&walker, &resolved, &matches)?
            }
            None => {
                debug!("No anchor, running cold scan");
                let needles = search::cold_needles();
                let matches = search::search_sources(&walker, &needles, &self.stats)?;
                assembler::assemble_cold(&walker, &matches)?
            }
        };

        let snap = self.stats.snapshot();
        info!(
            platform = %result.platform,
            framework = %result.framework,
            language = %result.language,
            scanned = snap.scanned,
            matched = snap.matched,
            "Detection completed"
        );

        Ok(result)
    }

    /// Returns a snapshot of current statistics.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Returns the detector configuration.
    #[must_use]
    pub const fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Builds a file walker with the current configuration.
    fn build_walker(&self) -> Result<FileWalker, DetectError> {
        let mut walker = FileWalker::new(&self.config.root)?;

        if !self.config.skip_dirs.is_empty() {
            let skip_dirs: Vec<&str> = self.config.skip_dirs.iter().map(String::as_str).collect();
            walker = walker.with_skip_dirs(&skip_dirs);
        }

        Ok(walker
            .with_source_extensions(&self.config.source_extensions)
            .with_follow_links(self.config.follow_links))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detector_config_new() {
        let config = DetectorConfig::new(Utf8Path::new("./project"));
        assert_eq!(config.root.as_str(), "./project");
        assert!(config.skip_dirs.is_empty());
        assert!(!config.follow_links);
    }

    #[test]
    fn test_detector_config_with_skip_dirs() {
        let config =
            DetectorConfig::new(Utf8Path::new("./project")).with_skip_dirs(&["vendor", "lib"]);
        assert_eq!(config.skip_dirs.len(), 2);
        assert!(config.skip_dirs.contains(&"vendor".to_owned()));
    }

    #[test]
    fn test_detector_config_with_source_extensions() {
        let config = DetectorConfig::new(Utf8Path::new("./project"))
            .with_source_extensions(&["js".to_owned(), "feature".to_owned()]);
        assert_eq!(config.source_extensions, vec!["js", "feature"]);
    }

    #[test]
    fn test_detector_invalid_root() {
        let config = DetectorConfig::new(Utf8Path::new("/nonexistent/path/that/does/not/exist"));
        assert!(matches!(
            Detector::new(config),
            Err(DetectError::Config(_))
        ));
    }
}
