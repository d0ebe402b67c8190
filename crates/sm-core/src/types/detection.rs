//! The final detection result handed to downstream transformers.
//!
//! This module provides [`DetectionResult`] and its categorized
//! [`DetectedFiles`] buckets. The result is the sole artifact the scanner
//! produces: config, code, and CI transformers all branch on its
//! platform/framework/language/test-type fields to select rewrite rules.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use super::framework::{Framework, Language, TestType};
use super::platform::Platform;

/// Project files categorized for the downstream transformers.
///
/// All buckets are sorted lexicographically so repeated scans of an
/// unchanged tree produce byte-for-byte identical results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedFiles {
    /// Platform-specific configuration files (e.g. `.percy.yml`).
    pub config: Vec<Utf8PathBuf>,

    /// Source files that matched at least one magic string for the
    /// resolved platform.
    pub source: Vec<Utf8PathBuf>,

    /// CI/CD pipeline definitions (GitHub Actions, GitLab CI, Jenkinsfile,
    /// Azure Pipelines, CircleCI, Bitbucket Pipelines).
    pub ci: Vec<Utf8PathBuf>,

    /// Package-manager manifests (`package.json`, `pom.xml`,
    /// `requirements.txt`).
    pub package_manager: Vec<Utf8PathBuf>,
}

impl DetectedFiles {
    /// Returns the total number of files across all buckets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.config.len() + self.source.len() + self.ci.len() + self.package_manager.len()
    }

    /// Sorts every bucket in place.
    ///
    /// Called once during assembly; results are immutable afterwards.
    pub fn sort(&mut self) {
        self.config.sort();
        self.source.sort();
        self.ci.sort();
        self.package_manager.sort();
    }
}

/// The immutable output of a successful scan.
///
/// Invariants upheld by the detector:
///
/// - `platform` is never [`Platform::Unknown`]; detection fails with a
///   typed error instead of returning an unknown platform.
/// - `files.source` only contains files that matched a magic string
///   relevant to the resolved platform.
///
/// # Examples
///
/// ```
/// use sm_core::{DetectedFiles, DetectionResult, Framework, Language, Platform};
///
/// let result = DetectionResult::new(
///     Platform::Percy,
///     Framework::Cypress,
///     Language::JsTs,
///     DetectedFiles::default(),
/// );
///
/// assert_eq!(result.test_type.label(), "e2e");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// The single resolved platform.
    pub platform: Platform,

    /// The resolved test framework.
    pub framework: Framework,

    /// The resolved implementation language.
    pub language: Language,

    /// Test type, derived from the framework.
    pub test_type: TestType,

    /// Categorized file lists for the transformers.
    pub files: DetectedFiles,
}

impl DetectionResult {
    /// Creates a detection result, deriving the test type from the
    /// framework and sorting the file buckets.
    #[must_use]
    pub fn new(
        platform: Platform,
        framework: Framework,
        language: Language,
        mut files: DetectedFiles,
    ) -> Self {
        files.sort();
        Self {
            platform,
            framework,
            language,
            test_type: framework.test_type(),
            files,
        }
    }
}
