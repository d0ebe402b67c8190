//! Visual-testing platform identification.
//!
//! This module provides the [`Platform`] enum for the third-party
//! visual-testing platforms the migration tool can detect.

use serde::{Deserialize, Serialize};

/// A third-party visual-testing platform.
///
/// Exactly one platform must be resolved per scan. Detecting more than one
/// is a fatal ambiguity rather than a mergeable state, because transforming
/// a project against the wrong platform would corrupt working tests.
///
/// # Examples
///
/// ```
/// use sm_core::Platform;
///
/// let platform = Platform::Percy;
/// assert!(platform.is_known());
/// assert_eq!(platform.label(), "Percy");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Platform {
    /// BrowserStack Percy.
    Percy,

    /// Applitools Eyes.
    Applitools,

    /// Sauce Labs Visual.
    SauceLabsVisual,

    /// No platform resolved yet.
    ///
    /// This state is only valid while a scan is in flight. A successful
    /// scan never reports `Unknown`; the detector fails with a typed
    /// error instead.
    #[default]
    Unknown,
}

impl Platform {
    /// All detectable platforms, in declaration order.
    ///
    /// Declaration order is the documented tie-break rule for cold-mode
    /// platform scoring: the first-declared platform wins an exact tie.
    pub const ALL: &'static [Self] = &[Self::Percy, Self::Applitools, Self::SauceLabsVisual];

    /// Returns `true` if this is a concrete platform (not [`Unknown`](Self::Unknown)).
    ///
    /// # Examples
    ///
    /// ```
    /// use sm_core::Platform;
    ///
    /// assert!(Platform::Applitools.is_known());
    /// assert!(!Platform::Unknown.is_known());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns a human-readable label for this platform.
    ///
    /// # Examples
    ///
    /// ```
    /// use sm_core::Platform;
    ///
    /// assert_eq!(Platform::SauceLabsVisual.label(), "Sauce Labs Visual");
    /// ```
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Percy => "Percy",
            Self::Applitools => "Applitools",
            Self::SauceLabsVisual => "Sauce Labs Visual",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_is_known() {
        assert!(Platform::Percy.is_known());
        assert!(Platform::Applitools.is_known());
        assert!(Platform::SauceLabsVisual.is_known());
        assert!(!Platform::Unknown.is_known());
    }

    #[test]
    fn test_platform_default_is_unknown() {
        assert_eq!(Platform::default(), Platform::Unknown);
    }

    #[test]
    fn test_platform_all_excludes_unknown() {
        assert_eq!(Platform::ALL.len(), 3);
        assert!(!Platform::ALL.contains(&Platform::Unknown));
    }

    #[test]
    fn test_platform_labels() {
        assert_eq!(Platform::Percy.label(), "Percy");
        assert_eq!(Platform::Applitools.label(), "Applitools");
        assert_eq!(Platform::SauceLabsVisual.label(), "Sauce Labs Visual");
    }

    #[test]
    fn test_platform_serialization() {
        assert_eq!(
            serde_json::to_string(&Platform::Percy).unwrap(),
            r#""percy""#
        );
        assert_eq!(
            serde_json::to_string(&Platform::SauceLabsVisual).unwrap(),
            r#""sauce_labs_visual""#
        );
    }

    #[test]
    fn test_platform_deserialization() {
        let platform: Platform = serde_json::from_str(r#""applitools""#).unwrap();
        assert_eq!(platform, Platform::Applitools);
    }
}
