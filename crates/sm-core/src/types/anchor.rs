//! Anchor types for the first phase of detection.
//!
//! An anchor is a high-confidence, low-cost signal (a recognized dependency
//! or a well-known configuration file) that pins down the platform, and
//! sometimes the framework and language, before any expensive file-content
//! scanning happens. Anchors are ephemeral: constructed once per scan,
//! consumed immediately, never persisted.

use smallvec::SmallVec;

use super::framework::{Framework, Language};
use super::platform::Platform;

/// The package ecosystem a dependency-based anchor was read from.
///
/// Deliberately exhaustive: the manifest readers match on every variant,
/// so adding an ecosystem must force a compile error at each reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ecosystem {
    /// `package.json` dependencies.
    Npm,

    /// `pom.xml` dependencies.
    Maven,

    /// `requirements.txt` entries.
    Pip,
}

impl Ecosystem {
    /// Returns the manifest filename for this ecosystem.
    #[inline]
    #[must_use]
    pub const fn manifest_name(self) -> &'static str {
        match self {
            Self::Npm => "package.json",
            Self::Maven => "pom.xml",
            Self::Pip => "requirements.txt",
        }
    }
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.manifest_name())
    }
}

/// Where an anchor's evidence came from.
///
/// Dependency evidence always outranks config-file evidence; config files
/// are consulted only when no dependency anchor exists at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorSource {
    /// A recognized dependency in a package manifest.
    Dependency(Ecosystem),

    /// A well-known platform configuration file.
    ConfigFile,
}

/// A resolved anchor: the platform plus whatever framework/language
/// information the evidence carried.
///
/// The magic strings are the literal substrings the content searcher will
/// look for when confirming this anchor's scope.
///
/// # Examples
///
/// ```
/// use sm_core::{Anchor, AnchorSource, Ecosystem, Framework, Language, Platform};
///
/// let anchor = Anchor::new(Platform::Percy, AnchorSource::Dependency(Ecosystem::Npm))
///     .with_framework(Framework::Cypress)
///     .with_language(Language::JsTs);
///
/// assert!(anchor.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// The platform this anchor identifies.
    pub platform: Platform,

    /// Where the evidence came from.
    pub source: AnchorSource,

    /// Literal substrings to search for in source files.
    pub magic_strings: SmallVec<[&'static str; 8]>,

    /// Framework, when the evidence carried it (dependency anchors only).
    pub framework: Option<Framework>,

    /// Language, when the evidence carried it (dependency anchors only).
    pub language: Option<Language>,
}

impl Anchor {
    /// Creates a platform-only anchor with no magic strings attached yet.
    #[must_use]
    pub fn new(platform: Platform, source: AnchorSource) -> Self {
        Self {
            platform,
            source,
            magic_strings: SmallVec::new(),
            framework: None,
            language: None,
        }
    }

    /// Attaches the framework this anchor's evidence implies.
    #[must_use]
    pub const fn with_framework(mut self, framework: Framework) -> Self {
        self.framework = Some(framework);
        self
    }

    /// Attaches the language this anchor's evidence implies.
    #[must_use]
    pub const fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Attaches the magic strings the content searcher should use.
    #[must_use]
    pub fn with_magic_strings(mut self, strings: &[&'static str]) -> Self {
        self.magic_strings.extend_from_slice(strings);
        self
    }

    /// Returns `true` if both framework and language are already known.
    ///
    /// A complete anchor lets the content searcher run with the narrow
    /// platform string set only; an incomplete one widens the search so
    /// the classifier has material to work with.
    #[inline]
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.framework.is_some() && self.language.is_some()
    }

    /// Returns `true` if this anchor came from dependency evidence.
    #[inline]
    #[must_use]
    pub const fn is_dependency(&self) -> bool {
        matches!(self.source, AnchorSource::Dependency(_))
    }
}
