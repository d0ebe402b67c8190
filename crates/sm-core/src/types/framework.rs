//! Test framework, language, and test-type identification.
//!
//! This module provides the [`Framework`], [`Language`], and [`TestType`]
//! enums describing how a project's visual tests are written. Framework and
//! language are optional at anchor time but must be resolved by the time a
//! detection result is assembled; the test type is derived purely from the
//! framework.

use serde::{Deserialize, Serialize};

/// The test framework driving a project's visual tests.
///
/// # Examples
///
/// ```
/// use sm_core::{Framework, TestType};
///
/// let framework = Framework::Storybook;
/// assert_eq!(framework.test_type(), TestType::Storybook);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Framework {
    /// Cypress end-to-end tests.
    Cypress,

    /// Playwright end-to-end tests.
    Playwright,

    /// Selenium WebDriver tests.
    Selenium,

    /// Storybook component stories.
    Storybook,

    /// Appium mobile tests.
    Appium,

    /// Robot Framework test suites.
    RobotFramework,
}

impl Framework {
    /// All supported frameworks, in declaration order.
    pub const ALL: &'static [Self] = &[
        Self::Cypress,
        Self::Playwright,
        Self::Selenium,
        Self::Storybook,
        Self::Appium,
        Self::RobotFramework,
    ];

    /// Returns the test type this framework implies.
    ///
    /// Storybook and Appium map to their own test types; everything else
    /// is an end-to-end suite.
    ///
    /// # Examples
    ///
    /// ```
    /// use sm_core::{Framework, TestType};
    ///
    /// assert_eq!(Framework::Cypress.test_type(), TestType::E2e);
    /// assert_eq!(Framework::Appium.test_type(), TestType::Appium);
    /// ```
    #[inline]
    #[must_use]
    pub const fn test_type(self) -> TestType {
        match self {
            Self::Storybook => TestType::Storybook,
            Self::Appium => TestType::Appium,
            Self::Cypress | Self::Playwright | Self::Selenium | Self::RobotFramework => {
                TestType::E2e
            }
        }
    }

    /// Returns a human-readable label for this framework.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cypress => "Cypress",
            Self::Playwright => "Playwright",
            Self::Selenium => "Selenium",
            Self::Storybook => "Storybook",
            Self::Appium => "Appium",
            Self::RobotFramework => "Robot Framework",
        }
    }
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The implementation language of a project's test suite.
///
/// Projects are assumed single-backend, so language resolution is a simple
/// precedence list over the file extensions present in the matched source
/// set (Java > Python > JS/TS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Language {
    /// JavaScript or TypeScript.
    #[default]
    JsTs,

    /// Java.
    Java,

    /// Python (including Robot Framework suites).
    Python,
}

impl Language {
    /// Returns a human-readable label for this language.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::JsTs => "JavaScript/TypeScript",
            Self::Java => "Java",
            Self::Python => "Python",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The kind of test suite being migrated.
///
/// A pure function of [`Framework`]; never stored independently of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum TestType {
    /// End-to-end browser tests.
    E2e,

    /// Storybook component snapshots.
    Storybook,

    /// Appium mobile app tests.
    Appium,
}

impl TestType {
    /// Returns a human-readable label for this test type.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::E2e => "e2e",
            Self::Storybook => "storybook",
            Self::Appium => "appium",
        }
    }
}

impl std::fmt::Display for TestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
