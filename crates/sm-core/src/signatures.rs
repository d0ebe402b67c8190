//! Static signature tables for platform, framework, and file detection.
//!
//! Everything in this module is read-only reference data: known dependency
//! identifiers, well-known configuration filenames, per-platform magic
//! strings, the weighted framework pattern table, and the universal CI and
//! package-manager file patterns.
//!
//! None of this data is derived from project contents. Tables are iterated
//! in declaration order, and declaration order is the documented tie-break
//! rule wherever scores can tie.

use camino::Utf8Path;

use crate::types::{Ecosystem, Framework, Language, Platform};

/// Directories that never contain user test code worth scanning.
///
/// Dependency install directories, version-control metadata, build output,
/// coverage output, and editor noise are all excluded from every walk.
pub const SKIP_DIRECTORIES: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "out",
    "coverage",
    "target",
    "__pycache__",
    ".venv",
    "venv",
    ".idea",
    ".vscode",
    "logs",
    ".next",
    ".turbo",
];

/// Source file extensions the content searcher considers.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "ts", "jsx", "tsx", "py", "java", "robot"];

/// Package-manager manifest filenames, one per supported ecosystem.
pub const PACKAGE_MANIFESTS: &[&str] = &["package.json", "pom.xml", "requirements.txt"];

/// A known dependency identifier and the triple it implies.
///
/// Maven identifiers use the `groupId:artifactId` form; pip identifiers are
/// stored PEP 503 normalized (lowercase, hyphens).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DependencySignature {
    /// Exact package/artifact identifier.
    pub name: &'static str,

    /// The ecosystem this identifier belongs to.
    pub ecosystem: Ecosystem,

    /// The platform this dependency implies.
    pub platform: Platform,

    /// The framework, when the package name pins one down.
    pub framework: Option<Framework>,

    /// The language implied by the ecosystem.
    pub language: Language,
}

/// All recognized platform SDK dependencies.
pub const DEPENDENCY_SIGNATURES: &[DependencySignature] = &[
    // npm - Percy
    dep("@percy/cypress", Ecosystem::Npm, Platform::Percy, Some(Framework::Cypress), Language::JsTs),
    dep("@percy/playwright", Ecosystem::Npm, Platform::Percy, Some(Framework::Playwright), Language::JsTs),
    dep("@percy/selenium-webdriver", Ecosystem::Npm, Platform::Percy, Some(Framework::Selenium), Language::JsTs),
    dep("@percy/storybook", Ecosystem::Npm, Platform::Percy, Some(Framework::Storybook), Language::JsTs),
    dep("@percy/appium-app", Ecosystem::Npm, Platform::Percy, Some(Framework::Appium), Language::JsTs),
    // npm - Applitools
    dep("@applitools/eyes-cypress", Ecosystem::Npm, Platform::Applitools, Some(Framework::Cypress), Language::JsTs),
    dep("@applitools/eyes-playwright", Ecosystem::Npm, Platform::Applitools, Some(Framework::Playwright), Language::JsTs),
    dep("@applitools/eyes-selenium", Ecosystem::Npm, Platform::Applitools, Some(Framework::Selenium), Language::JsTs),
    dep("@applitools/eyes-storybook", Ecosystem::Npm, Platform::Applitools, Some(Framework::Storybook), Language::JsTs),
    // npm - Sauce Labs Visual
    dep("@saucelabs/cypress-visual-plugin", Ecosystem::Npm, Platform::SauceLabsVisual, Some(Framework::Cypress), Language::JsTs),
    dep("@saucelabs/visual-playwright", Ecosystem::Npm, Platform::SauceLabsVisual, Some(Framework::Playwright), Language::JsTs),
    dep("@saucelabs/visual-storybook", Ecosystem::Npm, Platform::SauceLabsVisual, Some(Framework::Storybook), Language::JsTs),
    // The base client doesn't pin a framework; the classifier decides.
    dep("@saucelabs/visual", Ecosystem::Npm, Platform::SauceLabsVisual, None, Language::JsTs),
    // maven
    dep("io.percy:percy-java-selenium", Ecosystem::Maven, Platform::Percy, Some(Framework::Selenium), Language::Java),
    dep("io.percy:percy-appium-app", Ecosystem::Maven, Platform::Percy, Some(Framework::Appium), Language::Java),
    dep("com.applitools:eyes-selenium-java5", Ecosystem::Maven, Platform::Applitools, Some(Framework::Selenium), Language::Java),
    dep("com.applitools:eyes-appium-java5", Ecosystem::Maven, Platform::Applitools, Some(Framework::Appium), Language::Java),
    dep("com.saucelabs.visual:java-client", Ecosystem::Maven, Platform::SauceLabsVisual, Some(Framework::Selenium), Language::Java),
    // pip
    dep("percy-selenium", Ecosystem::Pip, Platform::Percy, Some(Framework::Selenium), Language::Python),
    dep("percy-playwright", Ecosystem::Pip, Platform::Percy, Some(Framework::Playwright), Language::Python),
    dep("percy-appium-app", Ecosystem::Pip, Platform::Percy, Some(Framework::Appium), Language::Python),
    dep("eyes-selenium", Ecosystem::Pip, Platform::Applitools, Some(Framework::Selenium), Language::Python),
    dep("eyes-playwright", Ecosystem::Pip, Platform::Applitools, Some(Framework::Playwright), Language::Python),
    dep("eyes-robotframework", Ecosystem::Pip, Platform::Applitools, Some(Framework::RobotFramework), Language::Python),
    dep("saucelabs-visual", Ecosystem::Pip, Platform::SauceLabsVisual, None, Language::Python),
];

/// Shorthand constructor keeping the table readable.
const fn dep(
    name: &'static str,
    ecosystem: Ecosystem,
    platform: Platform,
    framework: Option<Framework>,
    language: Language,
) -> DependencySignature {
    DependencySignature {
        name,
        ecosystem,
        platform,
        framework,
        language,
    }
}

/// Looks up a dependency identifier within one ecosystem.
///
/// Pip names are PEP 503 normalized before comparison, so
/// `SauceLabs_Visual` matches the `saucelabs-visual` signature.
#[must_use]
pub fn lookup_dependency(ecosystem: Ecosystem, name: &str) -> Option<&'static DependencySignature> {
    let normalized;
    let candidate = if matches!(ecosystem, Ecosystem::Pip) {
        normalized = normalize_pip_name(name);
        normalized.as_str()
    } else {
        name
    };

    DEPENDENCY_SIGNATURES
        .iter()
        .find(|sig| sig.ecosystem == ecosystem && sig.name == candidate)
}

/// Normalizes a pip package name per PEP 503 (lowercase, runs of
/// `-`/`_`/`.` collapse to a single hyphen).
#[must_use]
pub fn normalize_pip_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_sep = false;
    for ch in name.chars() {
        if matches!(ch, '-' | '_' | '.') {
            if !last_was_sep {
                out.push('-');
            }
            last_was_sep = true;
        } else {
            out.extend(ch.to_lowercase());
            last_was_sep = false;
        }
    }
    out
}

/// Well-known configuration filenames per platform.
///
/// Entries are relative-path suffixes: most are bare filenames, but nested
/// locations like `.sauce/config.yml` are matched against the tail of the
/// relative path.
pub const CONFIG_FILES: &[(&str, Platform)] = &[
    (".percy.yml", Platform::Percy),
    (".percy.yaml", Platform::Percy),
    (".percy.json", Platform::Percy),
    (".percy.js", Platform::Percy),
    ("percy.config.js", Platform::Percy),
    ("applitools.config.js", Platform::Applitools),
    ("eyes.config.js", Platform::Applitools),
    ("saucectl.yml", Platform::SauceLabsVisual),
    (".sauce/config.yml", Platform::SauceLabsVisual),
];

/// Returns the platform a configuration file path belongs to, if any.
#[must_use]
pub fn config_file_platform(relative: &Utf8Path) -> Option<Platform> {
    let as_str = relative.as_str();
    CONFIG_FILES.iter().find_map(|(suffix, platform)| {
        let matches = if suffix.contains('/') {
            as_str == *suffix || as_str.ends_with(&format!("/{suffix}"))
        } else {
            relative.file_name() == Some(suffix)
        };
        matches.then_some(*platform)
    })
}

/// Narrow magic strings: snapshot/check call names that only appear in
/// source actively using the platform's API.
#[must_use]
pub const fn magic_strings(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Percy => &[
            "percySnapshot",
            "percy_snapshot",
            "percyScreenshot",
            "percy_screenshot",
        ],
        Platform::Applitools => &[
            "eyes.open",
            "eyes.check",
            "eyes.close",
            "eyesOpen",
            "eyesCheckWindow",
            "Eyes Open",
            "Eyes Check",
        ],
        Platform::SauceLabsVisual => &[
            "sauceVisualCheck",
            "sauceVisualSnapshot",
            "visual.snapshot",
            "VisualApi",
        ],
        Platform::Unknown => &[],
    }
}

/// Wide magic strings: import/module names that indicate the platform is
/// referenced but not necessarily which framework drives it.
///
/// Used as the broader fallback when an anchor has a platform but no
/// framework/language. Mixing the narrow and wide sets trades precision
/// for recall in large polyglot repositories; that tradeoff is deliberate.
#[must_use]
pub const fn wide_magic_strings(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Percy => &["@percy/", "percy-", "io.percy"],
        Platform::Applitools => &["@applitools/", "applitools", "com.applitools"],
        Platform::SauceLabsVisual => &["@saucelabs/", "saucelabs", "com.saucelabs"],
        Platform::Unknown => &[],
    }
}

/// A weighted framework signature pattern.
///
/// Patterns are regular expressions; every occurrence in a file adds the
/// weight to the framework's cumulative score, so repeated matches
/// accumulate rather than count once.
#[derive(Debug, Clone, Copy)]
pub struct FrameworkPattern {
    /// The framework this pattern is evidence for.
    pub framework: Framework,

    /// The regular expression to count occurrences of.
    pub pattern: &'static str,

    /// Score added per occurrence. Distinctive API shapes carry high
    /// weights; generic test-runner idioms carry low ones.
    pub weight: f64,
}

/// The framework scoring table, iterated uniformly in declaration order.
///
/// On an exact score tie the framework declared first in this table wins;
/// that rule is deliberate and deterministic, not an iteration accident.
pub const FRAMEWORK_PATTERNS: &[FrameworkPattern] = &[
    // Cypress
    pat(Framework::Cypress, r"cy\.[a-zA-Z]+\(", 0.9),
    pat(Framework::Cypress, r"Cypress\.", 0.8),
    pat(Framework::Cypress, r"\bdescribe\(", 0.3),
    pat(Framework::Cypress, r"\bit\(", 0.3),
    // Playwright
    pat(Framework::Playwright, r"page\.[a-zA-Z]+\(", 0.9),
    pat(Framework::Playwright, r"(?i)playwright", 0.6),
    pat(Framework::Playwright, r"\btest\(", 0.3),
    pat(Framework::Playwright, r"\bexpect\(", 0.2),
    // Selenium
    pat(Framework::Selenium, r"\bWebDriver\b", 0.8),
    pat(Framework::Selenium, r"findElement", 0.8),
    pat(Framework::Selenium, r"find_element", 0.8),
    pat(Framework::Selenium, r"driver\.[a-zA-Z_]+\(", 0.7),
    pat(Framework::Selenium, r"(?i)webdriver", 0.5),
    // Storybook
    pat(Framework::Storybook, r"storiesOf\(", 0.9),
    pat(Framework::Storybook, r"@storybook/", 0.9),
    pat(Framework::Storybook, r"\.stories\.", 0.6),
    // Appium
    pat(Framework::Appium, r"AppiumDriver", 0.9),
    pat(Framework::Appium, r"AppiumBy", 0.8),
    pat(Framework::Appium, r"MobileElement", 0.8),
    pat(Framework::Appium, r"(?i)appium", 0.6),
    // Robot Framework
    pat(Framework::RobotFramework, r"\*\*\* Test Cases \*\*\*", 1.0),
    pat(Framework::RobotFramework, r"\*\*\* Settings \*\*\*", 0.9),
    pat(Framework::RobotFramework, r"(?i)robot ?framework", 0.6),
];

/// Shorthand constructor keeping the table readable.
const fn pat(framework: Framework, pattern: &'static str, weight: f64) -> FrameworkPattern {
    FrameworkPattern {
        framework,
        pattern,
        weight,
    }
}

/// Returns `true` if a relative path is a recognized CI/CD pipeline file.
///
/// Covers GitHub Actions, GitLab CI, Jenkins, Azure Pipelines, CircleCI,
/// and Bitbucket Pipelines.
#[must_use]
pub fn is_ci_file(relative: &Utf8Path) -> bool {
    let as_str = relative.as_str();

    // GitHub Actions: any YAML under .github/workflows/
    if as_str.contains(".github/workflows/")
        && relative
            .extension()
            .is_some_and(|ext| ext == "yml" || ext == "yaml")
    {
        return true;
    }

    // CircleCI keeps its config nested
    if as_str == ".circleci/config.yml" || as_str.ends_with("/.circleci/config.yml") {
        return true;
    }

    matches!(
        relative.file_name(),
        Some(".gitlab-ci.yml" | "Jenkinsfile" | "azure-pipelines.yml" | "bitbucket-pipelines.yml")
    )
}
