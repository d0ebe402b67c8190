//! Framework, language, and cold-mode platform classification.
//!
//! The classifier turns matched file contents into the remaining pieces of
//! the detection triple. Framework scoring is weighted and cumulative;
//! language comes from file extensions; cold-mode platform identification
//! counts raw magic-string occurrences.

use std::sync::LazyLock;

use regex::Regex;
use sm_core::signatures::{FRAMEWORK_PATTERNS, magic_strings, wide_magic_strings};
use sm_core::{Framework, Language, Platform};
use tracing::{debug, warn};

use crate::error::DetectError;
use crate::search::SearchMatch;

/// The pattern table with its regexes compiled once per process.
///
/// Patterns are authored as literals in a static table and verified by
/// tests, so a failed compile here is a programming error; a broken entry
/// is dropped with a warning rather than poisoning every scan.
static COMPILED_PATTERNS: LazyLock<Vec<(Framework, Regex, f64)>> = LazyLock::new(|| {
    FRAMEWORK_PATTERNS
        .iter()
        .filter_map(|p| match Regex::new(p.pattern) {
            Ok(re) => Some((p.framework, re, p.weight)),
            Err(e) => {
                warn!(pattern = p.pattern, error = %e, "Invalid framework pattern");
                None
            }
        })
        .collect()
});

/// Scores every framework against the matched files and returns the
/// winner.
///
/// Each regex occurrence adds its weight, so a file with five `cy.visit(`
/// calls contributes five times the Cypress weight. The strictly-highest
/// score wins; ties go to the framework declared first in
/// [`Framework::ALL`]. When nothing scores at all, Selenium is the
/// default: it is the broadest framework and the safest target for a
/// migration preview.
#[must_use]
pub fn classify_framework(matches: &[SearchMatch]) -> Framework {
    let mut scores = [0.0_f64; Framework::ALL.len()];

    for m in matches {
        for (framework, regex, weight) in COMPILED_PATTERNS.iter() {
            let occurrences = regex.find_iter(&m.contents).count();
            if occurrences > 0 {
                let idx = framework_index(*framework);
                scores[idx] += weight * occurrences as f64;
            }
        }
    }

    let mut best = Framework::Selenium;
    let mut best_score = 0.0_f64;
    for (idx, framework) in Framework::ALL.iter().enumerate() {
        if scores[idx] > best_score {
            best = *framework;
            best_score = scores[idx];
        }
    }

    debug!(framework = %best, score = best_score, "Framework classified");
    best
}

/// Determines the language from matched file extensions.
///
/// Precedence is Java, then Python, then JS/TS: a polyglot repository
/// with any Java test files is treated as a Java project because Java
/// migrations have the most language-specific work.
#[must_use]
pub fn classify_language(matches: &[SearchMatch]) -> Language {
    let mut saw_python = false;
    for m in matches {
        match m.path.extension() {
            Some("java") => return Language::Java,
            Some("py" | "robot") => saw_python = true,
            _ => {}
        }
    }

    if saw_python {
        Language::Python
    } else {
        Language::JsTs
    }
}

/// Identifies the platform from cold-scan matches by counting raw
/// magic-string occurrences per platform.
///
/// Counts are unweighted; the highest total wins and ties go to the
/// platform declared first in [`Platform::ALL`].
///
/// # Errors
///
/// Returns [`DetectError::PlatformNotDetected`] when no platform's
/// strings occur at all.
pub fn classify_platform(matches: &[SearchMatch]) -> Result<Platform, DetectError> {
    let mut counts = [0_usize; Platform::ALL.len()];

    for (idx, platform) in Platform::ALL.iter().enumerate() {
        for needle in magic_strings(*platform)
            .iter()
            .chain(wide_magic_strings(*platform))
        {
            for m in matches {
                counts[idx] += m.contents.matches(needle).count();
            }
        }
    }

    let mut best: Option<Platform> = None;
    let mut best_count = 0_usize;
    for (idx, platform) in Platform::ALL.iter().enumerate() {
        if counts[idx] > best_count {
            best = Some(*platform);
            best_count = counts[idx];
        }
    }

    match best {
        Some(platform) => {
            debug!(platform = %platform, occurrences = best_count, "Cold-scan platform classified");
            Ok(platform)
        }
        None => Err(DetectError::PlatformNotDetected),
    }
}

/// Index of a framework within [`Framework::ALL`].
fn framework_index(framework: Framework) -> usize {
    Framework::ALL
        .iter()
        .position(|f| *f == framework)
        .unwrap_or(0)
}
