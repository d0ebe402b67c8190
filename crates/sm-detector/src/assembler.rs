//! Result assembly, the final phase of detection.
//!
//! Takes the confirmed platform, whatever framework/language information
//! the anchor carried, and the searcher's matches, then fills in the gaps
//! with the classifier and categorizes the four file buckets for the
//! downstream transformers.

use camino::Utf8Path;
use sm_core::signatures::{
    PACKAGE_MANIFESTS, config_file_platform, is_ci_file, magic_strings, wide_magic_strings,
};
use sm_core::{Anchor, DetectedFiles, DetectionResult, Platform};
use tracing::debug;

use crate::classifier;
use crate::error::DetectError;
use crate::search::SearchMatch;
use crate::walker::FileWalker;

/// Assembles the final result for an anchored scan.
///
/// Framework and language come from the anchor when it carried them and
/// from the classifier otherwise.
///
/// # Errors
///
/// Propagates walk errors from the categorization sweep.
pub fn assemble(
    walker: &FileWalker,
    anchor: &Anchor,
    matches: &[SearchMatch],
) -> Result<DetectionResult, DetectError> {
    let framework = match anchor.framework {
        Some(framework) => framework,
        None => classifier::classify_framework(matches),
    };
    let language = match anchor.language {
        Some(language) => language,
        None => classifier::classify_language(matches),
    };

    build_result(walker, anchor.platform, framework, language, matches)
}

/// Assembles the final result for a cold scan, classifying all three
/// fields from matched contents.
///
/// A cold search matches against every platform's vocabulary, so once the
/// classifier names the winner the matches are narrowed back to files
/// carrying that platform's strings; files that only matched a losing
/// platform must not land in the source bucket.
///
/// # Errors
///
/// Returns [`DetectError::PlatformNotDetected`] when the matches carry no
/// platform signal, and walk errors from the categorization sweep.
pub fn assemble_cold(
    walker: &FileWalker,
    matches: &[SearchMatch],
) -> Result<DetectionResult, DetectError> {
    let platform = classifier::classify_platform(matches)?;

    let needles: Vec<&'static str> = magic_strings(platform)
        .iter()
        .chain(wide_magic_strings(platform))
        .copied()
        .collect();
    let relevant: Vec<SearchMatch> = matches
        .iter()
        .filter(|m| needles.iter().any(|needle| m.contents.contains(needle)))
        .cloned()
        .collect();

    let framework = classifier::classify_framework(&relevant);
    let language = classifier::classify_language(&relevant);

    build_result(walker, platform, framework, language, &relevant)
}

fn build_result(
    walker: &FileWalker,
    platform: Platform,
    framework: sm_core::Framework,
    language: sm_core::Language,
    matches: &[SearchMatch],
) -> Result<DetectionResult, DetectError> {
    let files = categorize_files(walker, platform, matches)?;
    debug!(
        platform = %platform,
        framework = %framework,
        language = %language,
        files = files.total(),
        "Detection result assembled"
    );
    Ok(DetectionResult::new(platform, framework, language, files))
}

/// Categorizes the tree into the four transformer buckets.
///
/// Config files are restricted to the resolved platform: a stale config
/// from a different platform is not part of this migration. Source files
/// come straight from the searcher's matches.
fn categorize_files(
    walker: &FileWalker,
    platform: Platform,
    matches: &[SearchMatch],
) -> Result<DetectedFiles, DetectError> {
    let categorized = walker.collect_matching(|path| {
        config_file_platform(path) == Some(platform) || is_ci_file(path) || is_manifest(path)
    })?;

    let mut files = DetectedFiles {
        source: matches.iter().map(|m| m.path.clone()).collect(),
        ..DetectedFiles::default()
    };

    for path in categorized {
        if config_file_platform(&path) == Some(platform) {
            files.config.push(path);
        } else if is_ci_file(&path) {
            files.ci.push(path);
        } else {
            files.package_manager.push(path);
        }
    }

    Ok(files)
}

fn is_manifest(path: &Utf8Path) -> bool {
    path.file_name()
        .is_some_and(|name| PACKAGE_MANIFESTS.contains(&name))
}
