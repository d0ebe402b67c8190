//! Content search, the second phase of detection.
//!
//! Walks candidate source files and tests literal substring containment of
//! the active magic-string set. File reads run in parallel over the
//! collected paths; matched files keep their contents so the classifier
//! can score them without a second read.

use std::fs;

use camino::Utf8PathBuf;
use parking_lot::Mutex;
use rayon::prelude::*;
use sm_core::Platform;
use sm_core::signatures::{magic_strings, wide_magic_strings};
use tracing::{debug, trace};

use crate::error::DetectError;
use crate::stats::ScanStats;
use crate::walker::FileWalker;

/// A source file that contained at least one magic string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// Path relative to the scan root.
    pub path: Utf8PathBuf,

    /// The file's full contents, retained for classifier scoring.
    pub contents: String,
}

/// Returns the cold-scan vocabulary: every known platform's narrow and
/// wide strings combined.
#[must_use]
pub fn cold_needles() -> Vec<&'static str> {
    let mut needles = Vec::new();
    for platform in Platform::ALL {
        needles.extend_from_slice(magic_strings(*platform));
        needles.extend_from_slice(wide_magic_strings(*platform));
    }
    needles
}

/// Searches all candidate source files for the given literal substrings.
///
/// Reads run in parallel; a file that fails to read is debug-logged,
/// counted in the stats, and skipped. Results come back sorted by path.
///
/// # Errors
///
/// Returns [`DetectError::Walk`] or [`DetectError::NonUtf8Path`] if the
/// traversal itself fails. Per-file read errors are never returned.
pub fn search_sources(
    walker: &FileWalker,
    needles: &[&str],
    stats: &ScanStats,
) -> Result<Vec<SearchMatch>, DetectError> {
    let paths = walker.collect_sources()?;
    debug!(
        candidates = paths.len(),
        needles = needles.len(),
        "Starting content search"
    );

    let read_errors: Mutex<Vec<DetectError>> = Mutex::new(Vec::new());

    let mut matches: Vec<SearchMatch> = paths
        .into_par_iter()
        .filter_map(|relative| {
            let absolute = walker.root().join(&relative);
            let contents = match fs::read_to_string(absolute.as_std_path()) {
                Ok(contents) => contents,
                Err(e) => {
                    stats.increment_read_errors();
                    read_errors.lock().push(DetectError::read(relative, e));
                    return None;
                }
            };

            stats.increment_scanned();

            if needles.iter().any(|needle| contents.contains(needle)) {
                stats.increment_matched();
                trace!(path = %relative, "Magic string match");
                Some(SearchMatch {
                    path: relative,
                    contents,
                })
            } else {
                None
            }
        })
        .collect();

    for err in read_errors.into_inner() {
        debug!(error = %err, "Skipped unreadable file");
    }

    // Parallel collection order is nondeterministic
    matches.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(matches)
}
