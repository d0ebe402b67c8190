//! Anchor resolution, the first phase of detection.
//!
//! Evidence is gathered in strict precedence order: package manifests
//! across all three ecosystems first, well-known configuration files
//! second. Dependency evidence is authoritative because a project cannot
//! call an SDK it doesn't depend on; config files can linger after a
//! half-finished migration.

use sm_core::signatures::{magic_strings, wide_magic_strings};
use sm_core::{Anchor, Ecosystem, Platform};
use tracing::debug;

use crate::error::DetectError;
use crate::manifest;
use crate::stats::ScanStats;
use crate::walker::FileWalker;

/// Resolves the anchor for a project, or `None` when no evidence exists
/// and the cold scan must take over.
///
/// All three manifests are always read, even after the first hit: a
/// polyglot repository with Percy in `package.json` and Applitools in
/// `pom.xml` is a conflict the user must resolve, not a coin flip.
///
/// # Errors
///
/// Returns [`DetectError::MultiplePlatforms`] on any platform conflict,
/// within one manifest or across ecosystems, and walk errors from the
/// config-file sweep.
pub fn resolve_anchor(
    walker: &FileWalker,
    stats: &ScanStats,
) -> Result<Option<Anchor>, DetectError> {
    let mut found: Vec<Anchor> = Vec::new();
    let mut platforms: Vec<Platform> = Vec::new();

    for ecosystem in [Ecosystem::Npm, Ecosystem::Maven, Ecosystem::Pip] {
        if let Some(anchor) = manifest::read_ecosystem(walker.root(), ecosystem)? {
            stats.increment_manifests();
            if !platforms.contains(&anchor.platform) {
                platforms.push(anchor.platform);
            }
            found.push(anchor);
        }
    }

    if platforms.len() > 1 {
        debug!(?platforms, "Conflicting platforms across manifests");
        return Err(DetectError::multiple_platforms(platforms));
    }

    // Dependency anchor wins outright; the first manifest that carried a
    // framework is the most specific evidence available.
    if !found.is_empty() {
        let anchor = found
            .iter()
            .find(|a| a.framework.is_some())
            .or_else(|| found.first())
            .cloned();
        if let Some(anchor) = anchor {
            return Ok(Some(attach_magic_strings(anchor)));
        }
    }

    // Fall back to well-known configuration files.
    match crate::locator::locate_config_anchor(walker)? {
        Some(anchor) => Ok(Some(attach_magic_strings(anchor))),
        None => {
            debug!("No anchor evidence; cold scan required");
            Ok(None)
        }
    }
}

/// Attaches the search vocabulary an anchor's completeness calls for.
///
/// A complete anchor only needs the narrow API-call strings to confirm
/// usage sites. An incomplete one also gets the wide import-style strings
/// so the classifier sees every file that references the platform at all.
fn attach_magic_strings(anchor: Anchor) -> Anchor {
    let narrow = magic_strings(anchor.platform);
    if anchor.is_complete() {
        anchor.with_magic_strings(narrow)
    } else {
        let wide = wide_magic_strings(anchor.platform);
        anchor.with_magic_strings(narrow).with_magic_strings(wide)
    }
}
