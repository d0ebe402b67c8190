//! Configuration-file locator, the secondary anchor source.
//!
//! When no package manifest yields a platform, well-known configuration
//! files (`.percy.yml`, `applitools.config.js`, `saucectl.yml`, ...) can
//! still pin one down. Config-file anchors carry no framework or language
//! hint, so they always lead to the widened search.

use camino::Utf8PathBuf;
use sm_core::signatures::config_file_platform;
use sm_core::{Anchor, AnchorSource, Platform};
use tracing::debug;

use crate::error::DetectError;
use crate::walker::FileWalker;

/// Scans the tree for well-known platform configuration files.
///
/// Returns `Ok(None)` when no recognized config file exists. When several
/// config files agree on one platform the first (in sorted path order)
/// supplies the anchor.
///
/// # Errors
///
/// Returns [`DetectError::MultiplePlatforms`] if config files of more than
/// one distinct platform are present, and walk errors as-is.
pub fn locate_config_anchor(walker: &FileWalker) -> Result<Option<Anchor>, DetectError> {
    let files = walker.collect_matching(|path| config_file_platform(path).is_some())?;
    anchor_from_config_files(&files)
}

fn anchor_from_config_files(files: &[Utf8PathBuf]) -> Result<Option<Anchor>, DetectError> {
    let mut platforms: Vec<Platform> = Vec::new();
    for file in files {
        if let Some(platform) = config_file_platform(file) {
            if !platforms.contains(&platform) {
                platforms.push(platform);
            }
        }
    }

    match platforms.as_slice() {
        [] => Ok(None),
        [platform] => {
            debug!(platform = %platform, files = files.len(), "Config-file anchor found");
            Ok(Some(Anchor::new(*platform, AnchorSource::ConfigFile)))
        }
        _ => {
            debug!(?platforms, "Conflicting platform config files");
            Err(DetectError::multiple_platforms(platforms))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<Utf8PathBuf> {
        names.iter().map(Utf8PathBuf::from).collect()
    }

    #[test]
    fn test_no_config_files() {
        assert!(anchor_from_config_files(&[]).unwrap().is_none());
    }

    #[test]
    fn test_single_platform_config() {
        let anchor = anchor_from_config_files(&paths(&[".percy.yml"]))
            .unwrap()
            .unwrap();
        assert_eq!(anchor.platform, Platform::Percy);
        assert_eq!(anchor.source, AnchorSource::ConfigFile);
        assert!(!anchor.is_complete());
    }

    #[test]
    fn test_multiple_files_same_platform() {
        let anchor = anchor_from_config_files(&paths(&[".percy.yml", "percy.config.js"]))
            .unwrap()
            .unwrap();
        assert_eq!(anchor.platform, Platform::Percy);
    }

    #[test]
    fn test_conflicting_platform_configs() {
        let err = anchor_from_config_files(&paths(&[".percy.yml", "saucectl.yml"])).unwrap_err();
        assert!(matches!(err, DetectError::MultiplePlatforms { .. }));
    }

    #[test]
    fn test_nested_config_file() {
        let anchor = anchor_from_config_files(&paths(&[".sauce/config.yml"]))
            .unwrap()
            .unwrap();
        assert_eq!(anchor.platform, Platform::SauceLabsVisual);
    }
}
