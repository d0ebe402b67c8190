//! Package manifest readers for the three supported ecosystems.
//!
//! This module implements the Dependency Reader: it parses `package.json`,
//! `pom.xml`, and `requirements.txt` at the project root into normalized
//! dependency lists and maps recognized identifiers to candidate
//! [`Anchor`]s.
//!
//! # Failure Tolerance
//!
//! A missing or malformed manifest is never fatal: it is debug-logged and
//! treated as "no evidence from this ecosystem". The one hard failure is
//! two distinct platforms inside the *same* manifest, which raises
//! [`DetectError::MultiplePlatforms`] immediately.

use std::fs;

use camino::Utf8Path;
use quick_xml::Reader;
use quick_xml::events::Event;
use sm_core::signatures::{DependencySignature, lookup_dependency};
use sm_core::{Anchor, AnchorSource, Ecosystem, Platform};
use tracing::{debug, trace};

use crate::error::DetectError;

/// Reads one ecosystem's manifest and resolves it to a candidate anchor.
///
/// Returns `Ok(None)` when the manifest is absent, unreadable, malformed,
/// or contains no recognized platform dependency.
///
/// # Errors
///
/// Returns [`DetectError::MultiplePlatforms`] if the manifest names
/// dependencies of more than one distinct platform.
pub fn read_ecosystem(
    root: &Utf8Path,
    ecosystem: Ecosystem,
) -> Result<Option<Anchor>, DetectError> {
    let path = root.join(ecosystem.manifest_name());

    let Some(names) = (match ecosystem {
        Ecosystem::Npm => read_package_json(&path),
        Ecosystem::Maven => read_pom_xml(&path),
        Ecosystem::Pip => read_requirements(&path),
    }) else {
        return Ok(None);
    };

    let matched: Vec<&'static DependencySignature> = names
        .iter()
        .filter_map(|name| lookup_dependency(ecosystem, name))
        .collect();

    anchor_from_signatures(ecosystem, &matched)
}

/// Collapses the recognized signatures of one manifest into an anchor.
///
/// Multiple matches for the *same* platform are fine (e.g. `@percy/cli`
/// style companion packages); the first match supplies the framework and
/// language. Two distinct platforms are a fatal conflict.
fn anchor_from_signatures(
    ecosystem: Ecosystem,
    matched: &[&'static DependencySignature],
) -> Result<Option<Anchor>, DetectError> {
    let Some(first) = matched.first() else {
        return Ok(None);
    };

    let mut platforms: Vec<Platform> = Vec::new();
    for sig in matched {
        if !platforms.contains(&sig.platform) {
            platforms.push(sig.platform);
        }
    }

    if platforms.len() > 1 {
        debug!(
            manifest = ecosystem.manifest_name(),
            ?platforms,
            "Conflicting platform dependencies in one manifest"
        );
        return Err(DetectError::multiple_platforms(platforms));
    }

    let mut anchor = Anchor::new(first.platform, AnchorSource::Dependency(ecosystem))
        .with_language(first.language);
    if let Some(framework) = first.framework {
        anchor = anchor.with_framework(framework);
    }

    debug!(
        manifest = ecosystem.manifest_name(),
        platform = %anchor.platform,
        framework = ?anchor.framework,
        "Dependency anchor found"
    );

    Ok(Some(anchor))
}

/// Extracts dependency names from `package.json`.
///
/// Both `dependencies` and `devDependencies` are read; visual-testing
/// SDKs routinely live in either section.
fn read_package_json(path: &Utf8Path) -> Option<Vec<String>> {
    let contents = read_manifest_file(path)?;

    let doc: serde_json::Value = match serde_json::from_str(&contents) {
        Ok(doc) => doc,
        Err(e) => {
            debug!(path = %path, error = %e, "Malformed package.json, skipping");
            return None;
        }
    };

    let mut names = Vec::new();
    for section in ["dependencies", "devDependencies"] {
        if let Some(deps) = doc.get(section).and_then(|v| v.as_object()) {
            names.extend(deps.keys().cloned());
        }
    }

    Some(names)
}

/// Extracts `groupId:artifactId` pairs from `pom.xml`.
///
/// Streams events rather than building a DOM; only `<dependency>` blocks
/// are inspected.
fn read_pom_xml(path: &Utf8Path) -> Option<Vec<String>> {
    let contents = read_manifest_file(path)?;

    let mut reader = Reader::from_str(&contents);
    reader.config_mut().trim_text(true);

    let mut names = Vec::new();
    let mut in_dependency = false;
    let mut current_tag: Option<Vec<u8>> = None;
    let mut group_id = String::new();
    let mut artifact_id = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = e.name().as_ref().to_vec();
                if name == b"dependency" {
                    in_dependency = true;
                    group_id.clear();
                    artifact_id.clear();
                } else if in_dependency {
                    current_tag = Some(name);
                }
            }
            Ok(Event::Text(ref t)) => {
                if in_dependency {
                    if let Ok(text) = t.unescape() {
                        match current_tag.as_deref() {
                            Some(b"groupId") => group_id = text.trim().to_owned(),
                            Some(b"artifactId") => artifact_id = text.trim().to_owned(),
                            _ => {}
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"dependency" {
                    in_dependency = false;
                    if !group_id.is_empty() && !artifact_id.is_empty() {
                        names.push(format!("{group_id}:{artifact_id}"));
                    }
                }
                current_tag = None;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(path = %path, error = %e, "Malformed pom.xml, skipping");
                return None;
            }
        }
    }

    Some(names)
}

/// Extracts package names from `requirements.txt`.
///
/// Version specifiers, extras, environment markers, and comment/option
/// lines are stripped; names are returned raw and normalized at lookup.
fn read_requirements(path: &Utf8Path) -> Option<Vec<String>> {
    let contents = read_manifest_file(path)?;

    let mut names = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
            continue;
        }

        // Cut at the first character that can't be part of a package name
        let end = line
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
            .unwrap_or(line.len());
        let name = &line[..end];
        if !name.is_empty() {
            names.push(name.to_owned());
        }
    }

    Some(names)
}

/// Reads a manifest file, treating absence or unreadability as no
/// evidence.
fn read_manifest_file(path: &Utf8Path) -> Option<String> {
    match fs::read_to_string(path.as_std_path()) {
        Ok(contents) => Some(contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            trace!(path = %path, "Manifest not present");
            None
        }
        Err(e) => {
            debug!(path = %path, error = %e, "Failed to read manifest, skipping");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sm_core::{Framework, Language};
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    fn root(dir: &TempDir) -> &Utf8Path {
        Utf8Path::from_path(dir.path()).unwrap()
    }

    #[test]
    fn test_package_json_single_platform() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "package.json",
            r#"{"dependencies": {"@percy/cypress": "^1.0.0", "lodash": "^4.0.0"}}"#,
        );

        let anchor = read_ecosystem(root(&dir), Ecosystem::Npm).unwrap().unwrap();
        assert_eq!(anchor.platform, Platform::Percy);
        assert_eq!(anchor.framework, Some(Framework::Cypress));
        assert_eq!(anchor.language, Some(Language::JsTs));
        assert!(anchor.is_dependency());
    }

    #[test]
    fn test_package_json_dev_dependencies() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "package.json",
            r#"{"devDependencies": {"@applitools/eyes-storybook": "3.0.0"}}"#,
        );

        let anchor = read_ecosystem(root(&dir), Ecosystem::Npm).unwrap().unwrap();
        assert_eq!(anchor.platform, Platform::Applitools);
        assert_eq!(anchor.framework, Some(Framework::Storybook));
    }

    #[test]
    fn test_package_json_conflicting_platforms() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "package.json",
            r#"{"dependencies": {"@percy/cypress": "1.0.0", "@applitools/eyes-cypress": "2.0.0"}}"#,
        );

        let err = read_ecosystem(root(&dir), Ecosystem::Npm).unwrap_err();
        assert!(matches!(err, DetectError::MultiplePlatforms { .. }));
    }

    #[test]
    fn test_package_json_same_platform_twice_is_fine() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "package.json",
            r#"{"dependencies": {"@percy/cypress": "1.0.0", "@percy/storybook": "4.0.0"}}"#,
        );

        let anchor = read_ecosystem(root(&dir), Ecosystem::Npm).unwrap().unwrap();
        assert_eq!(anchor.platform, Platform::Percy);
        // First match wins for framework
        assert_eq!(anchor.framework, Some(Framework::Cypress));
    }

    #[test]
    fn test_missing_manifest_is_no_evidence() {
        let dir = TempDir::new().unwrap();
        assert!(read_ecosystem(root(&dir), Ecosystem::Npm).unwrap().is_none());
    }

    #[test]
    fn test_malformed_package_json_is_no_evidence() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "package.json", "{not json");
        assert!(read_ecosystem(root(&dir), Ecosystem::Npm).unwrap().is_none());
    }

    #[test]
    fn test_pom_xml_dependency() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "pom.xml",
            r"<project>
  <dependencies>
    <dependency>
      <groupId>com.applitools</groupId>
      <artifactId>eyes-selenium-java5</artifactId>
      <version>5.60.0</version>
    </dependency>
    <dependency>
      <groupId>org.seleniumhq.selenium</groupId>
      <artifactId>selenium-java</artifactId>
    </dependency>
  </dependencies>
</project>",
        );

        let anchor = read_ecosystem(root(&dir), Ecosystem::Maven)
            .unwrap()
            .unwrap();
        assert_eq!(anchor.platform, Platform::Applitools);
        assert_eq!(anchor.framework, Some(Framework::Selenium));
        assert_eq!(anchor.language, Some(Language::Java));
    }

    #[test]
    fn test_requirements_txt() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "requirements.txt",
            "# visual testing\nrequests>=2.0\nsaucelabs_visual==0.5.0\n-r extra.txt\n",
        );

        let anchor = read_ecosystem(root(&dir), Ecosystem::Pip).unwrap().unwrap();
        assert_eq!(anchor.platform, Platform::SauceLabsVisual);
        // Base client pins no framework
        assert_eq!(anchor.framework, None);
        assert_eq!(anchor.language, Some(Language::Python));
    }

    #[test]
    fn test_requirements_txt_with_extras_marker() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "requirements.txt",
            "eyes-robotframework[selenium]>=6 ; python_version >= '3.8'\n",
        );

        let anchor = read_ecosystem(root(&dir), Ecosystem::Pip).unwrap().unwrap();
        assert_eq!(anchor.platform, Platform::Applitools);
        assert_eq!(anchor.framework, Some(Framework::RobotFramework));
    }

    #[test]
    fn test_unrecognized_dependencies_are_no_evidence() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "package.json",
            r#"{"dependencies": {"react": "18.0.0", "jest": "29.0.0"}}"#,
        );
        assert!(read_ecosystem(root(&dir), Ecosystem::Npm).unwrap().is_none());
    }
}
