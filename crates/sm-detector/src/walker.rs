//! Directory traversal for project trees.
//!
//! This module provides [`FileWalker`], which uses the `ignore` crate to
//! efficiently walk directories while respecting `.gitignore` patterns.
//!
//! # Features
//!
//! - Respects `.gitignore` and `.ignore` patterns
//! - Skips noise directories (dependency installs, VCS metadata, build
//!   output, coverage output)
//! - Converts paths to UTF-8 [`Utf8PathBuf`](camino::Utf8PathBuf),
//!   returned relative to the walk root
//!
//! # Examples
//!
//! ```ignore
//! use sm_detector::FileWalker;
//! use camino::Utf8Path;
//!
//! let walker = FileWalker::new(Utf8Path::new("/path/to/project"))?;
//! let sources = walker.collect_sources()?;
//!
//! for path in &sources {
//!     println!("Found: {path}");
//! }
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;
use sm_core::signatures::{SKIP_DIRECTORIES, SOURCE_EXTENSIONS};
use sm_core::{FxHashSet, fx_hash_set};

use crate::error::DetectError;

/// A file walker that discovers candidate files in a project tree.
///
/// Uses the `ignore` crate for efficient traversal with gitignore support.
/// All paths are returned relative to the walk root so results are stable
/// regardless of where the project lives on disk.
///
/// # Design
///
/// The walker uses a "collect-then-parallelize" pattern:
/// 1. Walker collects all paths first (single-threaded, I/O bound)
/// 2. File contents are then processed in parallel with rayon
///
/// This approach is memory-bounded and works well for large project trees.
#[derive(Debug)]
pub struct FileWalker {
    /// The root directory to walk.
    root: Utf8PathBuf,
    /// Additional directories to skip (beyond the standard noise list).
    skip_dirs: FxHashSet<String>,
    /// File extensions treated as source files.
    source_extensions: Vec<String>,
    /// Whether to follow symbolic links.
    follow_links: bool,
}

impl FileWalker {
    /// Creates a new file walker for the given root directory.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::Config`] if the root path doesn't exist or
    /// isn't a directory.
    pub fn new(root: &Utf8Path) -> Result<Self, DetectError> {
        if !root.exists() {
            return Err(DetectError::config(format!(
                "root path does not exist: {root}"
            )));
        }
        if !root.is_dir() {
            return Err(DetectError::config(format!(
                "root path is not a directory: {root}"
            )));
        }

        Ok(Self {
            root: root.to_owned(),
            skip_dirs: fx_hash_set(),
            source_extensions: SOURCE_EXTENSIONS.iter().map(ToString::to_string).collect(),
            follow_links: false,
        })
    }

    /// Adds directories to skip during traversal.
    ///
    /// These are in addition to the default noise list (`node_modules`,
    /// `.git`, `dist`, etc.).
    #[must_use]
    pub fn with_skip_dirs(mut self, dirs: &[&str]) -> Self {
        self.skip_dirs.extend(dirs.iter().map(ToString::to_string));
        self
    }

    /// Replaces the source extension list.
    ///
    /// Defaults to the built-in list (`.js .ts .jsx .tsx .py .java
    /// .robot`); an empty replacement is ignored so a scan always has
    /// candidate files.
    #[must_use]
    pub fn with_source_extensions(mut self, extensions: &[String]) -> Self {
        if !extensions.is_empty() {
            self.source_extensions = extensions.to_vec();
        }
        self
    }

    /// Configures whether to follow symbolic links.
    ///
    /// By default, symbolic links are not followed.
    #[must_use]
    pub const fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Collects all candidate source files in the tree, matched by the
    /// configured extension list.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::Walk`] if directory traversal fails.
    /// Returns [`DetectError::NonUtf8Path`] if a non-UTF-8 path is
    /// encountered.
    pub fn collect_sources(&self) -> Result<Vec<Utf8PathBuf>, DetectError> {
        self.collect_matching(|path| {
            path.extension()
                .is_some_and(|ext| self.source_extensions.iter().any(|e| e == ext))
        })
    }

    /// Collects all file paths for which `filter` returns `true`.
    ///
    /// The filter receives paths relative to the walk root, so filename
    /// and suffix predicates behave identically wherever the project
    /// lives. Noise directories never reach the filter.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::Walk`] if directory traversal fails.
    /// Returns [`DetectError::NonUtf8Path`] if a non-UTF-8 path is
    /// encountered.
    pub fn collect_matching(
        &self,
        filter: impl Fn(&Utf8Path) -> bool,
    ) -> Result<Vec<Utf8PathBuf>, DetectError> {
        let mut paths = Vec::new();
        let walker = self.build_walker();

        for result in walker {
            let entry = result?;

            // Skip directories and non-files
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();

            // Convert to UTF-8 path
            let utf8_path = Utf8Path::from_path(path)
                .ok_or_else(|| DetectError::NonUtf8Path(path.to_owned()))?;

            // Make relative to the root for stable matching
            let relative = utf8_path.strip_prefix(&self.root).unwrap_or(utf8_path);

            // Skip files in excluded directories
            if self.should_skip_path(relative) {
                continue;
            }

            if !filter(relative) {
                continue;
            }

            paths.push(relative.to_owned());
        }

        // Stable ordering regardless of filesystem iteration order
        paths.sort();
        Ok(paths)
    }

    /// Builds the ignore walker with configured settings.
    fn build_walker(&self) -> ignore::Walk {
        WalkBuilder::new(&self.root)
            // Keep .gitignore/.ignore support but allow dotfiles: CI
            // configs like .gitlab-ci.yml and .percy.yml are hidden files
            .standard_filters(false)
            .git_ignore(true)
            .ignore(true)
            // Don't follow links by default
            .follow_links(self.follow_links)
            // Use a single thread for walking (we parallelize later)
            .threads(1)
            // Don't require the root to be a git repo
            .require_git(false)
            .build()
    }

    /// Checks if a path should be skipped based on directory name.
    fn should_skip_path(&self, path: &Utf8Path) -> bool {
        for component in path.components() {
            let component_str = component.as_str();

            // Never treat the filename itself as a directory
            if Some(component_str) == path.file_name() {
                continue;
            }

            if SKIP_DIRECTORIES.contains(&component_str) {
                return true;
            }

            if self.skip_dirs.contains(component_str) {
                return true;
            }
        }

        false
    }

    /// Returns the root directory being walked.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}
