//! Domain types for the smartui-migrate tool.
//!
//! This module contains the core domain types used throughout the
//! application for representing platforms, frameworks, anchors, and
//! detection results.
//!
//! # Module Organization
//!
//! - [`platform`] - Visual-testing platform identification
//! - [`framework`] - Test framework, language, and test type
//! - [`anchor`] - First-phase anchor evidence
//! - [`detection`] - Final detection results and file buckets
//!
//! # Re-exports
//!
//! All public types are re-exported at this module level for convenience:
//!
//! ```
//! use sm_core::types::{Anchor, DetectionResult, Framework, Platform};
//! ```
//!
//! They are also re-exported at the crate root:
//!
//! ```
//! use sm_core::{Anchor, DetectionResult, Framework, Platform};
//! ```

mod anchor;
mod detection;
mod framework;
mod platform;

// Re-export all public types
pub use anchor::{Anchor, AnchorSource, Ecosystem};
pub use detection::{DetectedFiles, DetectionResult};
pub use framework::{Framework, Language, TestType};
pub use platform::Platform;
