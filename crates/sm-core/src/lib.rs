//! Core types, signature tables, and errors for the smartui-migrate tool.
//!
//! This crate provides the foundational pieces used across the workspace:
//!
//! - Domain types ([`Platform`], [`Framework`], [`Language`], [`TestType`],
//!   [`Anchor`], [`DetectionResult`])
//! - Static signature tables ([`signatures`]): known dependencies, config
//!   filenames, magic strings, the weighted framework pattern table
//! - Configuration structures ([`Config`], [`ScanConfig`], [`ReportConfig`])
//! - Error types ([`ConfigError`])
//! - A `FxHashSet` type alias (faster than std for internal tables)

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod signatures;
pub mod types;

pub use config::{Config, ReportConfig, ReportFormat, ScanConfig};
pub use error::ConfigError;
pub use hash::{FxHashSet, fx_hash_set};
pub use types::{
    Anchor, AnchorSource, DetectedFiles, DetectionResult, Ecosystem, Framework, Language,
    Platform, TestType,
};
