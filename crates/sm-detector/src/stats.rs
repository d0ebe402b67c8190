//! Scan statistics with atomic counters.
//!
//! This module provides [`ScanStats`] for tracking detection progress and
//! [`StatsSnapshot`] for point-in-time statistics views.
//!
//! # Thread Safety
//!
//! All counters use [`AtomicU64`] with [`Relaxed`](Ordering::Relaxed)
//! ordering. Statistics are informational and don't require strict
//! ordering guarantees, even while rayon workers increment them.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Atomic counters for detection statistics.
///
/// # Examples
///
/// ```
/// use sm_detector::ScanStats;
///
/// let stats = ScanStats::new();
/// stats.increment_scanned();
/// stats.increment_matched();
///
/// let snap = stats.snapshot();
/// assert_eq!(snap.scanned, 1);
/// assert_eq!(snap.matched, 1);
/// ```
#[derive(Debug, Default)]
pub struct ScanStats {
    /// Number of source files whose contents were scanned.
    scanned: AtomicU64,
    /// Number of source files that matched at least one magic string.
    matched: AtomicU64,
    /// Number of manifests successfully parsed.
    manifests: AtomicU64,
    /// Number of files that failed to read.
    read_errors: AtomicU64,
}

impl ScanStats {
    /// Creates a new [`ScanStats`] with all counters at zero.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the scanned-files counter.
    #[inline]
    pub fn increment_scanned(&self) {
        self.scanned.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the matched-files counter.
    #[inline]
    pub fn increment_matched(&self) {
        self.matched.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the parsed-manifests counter.
    #[inline]
    pub fn increment_manifests(&self) {
        self.manifests.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the read-error counter.
    #[inline]
    pub fn increment_read_errors(&self) {
        self.read_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a point-in-time snapshot of all statistics.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            scanned: self.scanned.load(Ordering::Relaxed),
            matched: self.matched.load(Ordering::Relaxed),
            manifests: self.manifests.load(Ordering::Relaxed),
            read_errors: self.read_errors.load(Ordering::Relaxed),
        }
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        self.scanned.store(0, Ordering::Relaxed);
        self.matched.store(0, Ordering::Relaxed);
        self.manifests.store(0, Ordering::Relaxed);
        self.read_errors.store(0, Ordering::Relaxed);
    }
}

/// A point-in-time snapshot of detection statistics.
///
/// Contains copied values from [`ScanStats`] and is safe to store,
/// serialize, and send between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Number of source files whose contents were scanned.
    pub scanned: u64,
    /// Number of source files that matched at least one magic string.
    pub matched: u64,
    /// Number of manifests successfully parsed.
    pub manifests: u64,
    /// Number of files that failed to read.
    pub read_errors: u64,
}

impl StatsSnapshot {
    /// Returns the share of scanned files that matched, as a percentage.
    ///
    /// Returns 0.0 when nothing was scanned.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Acceptable for statistics display
    pub fn match_rate(&self) -> f64 {
        if self.scanned == 0 {
            return 0.0;
        }
        (self.matched as f64 / self.scanned as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_stats_new() {
        let snap = ScanStats::new().snapshot();
        assert_eq!(snap.scanned, 0);
        assert_eq!(snap.matched, 0);
        assert_eq!(snap.manifests, 0);
        assert_eq!(snap.read_errors, 0);
    }

    #[test]
    fn test_scan_stats_increment() {
        let stats = ScanStats::new();
        stats.increment_scanned();
        stats.increment_scanned();
        stats.increment_matched();
        stats.increment_manifests();
        stats.increment_read_errors();

        let snap = stats.snapshot();
        assert_eq!(snap.scanned, 2);
        assert_eq!(snap.matched, 1);
        assert_eq!(snap.manifests, 1);
        assert_eq!(snap.read_errors, 1);
    }

    #[test]
    fn test_scan_stats_reset() {
        let stats = ScanStats::new();
        stats.increment_scanned();
        stats.reset();
        assert_eq!(stats.snapshot().scanned, 0);
    }

    #[test]
    fn test_match_rate() {
        let snap = StatsSnapshot::default();
        assert!((snap.match_rate() - 0.0).abs() < f64::EPSILON);

        let snap = StatsSnapshot {
            scanned: 10,
            matched: 5,
            ..Default::default()
        };
        assert!((snap.match_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snapshot_serialization() {
        let snap = StatsSnapshot {
            scanned: 4,
            matched: 2,
            manifests: 1,
            read_errors: 0,
        };
        let json = serde_json::to_string(&snap).unwrap();
        let parsed: StatsSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, parsed);
    }
}
