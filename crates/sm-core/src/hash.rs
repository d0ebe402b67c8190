//! Fast hash set type alias.
//!
//! Wraps [`FxHashSet`] from the `rustc-hash` crate. The Fx hash algorithm
//! is roughly 2x faster than the standard library's default hasher for the
//! string keys this codebase uses, and denial-of-service resistance is not
//! needed for internal tables.
//!
//! # Examples
//!
//! ```
//! use sm_core::{FxHashSet, fx_hash_set};
//!
//! let mut skip: FxHashSet<String> = fx_hash_set();
//! skip.insert("vendor".to_owned());
//! assert!(skip.contains("vendor"));
//! ```

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;

/// Creates a new empty [`FxHashSet`].
///
/// Equivalent to `FxHashSet::default()` but more ergonomic where type
/// inference needs a nudge.
#[inline]
#[must_use]
pub fn fx_hash_set<V>() -> FxHashSet<V> {
    FxHashSet::default()
}
