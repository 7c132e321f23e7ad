//! Memoization of inferred column types.
//!
//! The cache is an owned value: callers decide what a stable key is (a table
//! and column name, or a [`fingerprint`] of the sampled values) and how long
//! the cache lives.

use std::collections::HashMap;

use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use crate::types::ColumnType;

#[derive(Debug, Default)]
pub struct InferenceCache {
    entries: RwLock<HashMap<String, ColumnType>>,
}

impl InferenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached label for `key`, running `compute` on a miss.
    ///
    /// Hits only take the shared lock. A miss re-checks under the exclusive
    /// lock and computes while holding it, so `compute` runs at most once per
    /// key until the next [`clear`](Self::clear).
    ///
    /// `compute` must not call back into the same cache: the exclusive lock is
    /// not reentrant and such a call deadlocks.
    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> ColumnType
    where
        F: FnOnce() -> ColumnType,
    {
        if let Some(ty) = self.entries.read().get(key) {
            return *ty;
        }

        let mut entries = self.entries.write();
        if let Some(ty) = entries.get(key) {
            return *ty;
        }
        let ty = compute();
        entries.insert(key.to_string(), ty);
        ty
    }

    pub fn get(&self, key: &str) -> Option<ColumnType> {
        self.entries.read().get(key).copied()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// SHA-256 hex digest of a value sample, usable as a content-based cache key.
///
/// Each value is terminated with a separator byte so that `["ab"]` and
/// `["a", "b"]` hash differently.
pub fn fingerprint<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hasher = Sha256::new();
    for value in values {
        hasher.update(value.as_ref().as_bytes());
        hasher.update([0x1f]);
    }
    format!("{:x}", hasher.finalize())
}
