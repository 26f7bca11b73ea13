use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

/// Write-once cache for a structural hash.
///
/// Zero means "not computed yet". Two threads may race to fill the cell; both
/// compute the same value from immutable fields, so the last store wins
/// harmlessly. The memo takes no part in equality or hashing of its owner.
#[derive(Debug, Default)]
pub struct HashMemo(AtomicU64);

impl HashMemo {
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Returns the cached hash, computing and storing it on first use.
    pub fn get_or_compute(&self, compute: impl FnOnce() -> u64) -> u64 {
        let cached = self.0.load(Ordering::Relaxed);
        if cached != 0 {
            return cached;
        }
        let value = match compute() {
            0 => 1,
            value => value,
        };
        self.0.store(value, Ordering::Relaxed);
        value
    }

    pub fn is_computed(&self) -> bool {
        self.0.load(Ordering::Relaxed) != 0
    }
}

impl Clone for HashMemo {
    fn clone(&self) -> Self {
        Self(AtomicU64::new(self.0.load(Ordering::Relaxed)))
    }
}

impl PartialEq for HashMemo {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl Eq for HashMemo {}

impl Hash for HashMemo {
    fn hash<H: Hasher>(&self, _: &mut H) {}
}

/// Deterministic hasher used for structural hashes (fixed keys, so equal
/// instances hash equally across threads and across calls).
pub fn structural_hasher() -> DefaultHasher {
    DefaultHasher::new()
}
