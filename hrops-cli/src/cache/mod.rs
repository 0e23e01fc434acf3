//! TTL caching of fetched sheet snapshots
//!
//! Sheets change rarely relative to how often the dashboards re-read them,
//! so snapshots are cached under a per-cache TTL. Two backings exist: an
//! in-memory map for short-lived working sets (60s) and a JSON file store
//! that survives restarts for the heavyweight joining snapshot (5min).
//!
//! Time is passed in explicitly as Unix milliseconds so expiry is testable;
//! production callers use [`wall_clock_ms`].

mod disk;
mod memory;

pub use disk::DiskCache;
pub use memory::MemoryCache;

use std::time::{SystemTime, UNIX_EPOCH};

use crate::api::Grid;

pub const TTL_AFTER_JOINING_MS: u64 = 60 * 1000;
pub const TTL_JOINING_MS: u64 = 5 * 60 * 1000;

/// Unix time in milliseconds.
pub fn wall_clock_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A TTL-bounded store of sheet snapshots keyed by sheet name.
pub trait SheetCache {
    /// Returns the snapshot if present and younger than the TTL.
    fn get(&self, key: &str, now_ms: u64) -> Option<Grid>;

    /// Stores a snapshot, restarting its TTL clock.
    fn put(&mut self, key: &str, grid: Grid, now_ms: u64);

    /// Drops one entry; the next `get` misses.
    fn invalidate(&mut self, key: &str);

    /// Drops everything.
    fn clear(&mut self);
}

pub(crate) fn is_fresh(stored_at_ms: u64, now_ms: u64, ttl_ms: u64) -> bool {
    now_ms.saturating_sub(stored_at_ms) < ttl_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness_boundary() {
        assert!(is_fresh(0, 59_999, 60_000));
        assert!(!is_fresh(0, 60_000, 60_000));
        // Clock regression never panics, counts as fresh.
        assert!(is_fresh(100, 50, 60_000));
    }
}
