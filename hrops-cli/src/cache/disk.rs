use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::api::Grid;

use super::{SheetCache, is_fresh};

#[derive(Serialize, Deserialize)]
struct DiskEntry {
    stored_at_ms: u64,
    grid: Grid,
}

/// Snapshot cache persisted as one JSON file per sheet, surviving restarts.
///
/// IO failures degrade to cache misses; a broken cache never breaks a fetch.
pub struct DiskCache {
    dir: PathBuf,
    ttl_ms: u64,
}

impl DiskCache {
    pub fn new(dir: PathBuf, ttl_ms: u64) -> Self {
        Self { dir, ttl_ms }
    }

    /// Opens the cache under the platform data directory.
    pub fn open(ttl_ms: u64) -> Result<Self> {
        let dir = dirs::data_dir()
            .context("Could not determine data directory")?
            .join("hrops")
            .join("cache");
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create cache directory {:?}", dir))?;
        Ok(Self::new(dir, ttl_ms))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }

    fn read_entry(&self, key: &str) -> Option<DiskEntry> {
        let path = self.path_for(key);
        let bytes = fs::read(&path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Discarding unreadable cache file {:?}: {}", path, e);
                let _ = fs::remove_file(&path);
                None
            }
        }
    }
}

impl SheetCache for DiskCache {
    fn get(&self, key: &str, now_ms: u64) -> Option<Grid> {
        let entry = self.read_entry(key)?;
        if is_fresh(entry.stored_at_ms, now_ms, self.ttl_ms) {
            Some(entry.grid)
        } else {
            None
        }
    }

    fn put(&mut self, key: &str, grid: Grid, now_ms: u64) {
        let entry = DiskEntry {
            stored_at_ms: now_ms,
            grid,
        };
        let path = self.path_for(key);
        let write = fs::create_dir_all(&self.dir)
            .and_then(|_| fs::write(&path, serde_json::to_vec(&entry).unwrap_or_default()));
        if let Err(e) = write {
            warn!("Failed to write cache file {:?}: {}", path, e);
        }
    }

    fn invalidate(&mut self, key: &str) {
        let _ = fs::remove_file(self.path_for(key));
    }

    fn clear(&mut self) {
        if let Ok(entries) = fs::read_dir(&self.dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    let _ = fs::remove_file(path);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_cache(name: &str, ttl_ms: u64) -> DiskCache {
        let dir = std::env::temp_dir().join(format!("hrops-cache-{}-{}", std::process::id(), name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        DiskCache::new(dir, ttl_ms)
    }

    fn grid() -> Grid {
        vec![vec![json!("Employee Code")], vec![json!("PMMPL-001")]]
    }

    #[test]
    fn test_survives_reopen() {
        let mut cache = temp_cache("reopen", 300_000);
        cache.put("JOINING", grid(), 1_000);

        let reopened = DiskCache::new(cache.dir.clone(), 300_000);
        let got = reopened.get("JOINING", 2_000).unwrap();
        assert_eq!(got[1][0], json!("PMMPL-001"));
    }

    #[test]
    fn test_expires_after_ttl() {
        let mut cache = temp_cache("expiry", 300_000);
        cache.put("JOINING", grid(), 0);
        assert!(cache.get("JOINING", 299_999).is_some());
        assert!(cache.get("JOINING", 300_000).is_none());
    }

    #[test]
    fn test_corrupt_file_is_a_miss() {
        let mut cache = temp_cache("corrupt", 300_000);
        cache.put("JOINING", grid(), 0);
        fs::write(cache.path_for("JOINING"), b"not json").unwrap();
        assert!(cache.get("JOINING", 1).is_none());
    }

    #[test]
    fn test_key_sanitization_keeps_keys_distinct() {
        let mut cache = temp_cache("sanitize", 300_000);
        cache.put("SIES EMPLOYEES", grid(), 0);
        cache.put("Follow - Up", vec![vec![json!("x")]], 0);
        assert_eq!(cache.get("SIES EMPLOYEES", 1).unwrap()[1][0], json!("PMMPL-001"));
        assert_eq!(cache.get("Follow - Up", 1).unwrap()[0][0], json!("x"));
    }
}
