use std::collections::HashMap;

use crate::api::Grid;

use super::{SheetCache, is_fresh};

struct Entry {
    stored_at_ms: u64,
    grid: Grid,
}

/// In-process snapshot cache; gone on restart.
pub struct MemoryCache {
    ttl_ms: u64,
    entries: HashMap<String, Entry>,
}

impl MemoryCache {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            ttl_ms,
            entries: HashMap::new(),
        }
    }
}

impl SheetCache for MemoryCache {
    fn get(&self, key: &str, now_ms: u64) -> Option<Grid> {
        let entry = self.entries.get(key)?;
        if is_fresh(entry.stored_at_ms, now_ms, self.ttl_ms) {
            Some(entry.grid.clone())
        } else {
            None
        }
    }

    fn put(&mut self, key: &str, grid: Grid, now_ms: u64) {
        self.entries.insert(
            key.to_string(),
            Entry {
                stored_at_ms: now_ms,
                grid,
            },
        );
    }

    fn invalidate(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
