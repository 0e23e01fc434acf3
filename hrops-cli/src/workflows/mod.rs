//! HR workflow operations
//!
//! One submodule per stage of the employee lifecycle, each a thin
//! composition of the engine modules: fetch grids through the API client,
//! project them into records, reconcile across sheets, and push writes
//! through the batcher. Nothing in here touches raw column offsets directly;
//! those live in the sheet layouts.

pub mod after_joining;
pub mod after_leaving;
pub mod employees;
pub mod enquiry;
pub mod indent;
pub mod joining;
pub mod leaving;
pub mod policy;

use anyhow::{Context, Result};
use log::debug;

use crate::api::{Grid, SheetsClient};
use crate::cache::SheetCache;
use crate::projector::{Record, RowProjector};
use crate::schema::SheetSchema;

/// Fetch a sheet and project it through its layout.
pub(crate) async fn fetch_records(
    client: &SheetsClient,
    schema: SheetSchema,
) -> Result<Vec<Record>> {
    let name = schema.name().to_string();
    let grid = client.fetch_sheet(&name).await?;
    RowProjector::new(schema)
        .project(&grid)
        .with_context(|| format!("Failed to project sheet '{}'", name))
}

/// Like [`fetch_records`], but served from the cache when fresh. A network
/// fetch refreshes the cache; writes never go through here.
pub(crate) async fn fetch_records_cached(
    client: &SheetsClient,
    schema: SheetSchema,
    cache: &mut dyn SheetCache,
    now_ms: u64,
) -> Result<Vec<Record>> {
    let name = schema.name().to_string();
    let grid: Grid = match cache.get(&name, now_ms) {
        Some(grid) => {
            debug!("Cache hit for sheet '{}'", name);
            grid
        }
        None => {
            let grid = client.fetch_sheet(&name).await?;
            cache.put(&name, grid.clone(), now_ms);
            grid
        }
    };
    RowProjector::new(schema)
        .project(&grid)
        .with_context(|| format!("Failed to project sheet '{}'", name))
}

/// Builds a sparse sheet row: every listed (0-based index, value) pair set,
/// everything else blank, sized to the highest index touched.
pub(crate) fn sparse_row(width: usize, values: &[(usize, String)]) -> Vec<String> {
    let needed = values
        .iter()
        .map(|(i, _)| i + 1)
        .max()
        .unwrap_or(0)
        .max(width);
    let mut row = vec![String::new(); needed];
    for (index, value) in values {
        row[*index] = value.clone();
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_row_sizes_to_widest_index() {
        let row = sparse_row(5, &[(1, "a".into()), (8, "b".into())]);
        assert_eq!(row.len(), 9);
        assert_eq!(row[1], "a");
        assert_eq!(row[8], "b");
        assert_eq!(row[0], "");
    }

    #[test]
    fn test_sparse_row_keeps_minimum_width() {
        let row = sparse_row(12, &[(2, "x".into())]);
        assert_eq!(row.len(), 12);
    }
}
