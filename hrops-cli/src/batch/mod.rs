//! Batched sheet writes
//!
//! Every form submission becomes a set of cell writes against rows that are
//! re-located immediately before writing: sheet row positions from an earlier
//! fetch are never trusted at write time, because the sheet may have changed
//! underneath. Writes belonging to one submission dispatch concurrently and
//! succeed only as a whole; writes that already landed before a failure are
//! NOT rolled back. That at-least-once, non-atomic semantic is a property of
//! the backing endpoint and is reported honestly rather than hidden.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, warn};

use crate::api::{Grid, SheetsClient};
use crate::schema::cell_text;

/// The write surface the batcher needs; [`SheetsClient`] provides it, tests
/// substitute their own.
#[async_trait]
pub trait SheetWriter: Send + Sync {
    async fn fetch_sheet(&self, sheet: &str) -> Result<Grid>;
    async fn update_cell(
        &self,
        sheet: &str,
        row_index: usize,
        column_index: usize,
        value: &str,
    ) -> Result<()>;
    async fn update_row(&self, sheet: &str, row_index: usize, row: &[String]) -> Result<()>;
    async fn insert_row(&self, sheet: &str, row: &[String]) -> Result<()>;
}

#[async_trait]
impl SheetWriter for SheetsClient {
    async fn fetch_sheet(&self, sheet: &str) -> Result<Grid> {
        SheetsClient::fetch_sheet(self, sheet).await
    }

    async fn update_cell(
        &self,
        sheet: &str,
        row_index: usize,
        column_index: usize,
        value: &str,
    ) -> Result<()> {
        SheetsClient::update_cell(self, sheet, row_index, column_index, value).await
    }

    async fn update_row(&self, sheet: &str, row_index: usize, row: &[String]) -> Result<()> {
        SheetsClient::update_row(self, sheet, row_index, row).await
    }

    async fn insert_row(&self, sheet: &str, row: &[String]) -> Result<()> {
        SheetsClient::insert_row(self, sheet, row).await
    }
}

/// Identifies the target row by a key column's trimmed value
#[derive(Debug, Clone)]
pub struct RowKey {
    /// 0-based column holding the key
    pub column_index: usize,
    pub value: String,
}

impl RowKey {
    pub fn new(column_index: usize, value: impl Into<String>) -> Self {
        Self {
            column_index,
            value: value.into(),
        }
    }
}

/// One pending single-cell write. `column_index` is 1-based, as the
/// endpoint expects.
#[derive(Debug, Clone)]
pub struct CellWrite {
    pub column_index: usize,
    pub value: String,
}

impl CellWrite {
    pub fn new(column_index: usize, value: impl Into<String>) -> Self {
        Self {
            column_index,
            value: value.into(),
        }
    }
}

/// Outcome of one dispatched cell write
#[derive(Debug, Clone)]
pub struct WriteOutcome {
    pub column_index: usize,
    pub error: Option<String>,
}

/// Aggregate outcome of one submission's writes
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub sheet: String,
    pub row_index: usize,
    pub outcomes: Vec<WriteOutcome>,
}

impl BatchReport {
    pub fn success(&self) -> bool {
        self.outcomes.iter().all(|o| o.error.is_none())
    }

    /// Number of writes actually sent; partial failures still count the
    /// writes that went out.
    pub fn dispatched(&self) -> usize {
        self.outcomes.len()
    }

    /// Collapse into the single aggregate error the caller surfaces.
    pub fn ensure_success(&self) -> Result<()> {
        let failed: Vec<String> = self
            .outcomes
            .iter()
            .filter_map(|o| {
                o.error
                    .as_ref()
                    .map(|e| format!("column {}: {}", o.column_index, e))
            })
            .collect();
        if failed.is_empty() {
            return Ok(());
        }
        bail!(
            "Update of sheet '{}' row {} failed ({}/{} writes failed; applied writes were not rolled back): {}",
            self.sheet,
            self.row_index,
            failed.len(),
            self.outcomes.len(),
            failed.join("; ")
        )
    }
}

/// Applies one logical submission as remote writes
pub struct UpdateBatcher<'a, W: SheetWriter + ?Sized> {
    writer: &'a W,
}

impl<'a, W: SheetWriter + ?Sized> UpdateBatcher<'a, W> {
    pub fn new(writer: &'a W) -> Self {
        Self { writer }
    }

    /// Locate the keyed row in a fresh snapshot, 1-based. An absent key is
    /// `Ok(None)`; a failed fetch stays an error.
    ///
    /// `skip_rows` is the sheet's banner/header depth; key matches inside it
    /// are ignored.
    pub async fn find_row(
        &self,
        sheet: &str,
        key: &RowKey,
        skip_rows: usize,
    ) -> Result<Option<usize>> {
        let grid = self
            .writer
            .fetch_sheet(sheet)
            .await
            .with_context(|| format!("Failed to re-fetch sheet '{}' before writing", sheet))?;

        let wanted = key.value.trim();
        for (i, row) in grid.iter().enumerate().skip(skip_rows) {
            let found = row.get(key.column_index).map(cell_text).unwrap_or_default();
            if found.trim() == wanted {
                return Ok(Some(i + 1));
            }
        }
        Ok(None)
    }

    /// Locate the target row in a fresh snapshot, 1-based. A missing key is
    /// a hard error naming the key, and no write is attempted.
    pub async fn resolve_row(&self, sheet: &str, key: &RowKey, skip_rows: usize) -> Result<usize> {
        match self.find_row(sheet, key, skip_rows).await? {
            Some(row_index) => Ok(row_index),
            None => bail!("Record '{}' not found in sheet '{}'", key.value, sheet),
        }
    }

    /// Resolve the row, then dispatch every cell write concurrently.
    ///
    /// Returns the per-write report; callers surface partial failure through
    /// [`BatchReport::ensure_success`].
    pub async fn submit_cells(
        &self,
        sheet: &str,
        key: &RowKey,
        skip_rows: usize,
        writes: Vec<CellWrite>,
    ) -> Result<BatchReport> {
        let row_index = self.resolve_row(sheet, key, skip_rows).await?;
        debug!(
            "Dispatching {} cell writes to sheet '{}' row {}",
            writes.len(),
            sheet,
            row_index
        );

        let futures = writes.iter().map(|write| {
            let value = write.value.clone();
            async move {
                self.writer
                    .update_cell(sheet, row_index, write.column_index, &value)
                    .await
            }
        });
        let results = join_all(futures).await;

        let outcomes: Vec<WriteOutcome> = writes
            .iter()
            .zip(results)
            .map(|(write, result)| WriteOutcome {
                column_index: write.column_index,
                error: result.err().map(|e| format!("{:#}", e)),
            })
            .collect();

        let report = BatchReport {
            sheet: sheet.to_string(),
            row_index,
            outcomes,
        };
        if !report.success() {
            warn!(
                "Partial batch failure on sheet '{}' row {}: {} of {} writes failed",
                sheet,
                row_index,
                report.outcomes.iter().filter(|o| o.error.is_some()).count(),
                report.dispatched()
            );
        }
        Ok(report)
    }

    /// Resolve the row, then overwrite it whole.
    pub async fn submit_row(
        &self,
        sheet: &str,
        key: &RowKey,
        skip_rows: usize,
        row: Vec<String>,
    ) -> Result<usize> {
        let row_index = self.resolve_row(sheet, key, skip_rows).await?;
        self.writer.update_row(sheet, row_index, &row).await?;
        Ok(row_index)
    }

    /// Append a new row.
    pub async fn insert(&self, sheet: &str, row: Vec<String>) -> Result<()> {
        self.writer.insert_row(sheet, &row).await
    }

    /// Overwrite the keyed row if it exists, otherwise append.
    ///
    /// Only a confirmed miss appends; a failed lookup fetch propagates, so a
    /// transient error can never duplicate an existing row.
    pub async fn upsert_row(
        &self,
        sheet: &str,
        key: &RowKey,
        skip_rows: usize,
        row: Vec<String>,
    ) -> Result<()> {
        match self.find_row(sheet, key, skip_rows).await? {
            Some(row_index) => self.writer.update_row(sheet, row_index, &row).await,
            None => self.writer.insert_row(sheet, &row).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::Mutex;

    struct MockWriter {
        grid: Grid,
        fail_columns: HashSet<usize>,
        fail_fetch: bool,
        cell_log: Mutex<Vec<(usize, usize, String)>>,
        row_log: Mutex<Vec<(String, usize, Vec<String>)>>,
        insert_log: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl MockWriter {
        fn new(grid: Grid) -> Self {
            Self {
                grid,
                fail_columns: HashSet::new(),
                fail_fetch: false,
                cell_log: Mutex::new(Vec::new()),
                row_log: Mutex::new(Vec::new()),
                insert_log: Mutex::new(Vec::new()),
            }
        }

        fn failing(mut self, column: usize) -> Self {
            self.fail_columns.insert(column);
            self
        }

        fn failing_fetch(mut self) -> Self {
            self.fail_fetch = true;
            self
        }
    }

    #[async_trait]
    impl SheetWriter for MockWriter {
        async fn fetch_sheet(&self, _sheet: &str) -> Result<Grid> {
            if self.fail_fetch {
                bail!("simulated fetch outage");
            }
            Ok(self.grid.clone())
        }

        async fn update_cell(
            &self,
            _sheet: &str,
            row_index: usize,
            column_index: usize,
            value: &str,
        ) -> Result<()> {
            self.cell_log
                .lock()
                .unwrap()
                .push((row_index, column_index, value.to_string()));
            if self.fail_columns.contains(&column_index) {
                bail!("simulated server failure");
            }
            Ok(())
        }

        async fn update_row(&self, sheet: &str, row_index: usize, row: &[String]) -> Result<()> {
            self.row_log
                .lock()
                .unwrap()
                .push((sheet.to_string(), row_index, row.to_vec()));
            Ok(())
        }

        async fn insert_row(&self, sheet: &str, row: &[String]) -> Result<()> {
            self.insert_log
                .lock()
                .unwrap()
                .push((sheet.to_string(), row.to_vec()));
            Ok(())
        }
    }

    fn enquiry_grid() -> Grid {
        vec![
            vec![json!("banner")],
            vec![json!(""), json!(""), json!("Candidate Enquiry Number")],
            vec![json!(""), json!(""), json!("ENQ-1")],
            vec![json!(""), json!(""), json!(" ENQ-2 ")],
        ]
    }

    #[tokio::test]
    async fn test_resolve_row_matches_trimmed_key() {
        let writer = MockWriter::new(enquiry_grid());
        let batcher = UpdateBatcher::new(&writer);
        let row = batcher
            .resolve_row("ENQUIRY", &RowKey::new(2, "ENQ-2"), 2)
            .await
            .unwrap();
        assert_eq!(row, 4);
    }

    #[tokio::test]
    async fn test_resolve_row_skips_header_region() {
        let writer = MockWriter::new(enquiry_grid());
        let batcher = UpdateBatcher::new(&writer);
        // The header text itself must never resolve as a record.
        let err = batcher
            .resolve_row("ENQUIRY", &RowKey::new(2, "Candidate Enquiry Number"), 2)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_missing_key_is_hard_error_with_no_writes() {
        let writer = MockWriter::new(enquiry_grid());
        let batcher = UpdateBatcher::new(&writer);
        let err = batcher
            .submit_cells(
                "ENQUIRY",
                &RowKey::new(2, "ENQ-404"),
                2,
                vec![CellWrite::new(27, "01/02/2024")],
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("ENQ-404"));
        assert!(writer.cell_log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_failure_still_dispatches_everything() {
        let writer = MockWriter::new(enquiry_grid()).failing(55);
        let batcher = UpdateBatcher::new(&writer);
        let report = batcher
            .submit_cells(
                "ENQUIRY",
                &RowKey::new(2, "ENQ-1"),
                2,
                vec![
                    CellWrite::new(53, "a"),
                    CellWrite::new(55, "b"),
                    CellWrite::new(57, "c"),
                ],
            )
            .await
            .unwrap();

        assert!(!report.success());
        assert_eq!(report.dispatched(), 3);
        let err = report.ensure_success().unwrap_err();
        assert!(err.to_string().contains("not rolled back"));

        // Writes 1 and 3 went out even though write 2 failed.
        let log = writer.cell_log.lock().unwrap();
        let sent: Vec<usize> = log.iter().map(|(_, c, _)| *c).collect();
        assert!(sent.contains(&53));
        assert!(sent.contains(&55));
        assert!(sent.contains(&57));
    }

    #[tokio::test]
    async fn test_all_writes_target_the_resolved_row() {
        let writer = MockWriter::new(enquiry_grid());
        let batcher = UpdateBatcher::new(&writer);
        let report = batcher
            .submit_cells(
                "ENQUIRY",
                &RowKey::new(2, "ENQ-2"),
                2,
                vec![CellWrite::new(27, "x"), CellWrite::new(29, "y")],
            )
            .await
            .unwrap();
        assert!(report.success());
        assert_eq!(report.row_index, 4);
        let log = writer.cell_log.lock().unwrap();
        assert!(log.iter().all(|(row, _, _)| *row == 4));
    }

    #[tokio::test]
    async fn test_upsert_updates_when_found_inserts_when_missing() {
        let writer = MockWriter::new(enquiry_grid());
        let batcher = UpdateBatcher::new(&writer);

        batcher
            .upsert_row(
                "ENQUIRY",
                &RowKey::new(2, "ENQ-1"),
                2,
                vec!["a".into(), "b".into()],
            )
            .await
            .unwrap();
        assert_eq!(writer.row_log.lock().unwrap().len(), 1);
        assert_eq!(writer.row_log.lock().unwrap()[0].1, 3);

        batcher
            .upsert_row("ENQUIRY", &RowKey::new(2, "ENQ-9"), 2, vec!["a".into()])
            .await
            .unwrap();
        assert_eq!(writer.insert_log.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_never_appends_when_the_lookup_fetch_fails() {
        // A transient fetch failure must not look like a missing record; an
        // append here would duplicate the existing row.
        let writer = MockWriter::new(enquiry_grid()).failing_fetch();
        let batcher = UpdateBatcher::new(&writer);
        let err = batcher
            .upsert_row("ENQUIRY", &RowKey::new(2, "ENQ-1"), 2, vec!["a".into()])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("re-fetch"));
        assert!(writer.insert_log.lock().unwrap().is_empty());
        assert!(writer.row_log.lock().unwrap().is_empty());
    }
}
