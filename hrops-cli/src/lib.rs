//! HR operations client over a Google Apps Script sheet endpoint.
//!
//! The backing spreadsheet is the system of record. This crate factors the
//! recurring page logic of the HR dashboard into a reusable engine: sheet
//! layouts as versioned schemas, row-to-record projection, cross-sheet
//! reconciliation into pending/history buckets, batched cell writes with
//! fresh row resolution, and a TTL-bounded read cache.

pub mod api;
pub mod batch;
pub mod cache;
pub mod cli;
pub mod config;
pub mod keys;
pub mod projector;
pub mod reconcile;
pub mod schema;
pub mod validate;
pub mod workflows;

pub use api::{Grid, SheetsClient};
pub use batch::{BatchReport, CellWrite, RowKey, UpdateBatcher};
pub use cache::{DiskCache, MemoryCache, SheetCache};
pub use config::Config;
pub use projector::{Record, RowProjector};
pub use reconcile::{BucketRule, Buckets, CrossSheetReconciler, JoinSpec, MergeField};
pub use schema::{FieldMap, FieldRule, HeaderMatch, SheetSchema};
