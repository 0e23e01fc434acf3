//! Row-to-record projection
//!
//! Turns a raw fetched grid into flat string records according to a
//! [`SheetSchema`]. Short rows and blank cells coerce to `""` so the
//! downstream trim/compare logic never meets a missing value; a malformed
//! row degrades instead of aborting the projection.

pub mod dates;

use std::collections::HashMap;

use anyhow::{Result, bail};

use crate::api::Grid;
use crate::schema::{SheetSchema, cell_text};

/// One projected sheet row: named string fields plus its sheet position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    row_number: usize,
    fields: HashMap<String, String>,
}

impl Record {
    pub(crate) fn new(row_number: usize, fields: HashMap<String, String>) -> Self {
        Self { row_number, fields }
    }

    /// 1-based, sheet-relative row this record was read from.
    ///
    /// Valid only for the snapshot it came from; writers must re-resolve
    /// positions before updating (see [`crate::batch`]).
    pub fn row_number(&self) -> usize {
        self.row_number
    }

    /// Field value; declared-but-absent fields read as `""`.
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    /// Trimmed field value, the form every key comparison uses.
    pub fn trimmed(&self, field: &str) -> &str {
        self.get(field).trim()
    }

    pub fn is_blank(&self, field: &str) -> bool {
        self.trimmed(field).is_empty()
    }

    pub(crate) fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn fields(&self) -> &HashMap<String, String> {
        &self.fields
    }
}

/// Projects grids into [`Record`]s for one schema
#[derive(Debug, Clone)]
pub struct RowProjector {
    schema: SheetSchema,
}

impl RowProjector {
    pub fn new(schema: SheetSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &SheetSchema {
        &self.schema
    }

    /// Project every data row, preserving spreadsheet order.
    ///
    /// Errors when the grid cannot contain a single data row (the sheet's
    /// banner/header block alone is taller than the response).
    pub fn project(&self, grid: &Grid) -> Result<Vec<Record>> {
        let start = self.schema.data_start_row_index();
        if grid.len() <= start {
            bail!(
                "Not enough rows in sheet '{}' ({} rows, data starts at row {})",
                self.schema.name(),
                grid.len(),
                start + 1
            );
        }

        let map = self.schema.resolve(grid)?;

        let mut records = Vec::with_capacity(grid.len() - start);
        for (offset, row) in grid[start..].iter().enumerate() {
            let mut fields = HashMap::with_capacity(self.schema.fields().len());
            for def in self.schema.fields() {
                let value = map
                    .get(&def.name)
                    .and_then(|index| row.get(index))
                    .map(cell_text)
                    .unwrap_or_default();
                fields.insert(def.name.clone(), value);
            }
            records.push(Record::new(start + offset + 1, fields));
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldRule;
    use serde_json::json;

    fn schema() -> SheetSchema {
        SheetSchema::new("JOINING", 1, 5, 6)
            .field("joining_no", FieldRule::fixed(1))
            .field("planned_date", FieldRule::fixed(23))
            .field("actual", FieldRule::fixed(24))
    }

    fn banner_rows() -> Vec<Vec<serde_json::Value>> {
        (0..6).map(|_| vec![json!("")]).collect()
    }

    #[test]
    fn test_short_rows_project_to_empty_strings() {
        let mut grid = banner_rows();
        grid.push(vec![json!(""), json!("SN-001")]); // no column 23/24 at all
        let records = RowProjector::new(schema()).project(&grid).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("joining_no"), "SN-001");
        assert_eq!(records[0].get("planned_date"), "");
        assert_eq!(records[0].get("actual"), "");
    }

    #[test]
    fn test_row_numbers_are_one_based_sheet_relative() {
        let mut grid = banner_rows();
        grid.push(vec![json!(""), json!("SN-001")]);
        grid.push(vec![json!(""), json!("SN-002")]);
        let records = RowProjector::new(schema()).project(&grid).unwrap();
        assert_eq!(records[0].row_number(), 7);
        assert_eq!(records[1].row_number(), 8);
    }

    #[test]
    fn test_banner_only_grid_is_an_error() {
        let grid = banner_rows();
        let err = RowProjector::new(schema()).project(&grid).unwrap_err();
        assert!(err.to_string().contains("Not enough rows"));
    }

    #[test]
    fn test_null_and_numeric_cells_coerce() {
        let mut grid = banner_rows();
        let mut row = vec![json!(null); 25];
        row[1] = json!(12);
        row[23] = json!("01/02/2024");
        grid.push(row);
        let records = RowProjector::new(schema()).project(&grid).unwrap();
        assert_eq!(records[0].get("joining_no"), "12");
        assert_eq!(records[0].get("planned_date"), "01/02/2024");
        assert_eq!(records[0].get("actual"), "");
    }

    #[test]
    fn test_order_preserved_and_malformed_rows_degrade() {
        let mut grid = banner_rows();
        grid.push(vec![json!(""), json!("SN-001")]);
        grid.push(vec![]); // fully malformed row
        grid.push(vec![json!(""), json!("SN-003")]);
        let records = RowProjector::new(schema()).project(&grid).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].get("joining_no"), "");
        assert_eq!(records[2].get("joining_no"), "SN-003");
    }
}
