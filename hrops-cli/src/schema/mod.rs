//! Versioned sheet layouts
//!
//! The spreadsheet's column positions are effectively the wire format: dozens
//! of fixed offsets per sheet that every workflow depends on. Each layout is
//! declared once here as a [`SheetSchema`] so an index change is a one-place
//! edit, and resolution against the live header row happens at parse time
//! rather than being assumed stable.

pub mod layouts;

use std::collections::HashMap;

use anyhow::{Result, bail};

use crate::api::{Cell, Grid};

/// Location of one logical sheet within its grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetHandle {
    pub sheet_name: String,
    pub header_row_index: usize,
    pub data_start_row_index: usize,
}

/// How a `ByHeader` rule compares against header text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMatch {
    /// Trimmed, case-sensitive equality
    Exact,
    /// Case-insensitive substring
    Contains,
}

/// How a logical field resolves to a column index
///
/// Some sheets have stable headers worth searching; others have none in the
/// relevant range and only the numeric offset is trustworthy. Both coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Always this column
    Fixed { index: usize },
    /// Search the header row; fall back to a fixed index on no match
    ByHeader {
        matcher: HeaderMatch,
        text: String,
        fallback: usize,
    },
}

impl FieldRule {
    pub fn fixed(index: usize) -> Self {
        Self::Fixed { index }
    }

    pub fn exact(text: impl Into<String>, fallback: usize) -> Self {
        Self::ByHeader {
            matcher: HeaderMatch::Exact,
            text: text.into(),
            fallback,
        }
    }

    pub fn contains(text: impl Into<String>, fallback: usize) -> Self {
        Self::ByHeader {
            matcher: HeaderMatch::Contains,
            text: text.into(),
            fallback,
        }
    }
}

/// One declared field of a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub rule: FieldRule,
}

/// Resolved field-name -> column-index mapping, built once per fetch
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    indices: HashMap<String, usize>,
}

impl FieldMap {
    pub fn get(&self, field: &str) -> Option<usize> {
        self.indices.get(field).copied()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Declared layout of one logical sheet
#[derive(Debug, Clone)]
pub struct SheetSchema {
    name: String,
    /// Layout revision; bump when the sheet's column contract changes
    version: u32,
    header_row_index: usize,
    data_start_row_index: usize,
    fields: Vec<FieldDef>,
}

impl SheetSchema {
    pub fn new(
        name: impl Into<String>,
        version: u32,
        header_row_index: usize,
        data_start_row_index: usize,
    ) -> Self {
        assert!(
            header_row_index < data_start_row_index,
            "header row must precede data rows"
        );
        Self {
            name: name.into(),
            version,
            header_row_index,
            data_start_row_index,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            rule,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn header_row_index(&self) -> usize {
        self.header_row_index
    }

    pub fn data_start_row_index(&self) -> usize {
        self.data_start_row_index
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn handle(&self) -> SheetHandle {
        SheetHandle {
            sheet_name: self.name.clone(),
            header_row_index: self.header_row_index,
            data_start_row_index: self.data_start_row_index,
        }
    }

    /// Resolve every declared field against the header row of a fetched grid.
    ///
    /// Errors when the grid is too short to contain the header row; `ByHeader`
    /// rules that find no match degrade to their fallback index.
    pub fn resolve(&self, grid: &Grid) -> Result<FieldMap> {
        if grid.len() <= self.header_row_index {
            bail!(
                "Sheet '{}' has {} rows, header expected at row {}",
                self.name,
                grid.len(),
                self.header_row_index + 1
            );
        }
        let headers: Vec<String> = grid[self.header_row_index]
            .iter()
            .map(cell_text)
            .collect();

        let mut indices = HashMap::with_capacity(self.fields.len());
        for def in &self.fields {
            let index = match &def.rule {
                FieldRule::Fixed { index } => *index,
                FieldRule::ByHeader {
                    matcher,
                    text,
                    fallback,
                } => find_header(&headers, *matcher, text).unwrap_or(*fallback),
            };
            indices.insert(def.name.clone(), index);
        }
        Ok(FieldMap { indices })
    }
}

/// First matching header position, per the declared match mode.
fn find_header(headers: &[String], matcher: HeaderMatch, text: &str) -> Option<usize> {
    match matcher {
        HeaderMatch::Exact => headers.iter().position(|h| h.trim() == text),
        HeaderMatch::Contains => {
            let needle = text.to_lowercase();
            headers
                .iter()
                .position(|h| h.to_lowercase().contains(&needle))
        }
    }
}

/// Render a wire cell as the string the dashboard logic expects.
///
/// Whole-number floats print without the trailing `.0` so numeric sheet
/// values compare equal to their typed-in string forms.
pub fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::String(s) => s.clone(),
        Cell::Number(n) => {
            if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    (f as i64).to_string()
                } else {
                    f.to_string()
                }
            } else {
                n.to_string()
            }
        }
        Cell::Bool(b) => b.to_string(),
        Cell::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn grid(rows: Vec<Vec<serde_json::Value>>) -> Grid {
        rows
    }

    #[test]
    fn test_exact_header_resolution_first_match() {
        let schema = SheetSchema::new("ENQUIRY", 1, 0, 1)
            .field("name", FieldRule::exact("Candidate Name", 99));
        let g = grid(vec![vec![
            json!("Timestamp"),
            json!("Candidate Name"),
            json!("Candidate Name"),
        ]]);
        let map = schema.resolve(&g).unwrap();
        assert_eq!(map.get("name"), Some(1));
    }

    #[test]
    fn test_exact_header_is_trimmed_and_case_sensitive() {
        let schema = SheetSchema::new("ENQUIRY", 1, 0, 1)
            .field("dob", FieldRule::exact("DOB", 7))
            .field("phone", FieldRule::exact("candidate phone number", 7));
        let g = grid(vec![vec![
            json!("  DOB "),
            json!("Candidate Phone Number"),
        ]]);
        let map = schema.resolve(&g).unwrap();
        assert_eq!(map.get("dob"), Some(0));
        // Case mismatch falls back to the fixed index.
        assert_eq!(map.get("phone"), Some(7));
    }

    #[test]
    fn test_contains_header_is_case_insensitive() {
        let schema = SheetSchema::new("INDENT", 1, 0, 1)
            .field("indent_number", FieldRule::contains("indent number", 1));
        let g = grid(vec![vec![json!("Sr."), json!("  Indent Number  ")]]);
        let map = schema.resolve(&g).unwrap();
        assert_eq!(map.get("indent_number"), Some(1));
    }

    #[test]
    fn test_fixed_rule_ignores_headers() {
        let schema =
            SheetSchema::new("JOINING", 1, 0, 1).field("employee_code", FieldRule::fixed(26));
        let g = grid(vec![vec![json!("whatever")]]);
        let map = schema.resolve(&g).unwrap();
        assert_eq!(map.get("employee_code"), Some(26));
    }

    #[test]
    fn test_resolve_fails_when_header_row_missing() {
        let schema = SheetSchema::new("ENQUIRY", 1, 5, 6).field("x", FieldRule::fixed(0));
        let g = grid(vec![vec![json!("only one row")]]);
        assert!(schema.resolve(&g).is_err());
    }

    #[test]
    #[should_panic(expected = "header row must precede data rows")]
    fn test_header_must_precede_data() {
        let _ = SheetSchema::new("BAD", 1, 6, 6);
    }

    #[test]
    fn test_cell_text_coercions() {
        assert_eq!(cell_text(&json!("PMMPL-007")), "PMMPL-007");
        assert_eq!(cell_text(&json!(7)), "7");
        assert_eq!(cell_text(&json!(7.0)), "7");
        assert_eq!(cell_text(&json!(7.5)), "7.5");
        assert_eq!(cell_text(&json!(true)), "true");
        assert_eq!(cell_text(&serde_json::Value::Null), "");
    }
}
