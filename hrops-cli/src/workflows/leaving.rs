//! Leaving workflow
//!
//! Employees eligible to leave are the onboarded JOINING rows without a
//! leaving stamp yet and without a LEAVING row already on file. Recording a
//! leave appends the LEAVING row and stamps the leave details back onto the
//! JOINING row in one concurrent batch.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::info;

use crate::api::SheetsClient;
use crate::batch::{CellWrite, RowKey, UpdateBatcher};
use crate::projector::{Record, dates};
use crate::reconcile::{BucketRule, Buckets, CrossSheetReconciler};
use crate::schema::layouts;
use crate::validate;

/// 0-based employee-code column on JOINING used for row resolution
const EMPLOYEE_CODE_COLUMN: usize = 26;

/// JOINING rows split on the leaving planned/actual pair. An employee whose
/// code already appears in LEAVING is never pending, even before the JOINING
/// actual stamp lands.
pub async fn load(client: &SheetsClient) -> Result<Buckets> {
    let (joined, left) = tokio::try_join!(
        super::fetch_records(client, layouts::joining()),
        super::fetch_records(client, layouts::leaving()),
    )?;
    Ok(build_board(&joined, &left))
}

fn build_board(joined: &[Record], left: &[Record]) -> Buckets {
    let rule = BucketRule::new("leaving", "leaving_planned", "leaving_actual");
    let buckets = CrossSheetReconciler::classify(joined, &rule);
    let already_left = CrossSheetReconciler::key_set(left, "employee_id");
    let (_, pending) = CrossSheetReconciler::split_by_key_presence(
        &buckets.pending,
        "employee_code",
        &already_left,
    );
    Buckets {
        pending,
        history: buckets.history,
    }
}

/// Looks up one employee's JOINING record by employee code.
pub async fn find_employee(client: &SheetsClient, employee_code: &str) -> Result<Record> {
    let records = super::fetch_records(client, layouts::joining()).await?;
    let wanted = employee_code.trim();
    records
        .into_iter()
        .find(|r| r.trimmed("employee_code") == wanted)
        .with_context(|| format!("Employee '{}' not found in JOINING", employee_code))
}

#[derive(Default)]
pub struct LeavingForm {
    pub date_of_leaving: String,
    pub last_working_date: String,
    pub reason: String,
    pub type_of_leave: String,
    pub mobile_no: String,
    pub working_days: String,
    pub amount: String,
}

/// Records a leave: LEAVING insert plus the JOINING stamps.
pub async fn submit(
    client: &SheetsClient,
    employee: &Record,
    form: &LeavingForm,
    now: DateTime<Utc>,
) -> Result<()> {
    validate::require_fields(&[
        ("Date of leaving", &form.date_of_leaving),
        ("Last working date", &form.last_working_date),
        ("Reason", &form.reason),
        ("Type of leave", &form.type_of_leave),
    ])?;

    let timestamp = dates::sheet_timestamp(now);
    let leaving_date = dates::format_display_date(&form.date_of_leaving);
    let last_working = dates::format_display_date(&form.last_working_date);

    let leaving_row = vec![
        timestamp.clone(),
        employee.trimmed("employee_code").to_string(),
        employee.trimmed("candidate_name").to_string(),
        leaving_date.clone(),
        form.mobile_no.clone(),
        form.reason.clone(),
        employee.trimmed("joining_company").to_string(),
        employee.trimmed("father_name").to_string(),
        dates::format_display_date(employee.get("date_of_joining")),
        employee.trimmed("joining_place").to_string(),
        employee.trimmed("designation").to_string(),
        employee.trimmed("department").to_string(),
    ];

    let batcher = UpdateBatcher::new(client);
    batcher
        .insert(layouts::leaving().name(), leaving_row)
        .await?;

    // Stamp the JOINING row; 1-based sheet columns.
    let schema = layouts::joining();
    let key = RowKey::new(EMPLOYEE_CODE_COLUMN, employee.trimmed("employee_code"));
    let writes = vec![
        CellWrite::new(53, timestamp),
        CellWrite::new(55, form.type_of_leave.clone()),
        CellWrite::new(56, leaving_date),
        CellWrite::new(57, form.reason.clone()),
        CellWrite::new(58, last_working),
        CellWrite::new(104, form.working_days.clone()),
        CellWrite::new(105, form.amount.clone()),
    ];
    let report = batcher
        .submit_cells(schema.name(), &key, schema.data_start_row_index(), writes)
        .await?;
    report.ensure_success()?;

    info!(
        "Recorded leaving of {} ({})",
        employee.trimmed("candidate_name"),
        employee.trimmed("employee_code")
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(row: usize, pairs: &[(&str, &str)]) -> Record {
        let fields: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Record::new(row, fields)
    }

    fn joined(row: usize, code: &str, actual: &str) -> Record {
        record(
            row,
            &[
                ("employee_code", code),
                ("leaving_planned", "01/02/2024"),
                ("leaving_actual", actual),
            ],
        )
    }

    #[test]
    fn test_employee_with_a_leaving_row_is_not_pending() {
        // The JOINING actual stamp may lag the LEAVING insert; the LEAVING
        // row alone must drop the employee from the board.
        let joining = vec![joined(7, "PMMPL-001", ""), joined(8, "PMMPL-002", "")];
        let left = vec![record(2, &[("employee_id", "PMMPL-001")])];
        let board = build_board(&joining, &left);
        assert_eq!(board.pending.len(), 1);
        assert_eq!(board.pending[0].get("employee_code"), "PMMPL-002");
    }

    #[test]
    fn test_stamped_employee_moves_to_history() {
        let joining = vec![joined(7, "PMMPL-001", "05/02/2024")];
        let board = build_board(&joining, &[]);
        assert!(board.pending.is_empty());
        assert_eq!(board.history.len(), 1);
    }
}
