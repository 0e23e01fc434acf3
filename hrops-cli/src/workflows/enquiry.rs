//! Enquiry call tracking
//!
//! Enquiries carry a planned/actual call stamp pair; a call is pending while
//! planned is set and actual is not, and only until any follow-up records a
//! terminal outcome (`Joining` or `Reject`). Each call outcome is appended
//! to the `Follow - Up` sheet, and a `Joining` outcome also stamps the
//! enquiry's actual-call cell. The department shown per enquiry comes from
//! the INDENT sheet, looked up by indent number.

use std::collections::HashSet;

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::info;

use crate::api::SheetsClient;
use crate::batch::{CellWrite, RowKey, UpdateBatcher};
use crate::projector::{Record, dates};
use crate::reconcile::{BucketRule, CrossSheetReconciler, JoinSpec, MergeField};
use crate::schema::layouts;
use crate::validate;

/// 1-based actual-call stamp column on ENQUIRY
const ENQUIRY_CALL_STAMP_COLUMN: usize = 27;
/// 0-based enquiry-number column used for row resolution
const ENQUIRY_KEY_COLUMN: usize = 2;

pub const STATUS_JOINING: &str = "Joining";
pub const STATUS_REJECT: &str = "Reject";

pub struct CallBoard {
    pub pending: Vec<Record>,
    pub history: Vec<Record>,
}

/// Enquiries with their latest follow-up outcome and indent department
/// merged in, split into pending and completed calls.
pub async fn load(client: &SheetsClient) -> Result<CallBoard> {
    let (enquiries, follow_ups, indents) = tokio::try_join!(
        super::fetch_records(client, layouts::enquiry()),
        super::fetch_records(client, layouts::follow_up()),
        super::fetch_records(client, layouts::indent()),
    )?;
    Ok(build_board(&enquiries, &follow_ups, &indents))
}

fn build_board(enquiries: &[Record], follow_ups: &[Record], indents: &[Record]) -> CallBoard {
    // Follow-ups append over time, so the last row per enquiry is the
    // latest outcome and wins the merge.
    let follow_spec = JoinSpec {
        primary_key: "enquiry_no".into(),
        secondary_key: "enquiry_no".into(),
        merge: vec![
            MergeField::renamed("status", "last_status"),
            MergeField::renamed("candidate_says", "last_candidate_says"),
            MergeField::renamed("next_date", "next_call_date"),
        ],
    };
    let merged = CrossSheetReconciler::join(enquiries, follow_ups, &follow_spec);

    // The enquiry's own department cell is not authoritative; the board
    // shows the department of the indent the enquiry was raised under.
    let indent_spec = JoinSpec {
        primary_key: "indent_no".into(),
        secondary_key: "indent_number".into(),
        merge: vec![MergeField::same("department")],
    };
    let merged = CrossSheetReconciler::join(&merged, indents, &indent_spec);

    let rule = BucketRule::new("call", "call_planned", "call_actual");
    let buckets = CrossSheetReconciler::classify(&merged, &rule);

    // Any terminal follow-up closes the enquiry, whether or not the
    // actual-call stamp ever landed.
    let terminal: HashSet<String> = follow_ups
        .iter()
        .filter(|r| {
            let status = r.trimmed("status");
            status == STATUS_JOINING || status == STATUS_REJECT
        })
        .map(|r| r.trimmed("enquiry_no").to_string())
        .filter(|k| !k.is_empty())
        .collect();
    let (_, pending) =
        CrossSheetReconciler::split_by_key_presence(&buckets.pending, "enquiry_no", &terminal);

    CallBoard {
        pending,
        history: buckets.history,
    }
}

/// One call outcome to record
pub struct CallLog {
    pub enquiry_no: String,
    pub indent_no: String,
    pub status: String,
    pub candidate_says: String,
    pub next_date: String,
}

/// Appends the outcome to `Follow - Up`; a `Joining` status also stamps the
/// enquiry's actual-call cell.
pub async fn log_call(client: &SheetsClient, log: &CallLog, now: DateTime<Utc>) -> Result<()> {
    validate::require_fields(&[
        ("Enquiry number", &log.enquiry_no),
        ("Status", &log.status),
        ("Candidate says", &log.candidate_says),
    ])?;

    let row = vec![
        dates::sheet_timestamp(now),
        log.indent_no.clone(),
        log.enquiry_no.clone(),
        log.status.clone(),
        log.candidate_says.clone(),
        dates::format_display_date(&log.next_date),
    ];

    let batcher = UpdateBatcher::new(client);
    batcher.insert(layouts::follow_up().name(), row).await?;
    info!("Logged call for enquiry {}: {}", log.enquiry_no, log.status);

    if log.status == STATUS_JOINING {
        let schema = layouts::enquiry();
        let report = batcher
            .submit_cells(
                schema.name(),
                &RowKey::new(ENQUIRY_KEY_COLUMN, log.enquiry_no.clone()),
                schema.data_start_row_index(),
                vec![CellWrite::new(ENQUIRY_CALL_STAMP_COLUMN, String::new())],
            )
            .await?;
        report.ensure_success()?;
    }
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

    fn enquiry(row: usize, no: &str, indent: &str) -> Record {
        record(
            row,
            &[
                ("enquiry_no", no),
                ("indent_no", indent),
                ("call_planned", "01/02/2024"),
                ("call_actual", ""),
            ],
        )
    }

    fn follow_up(row: usize, no: &str, status: &str) -> Record {
        record(row, &[("enquiry_no", no), ("status", status)])
    }

    #[test]
    fn test_rejected_enquiry_is_not_pending() {
        let enquiries = vec![enquiry(7, "ENQ-1", "REC-01")];
        let follow_ups = vec![follow_up(2, "ENQ-1", STATUS_REJECT)];
        let board = build_board(&enquiries, &follow_ups, &[]);
        assert!(board.pending.is_empty());
    }

    #[test]
    fn test_joining_logged_enquiry_is_not_pending_even_without_stamp() {
        // The actual-call stamp is written as an empty value; the terminal
        // follow-up alone must close the enquiry.
        let enquiries = vec![enquiry(7, "ENQ-1", "REC-01")];
        let follow_ups = vec![follow_up(2, "ENQ-1", STATUS_JOINING)];
        let board = build_board(&enquiries, &follow_ups, &[]);
        assert!(board.pending.is_empty());
    }

    #[test]
    fn test_any_terminal_follow_up_closes_not_just_the_latest() {
        let enquiries = vec![enquiry(7, "ENQ-1", "REC-01")];
        let follow_ups = vec![
            follow_up(2, "ENQ-1", STATUS_REJECT),
            follow_up(3, "ENQ-1", "Call Back"),
        ];
        let board = build_board(&enquiries, &follow_ups, &[]);
        assert!(board.pending.is_empty());
    }

    #[test]
    fn test_open_enquiry_stays_pending_with_latest_status() {
        let enquiries = vec![enquiry(7, "ENQ-1", "REC-01")];
        let follow_ups = vec![
            follow_up(2, "ENQ-1", "No Answer"),
            follow_up(3, "ENQ-1", "Call Back"),
        ];
        let board = build_board(&enquiries, &follow_ups, &[]);
        assert_eq!(board.pending.len(), 1);
        assert_eq!(board.pending[0].get("last_status"), "Call Back");
    }

    #[test]
    fn test_department_comes_from_the_indent() {
        let mut enq = enquiry(7, "ENQ-1", "REC-03");
        enq.set("department", "stale enquiry value");
        let indents = vec![record(
            7,
            &[("indent_number", "REC-03"), ("department", "Production")],
        )];
        let board = build_board(&[enq], &[], &indents);
        assert_eq!(board.pending[0].get("department"), "Production");
    }

    #[test]
    fn test_log_requires_status_and_notes() {
        let log = CallLog {
            enquiry_no: "ENQ-1".into(),
            indent_no: "REC-01".into(),
            status: String::new(),
            candidate_says: "call back".into(),
            next_date: String::new(),
        };
        let err = validate::require_fields(&[
            ("Enquiry number", &log.enquiry_no),
            ("Status", &log.status),
            ("Candidate says", &log.candidate_says),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("Status"));
    }
}
