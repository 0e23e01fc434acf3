//! After-leaving clearance
//!
//! Three departments clear a leaver independently, each off its own
//! planned/actual pair on the JOINING row. The boards also show the
//! employee's outstanding advance, joined in from the `Advance` sheet with
//! `"0"` when no balance row exists.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::info;

use crate::api::SheetsClient;
use crate::batch::{CellWrite, RowKey, UpdateBatcher};
use crate::projector::Record;
use crate::reconcile::{BucketRule, Buckets, CrossSheetReconciler, JoinSpec, MergeField};
use crate::schema::layouts;
use crate::validate;

/// 0-based employee-code column on JOINING used for row resolution
const EMPLOYEE_CODE_COLUMN: usize = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Department {
    Admin,
    Account,
    Store,
}

impl Department {
    pub const ALL: [Department; 3] = [Department::Admin, Department::Account, Department::Store];

    pub fn name(self) -> &'static str {
        match self {
            Department::Admin => "admin",
            Department::Account => "account",
            Department::Store => "store",
        }
    }

    fn rule(self) -> BucketRule {
        match self {
            Department::Admin => BucketRule::new("admin", "admin_planned", "admin_actual"),
            Department::Account => BucketRule::new("account", "account_planned", "account_actual"),
            Department::Store => BucketRule::new("store", "store_planned", "store_actual"),
        }
    }

    /// 1-based (actual date, summary) stamp columns on JOINING
    fn stamp_columns(self) -> (usize, usize) {
        match self {
            Department::Admin => (72, 74),
            Department::Account => (76, 78),
            Department::Store => (80, 82),
        }
    }
}

impl std::str::FromStr for Department {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Department::Admin),
            "account" => Ok(Department::Account),
            "store" => Ok(Department::Store),
            other => anyhow::bail!("Unknown department '{}'", other),
        }
    }
}

/// Per-department pending/history boards with advance balances merged in.
pub async fn load(client: &SheetsClient) -> Result<Vec<(String, Buckets)>> {
    let (joined, advances) = tokio::try_join!(
        super::fetch_records(client, layouts::joining()),
        super::fetch_records(client, layouts::advance()),
    )?;

    let spec = JoinSpec {
        primary_key: "employee_code".into(),
        secondary_key: "employee_code".into(),
        merge: vec![MergeField::numeric("closing_amount", "advance_amount")],
    };
    let merged = CrossSheetReconciler::join(&joined, &advances, &spec);

    let rules: Vec<BucketRule> = Department::ALL.iter().map(|d| d.rule()).collect();
    Ok(CrossSheetReconciler::classify_multi(&merged, &rules))
}

/// Marks one department's clearance done: actual date plus summary text.
pub async fn complete_step(
    client: &SheetsClient,
    department: Department,
    employee: &Record,
    summary: &str,
    now: DateTime<Utc>,
) -> Result<()> {
    validate::require_fields(&[("Clearance summary", summary)])?;

    let schema = layouts::joining();
    let key = RowKey::new(EMPLOYEE_CODE_COLUMN, employee.trimmed("employee_code"));
    let (actual_column, summary_column) = department.stamp_columns();
    let writes = vec![
        CellWrite::new(actual_column, now.format("%d/%m/%Y").to_string()),
        CellWrite::new(summary_column, summary.to_string()),
    ];

    let report = UpdateBatcher::new(client)
        .submit_cells(schema.name(), &key, schema.data_start_row_index(), writes)
        .await?;
    report.ensure_success()?;
    info!(
        "{} clearance recorded for {}",
        department.name(),
        employee.trimmed("employee_code")
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_columns_per_department() {
        assert_eq!(Department::Admin.stamp_columns(), (72, 74));
        assert_eq!(Department::Account.stamp_columns(), (76, 78));
        assert_eq!(Department::Store.stamp_columns(), (80, 82));
    }

    #[test]
    fn test_department_parsing() {
        assert_eq!("Admin".parse::<Department>().unwrap(), Department::Admin);
        assert_eq!("store".parse::<Department>().unwrap(), Department::Store);
        assert!("security".parse::<Department>().is_err());
    }
}
