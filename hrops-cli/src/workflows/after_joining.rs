//! After-joining onboarding
//!
//! A joined employee is pending onboarding while the planned date is set and
//! the actual date is not. Completing onboarding mints the next `PMMPL-###`
//! employee code, stamps the JOINING row, and mirrors the issued assets into
//! the `Assets` register. The JOINING snapshot behind the board is cached in
//! memory for sixty seconds.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::info;

use crate::api::SheetsClient;
use crate::batch::{CellWrite, RowKey, SheetWriter, UpdateBatcher};
use crate::cache::SheetCache;
use crate::keys;
use crate::projector::{Record, dates};
use crate::reconcile::{BucketRule, Buckets, CrossSheetReconciler};
use crate::schema::layouts;
use crate::validate;

/// 0-based joining-serial column used for row resolution
const JOINING_KEY_COLUMN: usize = 1;

/// Pending and completed onboarding, off the cached JOINING snapshot.
pub async fn load(
    client: &SheetsClient,
    cache: &mut dyn SheetCache,
    now_ms: u64,
) -> Result<Buckets> {
    let records = super::fetch_records_cached(client, layouts::joining(), cache, now_ms).await?;
    let rule = BucketRule::new("after_joining", "planned_date", "actual");
    Ok(CrossSheetReconciler::classify(&records, &rule))
}

/// Next free employee code given the current JOINING records.
pub fn next_employee_code(records: &[Record]) -> String {
    keys::EMPLOYEE_CODE.next_key(records.iter().map(|r| r.trimmed("employee_code")))
}

/// Everything captured when onboarding completes.
#[derive(Default)]
pub struct OnboardingUpdate {
    pub employee_code: String,
    pub salary_confirmation: String,
    pub reporting_officer: String,
    pub base_address: String,
    pub punch_code: String,
    pub official_email: String,
    pub email_password: String,
    pub pf_esic: String,
    pub id_proof_copy: String,
    pub joining_letter: String,
    pub incentive_category: String,
    pub laptop_details: String,
    pub mobile_name: String,
    pub manual_image_url: String,
}

/// Stamps the JOINING row and mirrors the assets register.
///
/// The cell writes go out concurrently; a partial failure is surfaced as one
/// aggregate error with the already-applied writes left in place.
pub async fn record_onboarding<W: SheetWriter + ?Sized>(
    client: &W,
    cache: &mut dyn SheetCache,
    record: &Record,
    update: &OnboardingUpdate,
    now: DateTime<Utc>,
) -> Result<()> {
    validate::require_fields(&[
        ("Employee code", &update.employee_code),
        ("Reporting officer", &update.reporting_officer),
    ])?;
    validate::check_optional_email(&update.official_email)?;

    let schema = layouts::joining();
    let key = RowKey::new(JOINING_KEY_COLUMN, record.trimmed("joining_no"));

    let batcher = UpdateBatcher::new(client);
    let report = batcher
        .submit_cells(
            schema.name(),
            &key,
            schema.data_start_row_index(),
            onboarding_writes(update, now),
        )
        .await?;
    report.ensure_success()?;

    let assets_schema = layouts::assets();
    let assets_row = super::sparse_row(
        18,
        &[
            (0, dates::sheet_timestamp(now)),
            (1, update.employee_code.clone()),
            (2, record.trimmed("candidate_name").to_string()),
            (3, update.official_email.clone()),
            (4, update.email_password.clone()),
            (5, update.laptop_details.clone()),
            (6, update.mobile_name.clone()),
            (9, update.manual_image_url.clone()),
            (10, update.punch_code.clone()),
            (11, update.salary_confirmation.clone()),
            (12, update.reporting_officer.clone()),
            (13, update.pf_esic.clone()),
            (14, update.base_address.clone()),
            (15, update.id_proof_copy.clone()),
            (16, update.joining_letter.clone()),
            (17, update.incentive_category.clone()),
        ],
    );
    let assets_key = RowKey::new(1, update.employee_code.clone());
    batcher
        .upsert_row(
            assets_schema.name(),
            &assets_key,
            assets_schema.data_start_row_index(),
            assets_row,
        )
        .await?;

    cache.invalidate(schema.name());
    info!(
        "Onboarded {} as {}",
        record.trimmed("candidate_name"),
        update.employee_code
    );
    Ok(())
}

/// The JOINING cell stamps for one completed onboarding, 1-based columns.
///
/// Everything captured on the form lands on the JOINING row itself; the
/// assets register only mirrors it. The document URLs (columns 38-40) feed
/// the joining document listing afterwards.
fn onboarding_writes(update: &OnboardingUpdate, now: DateTime<Utc>) -> Vec<CellWrite> {
    vec![
        CellWrite::new(25, dates::sheet_datetime_minutes(now)),
        CellWrite::new(27, update.employee_code.clone()),
        CellWrite::new(28, update.salary_confirmation.clone()),
        CellWrite::new(29, update.reporting_officer.clone()),
        CellWrite::new(30, update.base_address.clone()),
        CellWrite::new(31, update.punch_code.clone()),
        CellWrite::new(32, update.official_email.clone()),
        CellWrite::new(33, update.email_password.clone()),
        CellWrite::new(37, update.pf_esic.clone()),
        CellWrite::new(38, update.id_proof_copy.clone()),
        CellWrite::new(39, update.joining_letter.clone()),
        CellWrite::new(40, update.manual_image_url.clone()),
        CellWrite::new(41, update.laptop_details.clone()),
        CellWrite::new(43, update.mobile_name.clone()),
        CellWrite::new(91, update.incentive_category.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Grid;
    use crate::cache::MemoryCache;
    use anyhow::bail;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn record(joining_no: &str, employee_code: &str) -> Record {
        let mut fields = HashMap::new();
        fields.insert("joining_no".to_string(), joining_no.to_string());
        fields.insert("employee_code".to_string(), employee_code.to_string());
        Record::new(7, fields)
    }

    #[test]
    fn test_next_employee_code_skips_gaps() {
        let records = vec![
            record("SN-001", "PMMPL-002"),
            record("SN-002", ""),
            record("SN-003", "PMMPL-009"),
        ];
        assert_eq!(next_employee_code(&records), "PMMPL-010");
    }

    #[test]
    fn test_first_employee_code() {
        assert_eq!(next_employee_code(&[]), "PMMPL-001");
    }

    struct StampWriter {
        cell_log: Mutex<Vec<(String, usize, usize, String)>>,
        upserts: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl StampWriter {
        fn new() -> Self {
            Self {
                cell_log: Mutex::new(Vec::new()),
                upserts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SheetWriter for StampWriter {
        async fn fetch_sheet(&self, sheet: &str) -> Result<Grid> {
            // Six banner/header rows, then one data row per sheet.
            let key = match sheet {
                "JOINING" => "SN-001",
                "Assets" => return Ok(vec![vec![json!("hdr")]]),
                other => bail!("unexpected sheet '{}'", other),
            };
            let mut grid: Grid = vec![vec![]; 6];
            grid.push(vec![json!(""), json!(key)]);
            Ok(grid)
        }

        async fn update_cell(
            &self,
            sheet: &str,
            row_index: usize,
            column_index: usize,
            value: &str,
        ) -> Result<()> {
            self.cell_log.lock().unwrap().push((
                sheet.to_string(),
                row_index,
                column_index,
                value.to_string(),
            ));
            Ok(())
        }

        async fn update_row(&self, _sheet: &str, _row_index: usize, _row: &[String]) -> Result<()> {
            Ok(())
        }

        async fn insert_row(&self, sheet: &str, row: &[String]) -> Result<()> {
            self.upserts
                .lock()
                .unwrap()
                .push((sheet.to_string(), row.to_vec()));
            Ok(())
        }
    }

    fn sample_update() -> OnboardingUpdate {
        OnboardingUpdate {
            employee_code: "PMMPL-004".into(),
            reporting_officer: "R. Officer".into(),
            pf_esic: "PF123 / ESIC456".into(),
            id_proof_copy: "https://drive/id-proof".into(),
            joining_letter: "https://drive/joining-letter".into(),
            manual_image_url: "https://drive/manual".into(),
            incentive_category: "Category B".into(),
            ..OnboardingUpdate::default()
        }
    }

    #[tokio::test]
    async fn test_onboarding_stamps_document_and_incentive_columns_on_joining() {
        let writer = StampWriter::new();
        let mut cache = MemoryCache::new(60_000);
        let record = record("SN-001", "");
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();

        record_onboarding(&writer, &mut cache, &record, &sample_update(), now)
            .await
            .unwrap();

        let log = writer.cell_log.lock().unwrap();
        let value_at = |column: usize| {
            log.iter()
                .find(|(sheet, _, c, _)| sheet == "JOINING" && *c == column)
                .map(|(_, _, _, v)| v.clone())
        };
        assert_eq!(value_at(37).as_deref(), Some("PF123 / ESIC456"));
        assert_eq!(value_at(38).as_deref(), Some("https://drive/id-proof"));
        assert_eq!(value_at(39).as_deref(), Some("https://drive/joining-letter"));
        assert_eq!(value_at(40).as_deref(), Some("https://drive/manual"));
        assert_eq!(value_at(91).as_deref(), Some("Category B"));
        // All stamps land on the resolved data row.
        assert!(
            log.iter()
                .filter(|(sheet, ..)| sheet == "JOINING")
                .all(|(_, row, ..)| *row == 7)
        );
    }

    #[tokio::test]
    async fn test_onboarding_still_mirrors_the_assets_register() {
        let writer = StampWriter::new();
        let mut cache = MemoryCache::new(60_000);
        let record = record("SN-001", "");
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();

        record_onboarding(&writer, &mut cache, &record, &sample_update(), now)
            .await
            .unwrap();

        let upserts = writer.upserts.lock().unwrap();
        assert_eq!(upserts.len(), 1);
        assert_eq!(upserts[0].0, "Assets");
        assert_eq!(upserts[0].1[1], "PMMPL-004");
    }
}
