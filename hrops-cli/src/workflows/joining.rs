//! Joining pipeline
//!
//! An enquiry becomes joinable once its latest follow-up says `Joining`; it
//! stays pending until a JOINING row carries its enquiry number, at which
//! point the joined record (with the previous-company document block) is the
//! history entry. The three-sheet snapshot behind this view is expensive, so
//! it is cached for five minutes in the persistent cache.

use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{info, warn};

use crate::api::{DocumentRef, SheetsClient};
use crate::batch::UpdateBatcher;
use crate::cache::SheetCache;
use crate::keys;
use crate::projector::{Record, dates};
use crate::reconcile::{CrossSheetReconciler, JoinSpec, MergeField};
use crate::schema::layouts;
use crate::validate;
use crate::workflows::enquiry::STATUS_JOINING;

pub struct JoiningBoard {
    /// Confirmed enquiries with no JOINING row yet
    pub pending: Vec<Record>,
    /// Everyone who joined
    pub history: Vec<Record>,
}

/// Builds the joining board from ENQUIRY, `Follow - Up` and JOINING.
///
/// All three grids go through `cache`; pass the persistent cache with the
/// five-minute TTL.
pub async fn load(
    client: &SheetsClient,
    cache: &mut dyn SheetCache,
    now_ms: u64,
) -> Result<JoiningBoard> {
    let enquiries = super::fetch_records_cached(client, layouts::enquiry(), cache, now_ms).await?;
    let follow_ups =
        super::fetch_records_cached(client, layouts::follow_up(), cache, now_ms).await?;
    let joined = super::fetch_records_cached(client, layouts::joining(), cache, now_ms).await?;

    let spec = JoinSpec {
        primary_key: "enquiry_no".into(),
        secondary_key: "enquiry_no".into(),
        merge: vec![MergeField::renamed("status", "last_status")],
    };
    let merged = CrossSheetReconciler::join(&enquiries, &follow_ups, &spec);
    let confirmed: Vec<Record> = merged
        .into_iter()
        .filter(|r| r.trimmed("last_status") == STATUS_JOINING)
        .collect();

    let joined_keys = CrossSheetReconciler::key_set(&joined, "enquiry_no");
    let (_, pending) =
        CrossSheetReconciler::split_by_key_presence(&confirmed, "enquiry_no", &joined_keys);

    Ok(JoiningBoard {
        pending,
        history: joined,
    })
}

/// One file to push to Drive during a joining submission.
pub struct FileUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Uploads every file concurrently, returning one URL per input in order.
///
/// A failed upload degrades that slot to an empty string rather than failing
/// the whole submission; the gap stays visible in the sheet.
pub async fn upload_documents(
    client: &SheetsClient,
    folder_id: &str,
    uploads: &[FileUpload],
) -> Vec<String> {
    let futures = uploads.iter().map(|upload| {
        client.upload_file(
            &upload.file_name,
            &upload.mime_type,
            folder_id,
            &upload.bytes,
        )
    });
    join_all(futures)
        .await
        .into_iter()
        .zip(uploads)
        .map(|(result, upload)| match result {
            Ok(url) => url,
            Err(e) => {
                warn!("Upload of '{}' failed: {:#}", upload.file_name, e);
                String::new()
            }
        })
        .collect()
}

/// The joining form; URL fields are filled from [`upload_documents`].
/// Deserializable so the CLI can read a filled form from a TOML file.
#[derive(Default, serde::Deserialize)]
#[serde(default)]
pub struct JoiningForm {
    pub name: String,
    pub father_name: String,
    pub date_of_joining: String,
    pub designation: String,
    pub department: String,
    pub mobile_no: String,
    pub family_mobile_no: String,
    pub relation_with_family: String,
    pub current_address: String,
    pub dob: String,
    pub gender: String,
    pub account_no: String,
    pub ifsc_code: String,
    pub branch_name: String,
    pub email: String,
    pub qualification: String,
    pub salary: String,
    pub aadhar_no: String,
    pub joining_company: String,
    pub joining_place: String,
    pub enquiry_no: String,
    pub blood_group: String,
    pub identification_marks: String,
    pub attendance_mode: String,
    pub aadhar_photo_url: String,
    pub candidate_photo_url: String,
    pub passbook_photo_url: String,
}

/// Appends a JOINING row under the next `SN-###` serial and returns it.
/// The affected sheet is dropped from the cache so the board reloads fresh.
pub async fn submit(
    client: &SheetsClient,
    cache: &mut dyn SheetCache,
    form: &JoiningForm,
    now: DateTime<Utc>,
) -> Result<String> {
    validate::require_fields(&[
        ("Name", &form.name),
        ("Date of joining", &form.date_of_joining),
        ("Designation", &form.designation),
        ("Mobile number", &form.mobile_no),
    ])?;
    validate::check_mobile(&form.mobile_no)?;
    validate::check_optional_email(&form.email)?;

    let schema = layouts::joining();
    let existing = super::fetch_records(client, layouts::joining()).await?;
    let serial = keys::JOINING_SERIAL.next_key(existing.iter().map(|r| r.trimmed("joining_no")));

    let joining_date = dates::format_display_date(&form.date_of_joining);
    let row = super::sparse_row(
        95,
        &[
            (0, dates::sheet_timestamp(now)),
            (1, serial.clone()),
            (2, form.name.clone()),
            (3, form.father_name.clone()),
            (4, joining_date.clone()),
            (5, form.designation.clone()),
            (6, form.aadhar_photo_url.clone()),
            (7, form.candidate_photo_url.clone()),
            (8, form.current_address.clone()),
            (9, dates::format_display_date(&form.dob)),
            (10, form.gender.clone()),
            (11, form.mobile_no.clone()),
            (12, form.family_mobile_no.clone()),
            (13, form.relation_with_family.clone()),
            (14, form.account_no.clone()),
            (15, form.ifsc_code.clone()),
            (16, form.branch_name.clone()),
            (17, form.passbook_photo_url.clone()),
            (18, form.email.clone()),
            (19, form.qualification.clone()),
            (20, form.department.clone()),
            (21, form.salary.clone()),
            (22, form.aadhar_no.clone()),
            // Joining seeds the after-joining planned date.
            (23, joining_date),
            (35, form.joining_company.clone()),
            (39, form.joining_place.clone()),
            (89, form.enquiry_no.clone()),
            (92, form.blood_group.clone()),
            (93, form.identification_marks.clone()),
            (94, form.attendance_mode.clone()),
        ],
    );

    UpdateBatcher::new(client).insert(schema.name(), row).await?;
    cache.invalidate(schema.name());
    info!("Submitted joining {} for {}", serial, form.name);
    Ok(serial)
}

/// Emails a joined candidate's documents to a recipient.
pub async fn share_documents(
    client: &SheetsClient,
    recipient: &str,
    record: &Record,
) -> Result<()> {
    validate::require_fields(&[("Recipient email", recipient)])?;
    validate::check_optional_email(recipient)?;

    let documents = document_refs(record);
    let subject = format!(
        "Documents: {} ({})",
        record.trimmed("candidate_name"),
        record.trimmed("joining_no")
    );
    let message = format!(
        "Please find attached the joining documents of {}.",
        record.trimmed("candidate_name")
    );
    client
        .share_via_email(recipient, &subject, &message, &documents)
        .await
}

/// Collects the record's non-empty document URLs as share payload entries.
pub fn document_refs(record: &Record) -> Vec<DocumentRef> {
    const DOCUMENT_FIELDS: &[(&str, &str)] = &[
        ("aadhar_photo", "Aadhar Card"),
        ("candidate_photo", "Photo"),
        ("passbook_photo", "Bank Passbook"),
        ("id_proof_copy", "ID Proof"),
        ("joining_letter", "Joining Letter"),
        ("offer_letter", "Offer Letter"),
        ("increment_letter", "Increment Letter"),
        ("pay_slip", "Pay Slip"),
        ("resignation_letter", "Resignation Letter"),
        ("interview_assessment_sheet", "Interview Assessment"),
    ];

    DOCUMENT_FIELDS
        .iter()
        .filter(|(field, _)| !record.is_blank(field))
        .map(|(field, label)| DocumentRef {
            name: record.trimmed("candidate_name").to_string(),
            serial_no: record.trimmed("joining_no").to_string(),
            document_type: label.to_string(),
            category: record.trimmed("department").to_string(),
            image_url: record.trimmed(field).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(fields: &[(&str, &str)]) -> Record {
        let map: HashMap<String, String> = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Record::new(7, map)
    }

    #[test]
    fn test_document_refs_skip_blank_urls() {
        let rec = record(&[
            ("candidate_name", "A. Worker"),
            ("joining_no", "SN-004"),
            ("department", "Production"),
            ("aadhar_photo", "https://drive.google.com/file/d/x/view"),
            ("candidate_photo", ""),
            ("pay_slip", "  "),
        ]);
        let docs = document_refs(&rec);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].document_type, "Aadhar Card");
        assert_eq!(docs[0].serial_no, "SN-004");
    }
}
