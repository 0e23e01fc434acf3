//! Recruitment indents

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::info;

use crate::api::SheetsClient;
use crate::batch::UpdateBatcher;
use crate::keys;
use crate::projector::{Record, dates};
use crate::schema::layouts;
use crate::validate;

const STATUS_COMPLETE: &str = "Complete";

/// All indents, oldest first. Completed indents are hidden unless asked for.
pub async fn list(client: &SheetsClient, include_complete: bool) -> Result<Vec<Record>> {
    let records = super::fetch_records(client, layouts::indent()).await?;
    Ok(records
        .into_iter()
        .filter(|r| include_complete || r.trimmed("status") != STATUS_COMPLETE)
        .collect())
}

pub struct NewIndent {
    pub post: String,
    pub gender: String,
    pub department: String,
    pub prefer: String,
    pub company: String,
    pub no_of_posts: String,
    pub completion_date: String,
    pub experience: String,
}

/// Creates an indent under the next free `REC-##` number and returns it.
pub async fn create(client: &SheetsClient, indent: &NewIndent, now: DateTime<Utc>) -> Result<String> {
    validate::require_fields(&[
        ("Post", &indent.post),
        ("Department", &indent.department),
        ("Number of posts", &indent.no_of_posts),
    ])?;

    let existing = super::fetch_records(client, layouts::indent()).await?;
    let number = keys::INDENT.next_key(existing.iter().map(|r| r.trimmed("indent_number")));

    UpdateBatcher::new(client)
        .insert(layouts::indent().name(), indent_row(&number, indent, now))
        .await?;
    info!("Created indent {}", number);
    Ok(number)
}

/// Row layout matches the INDENT column contract: company before
/// post/gender/prefer, department after the completion date.
fn indent_row(number: &str, indent: &NewIndent, now: DateTime<Utc>) -> Vec<String> {
    let prefer = if indent.prefer.trim().is_empty() {
        "Any".to_string()
    } else {
        indent.prefer.clone()
    };
    let experience = if prefer == "Experience" {
        indent.experience.clone()
    } else {
        String::new()
    };
    vec![
        dates::sheet_timestamp(now),
        number.to_string(),
        indent.company.clone(),
        indent.post.clone(),
        indent.gender.clone(),
        prefer,
        indent.no_of_posts.clone(),
        dates::format_display_date(&indent.completion_date),
        indent.department.clone(),
        experience,
        "Pending".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> NewIndent {
        NewIndent {
            post: "Operator".into(),
            gender: "Male".into(),
            department: "Production".into(),
            prefer: String::new(),
            company: "PMMPL".into(),
            no_of_posts: "2".into(),
            completion_date: "2024-03-15".into(),
            experience: "3 years".into(),
        }
    }

    #[test]
    fn test_indent_row_matches_sheet_column_order() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let row = indent_row("REC-07", &sample(), now);
        assert_eq!(row[1], "REC-07");
        assert_eq!(row[2], "PMMPL");
        assert_eq!(row[3], "Operator");
        assert_eq!(row[4], "Male");
        assert_eq!(row[5], "Any");
        assert_eq!(row[6], "2");
        assert_eq!(row[7], "15/03/2024");
        assert_eq!(row[8], "Production");
    }

    #[test]
    fn test_experience_kept_only_for_experience_preference() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let mut indent = sample();
        indent.prefer = "Experience".into();
        assert_eq!(indent_row("REC-07", &indent, now)[9], "3 years");
        indent.prefer = "Fresher".into();
        assert_eq!(indent_row("REC-07", &indent, now)[9], "");
    }
}
