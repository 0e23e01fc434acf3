//! Employee registry

use anyhow::Result;

use crate::api::SheetsClient;
use crate::projector::Record;
use crate::schema::layouts;

/// The full SIES EMPLOYEES roster.
pub async fn list(client: &SheetsClient) -> Result<Vec<Record>> {
    super::fetch_records(client, layouts::sies_employees()).await
}

/// Case-insensitive substring search over id, name, designation and mobile.
pub fn search<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|r| {
            ["employee_id", "name", "designation", "mobile_no"]
                .iter()
                .any(|field| r.get(field).to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn employee(id: &str, name: &str, designation: &str) -> Record {
        let mut fields = HashMap::new();
        fields.insert("employee_id".to_string(), id.to_string());
        fields.insert("name".to_string(), name.to_string());
        fields.insert("designation".to_string(), designation.to_string());
        fields.insert("mobile_no".to_string(), "9876543210".to_string());
        Record::new(2, fields)
    }

    #[test]
    fn test_search_matches_any_field() {
        let records = vec![
            employee("PMMPL-001", "Asha Rao", "Fitter"),
            employee("PMMPL-002", "Binod Kumar", "Welder"),
        ];
        assert_eq!(search(&records, "welder").len(), 1);
        assert_eq!(search(&records, "pmmpl").len(), 2);
        assert_eq!(search(&records, "asha").len(), 1);
        assert!(search(&records, "zzz").is_empty());
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let records = vec![employee("PMMPL-001", "Asha Rao", "Fitter")];
        assert_eq!(search(&records, "  ").len(), 1);
    }
}
