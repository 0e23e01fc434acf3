//! Cross-sheet reconciliation
//!
//! Workflow state is never stored: it is derived on every read by joining
//! records across sheets on a trimmed business key and classifying each
//! record off a planned/actual column pair. A record with a planned value
//! and no actual is pending; with both it is history; with neither it is in
//! no bucket at all. That last asymmetry (there is no "not yet planned"
//! bucket) is how the dashboard has always behaved and is preserved here.

use std::collections::{HashMap, HashSet};

use crate::projector::Record;

/// One secondary field copied into the primary record on a join hit
#[derive(Debug, Clone)]
pub struct MergeField {
    pub from: String,
    pub to: String,
    /// Value a primary record gets when the join misses
    pub default: String,
}

impl MergeField {
    /// Copy `name` across under the same name, defaulting to `""`.
    pub fn same(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            from: name.clone(),
            to: name,
            default: String::new(),
        }
    }

    pub fn renamed(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            default: String::new(),
        }
    }

    /// Numeric-looking fields default to `"0"` so totals render as amounts.
    pub fn numeric(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            default: "0".to_string(),
        }
    }
}

/// Declares how a secondary sheet joins onto a primary one
#[derive(Debug, Clone)]
pub struct JoinSpec {
    pub primary_key: String,
    pub secondary_key: String,
    pub merge: Vec<MergeField>,
}

/// One workflow dimension's planned/actual column pair
#[derive(Debug, Clone)]
pub struct BucketRule {
    pub dimension: String,
    pub planned: String,
    pub actual: String,
}

impl BucketRule {
    pub fn new(
        dimension: impl Into<String>,
        planned: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            dimension: dimension.into(),
            planned: planned.into(),
            actual: actual.into(),
        }
    }
}

/// Derived pending/history membership for one dimension
#[derive(Debug, Clone, Default)]
pub struct Buckets {
    pub pending: Vec<Record>,
    pub history: Vec<Record>,
}

/// Pure join/classify engine over projected records
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossSheetReconciler;

impl CrossSheetReconciler {
    /// Merge declared secondary fields into each primary record by key.
    ///
    /// Keys compare trimmed; when several secondary rows share a key the
    /// last one wins, matching how the dashboard built its lookup maps.
    /// Inputs are not mutated; only declared target fields are written.
    pub fn join(primary: &[Record], secondary: &[Record], spec: &JoinSpec) -> Vec<Record> {
        let mut lookup: HashMap<&str, &Record> = HashMap::with_capacity(secondary.len());
        for record in secondary {
            let key = record.trimmed(&spec.secondary_key);
            if !key.is_empty() {
                lookup.insert(key, record);
            }
        }

        primary
            .iter()
            .map(|record| {
                let mut merged = record.clone();
                match lookup.get(record.trimmed(&spec.primary_key)) {
                    Some(hit) => {
                        for field in &spec.merge {
                            merged.set(field.to.clone(), hit.get(&field.from));
                        }
                    }
                    None => {
                        for field in &spec.merge {
                            merged.set(field.to.clone(), field.default.clone());
                        }
                    }
                }
                merged
            })
            .collect()
    }

    /// Classify records into pending/history for one planned/actual pair.
    pub fn classify(records: &[Record], rule: &BucketRule) -> Buckets {
        let mut buckets = Buckets::default();
        for record in records {
            let planned = !record.is_blank(&rule.planned);
            let actual = !record.is_blank(&rule.actual);
            match (planned, actual) {
                (true, false) => buckets.pending.push(record.clone()),
                (true, true) => buckets.history.push(record.clone()),
                // No planned value: the record belongs to neither bucket.
                (false, _) => {}
            }
        }
        buckets
    }

    /// Independent classification per dimension; one record can be pending
    /// in one department and history in another.
    pub fn classify_multi(records: &[Record], rules: &[BucketRule]) -> Vec<(String, Buckets)> {
        rules
            .iter()
            .map(|rule| (rule.dimension.clone(), Self::classify(records, rule)))
            .collect()
    }

    /// The trimmed, non-empty values of one key field across a record set.
    pub fn key_set(records: &[Record], key_field: &str) -> HashSet<String> {
        records
            .iter()
            .map(|r| r.trimmed(key_field).to_string())
            .filter(|k| !k.is_empty())
            .collect()
    }

    /// Split records by whether their key appears in `members`
    /// (present, absent). Used where "done" means a row exists elsewhere.
    pub fn split_by_key_presence(
        records: &[Record],
        key_field: &str,
        members: &HashSet<String>,
    ) -> (Vec<Record>, Vec<Record>) {
        let mut present = Vec::new();
        let mut absent = Vec::new();
        for record in records {
            if members.contains(record.trimmed(key_field)) {
                present.push(record.clone());
            } else {
                absent.push(record.clone());
            }
        }
        (present, absent)
    }
}
