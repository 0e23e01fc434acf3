//! Workflow key generation
//!
//! Every workflow mints its identifiers by scanning the existing key column
//! for the highest numeric suffix and adding one. Keys are never reused even
//! when rows are deleted, and malformed values in the column are skipped.
//! Two concurrent operators can still mint the same key between scan and
//! insert; the sheets carry no uniqueness constraint to catch it.

use once_cell::sync::Lazy;
use regex::Regex;

/// Employee codes: PMMPL-001, PMMPL-002, ...
pub const EMPLOYEE_CODE: KeyScheme = KeyScheme {
    prefix: "PMMPL",
    pad: 3,
};

/// Indent numbers: REC-01, REC-02, ...
pub const INDENT: KeyScheme = KeyScheme {
    prefix: "REC",
    pad: 2,
};

/// Joining serial numbers: SN-001, SN-002, ...
pub const JOINING_SERIAL: KeyScheme = KeyScheme {
    prefix: "SN",
    pad: 3,
};

static SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Z]+)-(\d+)$").unwrap());

/// A prefixed, zero-padded serial key format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyScheme {
    pub prefix: &'static str,
    pub pad: usize,
}

impl KeyScheme {
    /// Formats a key from its numeric suffix.
    pub fn format(&self, n: u64) -> String {
        format!("{}-{:0width$}", self.prefix, n, width = self.pad)
    }

    /// Extracts the numeric suffix if `value` is a key of this scheme.
    pub fn parse(&self, value: &str) -> Option<u64> {
        let caps = SUFFIX_RE.captures(value.trim())?;
        if &caps[1] != self.prefix {
            return None;
        }
        caps[2].parse().ok()
    }

    /// Next key after everything already in `existing`.
    ///
    /// Order does not matter and gaps are not reused; an empty or entirely
    /// malformed column yields the scheme's first key.
    pub fn next_key<I, S>(&self, existing: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let max = existing
            .into_iter()
            .filter_map(|v| self.parse(v.as_ref()))
            .max()
            .unwrap_or(0);
        self.format(max + 1)
    }
}
