//! Form-level input validation shared by the submission commands.

use anyhow::{Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;

static MOBILE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Collects every missing required field and reports them together.
pub fn require_fields(fields: &[(&str, &str)]) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        bail!("Missing required fields: {}", missing.join(", "));
    }
    Ok(())
}

/// Mobile numbers are exactly ten digits, no separators.
pub fn check_mobile(value: &str) -> Result<()> {
    if !MOBILE_RE.is_match(value.trim()) {
        bail!("Invalid mobile number '{}': expected exactly 10 digits", value);
    }
    Ok(())
}

/// Empty email is allowed; a present one must look like an address.
pub fn check_optional_email(value: &str) -> Result<()> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && !EMAIL_RE.is_match(trimmed) {
        bail!("Invalid email address '{}'", value);
    }
    Ok(())
}
