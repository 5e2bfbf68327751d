//! Case identifier generation.
//!
//! Format: `CASE` + `YYYYMMDD` (UTC) + 6 uppercase hex characters, e.g.
//! `CASE20250728CE806A`.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

static CASE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^CASE[0-9]{8}[0-9A-F]{6}$").expect("valid regex"));

/// Generate a new case id for the current date.
pub fn generate_case_id() -> String {
    generate_case_id_at(Utc::now())
}

/// Generate a case id for the given instant.
pub fn generate_case_id_at(at: DateTime<Utc>) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string()[..6].to_uppercase();
    format!("CASE{}{suffix}", at.format("%Y%m%d"))
}

/// Whether `value` looks like a generated case id.
pub fn is_generated_case_id(value: &str) -> bool {
    CASE_ID_RE.is_match(value)
}
