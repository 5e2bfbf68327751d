//! Audit log action types, hash chaining and detail redaction.
//!
//! Entries are append-only. Each entry's `integrity_hash` covers its own
//! canonical content plus the previous entry's hash, so editing or removing
//! a row breaks every later hash.

use crate::hashing;

// ---------------------------------------------------------------------------
// Action type constants
// ---------------------------------------------------------------------------

/// Known action types for audit log entries.
pub mod action_types {
    pub const LOGIN: &str = "login";
    pub const LOGIN_FAILED: &str = "login_failed";
    pub const USER_CREATE: &str = "user_create";
    pub const USER_DEACTIVATE: &str = "user_deactivate";
    pub const CASE_CREATE: &str = "case_create";
    pub const CASE_UPDATE: &str = "case_update";
    pub const STATUS_CHANGE: &str = "status_change";
    pub const STATUS_OVERRIDE: &str = "status_override";
    pub const COMMENT_ADD: &str = "comment_add";
    pub const DOCUMENT_UPLOAD: &str = "document_upload";
    pub const ALLOCATION: &str = "allocation";
    pub const INVESTIGATION_FINDING: &str = "investigation_finding";
    pub const NOTICE_DRAFT: &str = "notice_draft";
    pub const NOTICE_ISSUE: &str = "notice_issue";
    pub const COMMUNICATION_SAVE: &str = "communication_save";
    pub const COMMUNICATION_EXPORT: &str = "communication_export";
    pub const REGULATORY_REPORT: &str = "regulatory_report";
    pub const REGULATORY_SUBMIT: &str = "regulatory_submit";
    pub const CASE_CLOSE: &str = "case_close";
    pub const VERIFICATION: &str = "verification";
    pub const RISK_ASSESSMENT: &str = "risk_assessment";
    pub const REPORT_EXPORT: &str = "report_export";
}

// ---------------------------------------------------------------------------
// Integrity hash computation
// ---------------------------------------------------------------------------

/// Known seed value for the first entry in the hash chain.
const CHAIN_SEED: &str = "AUDIT_LOG_CHAIN_SEED_V1";

/// Compute the SHA-256 integrity hash for an audit log entry.
///
/// `prev_hash` is the hash of the previous entry, or `None` for the first
/// entry (which chains from a fixed seed).
pub fn compute_integrity_hash(prev_hash: Option<&str>, entry_data: &str) -> String {
    let prev = prev_hash.unwrap_or(CHAIN_SEED);
    let combined = format!("{prev}|{entry_data}");
    hashing::sha256_hex(combined.as_bytes())
}

/// Canonical string for an entry's hashed content.
///
/// Both the writer and the chain verifier must build the string this way.
pub fn canonical_entry(
    timestamp: &str,
    case_id: Option<&str>,
    username: &str,
    action_type: &str,
    details_json: &str,
) -> String {
    format!(
        "{timestamp}|{}|{username}|{action_type}|{details_json}",
        case_id.unwrap_or("")
    )
}

// ---------------------------------------------------------------------------
// Sensitive field redaction
// ---------------------------------------------------------------------------

/// Key fragments whose values are redacted from audit details before storage.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "token",
    "secret",
    "api_key",
    "authorization",
    "credential",
    "aadhaar",
];

/// Redact sensitive keys from a JSON value, recursively.
pub fn redact_sensitive_fields(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let redacted = map
                .iter()
                .map(|(key, val)| {
                    let lower_key = key.to_lowercase();
                    let val = if SENSITIVE_FIELDS.iter().any(|f| lower_key.contains(f)) {
                        serde_json::Value::String("[REDACTED]".to_string())
                    } else {
                        redact_sensitive_fields(val)
                    };
                    (key.clone(), val)
                })
                .collect();
            serde_json::Value::Object(redacted)
        }
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(redact_sensitive_fields).collect())
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_entry_uses_seed() {
        let a = compute_integrity_hash(None, "entry");
        let b = compute_integrity_hash(Some(CHAIN_SEED), "entry");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn chain_depends_on_previous_hash() {
        let first = compute_integrity_hash(None, "one");
        let second = compute_integrity_hash(Some(&first), "two");
        let forged = compute_integrity_hash(Some("0000"), "two");
        assert_ne!(second, forged);
    }

    #[test]
    fn canonical_entry_is_stable() {
        let s = canonical_entry("2025-01-01T00:00:00Z", None, "admin", "login", "{}");
        assert_eq!(s, "2025-01-01T00:00:00Z||admin|login|{}");
    }

    #[test]
    fn nested_sensitive_keys_are_redacted() {
        let input = json!({
            "username": "alice",
            "password": "hunter2",
            "nested": { "API_KEY": "abc", "aadhaar_number": "234567890123" },
            "list": [{ "token": "t" }]
        });
        let out = redact_sensitive_fields(&input);
        assert_eq!(out["username"], "alice");
        assert_eq!(out["password"], "[REDACTED]");
        assert_eq!(out["nested"]["API_KEY"], "[REDACTED]");
        assert_eq!(out["nested"]["aadhaar_number"], "[REDACTED]");
        assert_eq!(out["list"][0]["token"], "[REDACTED]");
    }
}
