//! Indian identity-number rules: PAN, Aadhaar, driving licence and mobile
//! number normalisation.
//!
//! Pure format checks only. Registry lookups live in `tathya-verify`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static PAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("valid regex"));
static AADHAAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{12}$").expect("valid regex"));
static DRIVING_LICENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[0-9]{13}$").expect("valid regex"));

// ---------------------------------------------------------------------------
// PAN
// ---------------------------------------------------------------------------

/// Uppercase and trim a PAN.
pub fn normalize_pan(pan: &str) -> String {
    pan.trim().to_uppercase()
}

/// Whether the (already normalised) PAN matches `AAAAA9999A`.
pub fn is_valid_pan_format(pan: &str) -> bool {
    PAN_RE.is_match(pan)
}

// ---------------------------------------------------------------------------
// Aadhaar
// ---------------------------------------------------------------------------

/// Strip everything except digits.
pub fn clean_aadhaar(aadhaar: &str) -> String {
    aadhaar.chars().filter(char::is_ascii_digit).collect()
}

pub fn is_valid_aadhaar_format(aadhaar: &str) -> bool {
    AADHAAR_RE.is_match(aadhaar)
}

/// `****-****-NNNN` using the last four digits.
pub fn mask_aadhaar(aadhaar: &str) -> String {
    let digits = clean_aadhaar(aadhaar);
    let tail = &digits[digits.len().saturating_sub(4)..];
    format!("****-****-{tail}")
}

// ---------------------------------------------------------------------------
// Mobile
// ---------------------------------------------------------------------------

/// Normalise a mobile number to its 10 national digits.
///
/// A leading `+91` is dropped, then every non-digit. Returns `None` when the
/// remainder is not exactly 10 digits.
pub fn normalize_mobile(mobile: &str) -> Option<String> {
    let trimmed = mobile.trim();
    let without_cc = trimmed.strip_prefix("+91").unwrap_or(trimmed);
    let digits: String = without_cc.chars().filter(char::is_ascii_digit).collect();
    (digits.len() == 10).then_some(digits)
}

// ---------------------------------------------------------------------------
// ID document format validation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdType {
    #[serde(rename = "PAN Card")]
    PanCard,
    #[serde(rename = "Aadhaar Card")]
    AadhaarCard,
    #[serde(rename = "Driving License")]
    DrivingLicense,
    #[serde(rename = "Passport")]
    Passport,
    #[serde(rename = "Voter ID")]
    VoterId,
}

impl IdType {
    pub fn label(self) -> &'static str {
        match self {
            IdType::PanCard => "PAN Card",
            IdType::AadhaarCard => "Aadhaar Card",
            IdType::DrivingLicense => "Driving License",
            IdType::Passport => "Passport",
            IdType::VoterId => "Voter ID",
        }
    }

    fn pattern(self) -> Option<&'static Regex> {
        match self {
            IdType::PanCard => Some(&PAN_RE),
            IdType::AadhaarCard => Some(&AADHAAR_RE),
            IdType::DrivingLicense => Some(&DRIVING_LICENCE_RE),
            IdType::Passport | IdType::VoterId => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IdFormatCheck {
    pub id_type: IdType,
    pub id_number: String,
    pub valid: bool,
    /// False when no format rule exists for the type.
    pub format_checked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Check an ID number against its type's format. Spaces are ignored.
pub fn validate_id_format(id_type: IdType, id_number: &str) -> IdFormatCheck {
    let compact: String = id_number.chars().filter(|c| *c != ' ').collect();
    let (valid, format_checked) = match id_type.pattern() {
        Some(re) => (re.is_match(&compact), true),
        None => (!compact.is_empty(), false),
    };
    IdFormatCheck {
        id_type,
        id_number: compact,
        valid,
        format_checked,
        error: (!valid).then(|| format!("Invalid {} format", id_type.label())),
    }
}
