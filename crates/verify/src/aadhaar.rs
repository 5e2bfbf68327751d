//! Aadhaar number verification.

use serde::{Deserialize, Serialize};

use crate::Source;

pub(crate) const SERVICE: &str = "UIDAI";

const KNOWN_TEST_NUMBERS: [&str; 3] = ["123456789012", "000000000000", "111111111111"];

#[derive(Debug, Clone, Serialize)]
pub struct AadhaarCheck {
    /// Masked as `****-****-NNNN`.
    pub aadhaar_number: String,
    pub is_valid: bool,
    pub status: Option<String>,
    pub last_updated: Option<String>,
    pub source: Source,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AadhaarResponse {
    #[serde(default)]
    is_valid: bool,
    status: Option<String>,
    last_updated: Option<String>,
}

pub(crate) fn from_response(masked: String, resp: AadhaarResponse) -> AadhaarCheck {
    AadhaarCheck {
        aadhaar_number: masked,
        is_valid: resp.is_valid,
        status: resp.status,
        last_updated: resp.last_updated,
        source: Source::Live,
    }
}

/// Simulated validity for a cleaned 12-digit number: rejects a single
/// repeated digit and the well-known test numbers.
pub fn is_simulated_valid(aadhaar: &str) -> bool {
    if aadhaar.len() != 12 {
        return false;
    }
    let mut chars = aadhaar.chars();
    let first = chars.next();
    let all_same = chars.all(|c| Some(c) == first);
    !all_same && !KNOWN_TEST_NUMBERS.contains(&aadhaar)
}

pub fn simulate(aadhaar: &str) -> AadhaarCheck {
    let is_valid = is_simulated_valid(aadhaar);
    AadhaarCheck {
        aadhaar_number: tathya_core::identity::mask_aadhaar(aadhaar),
        is_valid,
        status: Some(if is_valid { "Active" } else { "Invalid" }.to_string()),
        last_updated: Some("2024-01-15".to_string()),
        source: Source::Simulated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_and_test_numbers_are_invalid() {
        assert!(!is_simulated_valid("222222222222"));
        assert!(!is_simulated_valid("123456789012"));
        assert!(!is_simulated_valid("12345"));
    }

    #[test]
    fn ordinary_number_is_valid_and_masked() {
        let check = simulate("234567890123");
        assert!(check.is_valid);
        assert_eq!(check.aadhaar_number, "****-****-0123");
        assert_eq!(check.status.as_deref(), Some("Active"));
    }
}
