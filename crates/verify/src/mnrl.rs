//! Mobile Number Revocation List (MNRL) check.

use serde::{Deserialize, Serialize};

use crate::{pick, Source};

pub(crate) const SERVICE: &str = "MNRL";

/// Prefixes the simulator treats as revoked.
const REVOKED_PREFIXES: [&str; 3] = ["98765", "91234", "99999"];
const KNOWN_TEST_NUMBERS: [&str; 3] = ["9876543210", "1234567890", "0000000000"];

#[derive(Debug, Clone, Serialize)]
pub struct MobileCheck {
    pub mobile_number: String,
    pub is_revoked: bool,
    pub risk_level: &'static str,
    pub last_complaint_date: Option<String>,
    pub complaint_count: i64,
    pub operator: Option<String>,
    pub circle: Option<String>,
    pub registration_date: Option<String>,
    pub customer_name: Option<String>,
    pub kyc_status: Option<String>,
    pub source: Source,
}

/// Registry response body. Field names vary between deployments, so both
/// spellings are accepted.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MnrlResponse {
    status: Option<String>,
    #[serde(default)]
    is_blocked: bool,
    last_complaint_date: Option<String>,
    #[serde(default)]
    complaint_count: i64,
    operator: Option<String>,
    service_provider: Option<String>,
    circle: Option<String>,
    telecom_circle: Option<String>,
    registration_date: Option<String>,
    customer_name: Option<String>,
    kyc_status: Option<String>,
}

fn risk_level(revoked: bool) -> &'static str {
    if revoked {
        "High"
    } else {
        "Low"
    }
}

pub(crate) fn from_response(mobile: String, resp: MnrlResponse) -> MobileCheck {
    let is_revoked = resp.status.as_deref() == Some("REVOKED") || resp.is_blocked;
    MobileCheck {
        mobile_number: mobile,
        is_revoked,
        risk_level: risk_level(is_revoked),
        last_complaint_date: resp.last_complaint_date,
        complaint_count: resp.complaint_count,
        operator: resp.operator.or(resp.service_provider),
        circle: resp.circle.or(resp.telecom_circle),
        registration_date: resp.registration_date,
        customer_name: resp.customer_name,
        kyc_status: resp.kyc_status,
        source: Source::Live,
    }
}

/// Simulated revocation rule for a normalised 10-digit number.
pub fn is_simulated_revoked(mobile: &str) -> bool {
    let distinct = {
        let mut digits: Vec<char> = mobile.chars().collect();
        digits.sort_unstable();
        digits.dedup();
        digits.len()
    };
    REVOKED_PREFIXES.iter().any(|p| mobile.starts_with(p))
        || distinct <= 3
        || KNOWN_TEST_NUMBERS.contains(&mobile)
}

pub fn simulate(mobile: &str) -> MobileCheck {
    let is_revoked = is_simulated_revoked(mobile);
    let digit_sum: i64 = mobile
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(i64::from)
        .sum();
    MobileCheck {
        mobile_number: mobile.to_string(),
        is_revoked,
        risk_level: risk_level(is_revoked),
        last_complaint_date: is_revoked.then(|| "2024-01-15".to_string()),
        complaint_count: if is_revoked { 3 + digit_sum % 6 } else { 0 },
        operator: Some(pick(mobile, &["Airtel", "Jio", "VI", "BSNL"]).to_string()),
        circle: Some(pick(mobile, &["Delhi", "Mumbai", "Karnataka", "UP"]).to_string()),
        registration_date: None,
        customer_name: None,
        kyc_status: None,
        source: Source::Simulated,
    }
}
