//! PAN verification and PAN-Aadhaar linkage status.

use serde::{Deserialize, Serialize};

use crate::{pick, Source};

pub(crate) const PAN_SERVICE: &str = "PAN";
pub(crate) const LINK_SERVICE: &str = "PAN-Aadhaar linkage";

const INVALID_PREFIXES: [&str; 3] = ["AAAAA", "BBBBB", "XXXXX"];
const INVALID_SUFFIXES: [&str; 2] = ["0000A", "9999Z"];
const UNLINKED_PAN_PREFIXES: [&str; 2] = ["AAAAA", "BBBBB"];
const UNLINKED_AADHAAR_PREFIXES: [&str; 2] = ["111111", "000000"];

// ---------------------------------------------------------------------------
// PAN
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct PanCheck {
    pub pan_number: String,
    pub is_valid: bool,
    pub name: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub aadhaar_linked: bool,
    pub last_updated: Option<String>,
    pub source: Source,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PanResponse {
    #[serde(default)]
    is_valid: bool,
    name: Option<String>,
    status: Option<String>,
    category: Option<String>,
    #[serde(default)]
    aadhaar_linked: bool,
    last_updated: Option<String>,
}

pub(crate) fn pan_from_response(pan: String, resp: PanResponse) -> PanCheck {
    PanCheck {
        pan_number: pan,
        is_valid: resp.is_valid,
        name: resp.name,
        status: resp.status,
        category: resp.category,
        aadhaar_linked: resp.aadhaar_linked,
        last_updated: resp.last_updated,
        source: Source::Live,
    }
}

pub fn is_simulated_valid_pan(pan: &str) -> bool {
    !(INVALID_PREFIXES.iter().any(|p| pan.starts_with(p))
        || INVALID_SUFFIXES.iter().any(|s| pan.ends_with(s)))
}

/// Simulated PAN lookup for a normalised, well-formed PAN.
pub fn simulate_pan(pan: &str) -> PanCheck {
    let is_valid = is_simulated_valid_pan(pan);
    let names = ["RAJESH KUMAR", "PRIYA SHARMA", "AMIT GUPTA", "SUNITA VERMA"];
    PanCheck {
        pan_number: pan.to_string(),
        is_valid,
        name: is_valid.then(|| pick(pan, &names).to_string()),
        status: Some(if is_valid { "Active" } else { "Invalid" }.to_string()),
        category: is_valid.then(|| "Individual".to_string()),
        aadhaar_linked: is_valid && pan.bytes().map(u32::from).sum::<u32>() % 2 == 0,
        last_updated: Some("2024-01-15".to_string()),
        source: Source::Simulated,
    }
}

// ---------------------------------------------------------------------------
// Linkage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LinkageCheck {
    pub pan_number: String,
    /// Masked as `****-****-NNNN`.
    pub aadhaar_number: String,
    pub is_linked: bool,
    pub link_date: Option<String>,
    pub name_match: bool,
    pub dob_match: bool,
    pub status: Option<String>,
    pub source: Source,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LinkageResponse {
    #[serde(default)]
    is_linked: bool,
    link_date: Option<String>,
    #[serde(default)]
    name_match: bool,
    #[serde(default)]
    dob_match: bool,
    status: Option<String>,
}

pub(crate) fn linkage_from_response(
    pan: String,
    masked_aadhaar: String,
    resp: LinkageResponse,
) -> LinkageCheck {
    LinkageCheck {
        pan_number: pan,
        aadhaar_number: masked_aadhaar,
        is_linked: resp.is_linked,
        link_date: resp.link_date,
        name_match: resp.name_match,
        dob_match: resp.dob_match,
        status: resp.status,
        source: Source::Live,
    }
}

pub fn is_simulated_linked(pan: &str, aadhaar: &str) -> bool {
    !(UNLINKED_PAN_PREFIXES.iter().any(|p| pan.starts_with(p))
        || UNLINKED_AADHAAR_PREFIXES.iter().any(|p| aadhaar.starts_with(p)))
}

/// Simulated linkage status for a normalised PAN and cleaned Aadhaar.
pub fn simulate_linkage(pan: &str, aadhaar: &str) -> LinkageCheck {
    let is_linked = is_simulated_linked(pan, aadhaar);
    LinkageCheck {
        pan_number: pan.to_string(),
        aadhaar_number: tathya_core::identity::mask_aadhaar(aadhaar),
        is_linked,
        link_date: is_linked.then(|| "2023-08-15".to_string()),
        name_match: is_linked,
        dob_match: is_linked,
        status: Some(if is_linked { "Linked" } else { "Not Linked" }.to_string()),
        source: Source::Simulated,
    }
}
