//! External verification integrations: MNRL mobile revocation, PAN,
//! PAN-Aadhaar linkage, Aadhaar, and the Gemini AI client.
//!
//! Each check talks to its registry only when a real API key is configured.
//! Without one it returns a deterministic simulated result tagged
//! [`Source::Simulated`]. A configured key whose call fails yields a
//! [`VerifyError`]; it never falls back to simulated data.

pub mod aadhaar;
pub mod ai;
pub mod client;
pub mod config;
pub mod error;
pub mod gemini;
pub mod mnrl;
pub mod pan;

pub use ai::AiService;
pub use client::VerificationClient;
pub use config::VerifyConfig;
pub use error::VerifyError;
pub use gemini::{AiProvider, Attachment};

use serde::Serialize;

/// Where a verification result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Live,
    Simulated,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Live => "live",
            Source::Simulated => "simulated",
        }
    }
}

/// Small stable hash of a string, used to pick deterministic sample values.
pub(crate) fn pick<'a>(seed: &str, options: &[&'a str]) -> &'a str {
    let sum: usize = seed.bytes().map(usize::from).sum();
    options[sum % options.len()]
}
