//! API keys and endpoints for the verification integrations.
//!
//! | Variable              | Default                                        |
//! |-----------------------|------------------------------------------------|
//! | `MNRL_API_KEY`        | unset (simulated)                              |
//! | `PAN_API_KEY`         | unset (simulated)                              |
//! | `PAN_AADHAAR_API_KEY` | unset (simulated)                              |
//! | `AADHAAR_API_KEY`     | unset (simulated)                              |
//! | `GEMINI_API_KEY`      | unset (simulated)                              |
//! | `MNRL_BASE_URL`       | `https://mnrl.trai.gov.in`                     |
//! | `PAN_BASE_URL`        | `https://api.income-tax.gov.in`                |
//! | `UIDAI_BASE_URL`      | `https://api.uidai.gov.in`                     |
//! | `GEMINI_BASE_URL`     | `https://generativelanguage.googleapis.com`    |
//! | `GEMINI_MODEL`        | `gemini-2.5-flash`                             |
//!
//! A key that is empty or equal to `demo_key` counts as unset.

pub const DEMO_KEY: &str = "demo_key";

pub const DEFAULT_MNRL_BASE_URL: &str = "https://mnrl.trai.gov.in";
pub const DEFAULT_PAN_BASE_URL: &str = "https://api.income-tax.gov.in";
pub const DEFAULT_UIDAI_BASE_URL: &str = "https://api.uidai.gov.in";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone)]
pub struct VerifyConfig {
    pub mnrl_api_key: Option<String>,
    pub pan_api_key: Option<String>,
    pub pan_aadhaar_api_key: Option<String>,
    pub aadhaar_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub mnrl_base_url: String,
    pub pan_base_url: String,
    pub uidai_base_url: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
}

impl Default for VerifyConfig {
    /// No keys: every check is simulated.
    fn default() -> Self {
        Self {
            mnrl_api_key: None,
            pan_api_key: None,
            pan_aadhaar_api_key: None,
            aadhaar_api_key: None,
            gemini_api_key: None,
            mnrl_base_url: DEFAULT_MNRL_BASE_URL.to_string(),
            pan_base_url: DEFAULT_PAN_BASE_URL.to_string(),
            uidai_base_url: DEFAULT_UIDAI_BASE_URL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }
}

impl VerifyConfig {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let key = |name: &str| usable_key(std::env::var(name).ok());
        let url = |name: &str, default: &str| {
            std::env::var(name)
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            mnrl_api_key: key("MNRL_API_KEY"),
            pan_api_key: key("PAN_API_KEY"),
            pan_aadhaar_api_key: key("PAN_AADHAAR_API_KEY"),
            aadhaar_api_key: key("AADHAAR_API_KEY"),
            gemini_api_key: key("GEMINI_API_KEY"),
            mnrl_base_url: url("MNRL_BASE_URL", DEFAULT_MNRL_BASE_URL),
            pan_base_url: url("PAN_BASE_URL", DEFAULT_PAN_BASE_URL),
            uidai_base_url: url("UIDAI_BASE_URL", DEFAULT_UIDAI_BASE_URL),
            gemini_base_url: url("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            gemini_model: url("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
        }
    }
}

/// Keep a key only if it is a real credential.
pub fn usable_key(raw: Option<String>) -> Option<String> {
    raw.map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty() && k != DEMO_KEY)
}
