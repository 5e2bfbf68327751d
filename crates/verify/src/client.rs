//! HTTP client for the government verification registries.
//!
//! One [`VerificationClient`] serves all four checks. Each method validates
//! and normalises its input, then either calls the registry (when the
//! relevant key is configured) or returns the deterministic simulation.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tathya_core::identity;

use crate::aadhaar::{self, AadhaarCheck, AadhaarResponse};
use crate::config::VerifyConfig;
use crate::error::VerifyError;
use crate::mnrl::{self, MnrlResponse, MobileCheck};
use crate::pan::{self, LinkageCheck, LinkageResponse, PanCheck, PanResponse};

/// Per-request timeout for registry calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct VerificationClient {
    http: reqwest::Client,
    config: VerifyConfig,
}

impl VerificationClient {
    /// Build a client with its own connection pool.
    pub fn new(config: VerifyConfig) -> Result<Self, VerifyError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| VerifyError::Request {
                service: "http client",
                source,
            })?;
        Ok(Self { http, config })
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, config: VerifyConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &VerifyConfig {
        &self.config
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ---- checks ----

    /// Look a mobile number up in the revocation list.
    pub async fn check_mobile(&self, raw: &str) -> Result<MobileCheck, VerifyError> {
        let mobile = identity::normalize_mobile(raw).ok_or_else(|| {
            VerifyError::InvalidInput("Mobile number must have 10 digits".into())
        })?;

        let Some(key) = self.config.mnrl_api_key.as_deref() else {
            return Ok(mnrl::simulate(&mobile));
        };

        let request = self
            .http
            .get(format!(
                "{}/api/mnrl/status/{}",
                self.config.mnrl_base_url, mobile
            ))
            .header("X-API-Key", key);
        let resp: MnrlResponse = send_json(mnrl::SERVICE, request).await?;
        Ok(mnrl::from_response(mobile, resp))
    }

    pub async fn verify_pan(&self, raw: &str) -> Result<PanCheck, VerifyError> {
        let pan_number = checked_pan(raw)?;

        let Some(key) = self.config.pan_api_key.as_deref() else {
            return Ok(pan::simulate_pan(&pan_number));
        };

        let request = self
            .http
            .post(format!("{}/pan/verify", self.config.pan_base_url))
            .bearer_auth(key)
            .json(&serde_json::json!({
                "pan_number": pan_number,
                "consent": "Y",
            }));
        let resp: PanResponse = send_json(pan::PAN_SERVICE, request).await?;
        Ok(pan::pan_from_response(pan_number, resp))
    }

    /// PAN-Aadhaar linkage status. The Aadhaar number only ever leaves
    /// this method masked.
    pub async fn check_linkage(
        &self,
        raw_pan: &str,
        raw_aadhaar: &str,
    ) -> Result<LinkageCheck, VerifyError> {
        let pan_number = checked_pan(raw_pan)?;
        let aadhaar_number = checked_aadhaar(raw_aadhaar)?;

        let Some(key) = self.config.pan_aadhaar_api_key.as_deref() else {
            return Ok(pan::simulate_linkage(&pan_number, &aadhaar_number));
        };

        let request = self
            .http
            .post(format!(
                "{}/pan-aadhaar/link-status",
                self.config.pan_base_url
            ))
            .bearer_auth(key)
            .json(&serde_json::json!({
                "pan_number": pan_number,
                "aadhaar_number": aadhaar_number,
                "consent": "Y",
            }));
        let resp: LinkageResponse = send_json(pan::LINK_SERVICE, request).await?;
        Ok(pan::linkage_from_response(
            pan_number,
            identity::mask_aadhaar(&aadhaar_number),
            resp,
        ))
    }

    pub async fn verify_aadhaar(&self, raw: &str) -> Result<AadhaarCheck, VerifyError> {
        let aadhaar_number = checked_aadhaar(raw)?;

        let Some(key) = self.config.aadhaar_api_key.as_deref() else {
            return Ok(aadhaar::simulate(&aadhaar_number));
        };

        let request = self
            .http
            .post(format!("{}/aadhaar/verify", self.config.uidai_base_url))
            .bearer_auth(key)
            .json(&serde_json::json!({
                "aadhaar_number": aadhaar_number,
                "consent": "Y",
            }));
        let resp: AadhaarResponse = send_json(aadhaar::SERVICE, request).await?;
        Ok(aadhaar::from_response(
            identity::mask_aadhaar(&aadhaar_number),
            resp,
        ))
    }
}

// ---- private helpers ----

fn checked_pan(raw: &str) -> Result<String, VerifyError> {
    let pan_number = identity::normalize_pan(raw);
    if identity::is_valid_pan_format(&pan_number) {
        Ok(pan_number)
    } else {
        Err(VerifyError::InvalidInput(
            "Invalid PAN format. Expected format: AAAAA9999A".into(),
        ))
    }
}

fn checked_aadhaar(raw: &str) -> Result<String, VerifyError> {
    let aadhaar_number = identity::clean_aadhaar(raw);
    if identity::is_valid_aadhaar_format(&aadhaar_number) {
        Ok(aadhaar_number)
    } else {
        Err(VerifyError::InvalidInput(
            "Aadhaar number must have 12 digits".into(),
        ))
    }
}

/// Send a request, require a 2xx status, and decode the JSON body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    service: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<T, VerifyError> {
    let response = request
        .send()
        .await
        .map_err(|source| VerifyError::Request { service, source })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(service, status = status.as_u16(), "Verification service returned an error");
        return Err(VerifyError::HttpStatus {
            service,
            status: status.as_u16(),
        });
    }

    response.json::<T>().await.map_err(|e| VerifyError::Decode {
        service,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Source;
    use assert_matches::assert_matches;

    fn simulated() -> VerificationClient {
        VerificationClient::with_client(reqwest::Client::new(), VerifyConfig::default())
    }

    #[tokio::test]
    async fn mobile_with_country_code_is_normalised() {
        let check = simulated().check_mobile("+91 98450-12367").await.unwrap();
        assert_eq!(check.mobile_number, "9845012367");
        assert_eq!(check.source, Source::Simulated);
    }

    #[tokio::test]
    async fn short_mobile_is_rejected() {
        let err = simulated().check_mobile("12345").await.unwrap_err();
        assert_matches!(err, VerifyError::InvalidInput(_));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn lowercase_pan_is_accepted() {
        let check = simulated().verify_pan("abcde1234f").await.unwrap();
        assert_eq!(check.pan_number, "ABCDE1234F");
        assert!(check.is_valid);
    }

    #[tokio::test]
    async fn malformed_pan_is_rejected() {
        assert_matches!(
            simulated().verify_pan("ABC123").await,
            Err(VerifyError::InvalidInput(_))
        );
    }

    #[tokio::test]
    async fn linkage_masks_aadhaar() {
        let check = simulated()
            .check_linkage("ABCDE1234F", "2345 6789 0123")
            .await
            .unwrap();
        assert_eq!(check.aadhaar_number, "****-****-0123");
    }

    #[tokio::test]
    async fn unreachable_registry_is_an_error_not_a_simulation() {
        let config = VerifyConfig {
            mnrl_api_key: Some("real-key".into()),
            mnrl_base_url: "http://127.0.0.1:9".into(),
            ..VerifyConfig::default()
        };
        let client = VerificationClient::new(config).unwrap();
        let err = client.check_mobile("9845012367").await.unwrap_err();
        assert_matches!(err, VerifyError::Request { service: "MNRL", .. });
    }
}
