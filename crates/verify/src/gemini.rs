//! Minimal Gemini `generateContent` REST client.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::Deserialize;

use crate::client::send_json;
use crate::config::VerifyConfig;
use crate::error::VerifyError;

pub(crate) const SERVICE: &str = "Gemini";

/// A file sent to the model alongside the prompt.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// A text-generation backend.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Send a prompt with optional attachments and return the model's text.
    ///
    /// When `json_output` is set the model is asked for a JSON document.
    async fn generate(
        &self,
        prompt: &str,
        attachments: &[Attachment],
        json_output: bool,
    ) -> Result<String, VerifyError>;
}

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, base_url: String, model: String, api_key: String) -> Self {
        Self {
            http,
            base_url,
            model,
            api_key,
        }
    }

    /// A client for the configured key, or `None` when no usable key is set.
    pub fn from_config(http: reqwest::Client, config: &VerifyConfig) -> Option<Self> {
        config.gemini_api_key.clone().map(|key| {
            Self::new(
                http,
                config.gemini_base_url.clone(),
                config.gemini_model.clone(),
                key,
            )
        })
    }
}

#[async_trait]
impl AiProvider for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        attachments: &[Attachment],
        json_output: bool,
    ) -> Result<String, VerifyError> {
        let request = self
            .http
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(prompt, attachments, json_output));

        let resp: GenerateResponse = send_json(SERVICE, request).await?;
        resp.text().ok_or_else(|| VerifyError::Decode {
            service: SERVICE,
            message: "response contained no text".into(),
        })
    }
}

pub(crate) fn request_body(
    prompt: &str,
    attachments: &[Attachment],
    json_output: bool,
) -> serde_json::Value {
    let mut parts: Vec<serde_json::Value> = attachments
        .iter()
        .map(|a| {
            serde_json::json!({
                "inline_data": {
                    "mime_type": a.mime_type,
                    "data": BASE64_STANDARD.encode(&a.bytes),
                }
            })
        })
        .collect();
    parts.push(serde_json::json!({ "text": prompt }));

    let mut body = serde_json::json!({ "contents": [{ "parts": parts }] });
    if json_output {
        body["generationConfig"] = serde_json::json!({ "responseMimeType": "application/json" });
    }
    body
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_puts_attachments_before_prompt() {
        let body = request_body(
            "describe",
            &[Attachment::new("image/png", vec![1, 2, 3])],
            true,
        );
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[0]["inline_data"]["data"], "AQID");
        assert_eq!(parts[1]["text"], "describe");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn plain_text_body_has_no_generation_config() {
        let body = request_body("hello", &[], false);
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn response_text_joins_parts() {
        let resp: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] } }]
        }))
        .unwrap();
        assert_eq!(resp.text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let resp: GenerateResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(resp.text().is_none());
    }

    #[test]
    fn no_key_means_no_client() {
        assert!(GeminiClient::from_config(reqwest::Client::new(), &VerifyConfig::default()).is_none());
    }
}
