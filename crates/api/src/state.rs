use std::sync::Arc;

use tathya_verify::{AiService, VerificationClient};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or is already a handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: tathya_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// MNRL, PAN, linkage and Aadhaar checks.
    pub verifier: Arc<VerificationClient>,
    /// Document analysis, face match, OCR, notice drafting and remarks.
    pub ai: AiService,
}
