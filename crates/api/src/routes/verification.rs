//! Route definitions for `/verify` and `/ai`.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::verification;
use crate::state::AppState;
use crate::upload::MAX_UPLOAD_BYTES;

/// Routes mounted at `/verify`.
///
/// ```text
/// POST /mobile       -> check_mobile
/// POST /pan          -> verify_pan
/// POST /pan-aadhaar  -> check_linkage
/// POST /aadhaar      -> verify_aadhaar
/// POST /id-format    -> validate_id_format
/// POST /document     -> analyze_document (multipart)
/// POST /face-match   -> face_match (multipart)
/// POST /ocr          -> extract_fields (multipart)
/// ```
pub fn router() -> Router<AppState> {
    let uploads = Router::new()
        .route("/document", post(verification::analyze_document))
        .route("/face-match", post(verification::face_match))
        .route("/ocr", post(verification::extract_fields))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    Router::new()
        .route("/mobile", post(verification::check_mobile))
        .route("/pan", post(verification::verify_pan))
        .route("/pan-aadhaar", post(verification::check_linkage))
        .route("/aadhaar", post(verification::verify_aadhaar))
        .route("/id-format", post(verification::validate_id_format))
        .merge(uploads)
}

/// Routes mounted at `/ai`.
///
/// ```text
/// POST /remarks  -> suggest_remarks
/// ```
pub fn ai_router() -> Router<AppState> {
    Router::new().route("/remarks", post(verification::suggest_remarks))
}
