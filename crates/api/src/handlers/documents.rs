//! Evidence document upload and listing.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use tathya_core::audit::action_types;
use tathya_db::models::document::{CaseDocument, CreateDocument};
use tathya_db::repositories::DocumentRepo;

use crate::activity;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::upload::{sanitize_filename, MultipartForm};

/// POST /api/v1/cases/{case_id}/documents
///
/// Multipart form with a required `file` part and an optional
/// `document_type` text part. The file is written under
/// `{UPLOAD_DIR}/{case_id}/`.
pub async fn upload_document(
    State(state): State<AppState>,
    user: AuthUser,
    Path(case_id): Path<String>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<CaseDocument>>)> {
    let case = activity::load_case(&state.pool, &case_id).await?;
    let mut form = MultipartForm::read(multipart).await?;
    let file = form.take_file("file")?;
    if file.bytes.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }

    let storage_dir = state.config.upload_dir.join(sanitize_filename(&case.case_id));
    tokio::fs::create_dir_all(&storage_dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let stored_name = format!(
        "{}_{}",
        uuid::Uuid::new_v4().simple(),
        sanitize_filename(&file.filename)
    );
    let file_path = storage_dir.join(&stored_name);
    tokio::fs::write(&file_path, &file.bytes)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let document = DocumentRepo::create(
        &state.pool,
        &CreateDocument {
            case_id: case.case_id.clone(),
            document_type: form.text("document_type"),
            original_filename: file.filename.clone(),
            stored_path: file_path.to_string_lossy().to_string(),
            content_type: Some(file.mime_type()),
            file_size: file.bytes.len() as i64,
            uploaded_by: user.username.clone(),
        },
    )
    .await?;

    activity::audit(
        &state.pool,
        &user,
        Some(&case.case_id),
        action_types::DOCUMENT_UPLOAD,
        json!({
            "document_id": document.id,
            "filename": document.original_filename,
            "document_type": document.document_type,
            "size": document.file_size,
        }),
    )
    .await?;
    tracing::info!(
        user_id = user.user_id,
        case_id = %case.case_id,
        document_id = document.id,
        size = document.file_size,
        "Document uploaded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: document })))
}

/// GET /api/v1/cases/{case_id}/documents
pub async fn list_documents(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(case_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<CaseDocument>>>> {
    activity::load_case(&state.pool, &case_id).await?;
    let documents = DocumentRepo::list_for_case(&state.pool, &case_id).await?;
    Ok(Json(DataResponse { data: documents }))
}
