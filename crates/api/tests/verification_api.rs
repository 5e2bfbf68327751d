mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_case, get_auth, post_json_auth, post_multipart_auth,
    test_config, test_state, token_for,
};
use serde_json::json;
use sqlx::SqlitePool;
use tathya_api::router::build_app_router;
use tathya_db::models::audit::AuditQuery;
use tathya_db::repositories::AuditLogRepo;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mobile_check_is_simulated_without_key(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "inv", "investigator").await;

    let response = post_json_auth(
        app,
        "/api/v1/verify/mobile",
        json!({ "mobile": "+91 98765 43210" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["mobile_number"], "9876543210");
    assert_eq!(json["data"]["is_revoked"], true);
    assert_eq!(json["data"]["risk_level"], "High");
    assert_eq!(json["data"]["source"], "simulated");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_mobile_is_400(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "inv", "investigator").await;

    let response = post_json_auth(app, "/api/v1/verify/mobile", json!({ "mobile": "12345" }), &token)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pan_check_is_stored_against_case(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let init = token_for(&pool, app.clone(), "init", "initiator").await;
    let inv = token_for(&pool, app.clone(), "inv", "investigator").await;
    create_case(app.clone(), &init, "FRD-VER").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/verify/pan",
        json!({ "pan": "abcde1234f", "case_id": "FRD-VER" }),
        &inv,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["pan_number"], "ABCDE1234F");
    assert_eq!(json["data"]["source"], "simulated");

    let response = get_auth(app, "/api/v1/cases/FRD-VER/verifications", &inv).await;
    let json = body_json(response).await;
    let records = json["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["check_type"], "pan");
    assert_eq!(records[0]["source"], "simulated");
    assert_eq!(records[0]["checked_by"], "inv");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_check_against_missing_case_is_404(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "inv", "investigator").await;

    let response = post_json_auth(
        app,
        "/api/v1/verify/pan",
        json!({ "pan": "ABCDE1234F", "case_id": "FRD-GHOST" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unattached_check_is_audited(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "inv", "investigator").await;

    let response = post_json_auth(
        app,
        "/api/v1/verify/aadhaar",
        json!({ "aadhaar": "2345 6789 0123" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_ne!(json["data"]["aadhaar_number"], "234567890123");

    let query = AuditQuery {
        action_type: Some("verification".to_string()),
        ..Default::default()
    };
    let entries = AuditLogRepo::query(&pool, &query).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].details_json["check_type"], "aadhaar");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_linkage_masks_aadhaar(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "inv", "investigator").await;

    let response = post_json_auth(
        app,
        "/api/v1/verify/pan-aadhaar",
        json!({ "pan": "ABCDE1234F", "aadhaar": "234567890123" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let masked = json["data"]["aadhaar_number"].as_str().unwrap();
    assert!(masked.ends_with("0123"));
    assert!(!masked.contains("23456789"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_id_format_check(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "inv", "investigator").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/verify/id-format",
        json!({ "id_type": "PAN Card", "id_number": "ABCDE1234F" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["valid"], true);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/verify/id-format",
        json!({ "id_type": "Driving License", "id_number": "123" }),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["valid"], false);
    assert_eq!(json["data"]["format_checked"], true);

    // Passports have no format rule, so any number passes unchecked.
    let response = post_json_auth(
        app,
        "/api/v1/verify/id-format",
        json!({ "id_type": "Passport", "id_number": "123" }),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["valid"], true);
    assert_eq!(json["data"]["format_checked"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_live_failure_is_502_not_simulated(pool: SqlitePool) {
    let mut config = test_config();
    config.verify.mnrl_api_key = Some("real-key".to_string());
    // Nothing listens on the discard port.
    config.verify.mnrl_base_url = "http://127.0.0.1:9".to_string();
    let app = build_app_router(test_state(pool.clone(), config.clone()), &config);
    let token = token_for(&pool, app.clone(), "inv", "investigator").await;

    let response = post_json_auth(
        app,
        "/api/v1/verify/mobile",
        json!({ "mobile": "9845012345" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(json["error"], "MNRL is unavailable");
}

// ---------------------------------------------------------------------------
// AI checks (simulated)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_document_analysis_simulated(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "inv", "investigator").await;

    let response = post_multipart_auth(
        app,
        "/api/v1/verify/document",
        &[
            ("document_type", None, b"PAN Card".as_slice()),
            ("file", Some("pan.jpg"), b"\xff\xd8\xff\xe0 not really a jpeg".as_slice()),
        ],
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["source"], "simulated");
    let score = json["data"]["authenticity_score"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&score));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_face_match_needs_both_images(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "inv", "investigator").await;

    let response = post_multipart_auth(
        app.clone(),
        "/api/v1/verify/face-match",
        &[("reference", Some("a.jpg"), b"face-a".as_slice())],
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_multipart_auth(
        app,
        "/api/v1/verify/face-match",
        &[
            ("reference", Some("a.jpg"), b"face-a".as_slice()),
            ("candidate", Some("b.jpg"), b"face-b".as_slice()),
        ],
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let pct = json["data"]["match_percentage"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&pct));
    assert_eq!(json["data"]["source"], "simulated");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_remark_suggestions_for_stage(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "rev", "reviewer").await;

    let response = post_json_auth(
        app,
        "/api/v1/ai/remarks",
        json!({ "stage": "primary_review", "summary": "Salary slip forgery" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["stage"], "primary_review");
    assert!(!json["data"]["remarks"].as_array().unwrap().is_empty());
}
