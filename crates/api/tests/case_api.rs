mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_case, get_auth, patch_json_auth, post_json_auth,
    post_multipart_auth, put_json_auth, sample_case, token_for,
};
use serde_json::json;
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Intake
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_case_as_draft(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "init", "initiator").await;

    let case = create_case(app, &token, "FRD-2025-0001").await;
    assert_eq!(case["case_id"], "FRD-2025-0001");
    assert_eq!(case["status"], "Draft");
    assert_eq!(case["created_by"], "init");
    assert_eq!(case["pan"], "ABCDE1234F");
    assert_eq!(case["aadhaar"], "234567890123");
    assert_eq!(case["mobile_number"], "9845012345");
    assert_eq!(case["case_details"]["employer"], "Acme Corp");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_case_submitted(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "init", "initiator").await;

    let mut body = sample_case("FRD-2025-0002");
    body["submit"] = json!(true);
    let response = post_json_auth(app, "/api/v1/cases", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "Submitted");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_case_id_is_generated_when_omitted(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "init", "initiator").await;

    let response = post_json_auth(
        app,
        "/api/v1/cases",
        json!({ "case_type": "Document Forgery", "case_description": "Altered bank statement" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let case_id = json["data"]["case_id"].as_str().unwrap();
    assert!(!case_id.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_case_id_conflicts(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "init", "initiator").await;
    create_case(app.clone(), &token, "FRD-DUP").await;

    let response = post_json_auth(app, "/api/v1/cases", sample_case("FRD-DUP"), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_case_rejects_bad_pan(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "init", "initiator").await;

    let mut body = sample_case("FRD-BADPAN");
    body["pan"] = json!("12345ABCDE");
    let response = post_json_auth(app, "/api/v1/cases", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_case_requires_description(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "init", "initiator").await;

    let response = post_json_auth(
        app,
        "/api/v1/cases",
        json!({ "case_type": "Identity Fraud", "case_description": "" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reviewer_cannot_create_case(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "rev", "reviewer").await;

    let response = post_json_auth(app, "/api/v1/cases", sample_case("FRD-X"), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_can_create_case(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "root", "admin").await;
    let case = create_case(app, &token, "FRD-ADMIN").await;
    assert_eq!(case["created_by"], "root");
}

// ---------------------------------------------------------------------------
// Reading and patching
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_unknown_case_is_404(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "rev", "reviewer").await;

    let response = get_auth(app, "/api/v1/cases/FRD-MISSING", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Case FRD-MISSING not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_cases_with_filter(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "init", "initiator").await;
    create_case(app.clone(), &token, "FRD-A").await;
    create_case(app.clone(), &token, "FRD-B").await;
    let mut submitted = sample_case("FRD-C");
    submitted["submit"] = json!(true);
    post_json_auth(app.clone(), "/api/v1/cases", submitted, &token).await;

    let response = get_auth(app.clone(), "/api/v1/cases", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 3);

    let response = get_auth(app, "/api/v1/cases?status=Submitted", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["case_id"], "FRD-C");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filter_accepts_legacy_status_names(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "init", "initiator").await;
    let admin = token_for(&pool, app.clone(), "root", "admin").await;
    create_case(app.clone(), &token, "FRD-LEG").await;
    create_case(app.clone(), &token, "FRD-OTHER").await;

    let response = put_json_auth(
        app.clone(),
        "/api/v1/cases/FRD-LEG/status",
        json!({ "status": "Second Approval" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, "/api/v1/cases?status=Approver%202", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["case_id"], "FRD-LEG");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_case_fields(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "init", "initiator").await;
    create_case(app.clone(), &token, "FRD-PATCH").await;

    let response = patch_json_auth(
        app,
        "/api/v1/cases/FRD-PATCH",
        json!({ "customer_name": "Ravi K.", "loan_amount": 600000.0 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["customer_name"], "Ravi K.");
    assert_eq!(json["data"]["loan_amount"], 600000.0);
    assert_eq!(json["data"]["case_type"], "Identity Fraud");
    assert_eq!(json["data"]["status"], "Draft");
}

// ---------------------------------------------------------------------------
// Comments and documents
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comments_are_listed_in_order(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "init", "initiator").await;
    create_case(app.clone(), &token, "FRD-COMM").await;

    for text in ["first note", "second note"] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/cases/FRD-COMM/comments",
            json!({ "comment": text }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_auth(app, "/api/v1/cases/FRD-COMM/comments", &token).await;
    let json = body_json(response).await;
    let comments = json["data"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["comment"], "first note");
    assert_eq!(comments[0]["comment_type"], "General");
    assert_eq!(comments[1]["comment"], "second note");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_on_missing_case_is_404(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "init", "initiator").await;

    let response = post_json_auth(
        app,
        "/api/v1/cases/NOPE/comments",
        json!({ "comment": "hello" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_and_list_documents(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "init", "initiator").await;
    create_case(app.clone(), &token, "FRD-DOCS").await;

    let response = post_multipart_auth(
        app.clone(),
        "/api/v1/cases/FRD-DOCS/documents",
        &[
            ("document_type", None, b"Salary Slip".as_slice()),
            ("file", Some("../june slip.pdf"), b"%PDF-1.4 fake".as_slice()),
        ],
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["document_type"], "Salary Slip");
    assert_eq!(json["data"]["file_size"], 13);

    let response = get_auth(app, "/api/v1/cases/FRD-DOCS/documents", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_without_file_is_rejected(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "init", "initiator").await;
    create_case(app.clone(), &token, "FRD-NOFILE").await;

    let response = post_multipart_auth(
        app,
        "/api/v1/cases/FRD-NOFILE/documents",
        &[("document_type", None, b"Salary Slip".as_slice())],
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_case_audit_trail_records_creation(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "init", "initiator").await;
    create_case(app.clone(), &token, "FRD-TRAIL").await;

    let response = get_auth(app, "/api/v1/cases/FRD-TRAIL/audit", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let entries = json["data"].as_array().unwrap();
    assert!(entries
        .iter()
        .any(|e| e["action_type"] == "case_create" && e["username"] == "init"));
}
