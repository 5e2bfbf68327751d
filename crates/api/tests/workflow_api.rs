mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{
    body_json, build_test_app, create_case, get_auth, post_json_auth, put_json_auth, sample_case,
    token_for,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tathya_db::models::audit::AuditQuery;
use tathya_db::repositories::AuditLogRepo;

/// Apply an action and return the response status and body.
async fn act(app: Router, token: &str, case_id: &str, action: &str) -> (StatusCode, Value) {
    let response = post_json_auth(
        app,
        &format!("/api/v1/cases/{case_id}/actions"),
        json!({ "action": action, "comment": "looks fine" }),
        token,
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

/// Create a submitted case as a fresh initiator.
async fn submitted_case(pool: &SqlitePool, app: Router, case_id: &str) {
    let token = token_for(pool, app.clone(), "init", "initiator").await;
    let mut body = sample_case(case_id);
    body["submit"] = json!(true);
    let response = post_json_auth(app, "/api/v1/cases", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_pipeline_to_closure(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    submitted_case(&pool, app.clone(), "FRD-FLOW").await;

    let allocator = token_for(&pool, app.clone(), "alloc", "allocator").await;
    let investigator = token_for(&pool, app.clone(), "inv", "investigator").await;
    let reviewer = token_for(&pool, app.clone(), "rev", "reviewer").await;
    let approver = token_for(&pool, app.clone(), "appr", "approver").await;
    let legal = token_for(&pool, app.clone(), "legal", "legal_reviewer").await;
    let actioner = token_for(&pool, app.clone(), "act", "actioner").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/cases/FRD-FLOW/allocate",
        json!({ "investigation_type": "Field Verification", "assigned_to": "inv" }),
        &allocator,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["case"]["status"], "Allocated");
    assert_eq!(json["data"]["assignment"]["priority"], "Medium");

    let response = get_auth(app.clone(), "/api/v1/assignments/mine", &investigator).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["case_id"], "FRD-FLOW");

    let (status, json) = act(app.clone(), &investigator, "FRD-FLOW", "start_investigation").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "Under Investigation");

    let response = post_json_auth(
        app.clone(),
        "/api/v1/cases/FRD-FLOW/findings",
        json!({
            "outcome": "final_review",
            "fraud_reason": "Forged salary slips",
            "fraud_tags": ["document_forgery", "income_inflation"],
        }),
        &investigator,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["case"]["status"], "Under Review");
    assert_eq!(json["data"]["finding"]["action_type"], "final_review");

    let steps = [
        (&reviewer, "review_approve", "Approved"),
        (&approver, "first_approve", "Second Approval"),
        (&approver, "second_approve", "Final Review"),
        (&reviewer, "route_to_legal", "Legal Review"),
        (&legal, "legal_complete", "Legal Review Complete"),
    ];
    for (token, action, expected) in steps {
        let (status, json) = act(app.clone(), token, "FRD-FLOW", action).await;
        assert_eq!(status, StatusCode::OK, "{action} should succeed");
        assert_eq!(json["data"]["status"], expected, "{action}");
    }

    let response = post_json_auth(
        app.clone(),
        "/api/v1/cases/FRD-FLOW/close",
        json!({ "closure_type": "recovery", "remarks": "Full amount recovered" }),
        &actioner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "Closed");
    assert_eq!(json["data"]["closure_type"], "Recovery");
    assert!(json["data"]["closed_at"].is_string());

    // Each step leaves a comment on the case.
    let response = get_auth(app.clone(), "/api/v1/cases/FRD-FLOW/comments", &reviewer).await;
    let json = body_json(response).await;
    let comments = json["data"].as_array().unwrap();
    assert_eq!(comments.len(), 9);
    assert!(comments[0]["comment"]
        .as_str()
        .unwrap()
        .starts_with("ALLOCATED"));
    assert!(comments[8]["comment"]
        .as_str()
        .unwrap()
        .starts_with("CASE CLOSED: Recovery. Full amount recovered"));

    let response = get_auth(app, "/api/v1/cases/FRD-FLOW/progress", &reviewer).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["percent"], 100.0);
    assert_eq!(json["data"]["known"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_action_requires_role(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    submitted_case(&pool, app.clone(), "FRD-ROLE").await;
    let investigator = token_for(&pool, app.clone(), "inv", "investigator").await;

    let (status, json) = act(app, &investigator, "FRD-ROLE", "first_approve").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_may_take_any_action(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    submitted_case(&pool, app.clone(), "FRD-ADM").await;
    let admin = token_for(&pool, app.clone(), "root", "admin").await;

    let (status, json) = act(app, &admin, "FRD-ADM", "reject").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "Rejected");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_regional_investigator_may_escalate(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    submitted_case(&pool, app.clone(), "FRD-REG").await;
    let regional = token_for(&pool, app.clone(), "reginv", "regional_investigator").await;

    let (status, json) = act(app, &regional, "FRD-REG", "escalate_agency").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "Agency Investigation");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_actions_each_write_comment_and_audit(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    submitted_case(&pool, app.clone(), "FRD-RACE").await;
    let admin = token_for(&pool, app.clone(), "root", "admin").await;

    const ACTIONS: [&str; 4] = ["reject", "reinvestigate", "route_to_legal", "review_approve"];
    let tasks: Vec<_> = ACTIONS
        .iter()
        .cycle()
        .take(12)
        .map(|&action| {
            let app = app.clone();
            let admin = admin.clone();
            tokio::spawn(async move { act(app, &admin, "FRD-RACE", action).await.0 })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::OK);
    }

    let response = get_auth(app, "/api/v1/cases/FRD-RACE/comments", &admin).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 12);

    let changes = AuditQuery {
        case_id: Some("FRD-RACE".into()),
        action_type: Some("status_change".into()),
        ..Default::default()
    };
    assert_eq!(AuditLogRepo::count(&pool, &changes).await.unwrap(), 12);
    assert!(AuditLogRepo::verify_chain(&pool).await.unwrap().chain_valid);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_payload_actions_need_dedicated_endpoint(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    submitted_case(&pool, app.clone(), "FRD-PAY").await;
    let allocator = token_for(&pool, app.clone(), "alloc", "allocator").await;

    let (status, json) = act(app, &allocator, "FRD-PAY", "allocate").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_action_is_rejected(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    submitted_case(&pool, app.clone(), "FRD-UNK").await;
    let admin = token_for(&pool, app.clone(), "root", "admin").await;

    let (status, _) = act(app, &admin, "FRD-UNK", "teleport").await;
    assert!(status.is_client_error());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_action_on_missing_case_is_404(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let admin = token_for(&pool, app.clone(), "root", "admin").await;

    let (status, _) = act(app, &admin, "FRD-NONE", "submit").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_escalation_requires_assignment(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    submitted_case(&pool, app.clone(), "FRD-ESC").await;
    let investigator = token_for(&pool, app.clone(), "inv", "investigator").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/cases/FRD-ESC/findings",
        json!({ "outcome": "regional" }),
        &investigator,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app,
        "/api/v1/cases/FRD-ESC/findings",
        json!({ "outcome": "regional", "regional_assignment": "West Zone Team" }),
        &investigator,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["case"]["status"], "Regional Investigation");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_close_after_investigation_needs_reason(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    submitted_case(&pool, app.clone(), "FRD-CLS").await;
    let investigator = token_for(&pool, app.clone(), "inv", "investigator").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/cases/FRD-CLS/findings",
        json!({ "outcome": "close" }),
        &investigator,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/cases/FRD-CLS/findings",
        json!({ "outcome": "close", "closure_reason": "No fraud established" }),
        &investigator,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get_auth(app, "/api/v1/cases/FRD-CLS/findings", &investigator).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["closure_reason"], "No fraud established");
}

// ---------------------------------------------------------------------------
// Admin override
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_sets_known_status(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    submitted_case(&pool, app.clone(), "FRD-SET").await;
    let admin = token_for(&pool, app.clone(), "root", "admin").await;

    let response = put_json_auth(
        app,
        "/api/v1/cases/FRD-SET/status",
        json!({ "status": "Legal Review", "reason": "Escalated by committee" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "Legal Review");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_cannot_set_unknown_status(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    submitted_case(&pool, app.clone(), "FRD-BAD").await;
    let admin = token_for(&pool, app.clone(), "root", "admin").await;

    let response = put_json_auth(
        app.clone(),
        "/api/v1/cases/FRD-BAD/status",
        json!({ "status": "Lost In Space" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let response = get_auth(app, "/api/v1/cases/FRD-BAD", &admin).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "Submitted");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_override_is_admin_only(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    submitted_case(&pool, app.clone(), "FRD-NOADM").await;
    let reviewer = token_for(&pool, app.clone(), "rev", "reviewer").await;

    let response = put_json_auth(
        app,
        "/api/v1/cases/FRD-NOADM/status",
        json!({ "status": "Closed" }),
        &reviewer,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Queues and progress
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stage_queue_lists_matching_cases(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    submitted_case(&pool, app.clone(), "FRD-Q1").await;
    let init = common::login(app.clone(), "init").await;
    create_case(app.clone(), &init, "FRD-Q2").await;

    let response = get_auth(app.clone(), "/api/v1/queues/allocation", &init).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["case_id"], "FRD-Q1");

    let response = get_auth(app, "/api/v1/queues/intake", &init).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["items"][0]["case_id"], "FRD-Q2");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_stage_is_400(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "rev", "reviewer").await;

    let response = get_auth(app, "/api/v1/queues/limbo", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_progress_for_unknown_status(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "rev", "reviewer").await;

    let response = get_auth(app, "/api/v1/workflow/progress?status=Mystery", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["known"], false);
    assert_eq!(json["data"]["position"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_progress_for_rejected(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "rev", "reviewer").await;

    let response = get_auth(app, "/api/v1/workflow/progress?status=Rejected", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["rejected"], true);
    assert_eq!(json["data"]["percent"], 0.0);
}
