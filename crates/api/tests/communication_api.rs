mod common;

use axum::http::{header, StatusCode};
use common::{body_bytes, body_json, build_test_app, create_case, get_auth, post_json_auth, token_for};
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_generate_template_fills_case_fields(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let init = token_for(&pool, app.clone(), "init", "initiator").await;
    let actioner = token_for(&pool, app.clone(), "act", "actioner").await;
    create_case(app.clone(), &init, "FRD-COMMS").await;

    let response = post_json_auth(
        app,
        "/api/v1/cases/FRD-COMMS/communications/template",
        json!({ "template_type": "Recovery Team Notice" }),
        &actioner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["template_type"], "Recovery Team Notice");
    let content = json["data"]["content"].as_str().unwrap();
    assert!(content.contains("Case Reference: FRD-COMMS"));
    assert!(content.contains("Outstanding Amount: INR 550,000.00"));
    assert!(content.contains("Loan Account: LAN123456"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_draft_and_sent_are_recorded_as_comments(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let init = token_for(&pool, app.clone(), "init", "initiator").await;
    let actioner = token_for(&pool, app.clone(), "act", "actioner").await;
    create_case(app.clone(), &init, "FRD-SAVE").await;
    let path = "/api/v1/cases/FRD-SAVE/communications";

    let response = post_json_auth(
        app.clone(),
        path,
        json!({ "template_type": "Branch Notification", "content": "Hold disbursals." }),
        &actioner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["comment_type"], "Communication Draft - Branch Notification");

    let response = post_json_auth(
        app.clone(),
        path,
        json!({
            "template_type": "Branch Notification",
            "content": "Hold disbursals.",
            "send": true
        }),
        &actioner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get_auth(app, "/api/v1/cases/FRD-SAVE/comments", &actioner).await;
    let json = body_json(response).await;
    let comments = json["data"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert!(comments[0]["comment"]
        .as_str()
        .unwrap()
        .ends_with("Status: DRAFT"));
    assert_eq!(comments[1]["comment_type"], "Communication - Branch Notification");
    assert!(comments[1]["comment"]
        .as_str()
        .unwrap()
        .starts_with("COMMUNICATION SENT - Type: Branch Notification"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_export_is_a_text_attachment(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let init = token_for(&pool, app.clone(), "init", "initiator").await;
    let legal = token_for(&pool, app.clone(), "legal", "legal_reviewer").await;
    create_case(app.clone(), &init, "FRD-EXPT").await;

    let response = post_json_auth(
        app,
        "/api/v1/cases/FRD-EXPT/communications/export",
        json!({ "template_type": "Legal Team Communication", "content": "Please advise." }),
        &legal,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("Communication_Legal_Team_Communication_FRD-EXPT_"));
    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(text.starts_with("Communication Template: Legal Team Communication\n"));
    assert!(text.ends_with("Please advise."));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_communication_checks(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let init = token_for(&pool, app.clone(), "init", "initiator").await;
    let actioner = token_for(&pool, app.clone(), "act", "actioner").await;
    create_case(app.clone(), &init, "FRD-CHK").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/cases/FRD-CHK/communications",
        json!({ "template_type": "Customer Communication", "content": "   " }),
        &actioner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/cases/FRD-CHK/communications/template",
        json!({ "template_type": "Customer Communication" }),
        &init,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(
        app,
        "/api/v1/cases/FRD-CHK/communications/template",
        json!({ "template_type": "Carrier Pigeon" }),
        &actioner,
    )
    .await;
    assert!(response.status().is_client_error());
}
