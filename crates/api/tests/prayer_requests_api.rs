//! HTTP-level integration tests for prayer request submission and moderation.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{
    admin_token, body_json, get, get_auth, member_token, post_empty_auth, post_json,
    post_json_auth,
};
use serde_json::{json, Value};

fn prayer_body(name: &str, is_private: bool) -> Value {
    json!({
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "request_text": "Please pray for my family this week.",
        "is_private": is_private,
    })
}

async fn submit(app: &Router, body: Value) -> Value {
    let response = post_json(app.clone(), "/api/v1/prayer-requests", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

async fn approve(app: &Router, id: &Value) -> StatusCode {
    let uri = format!("/api/v1/admin/prayer-requests/{id}/approve");
    post_empty_auth(app.clone(), &uri, &admin_token()).await.status()
}

#[tokio::test]
async fn new_requests_await_approval() {
    let app = common::build_test_app();
    let request = submit(&app, prayer_body("Hannah", false)).await;

    assert_eq!(request["is_approved"], false);
    assert_eq!(request["is_answered"], false);

    let json = body_json(get(app, "/api/v1/prayer-requests").await).await;
    assert_eq!(json["data"]["total_count"], 0);
}

/// Private requests never reach the public wall, even once approved.
#[tokio::test]
async fn private_requests_are_never_public() {
    let app = common::build_test_app();
    let public = submit(&app, prayer_body("Hannah", false)).await;
    let private = submit(&app, prayer_body("Eli", true)).await;

    assert_eq!(approve(&app, &public["id"]).await, StatusCode::OK);
    assert_eq!(approve(&app, &private["id"]).await, StatusCode::OK);

    let json = body_json(get(app, "/api/v1/prayer-requests").await).await;
    let items = json["data"]["items"].as_array().unwrap();

    assert_eq!(json["data"]["total_count"], 1);
    assert_eq!(items[0]["name"], "Hannah");
    assert!(items.iter().all(|r| r["id"] != private["id"]));
}

#[tokio::test]
async fn public_wall_hides_contact_details() {
    let app = common::build_test_app();
    let request = submit(&app, prayer_body("Hannah", false)).await;
    approve(&app, &request["id"]).await;

    let json = body_json(get(app, "/api/v1/prayer-requests").await).await;
    let item = &json["data"]["items"][0];

    assert_eq!(item["request_text"], "Please pray for my family this week.");
    assert!(item.get("email").is_none());
    assert!(item.get("is_private").is_none());
}

#[tokio::test]
async fn signed_in_submitter_is_recorded() {
    let app = common::build_test_app();
    let response = post_json_auth(
        app,
        "/api/v1/prayer-requests",
        prayer_body("Naomi", false),
        &member_token("user_naomi"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["user_id"], "user_naomi");
}

#[tokio::test]
async fn short_request_text_is_rejected() {
    let app = common::build_test_app();
    let mut body = prayer_body("Hannah", false);
    body["request_text"] = json!("Pray");

    let response = post_json(app, "/api/v1/prayer-requests", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn admin_sees_all_and_marks_answered() {
    let app = common::build_test_app();
    let first = submit(&app, prayer_body("Hannah", false)).await;
    submit(&app, prayer_body("Eli", true)).await;

    let json = body_json(get_auth(app.clone(), "/api/v1/admin/prayer-requests", &admin_token()).await).await;
    assert_eq!(json["data"]["total_count"], 2);

    let uri = format!("/api/v1/admin/prayer-requests/{}/answered", first["id"]);
    let response = post_empty_auth(app.clone(), &uri, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_answered"], true);

    let response = post_empty_auth(
        app,
        "/api/v1/admin/prayer-requests/9999/approve",
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn moderation_requires_admin() {
    let app = common::build_test_app();
    let request = submit(&app, prayer_body("Hannah", false)).await;

    let response = get(app.clone(), "/api/v1/admin/prayer-requests").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let uri = format!("/api/v1/admin/prayer-requests/{}/approve", request["id"]);
    let response = post_empty_auth(app, &uri, &common::editor_token()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
