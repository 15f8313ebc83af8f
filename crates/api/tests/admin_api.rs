//! HTTP-level integration tests for the admin dashboard.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, create_event, create_sermon, editor_token, event_body, get, get_auth,
    member_token, merge, post_json, post_json_auth, sermon_body,
};
use serde_json::json;

#[tokio::test]
async fn dashboard_on_empty_store_is_all_zero() {
    let app = common::build_test_app();
    let response = get_auth(app, "/api/v1/admin/dashboard/stats", &admin_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["data"],
        json!({
            "total_members": 0,
            "new_members": 0,
            "upcoming_events": 0,
            "next_event_name": null,
            "recent_sermons": 0,
            "total_views": 0,
            "prayer_requests": 0,
            "pending_requests": 0,
        })
    );
}

#[tokio::test]
async fn dashboard_counts_activity() {
    let app = common::build_test_app();

    create_sermon(
        &app,
        merge(sermon_body("Recent", "Pastor John", 2), json!({ "slug": "recent" })),
    )
    .await;
    create_sermon(&app, sermon_body("Old", "Pastor John", 90)).await;
    get(app.clone(), "/api/v1/sermons/slug/recent").await;

    create_event(&app, event_body("Next Up", None)).await;

    let member = json!({
        "first_name": "Lydia",
        "last_name": "Member",
        "email": "lydia@example.com",
    });
    post_json_auth(app.clone(), "/api/v1/members", member, &member_token("user_lydia")).await;

    post_json(
        app.clone(),
        "/api/v1/prayer-requests",
        json!({
            "name": "Hannah",
            "email": "hannah@example.com",
            "request_text": "Please pray for my family this week.",
        }),
    )
    .await;

    let json = body_json(get_auth(app, "/api/v1/admin/dashboard/stats", &admin_token()).await).await;
    let data = &json["data"];

    assert_eq!(data["total_members"], 1);
    assert_eq!(data["new_members"], 1);
    assert_eq!(data["upcoming_events"], 1);
    assert_eq!(data["next_event_name"], "Next Up");
    assert_eq!(data["recent_sermons"], 1);
    assert_eq!(data["total_views"], 1);
    assert_eq!(data["prayer_requests"], 1);
    assert_eq!(data["pending_requests"], 1);
}

#[tokio::test]
async fn dashboard_requires_admin() {
    let app = common::build_test_app();

    let response = get(app.clone(), "/api/v1/admin/dashboard/stats").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/admin/dashboard/stats", &editor_token()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
