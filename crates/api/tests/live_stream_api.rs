//! HTTP-level integration tests for live-stream status and settings.

mod common;

use axum::http::StatusCode;
use axum::Router;
use chapel_api::config::LiveStreamConfig;
use chapel_core::live_stream::BroadcastWindow;
use chapel_db::Repositories;
use chrono::{DateTime, Datelike, Utc, Weekday};
use common::{admin_token, body_json, editor_token, get, get_auth, put_json_auth};
use serde_json::json;

/// App whose broadcast window covers the whole of `weekday` (UTC).
fn app_with_window(weekday: Weekday) -> Router {
    let mut config = common::test_config();
    config.live_stream = LiveStreamConfig {
        window: BroadcastWindow::new(weekday, 0, 24, 0).unwrap(),
        playback_base: "https://stream.example.com".to_string(),
    };
    common::build_app_with(config, Repositories::in_memory())
}

/// True when the UTC weekday rolled over while a request was in flight, so a
/// window keyed on `weekday` no longer describes the server's view of now.
fn crossed_midnight(weekday: Weekday) -> bool {
    Utc::now().weekday() != weekday
}

fn parse_time(value: &serde_json::Value) -> DateTime<Utc> {
    value.as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn live_inside_the_window() {
    let requested_at = Utc::now();
    let today = requested_at.weekday();
    let app = app_with_window(today);
    let response = get(app, "/api/v1/live-stream/status").await;
    if crossed_midnight(today) {
        return;
    }

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["status"], "live");
    assert_eq!(data["is_live"], true);
    assert!(parse_time(&data["ends_at"]) > requested_at);
    assert!(parse_time(&data["next_service_time"]) <= Utc::now());

    let stream_id = data["stream_id"].as_str().unwrap();
    assert_eq!(
        data["playback_url"],
        format!("https://stream.example.com/{stream_id}.m3u8")
    );
}

/// Outside the window the status is offline and the next start is in the future.
#[tokio::test]
async fn offline_outside_the_window_with_future_start() {
    let requested_at = Utc::now();
    let today = requested_at.weekday();
    let app = app_with_window(today.succ());
    let json = body_json(get(app, "/api/v1/live-stream/status").await).await;
    if crossed_midnight(today) {
        return;
    }
    let data = &json["data"];

    assert_eq!(data["status"], "offline");
    assert_eq!(data["is_live"], false);
    assert!(data["ends_at"].is_null());
    assert!(parse_time(&data["next_service_time"]) > requested_at);
    assert_eq!(data["title"], "Sunday Worship Service");
}

#[tokio::test]
async fn admin_updates_settings() {
    let app = common::build_test_app();

    let response = put_json_auth(
        app.clone(),
        "/api/v1/admin/live-stream/settings",
        json!({ "stream_id": "new-stream", "resolution": "720p", "enable_dvr": false }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["stream_id"], "new-stream");
    assert_eq!(json["data"]["resolution"], "720p");
    assert_eq!(json["data"]["enable_dvr"], false);
    assert_eq!(json["data"]["max_bitrate_kbps"], 6000);

    let json = body_json(get_auth(app.clone(), "/api/v1/admin/live-stream/settings", &admin_token()).await).await;
    assert_eq!(json["data"]["stream_id"], "new-stream");

    let json = body_json(get(app, "/api/v1/live-stream/status").await).await;
    assert_eq!(json["data"]["stream_id"], "new-stream");
}

#[tokio::test]
async fn invalid_settings_are_rejected() {
    let app = common::build_test_app();

    for body in [
        json!({ "resolution": "4k" }),
        json!({ "default_visibility": "everyone" }),
        json!({ "max_bitrate_kbps": 100 }),
        json!({ "stream_id": "  " }),
        json!({ "title": "" }),
    ] {
        let response = put_json_auth(
            app.clone(),
            "/api/v1/admin/live-stream/settings",
            body.clone(),
            &admin_token(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[tokio::test]
async fn settings_require_admin() {
    let app = common::build_test_app();

    let response = get(app.clone(), "/api/v1/admin/live-stream/settings").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/admin/live-stream/settings", &editor_token()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
