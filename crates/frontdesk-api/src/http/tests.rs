//! Router-level tests driving the real handler stack through tower.
//!
//! Adapters are disabled in every test state (no push or notify
//! credentials), so these also demonstrate that the whole surface works
//! end-to-end in the polling-only configuration.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use crate::http::router::build_router;
use crate::state::AppState;
use frontdesk_types::config::Config;

const SECRET: &str = "test-secret";

fn router(with_secret: bool) -> Router {
    let mut config = Config::default();
    if with_secret {
        config.admin.secret = Some(SECRET.to_string().into());
    }
    build_router(AppState::init(config))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn delete(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Log in and return the admin cookie pair (`name=value`).
async fn admin_cookie(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(post_json("/admin/auth", json!({ "password": SECRET })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn start_session(app: &Router, email: &str) -> String {
    let (status, body) = send(app, post_json("/chat/session", json!({ "email": email }))).await;
    assert_eq!(status, StatusCode::OK);
    body["sessionId"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_responds_without_auth() {
    let app = router(false);
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn session_start_resumes_across_casing() {
    let app = router(false);
    let first = start_session(&app, "Jane@Example.com ").await;
    let second = start_session(&app, "  jane@example.COM").await;
    assert_eq!(first, second);

    let (_, body) = send(
        &app,
        post_json("/chat/session", json!({ "email": "jane@example.com" })),
    )
    .await;
    assert_eq!(body["email"], "Jane@Example.com");
    assert_eq!(body["messages"], json!([]));
}

#[tokio::test]
async fn session_start_rejects_bad_email() {
    let app = router(false);
    for payload in [json!({}), json!({ "email": "  " }), json!({ "email": "not-an-email" })] {
        let (status, body) = send(&app, post_json("/chat/session", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn message_flow_succeeds_with_adapters_unconfigured() {
    let app = router(false);
    let session_id = start_session(&app, "jane@example.com").await;

    let (status, message) = send(
        &app,
        post_json(
            "/chat/messages",
            json!({ "sessionId": session_id, "sender": "customer", "content": "  Hello  " }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message["sender"], "customer");
    assert_eq!(message["content"], "Hello");
    assert!(message["createdAt"].is_i64());

    let (status, _) = send(
        &app,
        post_json(
            "/chat/messages",
            json!({ "sessionId": session_id, "sender": "admin", "content": "Hi, how can I help?" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get(&format!("/chat/messages?sessionId={session_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["sender"], "customer");
    assert_eq!(messages[1]["sender"], "admin");
    assert!(messages[0]["createdAt"].as_i64() <= messages[1]["createdAt"].as_i64());
}

#[tokio::test]
async fn message_validation_and_not_found() {
    let app = router(false);
    let session_id = start_session(&app, "jane@example.com").await;

    // Missing query parameter.
    let (status, _) = send(&app, get("/chat/messages")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Malformed id.
    let (status, _) = send(&app, get("/chat/messages?sessionId=not-a-uuid")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown session reads as 404, not an empty list.
    let (status, _) = send(&app, get(&format!("/chat/messages?sessionId={}", Uuid::now_v7()))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Sender outside the closed enum.
    let (status, _) = send(
        &app,
        post_json(
            "/chat/messages",
            json!({ "sessionId": session_id, "sender": "bot", "content": "x" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Blank content.
    let (status, _) = send(
        &app,
        post_json(
            "/chat/messages",
            json!({ "sessionId": session_id, "sender": "customer", "content": "   " }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Missing fields.
    let (status, _) = send(&app, post_json("/chat/messages", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown session on the write path.
    let (status, _) = send(
        &app,
        post_json(
            "/chat/messages",
            json!({ "sessionId": Uuid::now_v7().to_string(), "sender": "customer", "content": "x" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_routes_closed_without_valid_cookie() {
    let app = router(true);
    let session_id = start_session(&app, "jane@example.com").await;

    let (status, _) = send(&app, get("/chat/sessions")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Existing target session changes nothing.
    let (status, _) = send(
        &app,
        delete(&format!("/chat/sessions/{session_id}/messages"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get_with_cookie("/chat/sessions", "fdesk_admin=garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_list_and_clear_flow() {
    let app = router(true);
    let session_id = start_session(&app, "jane@example.com").await;
    let (_, _) = send(
        &app,
        post_json(
            "/chat/messages",
            json!({ "sessionId": session_id, "sender": "customer", "content": "Hello" }),
        ),
    )
    .await;

    let cookie = admin_cookie(&app).await;

    let (status, body) = send(&app, get_with_cookie("/chat/sessions", &cookie)).await;
    assert_eq!(status, StatusCode::OK);
    let sessions = body["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["email"], "jane@example.com");
    assert_eq!(sessions[0]["messageCount"], 1);

    let (status, body) = send(
        &app,
        delete(&format!("/chat/sessions/{session_id}/messages"), Some(&cookie)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);

    let (_, body) = send(&app, get(&format!("/chat/messages?sessionId={session_id}"))).await;
    assert_eq!(body["messages"], json!([]));

    let (_, body) = send(&app, get_with_cookie("/chat/sessions", &cookie)).await;
    assert_eq!(body["sessions"][0]["messageCount"], 0);

    // Clearing an unknown session is a 404, a malformed id a 400.
    let (status, _) = send(
        &app,
        delete(&format!("/chat/sessions/{}/messages", Uuid::now_v7()), Some(&cookie)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, delete("/chat/sessions/junk/messages", Some(&cookie))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let app = router(true);
    let (status, _) = send(&app, post_json("/admin/auth", json!({ "password": "nope" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_fails_closed_when_unconfigured() {
    let app = router(false);
    let (status, _) = send(&app, post_json("/admin/auth", json!({ "password": "anything" }))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    // And the gate itself stays shut.
    let (status, _) = send(&app, get("/chat/sessions")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let app = router(true);
    let response = app
        .clone()
        .oneshot(delete("/admin/auth", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("fdesk_admin=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}
