//! HTTP 경계 통합 테스트
//!
//! 실제 서버 없이 `tower::ServiceExt::oneshot`으로 라우터를 직접 호출합니다.
//! 데이터베이스는 테스트마다 새 인메모리 SQLite입니다.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use notebox::{db, middleware::auth::create_access_token, routes::AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "test-secret";

async fn test_app() -> Router {
    let pool = db::connect_in_memory().await.expect("in-memory pool");
    notebox::app(AppState {
        pool,
        jwt_secret: SECRET.to_string(),
    })
}

fn token(user_id: &str, name: &str) -> String {
    create_access_token(user_id, name, SECRET).expect("token")
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

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

#[tokio::test]
async fn health_needs_no_token() {
    let app = test_app().await;

    let (status, body) = call(&app, Method::GET, "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn missing_or_bad_token_is_unauthorized() {
    let app = test_app().await;

    let (status, body) = call(&app, Method::GET, "/api/v1/notebooks", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "unauthorized");

    let forged = create_access_token("u1", "Alice", "other-secret").unwrap();
    let (status, _) = call(&app, Method::GET, "/api/v1/notebooks", Some(forged.as_str()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_provisions_the_caller() {
    let app = test_app().await;
    let alice = token("alice", "Alice");

    let (status, body) = call(&app, Method::GET, "/api/v1/me", Some(alice.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "alice");
    assert_eq!(body["display_name"], "Alice");
}

#[tokio::test]
async fn notebook_note_tag_flow_and_statistics() {
    let app = test_app().await;
    let alice = token("alice", "Alice");

    let (status, notebook) = call(
        &app,
        Method::POST,
        "/api/v1/notebooks",
        Some(alice.as_str()),
        Some(json!({ "title": "Work" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let notebook_id = notebook["id"].as_i64().unwrap();

    let (status, note) = call(
        &app,
        Method::POST,
        "/api/v1/notes",
        Some(alice.as_str()),
        Some(json!({ "notebook_id": notebook_id, "title": "Plan", "content": "ship it" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let note_id = note["id"].as_i64().unwrap();

    let (status, tag) = call(
        &app,
        Method::POST,
        &format!("/api/v1/notes/{note_id}/tags"),
        Some(alice.as_str()),
        Some(json!({ "name": "urgent" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(tag["name"], "urgent");

    // 같은 연결을 다시 요청하면 새로 만들지 않습니다.
    let (status, _) = call(
        &app,
        Method::POST,
        &format!("/api/v1/notes/{note_id}/tags"),
        Some(alice.as_str()),
        Some(json!({ "tag_id": tag["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, detail) = call(
        &app,
        Method::GET,
        &format!("/api/v1/notes/{note_id}"),
        Some(alice.as_str()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["title"], "Plan");
    assert_eq!(detail["notebook"]["title"], "Work");
    assert_eq!(detail["tags"].as_array().unwrap().len(), 1);

    let (status, stats) = call(&app, Method::GET, "/api/v1/statistics", Some(alice.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        stats,
        json!({
            "TotalNotes": 1,
            "TotalNotebooks": 1,
            "TotalTags": 1,
            "NotesPerNotebook": { "Work": 1 },
            "TagUsageFrequency": { "urgent": 1 },
        })
    );

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/api/v1/notebooks/{notebook_id}"),
        Some(alice.as_str()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(
        &app,
        Method::GET,
        &format!("/api/v1/notes/{note_id}"),
        Some(alice.as_str()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn other_users_get_not_found_or_forbidden() {
    let app = test_app().await;
    let alice = token("alice", "Alice");
    let mallory = token("mallory", "Mallory");

    let (_, notebook) = call(
        &app,
        Method::POST,
        "/api/v1/notebooks",
        Some(alice.as_str()),
        Some(json!({ "title": "Private" })),
    )
    .await;
    let notebook_id = notebook["id"].as_i64().unwrap();
    let (_, note) = call(
        &app,
        Method::POST,
        "/api/v1/notes",
        Some(alice.as_str()),
        Some(json!({ "notebook_id": notebook_id, "title": "Secret" })),
    )
    .await;
    let note_id = note["id"].as_i64().unwrap();

    // 조회/수정/삭제는 "없음"과 구분하지 않습니다.
    let (status, _) = call(
        &app,
        Method::GET,
        &format!("/api/v1/notes/{note_id}"),
        Some(mallory.as_str()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &app,
        Method::PUT,
        &format!("/api/v1/notes/{note_id}/content"),
        Some(mallory.as_str()),
        Some(json!({ "content": "defaced" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/api/v1/notebooks/{notebook_id}"),
        Some(mallory.as_str()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 남의 노트북에 노트를 만드는 것은 명시적인 소유권 위반입니다.
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/notes",
        Some(mallory.as_str()),
        Some(json!({ "notebook_id": notebook_id, "title": "Intrusion" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "forbidden");

    let (_, detail) = call(
        &app,
        Method::GET,
        &format!("/api/v1/notes/{note_id}"),
        Some(alice.as_str()),
        None,
    )
    .await;
    assert_eq!(detail["content"], "");
}

#[tokio::test]
async fn tag_rename_conflict_is_reported() {
    let app = test_app().await;
    let alice = token("alice", "Alice");

    let (status, first) = call(
        &app,
        Method::POST,
        "/api/v1/tags",
        Some(alice.as_str()),
        Some(json!({ "name": "work" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, again) = call(
        &app,
        Method::POST,
        "/api/v1/tags",
        Some(alice.as_str()),
        Some(json!({ "name": "work" })),
    )
    .await;
    assert_eq!(first["id"], again["id"]);

    let (_, second) = call(
        &app,
        Method::POST,
        "/api/v1/tags",
        Some(alice.as_str()),
        Some(json!({ "name": "home" })),
    )
    .await;

    let (status, body) = call(
        &app,
        Method::PATCH,
        &format!("/api/v1/tags/{}", second["id"]),
        Some(alice.as_str()),
        Some(json!({ "name": "work" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "duplicate_name");

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/tags",
        Some(alice.as_str()),
        Some(json!({ "name": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn search_only_sees_own_notes() {
    let app = test_app().await;
    let alice = token("alice", "Alice");
    let bob = token("bob", "Bobby");

    for (who, title) in [(&alice, "Groceries"), (&bob, "Grocery run")] {
        let (_, notebook) = call(
            &app,
            Method::POST,
            "/api/v1/notebooks",
            Some(who.as_str()),
            Some(json!({ "title": "Home" })),
        )
        .await;
        call(
            &app,
            Method::POST,
            "/api/v1/notes",
            Some(who.as_str()),
            Some(json!({ "notebook_id": notebook["id"], "title": title })),
        )
        .await;
    }

    let (status, body) = call(
        &app,
        Method::GET,
        "/api/v1/search?q=grocer",
        Some(alice.as_str()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let notes = body["notes"].as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "Groceries");

    let (status, _) = call(&app, Method::GET, "/api/v1/search?q=%20", Some(alice.as_str()), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rejected_attach_by_name_creates_no_tag() {
    let app = test_app().await;
    let alice = token("alice", "Alice");
    let bob = token("bob", "Bobby");

    let (_, notebook) = call(
        &app,
        Method::POST,
        "/api/v1/notebooks",
        Some(alice.as_str()),
        Some(json!({ "title": "Work" })),
    )
    .await;
    let (_, note) = call(
        &app,
        Method::POST,
        "/api/v1/notes",
        Some(alice.as_str()),
        Some(json!({ "notebook_id": notebook["id"], "title": "Plan" })),
    )
    .await;
    let note_id = note["id"].as_i64().unwrap();

    let (status, _) = call(
        &app,
        Method::POST,
        &format!("/api/v1/notes/{note_id}/tags"),
        Some(bob.as_str()),
        Some(json!({ "name": "spy" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(&app, Method::GET, "/api/v1/tags", Some(bob.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tags"], json!([]));

    let (status, _) = call(
        &app,
        Method::GET,
        &format!("/api/v1/notes/{note_id}/tags"),
        Some(bob.as_str()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(
        &app,
        Method::GET,
        &format!("/api/v1/notes/{note_id}/tags"),
        Some(alice.as_str()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tags"], json!([]));
}
