//! # notebox
//!
//! 사용자별 노트북/노트/태그를 관리하는 개인 노트 백엔드입니다.
//!
//! - `db`: 소유권 범위로 제한된 저장소 계층 (모든 함수가 `user_id`를 명시적으로 받음)
//! - `routes`: HTTP 핸들러, `app()`이 이들을 `/api/v1` 아래에 묶습니다
//! - `middleware::auth`: Bearer 토큰에서 현재 사용자를 꺼내는 추출기

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use routes::*;

/// 전체 API 라우터를 만듭니다.
///
/// 서버(`main`)와 통합 테스트가 같은 라우터를 사용합니다.
pub fn app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/me", get(me))
        // 노트북
        .route("/notebooks", get(list_notebooks).post(create_notebook))
        .route(
            "/notebooks/{id}",
            get(get_notebook)
                .patch(rename_notebook)
                .delete(delete_notebook),
        )
        .route("/notebooks/{id}/notes", get(list_notebook_notes))
        // 노트
        .route("/notes", post(create_note))
        .route(
            "/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/notes/{id}/content", put(update_note_content))
        // 태그
        .route("/tags", get(list_tags).post(create_tag))
        .route("/tags/{id}", patch(update_tag).delete(delete_tag))
        // 노트-태그 관계
        .route("/notes/{id}/tags", get(get_note_tags).post(add_tag_to_note))
        .route("/notes/{id}/tags/{tag_id}", delete(remove_tag_from_note))
        .route("/search", get(search))
        .route("/statistics", get(get_statistics))
        .route("/health", get(health_check))
        .with_state(state);

    // 개발 환경 기준으로 모든 출처를 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
