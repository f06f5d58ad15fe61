//! # 검색 API 라우트 핸들러
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | GET | /api/v1/search?q=키워드 | 내 노트 중 제목/본문에 키워드가 포함된 것 |
//!
//! 순위 없는 부분 문자열 검색입니다. `%`, `_`도 문자 그대로 찾습니다.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{db, error::AppError, middleware::auth::AuthUser, routes::AppState};

/// `?q=키워드` 쿼리 파라미터
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// `GET /search?q=키워드` → `{ "notes": [...] }`
///
/// 공백뿐인 검색어는 경계에서 400으로 거절합니다. 결과가 없으면 빈 목록입니다.
pub async fn search(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, AppError> {
    if query.q.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Search query cannot be empty".to_string(),
        ));
    }

    let notes = db::search_notes(&state.pool, &user.user_id, &query.q).await?;
    Ok(Json(json!({ "notes": notes })))
}
