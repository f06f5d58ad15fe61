//! # 노트북(Notebook) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/v1/notebooks`            → 내 노트북 목록
//! - `POST   /api/v1/notebooks`            → 새 노트북 생성
//! - `GET    /api/v1/notebooks/{id}`       → 노트북 단건 조회
//! - `PATCH  /api/v1/notebooks/{id}`       → 제목 변경
//! - `DELETE /api/v1/notebooks/{id}`       → 노트북 삭제 (노트와 태그 연결까지 함께)
//! - `GET    /api/v1/notebooks/{id}/notes` → 노트북의 노트 목록

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{db, error::AppError, middleware::auth::AuthUser, models::*, routes::AppState};

/// `GET /notebooks` — 응답: `{ "notebooks": [...] }`
pub async fn list_notebooks(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let notebooks = db::list_notebooks(&state.pool, &user.user_id).await?;
    Ok(Json(json!({ "notebooks": notebooks })))
}

/// `POST /notebooks` — 요청 본문: `{ "title": "Work" }`
pub async fn create_notebook(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<NewNotebook>,
) -> Result<(StatusCode, Json<Notebook>), AppError> {
    let notebook = db::create_notebook(&state.pool, &user.user_id, &req).await?;
    Ok((StatusCode::CREATED, Json(notebook)))
}

/// `GET /notebooks/{id}` — 없거나 남의 노트북이면 404
pub async fn get_notebook(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Notebook>, AppError> {
    let notebook = db::get_notebook(&state.pool, &user.user_id, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(notebook))
}

/// `PATCH /notebooks/{id}` — 요청 본문: `{ "title": "새 제목" }`
pub async fn rename_notebook(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<NewNotebook>,
) -> Result<Json<Notebook>, AppError> {
    let notebook = db::rename_notebook(&state.pool, &user.user_id, id, &req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(notebook))
}

/// `DELETE /notebooks/{id}` — 성공 시 204
///
/// 저장소는 없는 노트북 삭제를 조용히 넘기지만, 클라이언트에는 404로 알려 줍니다.
pub async fn delete_notebook(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = db::delete_notebook(&state.pool, &user.user_id, id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /notebooks/{id}/notes` — 응답: `{ "notes": [...] }`
pub async fn list_notebook_notes(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let notes = db::list_notes(&state.pool, &user.user_id, id).await?;
    Ok(Json(json!({ "notes": notes })))
}
