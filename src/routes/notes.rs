//! # 노트(Note) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `POST   /api/v1/notes`              → 새 노트 생성 (남의 노트북이면 403)
//! - `GET    /api/v1/notes/{id}`         → 노트 + 노트북 + 태그 조회
//! - `PUT    /api/v1/notes/{id}`         → 노트 전체 수정
//! - `DELETE /api/v1/notes/{id}`         → 노트 삭제
//! - `PUT    /api/v1/notes/{id}/content` → 본문 자동 저장 (경량 경로)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{db, error::AppError, middleware::auth::AuthUser, models::*, routes::AppState};

/// `POST /notes` — 요청 본문: `{ "notebook_id": 1, "title": "Plan", "content": "..." }`
///
/// 본문에 타임스탬프가 있어도 무시됩니다. 생성/수정 시각은 서버가 찍습니다.
pub async fn create_note(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<NewNote>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    let note = db::create_note(&state.pool, &user.user_id, &req).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// `GET /notes/{id}` — 없거나 남의 노트면 404 (둘을 구분하지 않음)
pub async fn get_note(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<NoteDetail>, AppError> {
    let detail = db::get_note(&state.pool, &user.user_id, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(detail))
}

/// `PUT /notes/{id}` — 저장소의 no-op 결과(`None`)를 404로 바꿉니다.
pub async fn update_note(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<NoteUpdate>,
) -> Result<Json<Note>, AppError> {
    let note = db::update_note(&state.pool, &user.user_id, id, &req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(note))
}

/// `PUT /notes/{id}/content` — 에디터의 잦은 자동 저장 요청용, 성공 시 204
pub async fn update_note_content(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<NoteContent>,
) -> Result<StatusCode, AppError> {
    let saved = db::quick_update_content(&state.pool, &user.user_id, id, &req.content).await?;
    if !saved {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /notes/{id}` — 성공 시 204
pub async fn delete_note(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = db::delete_note(&state.pool, &user.user_id, id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
