//! # 태그 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/tags | `list_tags` | 내 태그 목록 |
//! | POST | /api/v1/tags | `create_tag` | 이름으로 get-or-create |
//! | PATCH | /api/v1/tags/{id} | `update_tag` | 이름 변경 (중복이면 409) |
//! | DELETE | /api/v1/tags/{id} | `delete_tag` | 태그 삭제 |
//! | GET | /api/v1/notes/{id}/tags | `get_note_tags` | 노트의 태그 목록 |
//! | POST | /api/v1/notes/{id}/tags | `add_tag_to_note` | 노트에 태그 연결 |
//! | DELETE | /api/v1/notes/{id}/tags/{tag_id} | `remove_tag_from_note` | 연결 해제 |

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{db, error::AppError, middleware::auth::AuthUser, models::*, routes::AppState};

/// `GET /tags` → `{ "tags": [...] }`
pub async fn list_tags(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let tags = db::list_tags(&state.pool, &user.user_id).await?;
    Ok(Json(json!({ "tags": tags })))
}

/// `POST /tags` + `{ "name": "urgent" }`
///
/// 같은 이름의 태그가 이미 있으면 그 태그를 그대로 돌려줍니다.
pub async fn create_tag(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<TagNameRequest>,
) -> Result<Json<Tag>, AppError> {
    let tag = db::get_or_create_tag(&state.pool, &user.user_id, &req.name).await?;
    Ok(Json(tag))
}

/// `PATCH /tags/{id}` + `{ "name": "새이름" }`
pub async fn update_tag(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<TagNameRequest>,
) -> Result<Json<Tag>, AppError> {
    let tag = db::update_tag(&state.pool, &user.user_id, id, &req.name).await?;
    Ok(Json(tag))
}

/// `DELETE /tags/{id}` → `204 No Content`
pub async fn delete_tag(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = db::delete_tag(&state.pool, &user.user_id, id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /notes/{id}/tags` → `{ "tags": [...] }`
///
/// `db::get_tags_by_note_id`는 소유권을 보지 않으므로 먼저 노트 소유권을 확인합니다.
pub async fn get_note_tags(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    db::notes::fetch_owned_note(&state.pool, &user.user_id, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let tags = db::get_tags_by_note_id(&state.pool, id).await?;
    Ok(Json(json!({ "tags": tags })))
}

/// `POST /notes/{id}/tags` + `{ "tag_id": 3 }` 또는 `{ "name": "urgent" }`
///
/// 새 연결이 생기면 201, 이미 연결되어 있었으면 200을 반환합니다.
pub async fn add_tag_to_note(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<AttachTagRequest>,
) -> Result<(StatusCode, Json<Tag>), AppError> {
    let (tag, created) = match (req.tag_id, req.name.as_deref()) {
        (Some(tag_id), _) => {
            let tag = db::get_tag(&state.pool, &user.user_id, tag_id)
                .await?
                .ok_or(AppError::NotFound)?;
            let created = db::associate_tag_to_note(&state.pool, &user.user_id, id, tag.id).await?;
            (tag, created)
        }
        // 태그 생성과 연결이 한 트랜잭션이라, 실패하면 새 태그도 남지 않습니다.
        (None, Some(name)) => db::attach_tag_by_name(&state.pool, &user.user_id, id, name).await?,
        (None, None) => {
            return Err(AppError::BadRequest(
                "Either tag_id or name is required".to_string(),
            ))
        }
    };

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(tag)))
}

/// `DELETE /notes/{id}/tags/{tag_id}` → `204 No Content`
pub async fn remove_tag_from_note(
    State(state): State<AppState>,
    user: AuthUser,
    Path((note_id, tag_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    let removed = db::remove_tag_from_note(&state.pool, &user.user_id, note_id, tag_id).await?;
    if !removed {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
