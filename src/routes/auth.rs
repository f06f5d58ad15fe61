//! # 현재 사용자 핸들러
//!
//! - `GET /api/v1/me` → 토큰으로 식별된 사용자 정보
//!
//! 로그인/회원가입은 외부 인증 서버가 담당하므로 여기에는 없습니다.

use axum::{extract::State, Json};

use crate::{
    db::users as db_users, error::AppError, middleware::auth::AuthUser, models::User,
    routes::AppState,
};

/// `GET /me` — 현재 사용자를 반환합니다.
///
/// `AuthUser` 추출 단계에서 사용자 행이 이미 등록되어 있으므로
/// 조회 결과가 없다면 내부 오류입니다.
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<User>, AppError> {
    let user = db_users::find_by_id(&state.pool, &auth_user.user_id)
        .await?
        .ok_or(AppError::Internal("Authenticated user row missing".to_string()))?;
    Ok(Json(user))
}
