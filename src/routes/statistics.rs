//! `GET /api/v1/statistics` — 현재 사용자의 노트/노트북/태그 집계

use axum::{extract::State, Json};

use crate::{
    db, error::AppError, middleware::auth::AuthUser, models::UserStatistics, routes::AppState,
};

pub async fn get_statistics(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<UserStatistics>, AppError> {
    let stats = db::get_user_statistics(&state.pool, &user.user_id).await?;
    Ok(Json(stats))
}
