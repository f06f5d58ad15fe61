//! 사용자 쿼리
//!
//! 사용자 생성과 자격 증명은 외부 인증 서버의 몫입니다. 여기서는 처음 보는
//! 식별자를 `users` 테이블에 등록해 노트북/태그의 외래키가 성립하게만 합니다.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{
    validation::{check_length, check_user_id},
    User,
};

/// 표시 이름 길이 제한 (문자 수)
pub const DISPLAY_NAME_MIN: usize = 3;
pub const DISPLAY_NAME_MAX: usize = 50;

/// 외부 인증 사용자를 등록합니다. 이미 있으면 기존 행을 그대로 반환합니다.
///
/// `INSERT OR IGNORE`이므로 같은 사용자의 동시 요청이 겹쳐도 행은 하나입니다.
pub async fn provision_user(
    pool: &SqlitePool,
    id: &str,
    display_name: &str,
) -> Result<User, AppError> {
    check_user_id(id)?;
    check_length("display name", display_name, DISPLAY_NAME_MIN, DISPLAY_NAME_MAX)?;

    let result = sqlx::query(
        "INSERT OR IGNORE INTO users (id, display_name, created_at) VALUES (?, ?, ?)",
    )
    .bind(id)
    .bind(display_name.trim())
    .bind(Utc::now())
    .execute(pool)
    .await?;

    if result.rows_affected() > 0 {
        tracing::info!(user_id = id, "provisioned new user");
    }

    find_by_id(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve provisioned user".to_string()))
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, display_name, created_at FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
