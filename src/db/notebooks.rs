//! # 노트북 데이터베이스 쿼리 모듈
//!
//! 노트북은 소유권 사슬(User → Notebook → Note)의 기준점입니다.
//! 모든 쿼리는 `WHERE user_id = ?` 조건으로 호출자의 노트북만 대상으로 합니다.
//!
//! 노트북 삭제 시 `notes`와 `note_tags`는 `ON DELETE CASCADE`로 함께 삭제됩니다.

use chrono::Utc;
use sqlx::{SqliteExecutor, SqlitePool};

use crate::error::AppError;
use crate::models::{validation::check_user_id, NewNotebook, Notebook};

/// 노트북이 존재하고 `user_id` 소유인지 확인합니다.
///
/// 트랜잭션 안에서도 쓸 수 있도록 실행자(executor)를 제네릭으로 받습니다.
pub(crate) async fn owns_notebook<'e, E>(
    executor: E,
    user_id: &str,
    notebook_id: i64,
) -> Result<bool, AppError>
where
    E: SqliteExecutor<'e>,
{
    let owned: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM notebooks WHERE id = ? AND user_id = ?",
    )
    .bind(notebook_id)
    .bind(user_id)
    .fetch_one(executor)
    .await?;

    Ok(owned > 0)
}

pub(crate) async fn fetch_owned_notebook<'e, E>(
    executor: E,
    user_id: &str,
    notebook_id: i64,
) -> Result<Option<Notebook>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let notebook = sqlx::query_as::<_, Notebook>(
        "SELECT id, user_id, title, created_at FROM notebooks WHERE id = ? AND user_id = ?",
    )
    .bind(notebook_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await?;

    Ok(notebook)
}

/// 새 노트북을 만듭니다.
///
/// 소유자는 `user_id`, 생성 시각은 현재 UTC로 저장소가 직접 찍습니다.
pub async fn create_notebook(
    pool: &SqlitePool,
    user_id: &str,
    new: &NewNotebook,
) -> Result<Notebook, AppError> {
    check_user_id(user_id)?;
    new.validate()?;

    let notebook = sqlx::query_as::<_, Notebook>(
        r#"
        INSERT INTO notebooks (user_id, title, created_at)
        VALUES (?, ?, ?)
        RETURNING id, user_id, title, created_at
        "#,
    )
    .bind(user_id)
    .bind(new.title.trim())
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    tracing::debug!(user_id, notebook_id = notebook.id, "notebook created");
    Ok(notebook)
}

/// 호출자의 노트북 목록 (최근 생성순)
pub async fn list_notebooks(pool: &SqlitePool, user_id: &str) -> Result<Vec<Notebook>, AppError> {
    check_user_id(user_id)?;

    let notebooks = sqlx::query_as::<_, Notebook>(
        r#"
        SELECT id, user_id, title, created_at
        FROM notebooks
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(notebooks)
}

/// 노트북 단건 조회. 없거나 남의 것이면 `None`입니다 (두 경우를 구분하지 않음).
pub async fn get_notebook(
    pool: &SqlitePool,
    user_id: &str,
    notebook_id: i64,
) -> Result<Option<Notebook>, AppError> {
    check_user_id(user_id)?;

    fetch_owned_notebook(pool, user_id, notebook_id).await
}

/// 노트북 제목을 바꿉니다. 대상이 없거나 남의 것이면 아무것도 하지 않고 `None`을 반환합니다.
pub async fn rename_notebook(
    pool: &SqlitePool,
    user_id: &str,
    notebook_id: i64,
    update: &NewNotebook,
) -> Result<Option<Notebook>, AppError> {
    check_user_id(user_id)?;
    update.validate()?;

    let notebook = sqlx::query_as::<_, Notebook>(
        r#"
        UPDATE notebooks SET title = ?
        WHERE id = ? AND user_id = ?
        RETURNING id, user_id, title, created_at
        "#,
    )
    .bind(update.title.trim())
    .bind(notebook_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    if notebook.is_some() {
        tracing::debug!(user_id, notebook_id, "notebook renamed");
    }
    Ok(notebook)
}

/// 노트북과 그 안의 모든 노트, 노트-태그 연결을 삭제합니다.
///
/// 존재 확인과 삭제를 한 트랜잭션에서 수행합니다. 대상이 없거나 남의 것이면
/// 조용히 아무것도 하지 않습니다(멱등). 호출자가 실패를 알려야 한다면
/// 반환값 `false`를 확인해야 합니다.
pub async fn delete_notebook(
    pool: &SqlitePool,
    user_id: &str,
    notebook_id: i64,
) -> Result<bool, AppError> {
    check_user_id(user_id)?;

    let mut tx = pool.begin().await?;

    if !owns_notebook(&mut *tx, user_id, notebook_id).await? {
        tracing::debug!(user_id, notebook_id, "delete_notebook: nothing to delete");
        return Ok(false);
    }

    sqlx::query("DELETE FROM notebooks WHERE id = ? AND user_id = ?")
        .bind(notebook_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::debug!(user_id, notebook_id, "notebook deleted");
    Ok(true)
}
