//! # 태그 데이터베이스 쿼리 모듈
//!
//! 태그 CRUD와 노트-태그 다대다 관계를 관리합니다.
//! 태그는 사용자 범위(scope)에 속하므로 모든 태그 함수가 `user_id`를 받습니다.
//! 예외는 `get_tags_by_note_id` 하나뿐이며, 이 함수는 범위를 보지 않으므로
//! 호출자가 먼저 노트 소유권을 확인해야 합니다.
//!
//! ## 테이블 구조
//! - `tags`: 태그 엔티티 (id, user_id, name), `UNIQUE (user_id, name)`
//! - `note_tags`: 노트와 태그의 다대다(N:M) 관계, 복합 기본키 (note_id, tag_id)
//!
//! ## 경쟁 상태
//! get-or-create와 이름 변경은 애플리케이션 수준의 확인만으로는 동시 요청을 막을 수 없습니다.
//! 최종 판정은 `UNIQUE (user_id, name)` 제약이 하고, 위반 에러를 받아 처리합니다.

use sqlx::{SqliteExecutor, SqlitePool};

use super::notes;
use crate::error::AppError;
use crate::models::{validate_tag_name, validation::check_user_id, Tag};

pub(crate) async fn fetch_note_tags<'e, E>(executor: E, note_id: i64) -> Result<Vec<Tag>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.user_id, t.name
        FROM tags t
        JOIN note_tags nt ON nt.tag_id = t.id
        WHERE nt.note_id = ?
        ORDER BY t.name
        "#,
    )
    .bind(note_id)
    .fetch_all(executor)
    .await?;

    Ok(tags)
}

async fn find_by_name<'e, E>(executor: E, user_id: &str, name: &str) -> Result<Option<Tag>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let tag = sqlx::query_as::<_, Tag>(
        "SELECT id, user_id, name FROM tags WHERE user_id = ? AND name = ?",
    )
    .bind(user_id)
    .bind(name)
    .fetch_optional(executor)
    .await?;

    Ok(tag)
}

/// 호출자의 태그 목록 (이름순)
pub async fn list_tags(pool: &SqlitePool, user_id: &str) -> Result<Vec<Tag>, AppError> {
    check_user_id(user_id)?;

    let tags = sqlx::query_as::<_, Tag>(
        "SELECT id, user_id, name FROM tags WHERE user_id = ? ORDER BY name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}

pub async fn get_tag(pool: &SqlitePool, user_id: &str, tag_id: i64) -> Result<Option<Tag>, AppError> {
    check_user_id(user_id)?;

    let tag = sqlx::query_as::<_, Tag>(
        "SELECT id, user_id, name FROM tags WHERE id = ? AND user_id = ?",
    )
    .bind(tag_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(tag)
}

/// 이름이 정확히 같은 태그를 찾고, 없으면 만듭니다.
///
/// ## 처리 흐름
/// 1. 사용자 범위에서 이름으로 조회 → 있으면 반환
/// 2. 없으면 INSERT
/// 3. 그 사이 다른 요청이 같은 이름을 먼저 넣었다면 INSERT가 UNIQUE 위반으로 실패합니다.
///    이때는 에러 대신 방금 생긴 행을 다시 조회해 반환합니다 (충돌 후 재조회).
///
/// 어떤 순서로 겹치든 결과는 같은 이름의 행 하나로 수렴합니다.
pub async fn get_or_create_tag(pool: &SqlitePool, user_id: &str, name: &str) -> Result<Tag, AppError> {
    check_user_id(user_id)?;
    validate_tag_name(name)?;
    let name = name.trim();

    if let Some(tag) = find_by_name(pool, user_id, name).await? {
        return Ok(tag);
    }

    let inserted = sqlx::query_as::<_, Tag>(
        "INSERT INTO tags (user_id, name) VALUES (?, ?) RETURNING id, user_id, name",
    )
    .bind(user_id)
    .bind(name)
    .fetch_one(pool)
    .await;

    match inserted {
        Ok(tag) => {
            tracing::debug!(user_id, tag_id = tag.id, name, "tag created");
            Ok(tag)
        }
        Err(e) if AppError::is_unique_violation(&e) => {
            tracing::debug!(user_id, name, "tag created concurrently, re-fetching");
            find_by_name(pool, user_id, name)
                .await?
                .ok_or(AppError::Internal("Tag vanished after unique conflict".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// 태그 이름을 바꿉니다.
///
/// - 호출자 범위에 태그가 없으면 `NotFound`
/// - 같은 범위의 다른 태그가 이미 `new_name`을 쓰고 있으면 `DuplicateName` (원래 이름 유지)
///
/// 중복 판정은 UPDATE 문 자체가 UNIQUE 제약에 걸리는지로 합니다.
/// 미리 SELECT로 확인하는 방식은 동시에 두 요청이 모두 통과할 수 있기 때문입니다.
pub async fn update_tag(
    pool: &SqlitePool,
    user_id: &str,
    tag_id: i64,
    new_name: &str,
) -> Result<Tag, AppError> {
    check_user_id(user_id)?;
    validate_tag_name(new_name)?;
    let new_name = new_name.trim();

    let renamed = sqlx::query_as::<_, Tag>(
        r#"
        UPDATE tags SET name = ?
        WHERE id = ? AND user_id = ?
        RETURNING id, user_id, name
        "#,
    )
    .bind(new_name)
    .bind(tag_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await;

    match renamed {
        Ok(Some(tag)) => {
            tracing::debug!(user_id, tag_id, name = new_name, "tag renamed");
            Ok(tag)
        }
        Ok(None) => Err(AppError::NotFound),
        Err(e) if AppError::is_unique_violation(&e) => {
            tracing::debug!(user_id, tag_id, name = new_name, "tag rename rejected: name in use");
            Err(AppError::DuplicateName(new_name.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// 태그를 삭제합니다. `note_tags`의 연결은 CASCADE로 함께 삭제됩니다.
pub async fn delete_tag(pool: &SqlitePool, user_id: &str, tag_id: i64) -> Result<bool, AppError> {
    check_user_id(user_id)?;

    let result = sqlx::query("DELETE FROM tags WHERE id = ? AND user_id = ?")
        .bind(tag_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    let deleted = result.rows_affected() > 0;
    if deleted {
        tracing::debug!(user_id, tag_id, "tag deleted");
    }
    Ok(deleted)
}

async fn link_note_tag<'e, E>(executor: E, note_id: i64, tag_id: i64) -> Result<bool, AppError>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("INSERT OR IGNORE INTO note_tags (note_id, tag_id) VALUES (?, ?)")
        .bind(note_id)
        .bind(tag_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 노트에 태그를 연결합니다.
///
/// 노트와 태그 모두 호출자 소유여야 하며, 아니면 `OwnershipViolation`입니다.
/// 이미 연결되어 있으면 `INSERT OR IGNORE`로 조용히 넘어갑니다 (멱등).
/// 반환값은 새 연결이 생겼는지 여부입니다.
pub async fn associate_tag_to_note(
    pool: &SqlitePool,
    user_id: &str,
    note_id: i64,
    tag_id: i64,
) -> Result<bool, AppError> {
    check_user_id(user_id)?;

    let mut tx = pool.begin().await?;

    if notes::fetch_owned_note(&mut *tx, user_id, note_id).await?.is_none() {
        tracing::warn!(user_id, note_id, "associate_tag_to_note rejected: note not owned by caller");
        return Err(AppError::OwnershipViolation);
    }

    let tag_owned: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags WHERE id = ? AND user_id = ?")
        .bind(tag_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
    if tag_owned == 0 {
        tracing::warn!(user_id, tag_id, "associate_tag_to_note rejected: tag not owned by caller");
        return Err(AppError::OwnershipViolation);
    }

    let created = link_note_tag(&mut *tx, note_id, tag_id).await?;

    tx.commit().await?;
    tracing::debug!(user_id, note_id, tag_id, created, "tag associated with note");
    Ok(created)
}

/// 이름으로 태그를 찾거나 만들어 노트에 연결합니다.
///
/// 태그 생성과 연결을 한 트랜잭션으로 묶습니다. 노트가 호출자 소유가 아니면
/// `OwnershipViolation`이고, 이 호출로 새로 만들어진 태그도 함께 롤백됩니다.
///
/// 쓰기(`INSERT OR IGNORE`)를 먼저 해서 트랜잭션 시작부터 쓰기 잠금을 잡습니다.
/// 같은 이름을 동시에 만드는 요청은 잠금 순서대로 처리되어 한 행으로 수렴합니다.
/// 반환값은 (태그, 새 연결이 생겼는지 여부)입니다.
pub async fn attach_tag_by_name(
    pool: &SqlitePool,
    user_id: &str,
    note_id: i64,
    name: &str,
) -> Result<(Tag, bool), AppError> {
    check_user_id(user_id)?;
    validate_tag_name(name)?;
    let name = name.trim();

    let mut tx = pool.begin().await?;

    sqlx::query("INSERT OR IGNORE INTO tags (user_id, name) VALUES (?, ?)")
        .bind(user_id)
        .bind(name)
        .execute(&mut *tx)
        .await?;

    let tag = find_by_name(&mut *tx, user_id, name)
        .await?
        .ok_or(AppError::Internal("Tag missing after insert".to_string()))?;

    if notes::fetch_owned_note(&mut *tx, user_id, note_id).await?.is_none() {
        tracing::warn!(user_id, note_id, "attach_tag_by_name rejected: note not owned by caller");
        return Err(AppError::OwnershipViolation);
    }

    let created = link_note_tag(&mut *tx, note_id, tag.id).await?;

    tx.commit().await?;
    tracing::debug!(user_id, note_id, tag_id = tag.id, created, "tag attached by name");
    Ok((tag, created))
}

/// 노트에서 태그 연결을 해제합니다.
///
/// 연결이 없거나 노트가 호출자 소유가 아니면 조용히 `false`를 반환합니다.
pub async fn remove_tag_from_note(
    pool: &SqlitePool,
    user_id: &str,
    note_id: i64,
    tag_id: i64,
) -> Result<bool, AppError> {
    check_user_id(user_id)?;

    let result = sqlx::query(
        r#"
        DELETE FROM note_tags
        WHERE note_id = ? AND tag_id = ?
          AND note_id IN (
              SELECT n.id FROM notes n
              JOIN notebooks b ON b.id = n.notebook_id
              WHERE b.user_id = ?
          )
        "#,
    )
    .bind(note_id)
    .bind(tag_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    let removed = result.rows_affected() > 0;
    if removed {
        tracing::debug!(user_id, note_id, tag_id, "tag removed from note");
    }
    Ok(removed)
}

/// 특정 노트에 연결된 태그 목록 (이름순).
///
/// 소유권을 확인하지 않습니다. 호출 전에 노트 소유권을 확인하세요.
pub async fn get_tags_by_note_id(pool: &SqlitePool, note_id: i64) -> Result<Vec<Tag>, AppError> {
    fetch_note_tags(pool, note_id).await
}
