//! # 노트 데이터베이스 쿼리 모듈
//!
//! 노트에는 `user_id` 컬럼이 없습니다. 소유권은 항상 `notebooks`와 JOIN하여
//! `notebooks.user_id = ?`로 확인합니다 (User → Notebook → Note).
//!
//! ## 정책
//! - 조회: 없는 노트와 남의 노트를 구분하지 않고 모두 `None` (존재 여부 노출 방지)
//! - 생성: 대상 노트북이 호출자 소유가 아니면 `OwnershipViolation`
//! - 수정/삭제: 대상이 없으면 조용히 아무것도 하지 않음. 반환값(`None`/`false`)으로만 알 수 있으므로
//!   실패를 알려야 하는 호출자는 반드시 반환값을 확인해야 합니다.
//! - `created_at`/`updated_at`은 호출자가 보낸 값과 무관하게 저장소가 현재 UTC로 찍습니다.

use chrono::Utc;
use sqlx::{SqliteExecutor, SqlitePool};

use super::{notebooks, tags};
use crate::error::AppError;
use crate::models::{validation::check_user_id, NewNote, Note, NoteDetail, NoteUpdate};

/// 소유권 조건이 붙은 단건 조회. 다른 함수들이 트랜잭션 안에서 재사용합니다.
pub(crate) async fn fetch_owned_note<'e, E>(
    executor: E,
    user_id: &str,
    note_id: i64,
) -> Result<Option<Note>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let note = sqlx::query_as::<_, Note>(
        r#"
        SELECT n.id, n.notebook_id, n.title, n.content, n.created_at, n.updated_at
        FROM notes n
        JOIN notebooks b ON b.id = n.notebook_id
        WHERE n.id = ? AND b.user_id = ?
        "#,
    )
    .bind(note_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await?;

    Ok(note)
}

/// 새 노트를 만듭니다.
///
/// 노트북 소유권 확인과 INSERT를 한 트랜잭션으로 묶습니다.
/// 노트북이 없거나 남의 것이면 `OwnershipViolation`이고, 노트 행은 생기지 않습니다.
pub async fn create_note(pool: &SqlitePool, user_id: &str, new: &NewNote) -> Result<Note, AppError> {
    check_user_id(user_id)?;
    new.validate()?;

    let mut tx = pool.begin().await?;

    if !notebooks::owns_notebook(&mut *tx, user_id, new.notebook_id).await? {
        tracing::warn!(
            user_id,
            notebook_id = new.notebook_id,
            "create_note rejected: notebook not owned by caller"
        );
        return Err(AppError::OwnershipViolation);
    }

    let now = Utc::now();
    let note = sqlx::query_as::<_, Note>(
        r#"
        INSERT INTO notes (notebook_id, title, content, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, notebook_id, title, content, created_at, updated_at
        "#,
    )
    .bind(new.notebook_id)
    .bind(new.title.trim())
    .bind(&new.content)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::debug!(user_id, note_id = note.id, notebook_id = note.notebook_id, "note created");
    Ok(note)
}

/// 노트 단건 조회 — 소속 노트북과 태그 목록을 함께 읽어 옵니다.
///
/// 세 번의 읽기가 같은 스냅샷을 보도록 읽기 트랜잭션 안에서 수행합니다.
pub async fn get_note(
    pool: &SqlitePool,
    user_id: &str,
    note_id: i64,
) -> Result<Option<NoteDetail>, AppError> {
    check_user_id(user_id)?;

    let mut tx = pool.begin().await?;

    let Some(note) = fetch_owned_note(&mut *tx, user_id, note_id).await? else {
        return Ok(None);
    };

    let notebook = notebooks::fetch_owned_notebook(&mut *tx, user_id, note.notebook_id)
        .await?
        .ok_or(AppError::Internal("Note without owning notebook".to_string()))?;
    let tags = tags::fetch_note_tags(&mut *tx, note.id).await?;

    tx.commit().await?;
    Ok(Some(NoteDetail {
        note,
        notebook,
        tags,
    }))
}

/// 한 노트북의 노트 목록 (최근 수정순). 노트북이 호출자 것이 아니면 `NotFound`.
pub async fn list_notes(
    pool: &SqlitePool,
    user_id: &str,
    notebook_id: i64,
) -> Result<Vec<Note>, AppError> {
    check_user_id(user_id)?;

    if !notebooks::owns_notebook(pool, user_id, notebook_id).await? {
        return Err(AppError::NotFound);
    }

    let notes = sqlx::query_as::<_, Note>(
        r#"
        SELECT id, notebook_id, title, content, created_at, updated_at
        FROM notes
        WHERE notebook_id = ?
        ORDER BY updated_at DESC, id DESC
        "#,
    )
    .bind(notebook_id)
    .fetch_all(pool)
    .await?;

    Ok(notes)
}

/// 노트를 수정합니다 (전체 스칼라 필드 덮어쓰기).
///
/// 호출자 소유의 노트가 없으면 아무것도 하지 않고 `Ok(None)`을 반환합니다.
/// 다른 노트북으로 옮기는 경우 대상 노트북도 호출자 소유여야 합니다.
/// `updated_at`은 항상 갱신됩니다.
pub async fn update_note(
    pool: &SqlitePool,
    user_id: &str,
    note_id: i64,
    update: &NoteUpdate,
) -> Result<Option<Note>, AppError> {
    check_user_id(user_id)?;
    update.validate()?;

    let mut tx = pool.begin().await?;

    let Some(existing) = fetch_owned_note(&mut *tx, user_id, note_id).await? else {
        tracing::debug!(user_id, note_id, "update_note: no owned note, skipping");
        return Ok(None);
    };

    if update.notebook_id != existing.notebook_id
        && !notebooks::owns_notebook(&mut *tx, user_id, update.notebook_id).await?
    {
        tracing::warn!(
            user_id,
            note_id,
            notebook_id = update.notebook_id,
            "update_note rejected: target notebook not owned by caller"
        );
        return Err(AppError::OwnershipViolation);
    }

    let note = sqlx::query_as::<_, Note>(
        r#"
        UPDATE notes
        SET notebook_id = ?, title = ?, content = ?, updated_at = ?
        WHERE id = ?
        RETURNING id, notebook_id, title, content, created_at, updated_at
        "#,
    )
    .bind(update.notebook_id)
    .bind(update.title.trim())
    .bind(&update.content)
    .bind(Utc::now())
    .bind(note_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::debug!(user_id, note_id, "note updated");
    Ok(Some(note))
}

/// 자동 저장용 경량 경로 — `content`와 `updated_at`만 바꿉니다.
///
/// 제목 검증이나 노트북 이동 확인을 건너뛰고 UPDATE 한 번으로 끝냅니다.
/// 소유권 조건은 서브쿼리로 같은 문장에 들어 있습니다.
pub async fn quick_update_content(
    pool: &SqlitePool,
    user_id: &str,
    note_id: i64,
    content: &str,
) -> Result<bool, AppError> {
    check_user_id(user_id)?;

    let result = sqlx::query(
        r#"
        UPDATE notes SET content = ?, updated_at = ?
        WHERE id = ?
          AND notebook_id IN (SELECT id FROM notebooks WHERE user_id = ?)
        "#,
    )
    .bind(content)
    .bind(Utc::now())
    .bind(note_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    let saved = result.rows_affected() > 0;
    if saved {
        tracing::debug!(user_id, note_id, "note content saved");
    }
    Ok(saved)
}

/// 노트를 삭제합니다. 연결된 `note_tags` 행은 CASCADE로 함께 삭제됩니다.
///
/// 없는 노트나 남의 노트에 대한 삭제는 조용히 `false`를 반환합니다.
pub async fn delete_note(pool: &SqlitePool, user_id: &str, note_id: i64) -> Result<bool, AppError> {
    check_user_id(user_id)?;

    let result = sqlx::query(
        r#"
        DELETE FROM notes
        WHERE id = ?
          AND notebook_id IN (SELECT id FROM notebooks WHERE user_id = ?)
        "#,
    )
    .bind(note_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    let deleted = result.rows_affected() > 0;
    if deleted {
        tracing::debug!(user_id, note_id, "note deleted");
    }
    Ok(deleted)
}

/// LIKE 패턴에서 `%`, `_`, `\`를 문자 그대로 취급하도록 이스케이프합니다.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 제목이나 본문에 `term`이 포함된 호출자의 노트를 찾습니다.
///
/// 순위 매기기 없는 부분 문자열 검색이며, SQLite `LIKE`라서 ASCII는 대소문자를 구분하지 않습니다.
/// 결과가 없어도 에러가 아니라 빈 목록입니다. 빈 검색어는 모든 노트와 일치합니다.
pub async fn search_notes(
    pool: &SqlitePool,
    user_id: &str,
    term: &str,
) -> Result<Vec<Note>, AppError> {
    check_user_id(user_id)?;

    let pattern = format!("%{}%", escape_like(term));

    let notes = sqlx::query_as::<_, Note>(
        r#"
        SELECT n.id, n.notebook_id, n.title, n.content, n.created_at, n.updated_at
        FROM notes n
        JOIN notebooks b ON b.id = n.notebook_id
        WHERE b.user_id = ?1
          AND (n.title LIKE ?2 ESCAPE '\' OR n.content LIKE ?2 ESCAPE '\')
        ORDER BY n.updated_at DESC, n.id DESC
        "#,
    )
    .bind(user_id)
    .bind(&pattern)
    .fetch_all(pool)
    .await?;

    Ok(notes)
}
