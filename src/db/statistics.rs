//! # 사용자 통계 집계
//!
//! 노트 수, 노트북 수, 사용 중인 태그 수, 노트북별 노트 수, 태그별 사용 횟수를
//! 하나의 읽기 트랜잭션 안에서 계산합니다. 다섯 개의 쿼리가 같은 스냅샷을 보므로
//! 집계 도중 다른 요청이 노트를 추가/삭제해도 결과가 서로 어긋나지 않습니다.

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{validation::check_user_id, UserStatistics};

/// 사용자 한 명의 통계를 계산합니다. 데이터가 없으면 0과 빈 맵을 반환합니다.
pub async fn get_user_statistics(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<UserStatistics, AppError> {
    check_user_id(user_id)?;

    let mut tx = pool.begin().await?;

    let total_notebooks: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM notebooks WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

    let total_notes: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM notes n
        JOIN notebooks b ON b.id = n.notebook_id
        WHERE b.user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await?;

    let total_tags: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(DISTINCT nt.tag_id)
        FROM note_tags nt
        JOIN notes n ON n.id = nt.note_id
        JOIN notebooks b ON b.id = n.notebook_id
        WHERE b.user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await?;

    // LEFT JOIN: 노트가 없는 노트북도 0으로 포함됩니다.
    let per_notebook: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT b.title, COUNT(n.id)
        FROM notebooks b
        LEFT JOIN notes n ON n.notebook_id = b.id
        WHERE b.user_id = ?
        GROUP BY b.id, b.title
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *tx)
    .await?;

    let tag_usage: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT t.name, COUNT(*)
        FROM note_tags nt
        JOIN tags t ON t.id = nt.tag_id
        JOIN notes n ON n.id = nt.note_id
        JOIN notebooks b ON b.id = n.notebook_id
        WHERE b.user_id = ?
        GROUP BY t.id, t.name
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    let mut stats = UserStatistics {
        total_notes,
        total_notebooks,
        total_tags,
        ..Default::default()
    };
    // 제목이 같은 노트북은 한 항목으로 합산합니다.
    for (title, count) in per_notebook {
        *stats.notes_per_notebook.entry(title).or_insert(0) += count;
    }
    for (name, count) in tag_usage {
        *stats.tag_usage_frequency.entry(name).or_insert(0) += count;
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::db::test_support::{note, notebook, setup, user};
    use crate::db::{associate_tag_to_note, delete_note, get_or_create_tag};

    #[tokio::test]
    async fn fresh_user_has_zero_counts() {
        let pool = setup().await;
        user(&pool, "u1").await;

        let stats = get_user_statistics(&pool, "u1").await.unwrap();
        assert_eq!(stats, UserStatistics::default());
    }

    #[tokio::test]
    async fn unknown_user_is_not_an_error() {
        let pool = setup().await;

        let stats = get_user_statistics(&pool, "ghost").await.unwrap();
        assert_eq!(stats.total_notes, 0);
        assert!(stats.notes_per_notebook.is_empty());
    }

    #[tokio::test]
    async fn work_plan_urgent_scenario() {
        let pool = setup().await;
        user(&pool, "u1").await;
        let work = notebook(&pool, "u1", "Work").await;
        let plan = note(&pool, "u1", work.id, "Plan").await;
        let urgent = get_or_create_tag(&pool, "u1", "urgent").await.unwrap();
        associate_tag_to_note(&pool, "u1", plan.id, urgent.id).await.unwrap();

        let stats = get_user_statistics(&pool, "u1").await.unwrap();
        assert_eq!(
            stats,
            UserStatistics {
                total_notes: 1,
                total_notebooks: 1,
                total_tags: 1,
                notes_per_notebook: BTreeMap::from([("Work".to_string(), 1)]),
                tag_usage_frequency: BTreeMap::from([("urgent".to_string(), 1)]),
            }
        );
    }

    #[tokio::test]
    async fn counts_are_per_user_and_include_empty_notebooks() {
        let pool = setup().await;
        user(&pool, "u1").await;
        user(&pool, "u2").await;
        let work = notebook(&pool, "u1", "Work").await;
        notebook(&pool, "u1", "Empty").await;
        let a = note(&pool, "u1", work.id, "A").await;
        let b = note(&pool, "u1", work.id, "B").await;
        let gone = note(&pool, "u1", work.id, "C").await;
        let urgent = get_or_create_tag(&pool, "u1", "urgent").await.unwrap();
        let later = get_or_create_tag(&pool, "u1", "later").await.unwrap();
        get_or_create_tag(&pool, "u1", "unused").await.unwrap();
        associate_tag_to_note(&pool, "u1", a.id, urgent.id).await.unwrap();
        associate_tag_to_note(&pool, "u1", b.id, urgent.id).await.unwrap();
        associate_tag_to_note(&pool, "u1", b.id, later.id).await.unwrap();
        delete_note(&pool, "u1", gone.id).await.unwrap();

        let other = notebook(&pool, "u2", "Work").await;
        note(&pool, "u2", other.id, "Theirs").await;

        let stats = get_user_statistics(&pool, "u1").await.unwrap();
        assert_eq!(stats.total_notes, 2);
        assert_eq!(stats.total_notebooks, 2);
        assert_eq!(stats.total_tags, 2);
        assert_eq!(stats.notes_per_notebook["Work"], 2);
        assert_eq!(stats.notes_per_notebook["Empty"], 0);
        assert_eq!(stats.tag_usage_frequency["urgent"], 2);
        assert_eq!(stats.tag_usage_frequency["later"], 1);
        assert!(!stats.tag_usage_frequency.contains_key("unused"));
    }

    #[tokio::test]
    async fn notebooks_with_equal_titles_are_merged() {
        let pool = setup().await;
        user(&pool, "u1").await;
        let first = notebook(&pool, "u1", "Misc").await;
        let second = notebook(&pool, "u1", "Misc").await;
        note(&pool, "u1", first.id, "A").await;
        note(&pool, "u1", second.id, "B").await;
        note(&pool, "u1", second.id, "C").await;

        let stats = get_user_statistics(&pool, "u1").await.unwrap();
        assert_eq!(stats.notes_per_notebook.len(), 1);
        assert_eq!(stats.notes_per_notebook["Misc"], 3);
    }
}
