//! # 데이터베이스 접근 계층 (Ownership-Scoped Repository)
//!
//! 저장소에 접근하는 유일한 관문입니다. 모든 읽기/쓰기 함수는 행위자의 `user_id`를
//! 명시적인 인자로 받고, 그 사용자가 (직접 또는 노트북을 거쳐) 소유한 엔티티만
//! 보여주거나 수정합니다. 전역/암묵적인 "현재 사용자"는 없습니다.
//!
//! 각 하위 모듈:
//! - `notebooks`: 노트북 CRUD와 소유권 확인 헬퍼
//! - `notes`: 노트 CRUD, 자동 저장 경로, 부분 문자열 검색
//! - `tags`: 태그 get-or-create/이름 변경/삭제, 노트-태그 연결
//! - `statistics`: 사용자별 집계
//! - `users`: 외부 인증 사용자 등록(provision)과 조회
//!
//! 둘 이상의 변경을 수행하는 함수는 트랜잭션으로 묶여 전부 커밋되거나 전부 취소됩니다.

pub mod notebooks;
pub mod notes;
pub mod statistics;
pub mod tags;
pub mod users;

pub use notebooks::*;
pub use notes::*;
pub use statistics::*;
pub use tags::*;

use std::{str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

use crate::error::AppError;

/// SQLite 연결 풀을 생성합니다.
///
/// `foreign_keys(true)`는 필수입니다. SQLite는 연결마다 외래키 검사를 따로 켜야 하고,
/// 꺼져 있으면 노트북 삭제 시 노트/노트-태그 행이 함께 지워지지 않습니다.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// 인메모리 데이터베이스에 연결하고 마이그레이션까지 적용합니다.
///
/// 인메모리 DB는 연결마다 별개의 데이터베이스이므로 연결은 하나만 두고,
/// 유휴 정리로 연결이 닫혀 데이터가 사라지지 않게 수명 제한을 끕니다.
pub async fn connect_in_memory() -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// `./migrations`의 SQL 파일 중 아직 적용되지 않은 것을 순서대로 실행합니다.
pub async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
