//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 받아 현재 사용자를 식별하고(`AuthUser`), 그 `user_id`를 저장소 함수에
//! 명시적으로 넘긴 뒤 결과를 JSON으로 돌려줍니다. 소유권/유일성 규칙은 저장소가 지키고,
//! 핸들러는 "조용한 no-op" 결과(`None`/`false`)를 404로 바꾸는 일만 합니다.
//!
//! 각 하위 모듈:
//! - `auth`: 현재 사용자 정보
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `notebooks`: 노트북 CRUD와 노트북별 노트 목록
//! - `notes`: 노트 CRUD와 자동 저장
//! - `search`: 부분 문자열 검색
//! - `statistics`: 사용자 통계
//! - `tags`: 태그 CRUD 및 노트-태그 관계

pub mod auth;
pub mod health;
pub mod notebooks;
pub mod notes;
pub mod search;
pub mod statistics;
pub mod tags;

pub use auth::*;
pub use health::*;
pub use notebooks::*;
pub use notes::*;
pub use search::*;
pub use statistics::*;
pub use tags::*;

use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// `SqlitePool`은 내부적으로 Arc라서 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀
    pub pool: SqlitePool,
    /// JWT 서명 검증용 비밀키
    pub jwt_secret: String,
}
