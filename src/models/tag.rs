//! # 태그 모델 정의
//!
//! 태그는 사용자 범위(scope)에 속합니다. 같은 사용자 안에서 이름이 유일하고,
//! 다른 사용자는 같은 이름의 태그를 각자 가질 수 있습니다.
//! 노트와 태그의 다대다 관계는 `note_tags` 테이블이 담당합니다.

use serde::{Deserialize, Serialize};

use super::validation::check_length;
use crate::error::AppError;

/// 태그 이름 길이 제한 (문자 수)
pub const TAG_NAME_MAX: usize = 50;

/// 태그 엔티티 — DB의 `tags` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    /// 태그 범위(scope)의 소유자
    pub user_id: String,
    pub name: String,
}

/// 태그 이름 검증 — 필수, 최대 50자
pub fn validate_tag_name(name: &str) -> Result<(), AppError> {
    check_length("tag name", name, 1, TAG_NAME_MAX)
}

/// 태그 get-or-create 요청 — `POST /api/v1/tags`
#[derive(Debug, Deserialize)]
pub struct TagNameRequest {
    pub name: String,
}

/// 노트에 태그 연결 요청 — `POST /api/v1/notes/{id}/tags`
///
/// `tag_id`를 주면 기존 태그를 연결하고, `name`을 주면 get-or-create 후 연결합니다.
#[derive(Debug, Deserialize)]
pub struct AttachTagRequest {
    pub tag_id: Option<i64>,
    pub name: Option<String>,
}
