//! # 노트 모델 정의
//!
//! 노트의 실질적인 소유자는 노트가 속한 노트북의 소유자입니다.
//! 그래서 노트 자체에는 `user_id`가 없고 `notebook_id`만 있습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{validation::check_length, Notebook, Tag};
use crate::error::AppError;

/// 노트 제목 길이 제한 (문자 수)
pub const NOTE_TITLE_MAX: usize = 200;

/// 노트 엔티티 — DB의 `notes` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub notebook_id: i64,
    pub title: String,
    /// 본문 (길이 제한 없음)
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// 내용이나 메타데이터가 바뀔 때마다 갱신됩니다. 조회로는 바뀌지 않습니다.
    pub updated_at: DateTime<Utc>,
}

/// 단건 조회 결과 — 노트와 함께 소속 노트북과 태그 목록을 담습니다.
///
/// 역참조를 내장하는 대신 조회 시점에 각각 읽어 온 값입니다.
#[derive(Debug, Clone, Serialize)]
pub struct NoteDetail {
    #[serde(flatten)]
    pub note: Note,
    pub notebook: Notebook,
    pub tags: Vec<Tag>,
}

/// 노트 생성 요청.
///
/// 타임스탬프 필드는 일부러 없습니다. 생성/수정 시각은 항상 저장소가 현재 UTC로 찍습니다.
#[derive(Debug, Clone, Deserialize)]
pub struct NewNote {
    pub notebook_id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl NewNote {
    pub fn validate(&self) -> Result<(), AppError> {
        check_length("title", &self.title, 1, NOTE_TITLE_MAX)
    }
}

/// 노트 전체 수정 요청 (PUT) — 모든 스칼라 필드를 그대로 덮어씁니다.
///
/// `notebook_id`를 바꾸면 노트가 다른 노트북으로 이동하며,
/// 대상 노트북도 호출자의 소유여야 합니다.
#[derive(Debug, Clone, Deserialize)]
pub struct NoteUpdate {
    pub notebook_id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl NoteUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        check_length("title", &self.title, 1, NOTE_TITLE_MAX)
    }
}

/// 자동 저장용 본문 요청 — `PUT /api/v1/notes/{id}/content`
#[derive(Debug, Deserialize)]
pub struct NoteContent {
    pub content: String,
}
