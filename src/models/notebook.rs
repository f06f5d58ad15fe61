use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::check_length;
use crate::error::AppError;

/// 노트북 제목 길이 제한 (문자 수)
pub const NOTEBOOK_TITLE_MAX: usize = 100;

/// 노트북 엔티티 — `user_id`가 노트북과 그 안의 모든 노트의 소유자입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notebook {
    pub id: i64,
    pub user_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// 노트북 생성 요청. 소유자와 생성 시각은 저장소가 채웁니다.
#[derive(Debug, Clone, Deserialize)]
pub struct NewNotebook {
    pub title: String,
}

impl NewNotebook {
    pub fn validate(&self) -> Result<(), AppError> {
        check_length("title", &self.title, 1, NOTEBOOK_TITLE_MAX)
    }
}
