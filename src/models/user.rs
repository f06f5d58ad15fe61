use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 사용자 엔티티 — 자격 증명은 외부 인증 서버가 관리하므로 여기에는 없습니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}
