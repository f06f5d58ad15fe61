use std::collections::BTreeMap;

use serde::Serialize;

/// 사용자 한 명에 대한 집계 결과.
///
/// 다섯 값 모두 하나의 읽기 트랜잭션(같은 스냅샷)에서 계산됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserStatistics {
    pub total_notes: i64,
    pub total_notebooks: i64,
    /// 사용자의 노트에 실제로 붙어 있는 서로 다른 태그 수
    pub total_tags: i64,
    /// 노트북 제목 → 노트 수. 제목이 같은 노트북은 합산됩니다.
    pub notes_per_notebook: BTreeMap<String, i64>,
    /// 태그 이름 → 사용 횟수 (한 번 이상 쓰인 태그만)
    pub tag_usage_frequency: BTreeMap<String, i64>,
}
