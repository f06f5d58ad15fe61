//! 입력값 검증 헬퍼
//!
//! 경계(HTTP 핸들러)에서 이미 걸러졌더라도 저장소 계층은 다시 검증합니다.
//! 길이는 바이트가 아니라 문자(char) 수로 셉니다.

use crate::error::AppError;

/// 앞뒤 공백을 제외한 문자 수가 `min..=max` 범위인지 확인합니다.
pub fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    let len = value.trim().chars().count();
    if len < min {
        return Err(AppError::Validation(if min == 1 {
            format!("{field} is required")
        } else {
            format!("{field} must be at least {min} characters")
        }));
    }
    if len > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// 행위자(acting user) ID는 비어 있을 수 없습니다.
pub fn check_user_id(user_id: &str) -> Result<(), AppError> {
    if user_id.trim().is_empty() {
        return Err(AppError::Validation("user id is required".to_string()));
    }
    Ok(())
}
