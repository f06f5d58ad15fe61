//! # 에러 처리 모듈
//!
//! 저장소 계층과 HTTP 경계에서 발생할 수 있는 모든 에러를 하나의 `AppError`로 모읍니다.
//!
//! - `NotFound`: 엔티티가 없거나, 있더라도 호출자의 소유가 아님 (조회 계열 정책)
//! - `OwnershipViolation`: 명시적인 소유권 검사에서 실패 (예: 남의 노트북에 노트 생성)
//! - `DuplicateName`: 같은 사용자 범위 안에서 태그 이름 중복
//! - `Validation`: 길이 제한, 필수 필드 누락 등 잘못된 입력
//!
//! `IntoResponse` 구현으로 핸들러가 `Err(AppError)`를 반환하면
//! 적절한 상태 코드와 JSON 본문으로 변환됩니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 호출자가 대상 엔티티의 소유자가 아님 (HTTP 403)
    #[error("Resource is not owned by the current user")]
    OwnershipViolation,

    /// 같은 범위에 이미 같은 이름이 존재함 (HTTP 409)
    #[error("Name already in use: {0}")]
    DuplicateName(String),

    /// 입력값 검증 실패 (HTTP 422)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 잘못된 요청 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 인증 실패 (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from] 덕분에 sqlx 호출 뒤의 `?`가 자동으로 이 variant로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 스키마 마이그레이션 실패 (HTTP 500, 주로 시작 시점)
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl AppError {
    /// sqlx 에러가 UNIQUE 제약 위반인지 확인합니다.
    ///
    /// get-or-create의 충돌 후 재조회, 태그 이름 변경의 중복 판정에 사용됩니다.
    pub fn is_unique_violation(err: &sqlx::Error) -> bool {
        match err {
            sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
            _ => false,
        }
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Migration, Internal)는 로그에만 상세 내용을 남기고
    /// 클라이언트에는 일반적인 메시지만 돌려줍니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::OwnershipViolation => {
                (StatusCode::FORBIDDEN, "forbidden", self.to_string())
            }
            AppError::DuplicateName(_) => {
                (StatusCode::CONFLICT, "duplicate_name", self.to_string())
            }
            AppError::Validation(ref msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                msg.clone(),
            ),
            AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            AppError::Unauthorized(ref msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone())
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Migration(ref e) => {
                tracing::error!("Migration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
