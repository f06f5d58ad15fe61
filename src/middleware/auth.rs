//! # 현재 사용자 식별 (Identity Lookup)
//!
//! 자격 증명 확인과 토큰 발급은 외부 인증 서버가 합니다. 이 모듈은 요청의
//! `Authorization: Bearer <jwt>` 헤더를 검증해 현재 사용자 ID를 꺼내는 일만 합니다.
//!
//! 핸들러는 `AuthUser`를 인자로 받기만 하면 되고, 꺼낸 `user_id`를 저장소 함수에
//! 명시적으로 넘깁니다.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{db::users, error::AppError, routes::AppState};

/// 외부 인증 서버가 서명한 액세스 토큰의 클레임
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id
    /// 표시 이름 (3~50자)
    pub name: String,
    pub exp: i64,
    pub iat: i64,
}

/// 인증된 현재 사용자
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub display_name: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    /// 토큰을 검증하고, 처음 보는 사용자라면 `users` 행을 만들어 둡니다.
    /// 노트북과 태그가 `users(id)`를 외래키로 참조하기 때문입니다.
    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidToken)?;

        let claims = verify_access_token(token, &state.jwt_secret)?;

        let user = users::provision_user(&state.pool, &claims.sub, &claims.name)
            .await
            .map_err(|e| match e {
                AppError::Validation(_) => AppError::from(AuthError::InvalidToken),
                other => other,
            })?;

        Ok(AuthUser {
            user_id: user.id,
            display_name: user.display_name,
        })
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let message = match err {
            AuthError::MissingToken => "Authorization token is required",
            AuthError::InvalidToken => "Invalid authorization token",
            AuthError::ExpiredToken => "Authorization token has expired",
        };
        AppError::Unauthorized(message.to_string())
    }
}

/// 액세스 토큰을 발급합니다.
///
/// 운영 환경에서는 외부 인증 서버가 발급합니다. 로컬 개발(`notebox issue-token`)과
/// 테스트에서만 사용합니다.
pub fn create_access_token(
    user_id: &str,
    display_name: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        name: display_name.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(15)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn verify_access_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips_claims() {
        let token = create_access_token("u1", "Alice", "secret").unwrap();
        let claims = verify_access_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.name, "Alice");
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = create_access_token("u1", "Alice", "secret").unwrap();
        assert!(matches!(
            verify_access_token(&token, "other"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_is_reported() {
        let claims = Claims {
            sub: "u1".to_string(),
            name: "Alice".to_string(),
            iat: 0,
            exp: 1,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        assert!(matches!(
            verify_access_token(&token, "secret"),
            Err(AuthError::ExpiredToken)
        ));
    }
}
