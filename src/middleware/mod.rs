//! 요청 경계의 공통 처리
//!
//! - `auth`: JWT 검증으로 현재 사용자를 식별하는 추출자(`AuthUser`)

pub mod auth;
