//! # 데이터 모델 모듈
//!
//! 저장소 계층이 주고받는 평범한 데이터 레코드와 요청 본문 구조체들입니다.
//! 엔티티끼리는 서로를 내장하지 않고 외래키 ID(`notebook_id`, `user_id`)만 가지며,
//! 연관 엔티티는 필요할 때 별도 조회로 가져옵니다.
//!
//! - `user`: 외부 인증 서버가 식별한 사용자
//! - `notebook`: 노트북 (노트의 묶음, 소유권의 기준)
//! - `note`: 노트와 상세 조회 결과
//! - `tag`: 사용자 범위의 태그
//! - `statistics`: 사용자별 집계 결과
//! - `validation`: 길이/필수값 검증 헬퍼

pub mod note;
pub mod notebook;
pub mod statistics;
pub mod tag;
pub mod user;
pub mod validation;

pub use note::*;
pub use notebook::*;
pub use statistics::*;
pub use tag::*;
pub use user::*;
