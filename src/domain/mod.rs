//! 도메인 계층
//!
//! - [`entities`] - MongoDB 에 저장되는 계정 엔티티
//! - [`models`] - 클레임, 토큰 쌍, 인증 주체 등 저장하지 않는 모델
//! - [`dto`] - HTTP 경계의 요청/응답 구조체

pub mod dto;
pub mod entities;
pub mod models;

pub use dto::*;
pub use entities::*;
pub use models::*;
