//! 도메인 모델
//!
//! - [`token`] - JWT 클레임, 키 역할(access/refresh), 토큰 쌍
//! - [`auth`] - 인증 미들웨어가 요청에 부착하는 주체 정보

pub mod auth;
pub mod token;

pub use auth::*;
pub use token::*;
