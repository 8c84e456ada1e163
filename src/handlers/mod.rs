//! HTTP 핸들러
//!
//! 요청 DTO 검증, 서비스 호출, 응답 변환만 담당합니다. 에러는 `AuthError` 의
//! `ResponseError` 구현이 HTTP 응답으로 바꿉니다.

pub mod auth;
pub mod health;
