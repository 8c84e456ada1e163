//! 미들웨어 모듈
//!
//! ### 1. 인증 미들웨어 (AuthMiddleware)
//! - Bearer 액세스 토큰 추출 및 검증
//! - 사용자 정보를 request extension 에 저장
//!
//! ### 2. 요청 ID (request_id)
//! - `x-request-id` / `x-session-id` 전파 또는 생성
//! - 액세스 로그와 핸들러 로그의 상관관계 추적
//!
//! ```rust,ignore
//! App::new()
//!     .wrap(middleware::Logger::new(ACCESS_LOG_FORMAT))
//!     .wrap(from_fn(request_id))
//! ```

pub mod auth_middleware;
mod auth_inner;
pub mod request_id;

pub use auth_middleware::AuthMiddleware;
pub use request_id::{ACCESS_LOG_FORMAT, REQUEST_ID_HEADER, RequestId, request_id};
