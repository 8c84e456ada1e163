//! HTTP 요청/응답 DTO
//!
//! 요청 DTO 는 `validator` 로 검증한 뒤 서비스 계층 타입으로 변환됩니다.

pub mod api_response;
pub mod tokens;
pub mod users;

pub use api_response::ApiResponse;
pub use tokens::*;
pub use users::*;
