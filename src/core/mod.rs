//! # Core Module
//!
//! 서비스 전역에서 공유하는 기반 기능을 제공합니다.
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AuthError**: 토큰 수명주기와 회원가입의 모든 실패 유형
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현
//!
//! ### [`deadline`] - 요청 처리 시한
//! - `tokio::time::timeout` 기반으로 느린 I/O 를 중단
//!
//! ### [`state`] / [`health`]
//! - 핸들러가 공유하는 `AppState` 와 의존성 헬스 체크 trait

pub mod deadline;
pub mod errors;
pub mod health;
pub mod state;

pub use deadline::with_deadline;
pub use errors::*;
pub use health::HealthProbe;
pub use state::AppState;
