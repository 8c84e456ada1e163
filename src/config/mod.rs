//! # Configuration Module
//!
//! 환경 변수 기반 설정을 제공합니다.
//!
//! - [`auth_config`] - 토큰 서명 키, 발급자, 토큰 수명 (`TokenConfig`)
//! - [`data_config`] - 실행 환경, bcrypt 비용, 서버/MongoDB/Redis 접속 정보
//!
//! `.env` 파일은 `main` 에서 `PROFILE` 값에 따라 먼저 로드됩니다.

pub mod auth_config;
pub mod data_config;

pub use auth_config::{KeyPairConfig, TokenConfig};
pub use data_config::{CacheConfig, DatabaseConfig, Environment, PasswordConfig, ServerConfig};
