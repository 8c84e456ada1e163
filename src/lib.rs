//! 인증 토큰 서비스
//!
//! 사용자 계정에 대해 RS256 액세스/리프레시 토큰을 발급, 검증, 회전하는
//! 인증 서비스입니다.
//!
//! # Features
//!
//! - **토큰 쌍 발급**: 액세스(기본 5분) / 리프레시(기본 60분) 토큰, 역할별 분리된 RSA 키
//! - **단일 사용 리프레시**: Redis 레지스트리로 리프레시 토큰 재사용 차단
//! - **비밀번호**: bcrypt 해싱과 검증
//! - **MongoDB**: 사용자 계정 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트, 인증/요청 ID 미들웨어
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← DTO 검증, 처리 시한, 응답 변환
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← TokenLifecycleManager, UserService, ClaimCodec
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← IdentityStore / RefreshTokenRegistry
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! let codec = Arc::new(ClaimCodec::new(TokenConfig::from_env()));
//! let tokens = TokenLifecycleManager::new(identities, registry, codec, PasswordHasher::from_env());
//!
//! let pair = tokens.login(&credential).await?;
//! let claims = tokens.verify_access(&pair.access_token)?;
//! let rotated = tokens.refresh(pair.refresh_token.as_deref().unwrap_or_default()).await?;
//! ```

pub mod caching;
pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

#[cfg(test)]
mod test_support;
