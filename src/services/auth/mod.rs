//! 인증 서비스
//!
//! - [`password_hasher`] - bcrypt 비밀번호 해싱/검증
//! - [`claim_codec`] - 역할별 RSA 키로 클레임 서명/검증 (RS256)
//! - [`token_service`] - 로그인, 액세스 토큰 검증, 리프레시 토큰 회전

pub mod claim_codec;
pub mod password_hasher;
pub mod token_service;

pub use claim_codec::ClaimCodec;
pub use password_hasher::PasswordHasher;
pub use token_service::TokenLifecycleManager;
