//! # 리포지토리 계층
//!
//! 서비스가 의존하는 두 가지 외부 협력자 계약과 그 구현을 제공합니다.
//!
//! | 계약 | 운영 구현 | 테스트 구현 |
//! |------|-----------|-------------|
//! | [`IdentityStore`] | [`UserRepository`] (MongoDB) | [`InMemoryIdentityStore`] |
//! | [`RefreshTokenRegistry`] | [`TokenRepository`] (Redis) | [`InMemoryTokenRegistry`] |

pub mod memory;
pub mod tokens;
pub mod users;

pub use memory::{InMemoryIdentityStore, InMemoryTokenRegistry};
pub use tokens::{REGISTRY_SENTINEL, RefreshTokenRegistry, TokenRepository};
pub use users::{IdentityStore, UserRepository};
