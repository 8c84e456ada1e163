//! 리프레시 토큰 단일 사용 레지스트리 계약과 Redis 구현

use std::time::Duration;

use async_trait::async_trait;

use crate::core::errors::RegistryError;

pub mod token_repository;

pub use token_repository::TokenRepository;

/// 레지스트리에 기록하는 값
pub const REGISTRY_SENTINEL: &str = "true";

/// 아직 사용되지 않은 리프레시 토큰을 추적하는 만료형 키-값 저장소
///
/// 키가 존재하면 그 토큰은 발급되었고 아직 소비/만료되지 않은 상태입니다.
#[async_trait]
pub trait RefreshTokenRegistry: Send + Sync {
    async fn exists(&self, token: &str) -> Result<bool, RegistryError>;

    async fn set_with_ttl(&self, token: &str, value: &str, ttl: Duration) -> Result<(), RegistryError>;

    /// 항목을 삭제하고, 실제로 삭제했는지 여부를 반환합니다.
    ///
    /// 동시에 들어온 같은 토큰의 갱신 요청 중 하나만 `true` 를 받습니다.
    async fn delete(&self, token: &str) -> Result<bool, RegistryError>;
}
