//! 사용자 저장소 계약과 MongoDB 구현

use async_trait::async_trait;

use crate::core::errors::StoreError;
use crate::domain::entities::Identity;

pub mod user_repo;

pub use user_repo::UserRepository;

/// 계정 조회/저장 계약
///
/// 서비스 계층은 이 trait 에만 의존하며, 운영에서는 `UserRepository`(MongoDB),
/// 테스트에서는 `InMemoryIdentityStore` 가 주입됩니다.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, StoreError>;

    /// 계정을 저장하고 ID 를 반환합니다.
    ///
    /// 사용자명/이메일/ID 가 이미 존재하면 `StoreError::Conflict(필드명)` 입니다.
    async fn insert(&self, identity: &Identity) -> Result<String, StoreError>;
}
