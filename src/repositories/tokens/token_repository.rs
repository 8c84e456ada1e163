//! Redis 기반 리프레시 토큰 레지스트리
//!
//! 토큰 원문 대신 SHA-256 해시를 키로 사용합니다.
//!
//! | 연산 | Redis 명령 |
//! |------|-----------|
//! | `set_with_ttl` | `SETEX refresh_token:<sha256> <ttl> "true"` |
//! | `exists` | `EXISTS refresh_token:<sha256>` |
//! | `delete` | `DEL refresh_token:<sha256>` (삭제 개수 > 0 이면 소비 성공) |

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use super::RefreshTokenRegistry;
use crate::caching::redis::RedisClient;
use crate::core::errors::RegistryError;

const KEY_PREFIX: &str = "refresh_token";

pub struct TokenRepository {
    redis: Arc<RedisClient>,
}

impl TokenRepository {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

pub(crate) fn registry_key(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{}:{:x}", KEY_PREFIX, hasher.finalize())
}

fn registry_error(err: redis::RedisError) -> RegistryError {
    RegistryError(err.to_string())
}

#[async_trait]
impl RefreshTokenRegistry for TokenRepository {
    async fn exists(&self, token: &str) -> Result<bool, RegistryError> {
        self.redis
            .exists(&registry_key(token))
            .await
            .map_err(registry_error)
    }

    async fn set_with_ttl(&self, token: &str, value: &str, ttl: Duration) -> Result<(), RegistryError> {
        // SETEX 는 0초를 허용하지 않음
        let seconds = ttl.as_secs().max(1);

        self.redis
            .set_with_expiry(&registry_key(token), value, seconds)
            .await
            .map_err(registry_error)?;

        log::debug!("리프레시 토큰 등록 완료 (ttl: {}초)", seconds);
        Ok(())
    }

    async fn delete(&self, token: &str) -> Result<bool, RegistryError> {
        self.redis
            .del(&registry_key(token))
            .await
            .map_err(registry_error)
    }
}
