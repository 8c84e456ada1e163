//! # Redis 클라이언트
//!
//! 리프레시 토큰 레지스트리가 사용하는 얇은 Redis 래퍼입니다.
//!
//! ## 연결 관리
//!
//! `ConnectionManager` 는 하나의 멀티플렉싱 연결을 공유하며 끊어지면 자동으로
//! 재연결합니다. 복제 비용이 작아 명령마다 clone 해서 사용합니다.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisResult};

use crate::core::health::HealthProbe;

#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

impl RedisClient {
    /// Redis 에 연결하고 `PING` 으로 서버 가용성을 확인합니다.
    pub async fn connect(redis_url: &str) -> RedisResult<Self> {
        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let redis = Self { manager };
        redis.ping().await?;

        log::info!("✅ Redis 연결 성공");
        Ok(redis)
    }

    pub async fn ping(&self) -> RedisResult<()> {
        let mut conn = self.manager.clone();
        redis::cmd("PING").query_async::<()>(&mut conn).await
    }

    pub async fn exists(&self, key: &str) -> RedisResult<bool> {
        let mut conn = self.manager.clone();
        conn.exists(key).await
    }

    pub async fn set_with_expiry(&self, key: &str, value: &str, seconds: u64) -> RedisResult<()> {
        let mut conn = self.manager.clone();
        conn.set_ex(key, value, seconds).await
    }

    /// 키를 삭제하고 실제로 삭제되었는지 반환합니다.
    pub async fn del(&self, key: &str) -> RedisResult<bool> {
        let mut conn = self.manager.clone();
        let removed: u64 = conn.del(key).await?;
        Ok(removed > 0)
    }
}

#[async_trait]
impl HealthProbe for RedisClient {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn ping(&self) -> Result<(), String> {
        RedisClient::ping(self).await.map_err(|e| e.to_string())
    }
}
