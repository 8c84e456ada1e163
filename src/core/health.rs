//! 외부 의존성 헬스 체크

use async_trait::async_trait;

/// `/healthz` 에서 확인하는 외부 의존성 (MongoDB, Redis)
#[async_trait]
pub trait HealthProbe: Send + Sync {
    fn name(&self) -> &'static str;

    async fn ping(&self) -> Result<(), String>;
}
