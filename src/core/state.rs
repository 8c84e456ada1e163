//! 애플리케이션 공유 상태
//!
//! 시작 시 한 번 구성되어 `web::Data<AppState>` 로 모든 워커에 공유됩니다.
//! 서비스는 필요한 협력 객체(저장소, 레지스트리, 코덱 설정)를 생성 시점에
//! 주입받으며, 전역 레지스트리에서 꺼내 쓰지 않습니다.

use std::sync::Arc;
use std::time::Duration;

use crate::core::health::HealthProbe;
use crate::services::auth::TokenLifecycleManager;
use crate::services::users::UserService;

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenLifecycleManager>,
    pub users: Arc<UserService>,
    pub probes: Vec<Arc<dyn HealthProbe>>,
    /// 요청 하나당 처리 시한
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        tokens: Arc<TokenLifecycleManager>,
        users: Arc<UserService>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            tokens,
            users,
            probes: Vec::new(),
            request_timeout,
        }
    }

    pub fn with_probe(mut self, probe: Arc<dyn HealthProbe>) -> Self {
        self.probes.push(probe);
        self
    }
}
