//! 헬스 체크 핸들러

use std::time::Duration;

use actix_web::{HttpResponse, get, web};
use serde_json::{Map, Value, json};

use crate::core::AppState;

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// MongoDB 와 Redis 에 ping 을 보내 서비스 상태를 확인합니다.
///
/// # Responses
///
/// * `200 OK` - 모든 의존성 응답
/// * `500 Internal Server Error` - 하나 이상 실패
///
/// ```json
/// {
///   "status": "healthy",
///   "checks": { "mongodb": "up", "redis": "up" },
///   "timestamp": "2025-01-01T00:00:00Z"
/// }
/// ```
#[get("/healthz")]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let mut checks = Map::new();
    let mut healthy = true;

    for probe in &state.probes {
        let status = match tokio::time::timeout(PROBE_TIMEOUT, probe.ping()).await {
            Ok(Ok(())) => "up".to_string(),
            Ok(Err(e)) => {
                log::error!("❌ {} 헬스 체크 실패: {}", probe.name(), e);
                healthy = false;
                "down".to_string()
            }
            Err(_) => {
                log::error!("❌ {} 헬스 체크 시간 초과", probe.name());
                healthy = false;
                "timeout".to_string()
            }
        };
        checks.insert(probe.name().to_string(), Value::String(status));
    }

    let body = json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "checks": checks,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::InternalServerError().json(body)
    }
}
