//! 데이터 저장소 및 서버 설정 관리 모듈
//!
//! MongoDB, Redis 연결 정보와 HTTP 서버, 실행 환경, 비밀번호 해싱 비용을 관리합니다.

use std::env;
use std::time::Duration;

/// 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 변수로 현재 환경을 판별합니다. 값이 없으면 운영 환경입니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// bcrypt 작업 비용(work factor) 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// `BCRYPT_COST` 가 4..=15 범위면 그 값을, 아니면 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        Self::parse_cost(env::var("BCRYPT_COST").ok().as_deref())
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(&Environment::current()))
    }

    fn parse_cost(raw: Option<&str>) -> Option<u32> {
        raw.and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    /// 요청 하나당 처리 시한 (`REQUEST_TIMEOUT_SECONDS`, 기본 20초)
    pub fn request_timeout() -> Duration {
        let secs = env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(20);
        Duration::from_secs(secs)
    }
}

pub struct DatabaseConfig;

impl DatabaseConfig {
    pub fn uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "auth_service".to_string())
    }
}

pub struct CacheConfig;

impl CacheConfig {
    pub fn redis_url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str(" Dev "), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("stage"), Environment::Staging);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Staging), 10);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 12);
    }

    #[test]
    fn test_bcrypt_cost_range() {
        assert_eq!(PasswordConfig::parse_cost(Some("10")), Some(10));
        assert_eq!(PasswordConfig::parse_cost(Some("3")), None);
        assert_eq!(PasswordConfig::parse_cost(Some("16")), None);
        assert_eq!(PasswordConfig::parse_cost(Some("fast")), None);
        assert_eq!(PasswordConfig::parse_cost(None), None);
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }
        if env::var("REQUEST_TIMEOUT_SECONDS").is_err() {
            assert_eq!(ServerConfig::request_timeout(), Duration::from_secs(20));
        }
    }
}
