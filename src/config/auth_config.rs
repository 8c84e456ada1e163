//! # Token Configuration Module
//!
//! 액세스/리프레시 토큰 서명에 필요한 키 쌍, 발급자(issuer), 토큰 수명을
//! 관리합니다. 프로세스 시작 시 한 번 로드된 뒤 `ClaimCodec` 과
//! `TokenLifecycleManager` 에 주입되며, 런타임에 환경 변수를 다시 읽지 않습니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! # 각 값은 PEM 파일 전체를 base64 로 인코딩한 문자열
//! export PRIVATE_ACCESS_KEY="$(base64 -w0 access_private.pem)"
//! export PUBLIC_ACCESS_KEY="$(base64 -w0 access_public.pem)"
//! export PRIVATE_REFRESH_KEY="$(base64 -w0 refresh_private.pem)"
//! export PUBLIC_REFRESH_KEY="$(base64 -w0 refresh_public.pem)"
//!
//! export ISSUER="auth-service"
//! export ACCESS_TOKEN_TTL_SECONDS="300"    # 5분
//! export REFRESH_TOKEN_TTL_SECONDS="3600"  # 60분
//! ```
//!
//! 액세스 키 쌍과 리프레시 키 쌍은 반드시 서로 달라야 합니다. 한 종류의 검증
//! 키를 가진 쪽이 다른 종류의 토큰을 위조할 수 없도록 분리된 경계입니다.
//!
//! 키가 비어 있어도 로드는 실패하지 않습니다. 해당 키를 쓰는 연산이
//! `AuthError::KeyNotConfigured` 로 실패합니다.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::domain::models::token::KeyRole;

const DEFAULT_ISSUER: &str = "auth-service";
const DEFAULT_ACCESS_TTL_SECONDS: u64 = 5 * 60;
const DEFAULT_REFRESH_TTL_SECONDS: u64 = 60 * 60;

/// 한 역할(access/refresh)의 키 쌍 (base64 로 인코딩된 PEM)
#[derive(Clone, Default)]
pub struct KeyPairConfig {
    pub private_key: Option<String>,
    pub public_key: Option<String>,
}

impl fmt::Debug for KeyPairConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPairConfig")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("public_key", &self.public_key.is_some())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub access: KeyPairConfig,
    pub refresh: KeyPairConfig,
    pub issuer: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl TokenConfig {
    /// 프로세스 환경 변수에서 설정을 로드합니다.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 키 조회 함수로 설정을 구성합니다.
    ///
    /// 공백뿐인 값은 설정되지 않은 것으로 취급합니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let vars: HashMap<&str, String> = HashMap::from([("ISSUER", "tests".to_string())]);
    /// let config = TokenConfig::from_lookup(|key| vars.get(key).cloned());
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            access: KeyPairConfig {
                private_key: value("PRIVATE_ACCESS_KEY"),
                public_key: value("PUBLIC_ACCESS_KEY"),
            },
            refresh: KeyPairConfig {
                private_key: value("PRIVATE_REFRESH_KEY"),
                public_key: value("PUBLIC_REFRESH_KEY"),
            },
            issuer: value("ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
            access_ttl: seconds(
                value("ACCESS_TOKEN_TTL_SECONDS"),
                "ACCESS_TOKEN_TTL_SECONDS",
                DEFAULT_ACCESS_TTL_SECONDS,
            ),
            refresh_ttl: seconds(
                value("REFRESH_TOKEN_TTL_SECONDS"),
                "REFRESH_TOKEN_TTL_SECONDS",
                DEFAULT_REFRESH_TTL_SECONDS,
            ),
        }
    }

    pub fn keys(&self, role: KeyRole) -> &KeyPairConfig {
        match role {
            KeyRole::Access => &self.access,
            KeyRole::Refresh => &self.refresh,
        }
    }

    pub fn lifetime(&self, role: KeyRole) -> Duration {
        match role {
            KeyRole::Access => self.access_ttl,
            KeyRole::Refresh => self.refresh_ttl,
        }
    }

    /// 설정되지 않은 키의 환경 변수 이름 목록 (시작 시 경고용)
    pub fn missing_keys(&self) -> Vec<&'static str> {
        [
            ("PRIVATE_ACCESS_KEY", &self.access.private_key),
            ("PUBLIC_ACCESS_KEY", &self.access.public_key),
            ("PRIVATE_REFRESH_KEY", &self.refresh.private_key),
            ("PUBLIC_REFRESH_KEY", &self.refresh.public_key),
        ]
        .into_iter()
        .filter(|(_, key)| key.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

/// 토큰 수명 상한 (1년)
const MAX_LIFETIME_SECS: u64 = 365 * 24 * 60 * 60;

fn seconds(raw: Option<String>, name: &str, default: u64) -> Duration {
    match raw.map(|v| v.parse::<u64>()) {
        Some(Ok(secs)) if (1..=MAX_LIFETIME_SECS).contains(&secs) => Duration::from_secs(secs),
        Some(_) => {
            log::warn!("{} 값이 올바르지 않습니다. 기본값 {}초 사용", name, default);
            Duration::from_secs(default)
        }
        None => Duration::from_secs(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> TokenConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TokenConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.issuer, "auth-service");
        assert_eq!(config.lifetime(KeyRole::Access), Duration::from_secs(300));
        assert_eq!(config.lifetime(KeyRole::Refresh), Duration::from_secs(3600));
        assert_eq!(config.missing_keys().len(), 4);
    }

    #[test]
    fn test_keys_are_routed_by_role() {
        let config = config_from(&[
            ("PRIVATE_ACCESS_KEY", "YWNjZXNz"),
            ("PUBLIC_REFRESH_KEY", " cmVmcmVzaA== "),
            ("PRIVATE_REFRESH_KEY", "   "),
        ]);

        assert_eq!(config.keys(KeyRole::Access).private_key.as_deref(), Some("YWNjZXNz"));
        assert_eq!(config.keys(KeyRole::Refresh).public_key.as_deref(), Some("cmVmcmVzaA=="));
        assert!(config.keys(KeyRole::Refresh).private_key.is_none());
        assert_eq!(
            config.missing_keys(),
            vec!["PUBLIC_ACCESS_KEY", "PRIVATE_REFRESH_KEY"]
        );
    }

    #[test]
    fn test_invalid_lifetime_falls_back() {
        let config = config_from(&[
            ("ACCESS_TOKEN_TTL_SECONDS", "soon"),
            ("REFRESH_TOKEN_TTL_SECONDS", "7200"),
        ]);

        assert_eq!(config.access_ttl, Duration::from_secs(300));
        assert_eq!(config.refresh_ttl, Duration::from_secs(7200));
    }

    #[test]
    fn test_oversized_lifetime_falls_back() {
        let config = config_from(&[
            ("ACCESS_TOKEN_TTL_SECONDS", "18446744073709551615"),
            ("REFRESH_TOKEN_TTL_SECONDS", "31536001"),
        ]);

        assert_eq!(config.access_ttl, Duration::from_secs(300));
        assert_eq!(config.refresh_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let config = config_from(&[("PRIVATE_ACCESS_KEY", "c2VjcmV0")]);
        let printed = format!("{:?}", config);

        assert!(!printed.contains("c2VjcmV0"));
        assert!(printed.contains("<redacted>"));
    }
}
