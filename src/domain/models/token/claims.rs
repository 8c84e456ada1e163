//! JWT 클레임과 토큰 역할
//!
//! 토큰 자체에는 "종류" 필드가 없습니다. 액세스/리프레시 구분은 어느 역할의
//! 공개키로 서명 검증에 성공하는지로만 결정됩니다.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Identity;

/// 서명/검증에 사용할 키 쌍의 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRole {
    Access,
    Refresh,
}

impl KeyRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyRole::Access => "access",
            KeyRole::Refresh => "refresh",
        }
    }
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 토큰에 서명되어 포함되는 클레임
///
/// 타임스탬프는 초 단위 Unix 시간입니다. `token_id`(jti) 는 토큰마다 새로
/// 생성되므로, 같은 사용자에게 같은 초에 발급된 두 토큰도 서로 다릅니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "sub")]
    pub subject: String,

    #[serde(rename = "iss")]
    pub issuer: String,

    #[serde(rename = "iat")]
    pub issued_at: i64,

    #[serde(rename = "exp")]
    pub expires_at: i64,

    #[serde(rename = "jti", default)]
    pub token_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Claims {
    /// 계정 정보로 클레임을 구성합니다.
    ///
    /// # Arguments
    ///
    /// * `identity` - 토큰 주체
    /// * `issuer` - 발급자 문자열
    /// * `issued_at` - 발급 시각 (Unix 초)
    /// * `lifetime` - 토큰 유효 기간
    pub fn for_identity(identity: &Identity, issuer: &str, issued_at: i64, lifetime: Duration) -> Self {
        Self {
            subject: identity.id.clone(),
            issuer: issuer.to_string(),
            issued_at,
            expires_at: issued_at
                .saturating_add(i64::try_from(lifetime.as_secs()).unwrap_or(i64::MAX)),
            token_id: Uuid::new_v4().to_string(),
            username: identity.username.clone(),
            email: identity.email.clone(),
        }
    }

    /// 시계 오차 보정 없이 `now < expires_at` 일 때만 유효합니다.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}
