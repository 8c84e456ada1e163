use serde::{Deserialize, Serialize};

/// 로그인/갱신 결과로 반환되는 토큰 쌍 (저장하지 않음)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    pub token_type: String,

    /// 액세스 토큰 유효 기간 (초)
    pub expires_in: u64,
}

impl TokenPair {
    pub fn bearer(access_token: String, refresh_token: String, expires_in: u64) -> Self {
        Self {
            access_token,
            refresh_token: Some(refresh_token),
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}
