//! 토큰 관련 요청 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "refresh_token 이 필요합니다"))]
    pub refresh_token: String,
}

/// 액세스 토큰 검증 요청
///
/// 본문의 `access_token` 이 없으면 `Authorization: Bearer` 헤더를 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyTokenRequest {
    #[serde(default)]
    pub access_token: Option<String>,
}
