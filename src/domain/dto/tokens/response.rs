use serde::{Deserialize, Serialize};

use crate::domain::models::token::Claims;

/// `/auth/verify` 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyTokenResponse {
    pub valid: bool,
    pub subject: String,
    pub issuer: String,
    pub issued_at: i64,
    pub expires_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<Claims> for VerifyTokenResponse {
    fn from(claims: Claims) -> Self {
        Self {
            valid: true,
            subject: claims.subject,
            issuer: claims.issuer,
            issued_at: claims.issued_at,
            expires_at: claims.expires_at,
            username: claims.username,
            email: claims.email,
        }
    }
}
