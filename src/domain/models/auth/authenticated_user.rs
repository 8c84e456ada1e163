use std::future::{Ready, ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::domain::models::token::Claims;

/// 검증된 액세스 토큰에서 추출한 요청 주체
///
/// `AuthMiddleware` 가 request extensions 에 넣고, 핸들러는 추출자로 꺼냅니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub subject: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub expires_at: i64,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.subject,
            username: claims.username,
            email: claims.email,
            expires_at: claims.expires_at,
        }
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다",
            ))),
        }
    }
}
