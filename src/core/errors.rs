//! 인증 서비스 전역 에러 시스템
//!
//! 토큰 수명주기(로그인, 검증, 갱신)와 회원가입에서 발생하는 모든 실패를
//! 하나의 `thiserror` 열거형으로 표현합니다. `actix_web::ResponseError`를
//! 구현하므로 핸들러는 `?` 만으로 HTTP 응답 변환까지 위임할 수 있습니다.
//!
//! ## 에러 분류
//!
//! | 분류 | 변형 | HTTP |
//! |------|------|------|
//! | Configuration | `KeyNotConfigured`, `KeyDecodeError` | 500 |
//! | Crypto | `SigningError`, `HashError`, `MalformedToken`, `TokenExpiredOrInvalid` | 500 / 401 |
//! | Business | `IdentityNotFound`, `InvalidCredentials`, `UsernameTaken`, `EmailTaken` | 401 / 409 |
//! | Replay | `RefreshTokenNotFound` | 401 |
//! | Infrastructure | `Store`, `RegistryUnavailable` | 500 / 503 |
//! | Request | `Validation`, `DeadlineExceeded` | 400 / 504 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::errors::{AuthError, AuthResult};
//!
//! async fn consume(registry: &dyn RefreshTokenRegistry, token: &str) -> AuthResult<()> {
//!     if !registry.exists(token).await? {
//!         return Err(AuthError::RefreshTokenNotFound);
//!     }
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// 사용자 저장소(Identity Store) 에러
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// 유니크 인덱스 위반 (필드 이름 포함)
    #[error("duplicate value for unique field `{0}`")]
    Conflict(String),

    /// 드라이버/네트워크 등 저장소 자체의 실패
    #[error("identity store failure: {0}")]
    Backend(String),
}

/// 리프레시 토큰 레지스트리(캐시) 에러
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("refresh token registry failure: {0}")]
pub struct RegistryError(pub String);

/// 에러 분류
///
/// 재시도 가능 여부와 전송 계층 상태 코드를 결정하는 기준이 됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Crypto,
    Business,
    Replay,
    Infrastructure,
    Request,
}

/// 인증 서비스 에러 타입
#[derive(Error, Debug)]
pub enum AuthError {
    /// 요청한 역할의 키가 설정에 없음
    #[error("{0} key is not configured")]
    KeyNotConfigured(&'static str),

    /// 설정된 키가 올바른 base64/PEM 이 아님
    #[error("key material could not be decoded: {0}")]
    KeyDecodeError(String),

    #[error("token signing failed: {0}")]
    SigningError(String),

    /// 토큰 구조 자체를 해석할 수 없음
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// 서명 불일치 또는 만료
    #[error("token expired or invalid")]
    TokenExpiredOrInvalid,

    #[error("password hashing failed: {0}")]
    HashError(String),

    #[error("identity not found")]
    IdentityNotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    /// 유효한 토큰의 주체 계정이 더 이상 존재하지 않음
    #[error("account not found")]
    AccountNotFound,

    #[error("username already exists")]
    UsernameTaken,

    #[error("email already exists")]
    EmailTaken,

    /// 이미 사용되었거나 만료된 리프레시 토큰
    #[error("refresh token not found")]
    RefreshTokenNotFound,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    RegistryUnavailable(#[from] RegistryError),

    /// 요청 본문 검증 실패 (400 Bad Request)
    #[error("validation error: {0}")]
    Validation(String),

    /// 호출자가 지정한 처리 시한 초과
    #[error("operation exceeded its deadline of {0:?}")]
    DeadlineExceeded(Duration),
}

impl AuthError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AuthError::KeyNotConfigured(_) | AuthError::KeyDecodeError(_) => {
                ErrorCategory::Configuration
            }
            AuthError::SigningError(_)
            | AuthError::HashError(_)
            | AuthError::MalformedToken(_)
            | AuthError::TokenExpiredOrInvalid => ErrorCategory::Crypto,
            AuthError::IdentityNotFound
            | AuthError::InvalidCredentials
            | AuthError::AccountNotFound
            | AuthError::UsernameTaken
            | AuthError::EmailTaken => ErrorCategory::Business,
            AuthError::RefreshTokenNotFound => ErrorCategory::Replay,
            AuthError::Store(_) | AuthError::RegistryUnavailable(_) => {
                ErrorCategory::Infrastructure
            }
            AuthError::Validation(_) | AuthError::DeadlineExceeded(_) => ErrorCategory::Request,
        }
    }

    /// 클라이언트에게 노출할 메시지
    ///
    /// 로그인 실패는 사용자 열거를 막기 위해 하나의 문구로 통일하고,
    /// 서버 측 실패는 내부 정보를 숨깁니다.
    pub fn public_message(&self) -> String {
        match self {
            AuthError::IdentityNotFound | AuthError::InvalidCredentials => {
                "invalid credentials".to_string()
            }
            AuthError::MalformedToken(_) | AuthError::TokenExpiredOrInvalid => {
                "token expired or invalid".to_string()
            }
            AuthError::RegistryUnavailable(_) => "service temporarily unavailable".to_string(),
            AuthError::DeadlineExceeded(_) => "request timed out".to_string(),
            _ if self.status_code().is_server_error() => "internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AuthError::Validation(errors.to_string())
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::MalformedToken(_)
            | AuthError::TokenExpiredOrInvalid
            | AuthError::IdentityNotFound
            | AuthError::InvalidCredentials
            | AuthError::RefreshTokenNotFound => StatusCode::UNAUTHORIZED,
            AuthError::AccountNotFound => StatusCode::NOT_FOUND,
            AuthError::UsernameTaken | AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::RegistryUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::DeadlineExceeded(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 에러를 `{ success: false, data: null, message }` JSON 으로 변환합니다.
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("❌ {:?} 에러 응답: {}", self.category(), self);
        }

        HttpResponse::build(status).json(json!({
            "success": false,
            "data": null,
            "message": self.public_message(),
        }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AuthResult<T> = Result<T, AuthError>;
