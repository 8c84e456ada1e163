//! 사용자 서비스
//!
//! 회원가입과 계정 조회를 담당합니다. 반환값은 항상 비밀번호 해시가 제거된
//! `UserResponse` 입니다.

use std::sync::Arc;

use crate::core::errors::{AuthError, AuthResult, StoreError};
use crate::domain::dto::users::UserResponse;
use crate::domain::entities::{Identity, NewIdentity};
use crate::repositories::users::IdentityStore;
use crate::services::auth::PasswordHasher;

pub struct UserService {
    identities: Arc<dyn IdentityStore>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(identities: Arc<dyn IdentityStore>, hasher: PasswordHasher) -> Self {
        Self { identities, hasher }
    }

    /// 새 계정을 등록합니다.
    ///
    /// 사용자명, 이메일 순서로 중복을 확인한 뒤 비밀번호를 해싱하고 UUID 를
    /// 부여해 저장합니다. 확인과 저장 사이에 다른 요청이 같은 값을 선점한 경우에도
    /// 저장소의 유니크 제약 위반이 같은 에러로 변환됩니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::UsernameTaken` / `AuthError::EmailTaken` - 중복
    /// * `AuthError::HashError` - 해싱 실패
    /// * `AuthError::Store` - 저장소 실패
    pub async fn register(&self, registration: NewIdentity) -> AuthResult<UserResponse> {
        if let Some(username) = registration.username.as_deref() {
            if self.identities.find_by_username(username).await?.is_some() {
                return Err(AuthError::UsernameTaken);
            }
        }

        if let Some(email) = registration.email.as_deref() {
            if self.identities.find_by_email(email).await?.is_some() {
                return Err(AuthError::EmailTaken);
            }
        }

        let password_hash = self.hasher.hash(&registration.password)?;
        let identity = Identity::new(&registration, password_hash);

        match self.identities.insert(&identity).await {
            Ok(id) => log::info!("👤 회원가입 완료: {}", id),
            Err(StoreError::Conflict(field)) => return Err(conflict_error(&field)),
            Err(e) => return Err(e.into()),
        }

        Ok(UserResponse::from(identity))
    }

    /// ID 로 계정을 조회합니다.
    pub async fn get_identity(&self, id: &str) -> AuthResult<UserResponse> {
        self.identities
            .find_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or(AuthError::IdentityNotFound)
    }
}

fn conflict_error(field: &str) -> AuthError {
    match field {
        "username" => AuthError::UsernameTaken,
        "email" => AuthError::EmailTaken,
        other => AuthError::Store(StoreError::Conflict(other.to_string())),
    }
}
