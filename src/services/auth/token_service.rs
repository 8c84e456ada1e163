//! # 토큰 수명주기 관리
//!
//! 로그인(발급), 액세스 토큰 검증, 리프레시 토큰 회전을 담당합니다.
//!
//! ## 리프레시 토큰 상태
//!
//! ```text
//! ISSUED ──(refresh 성공: 레지스트리 삭제)──▶ CONSUMED
//!    └────(TTL 경과: 항목 자동 소멸)────────▶ EXPIRED
//! ```
//!
//! 두 종료 상태는 외부에서 구분되지 않으며 모두 `RefreshTokenNotFound` 로 보입니다.
//!
//! ## 보장
//!
//! - 레지스트리 기록에 실패한 리프레시 토큰은 절대 반환하지 않습니다.
//! - 갱신 시 기존 항목을 먼저 삭제한 뒤 새 토큰을 발급합니다. 삭제가 실제로
//!   일어난 요청만 진행하므로, 같은 토큰으로 동시에 들어온 요청 중 하나만 성공합니다.
//! - 이 구조체는 가변 공유 상태를 갖지 않습니다. 상태는 계정 저장소와
//!   레지스트리에만 있습니다.

use std::sync::Arc;

use chrono::Utc;

use crate::core::errors::{AuthError, AuthResult};
use crate::domain::entities::Identity;
use crate::domain::models::auth::LoginCredential;
use crate::domain::models::token::{Claims, KeyRole, TokenPair};
use crate::repositories::tokens::{REGISTRY_SENTINEL, RefreshTokenRegistry};
use crate::repositories::users::IdentityStore;
use crate::services::auth::claim_codec::ClaimCodec;
use crate::services::auth::password_hasher::PasswordHasher;

pub struct TokenLifecycleManager {
    identities: Arc<dyn IdentityStore>,
    registry: Arc<dyn RefreshTokenRegistry>,
    codec: Arc<ClaimCodec>,
    hasher: PasswordHasher,
}

impl TokenLifecycleManager {
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        registry: Arc<dyn RefreshTokenRegistry>,
        codec: Arc<ClaimCodec>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            identities,
            registry,
            codec,
            hasher,
        }
    }

    pub fn codec(&self) -> &ClaimCodec {
        &self.codec
    }

    /// 자격 증명을 확인하고 액세스/리프레시 토큰 쌍을 발급합니다.
    ///
    /// # Arguments
    ///
    /// * `credential` - 이메일이 있으면 이메일로, 없으면 사용자명으로 계정을 찾습니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::IdentityNotFound` - 일치하는 계정 없음
    /// * `AuthError::InvalidCredentials` - 비밀번호 불일치
    /// * `AuthError::RegistryUnavailable` - 리프레시 토큰 기록 실패 (토큰 미반환)
    /// * 그 외 키 설정/서명/저장소 에러
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let pair = manager.login(&LoginCredential {
    ///     email: Some("a@b.com".into()),
    ///     username: None,
    ///     password: "pw".into(),
    /// }).await?;
    /// ```
    pub async fn login(&self, credential: &LoginCredential) -> AuthResult<TokenPair> {
        let identity = self.resolve(credential).await?.ok_or_else(|| {
            log::info!("로그인 실패: 계정을 찾을 수 없음");
            AuthError::IdentityNotFound
        })?;

        if !self.hasher.verify(&identity.password_hash, &credential.password)? {
            log::info!("로그인 실패: 비밀번호 불일치 (user: {})", identity.id);
            return Err(AuthError::InvalidCredentials);
        }

        let pair = self.issue_pair(&identity).await?;
        log::info!("🔐 로그인 성공: {}", identity.id);
        Ok(pair)
    }

    /// 액세스 토큰을 검증합니다. 레지스트리는 조회하지 않습니다.
    pub fn verify_access(&self, token: &str) -> AuthResult<Claims> {
        self.codec.verify(token, KeyRole::Access)
    }

    /// 리프레시 토큰을 소비하고 새 토큰 쌍을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::MalformedToken` / `AuthError::TokenExpiredOrInvalid` - 리프레시 키로 검증 실패
    /// * `AuthError::RefreshTokenNotFound` - 이미 사용되었거나 만료된 토큰
    /// * `AuthError::IdentityNotFound` - 토큰 주체 계정이 없어짐
    /// * `AuthError::RegistryUnavailable` - 레지스트리 조회/삭제/기록 실패
    pub async fn refresh(&self, token: &str) -> AuthResult<TokenPair> {
        let claims = self.codec.verify(token, KeyRole::Refresh)?;

        if !self.registry.exists(token).await? {
            log::warn!("리프레시 토큰 재사용 또는 만료: {}", claims.subject);
            return Err(AuthError::RefreshTokenNotFound);
        }

        if !self.registry.delete(token).await? {
            log::warn!("리프레시 토큰이 동시 요청에 의해 이미 소비됨: {}", claims.subject);
            return Err(AuthError::RefreshTokenNotFound);
        }

        let identity = self
            .identities
            .find_by_id(&claims.subject)
            .await?
            .ok_or_else(|| {
                log::warn!("리프레시 토큰 주체가 존재하지 않음: {}", claims.subject);
                AuthError::IdentityNotFound
            })?;

        let pair = self.issue_pair(&identity).await?;
        log::info!("🔄 토큰 갱신 완료: {}", identity.id);
        Ok(pair)
    }

    async fn resolve(&self, credential: &LoginCredential) -> AuthResult<Option<Identity>> {
        let identity = match (&credential.email, &credential.username) {
            (Some(email), _) => self.identities.find_by_email(email).await?,
            (None, Some(username)) => self.identities.find_by_username(username).await?,
            (None, None) => None,
        };
        Ok(identity)
    }

    async fn issue_pair(&self, identity: &Identity) -> AuthResult<TokenPair> {
        let config = self.codec.config();
        let now = Utc::now().timestamp();

        let access = Claims::for_identity(identity, &config.issuer, now, config.access_ttl);
        let refresh = Claims::for_identity(identity, &config.issuer, now, config.refresh_ttl);

        let access_token = self.codec.sign(&access, KeyRole::Access)?;
        let refresh_token = self.codec.sign(&refresh, KeyRole::Refresh)?;

        if let Err(e) = self
            .registry
            .set_with_ttl(&refresh_token, REGISTRY_SENTINEL, config.refresh_ttl)
            .await
        {
            log::error!("리프레시 토큰 등록 실패, 발급 취소: {}", e);
            return Err(e.into());
        }

        Ok(TokenPair::bearer(
            access_token,
            refresh_token,
            config.access_ttl.as_secs(),
        ))
    }
}
