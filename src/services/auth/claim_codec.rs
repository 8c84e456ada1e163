//! RS256 클레임 코덱
//!
//! 클레임을 서명된 JWT 로 인코딩하고, 역할별 공개키로 검증/디코딩합니다.
//!
//! # 키 분리
//!
//! 액세스 토큰과 리프레시 토큰은 서로 다른 RSA 키 쌍으로 서명됩니다.
//! 액세스 공개키로는 리프레시 토큰이 검증되지 않고 그 반대도 마찬가지입니다.
//! 따라서 리소스 서비스에 액세스 공개키를 배포해도 리프레시 토큰을 위조하거나
//! 받아들이게 되는 일이 없습니다.
//!
//! # 키 로딩
//!
//! 키는 `TokenConfig` 의 base64 PEM 문자열에서 처음 사용할 때 디코딩되어
//! 역할별로 캐시됩니다. 설정되지 않은 키는 해당 키를 사용하는 연산에서만
//! `KeyNotConfigured` 로 실패합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! let codec = ClaimCodec::new(TokenConfig::from_env());
//!
//! let token = codec.sign(&claims, KeyRole::Access)?;
//! let verified = codec.verify(&token, KeyRole::Access)?;
//! assert_eq!(verified.subject, claims.subject);
//!
//! // 다른 역할의 키로는 검증되지 않음
//! assert!(codec.verify(&token, KeyRole::Refresh).is_err());
//! ```

use base64::{Engine as _, engine::general_purpose};
use chrono::Utc;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use once_cell::sync::OnceCell;
use rsa::RsaPublicKey;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::traits::PublicKeyParts;
use serde_json::{Value, json};

use crate::config::TokenConfig;
use crate::core::errors::{AuthError, AuthResult};
use crate::domain::models::token::{Claims, KeyRole};

#[derive(Default)]
struct RoleKeys {
    encoding: OnceCell<EncodingKey>,
    decoding: OnceCell<DecodingKey>,
}

pub struct ClaimCodec {
    config: TokenConfig,
    access: RoleKeys,
    refresh: RoleKeys,
}

impl ClaimCodec {
    pub fn new(config: TokenConfig) -> Self {
        Self {
            config,
            access: RoleKeys::default(),
            refresh: RoleKeys::default(),
        }
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// 역할의 개인키로 클레임에 서명합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::KeyNotConfigured` - 개인키가 설정되지 않음
    /// * `AuthError::KeyDecodeError` - base64 또는 PEM 형식 오류
    /// * `AuthError::SigningError` - 서명 실패
    pub fn sign(&self, claims: &Claims, role: KeyRole) -> AuthResult<String> {
        let key = self.encoding_key(role)?;

        encode(&Header::new(Algorithm::RS256), claims, key)
            .map_err(|e| AuthError::SigningError(e.to_string()))
    }

    /// 역할의 공개키로 서명과 만료를 검증하고 클레임을 반환합니다.
    ///
    /// 만료는 시계 오차 보정 없이 `now < expires_at` 로 판단합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::KeyNotConfigured` / `AuthError::KeyDecodeError` - 공개키 문제
    /// * `AuthError::MalformedToken` - JWT 구조로 해석할 수 없음
    /// * `AuthError::TokenExpiredOrInvalid` - 서명 불일치 또는 만료
    pub fn verify(&self, token: &str, role: KeyRole) -> AuthResult<Claims> {
        let key = self.decoding_key(role)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, key, &validation)
            .map_err(verification_error)?
            .claims;

        if claims.is_expired_at(Utc::now().timestamp()) {
            return Err(AuthError::TokenExpiredOrInvalid);
        }

        Ok(claims)
    }

    /// 네 개의 키를 모두 디코딩해 보고 실패 목록을 반환합니다. (시작 시 점검용)
    pub fn check_keys(&self) -> Vec<AuthError> {
        [KeyRole::Access, KeyRole::Refresh]
            .into_iter()
            .flat_map(|role| {
                [
                    self.encoding_key(role).err(),
                    self.decoding_key(role).err(),
                ]
            })
            .flatten()
            .collect()
    }

    /// 액세스 토큰 공개키를 JWKS 문서로 반환합니다.
    ///
    /// 리소스 서비스가 액세스 토큰을 직접 검증할 수 있도록 공개합니다.
    /// 토큰 헤더에 `kid` 가 없으므로 키 항목에도 `kid` 를 넣지 않습니다.
    /// 리프레시 공개키는 노출하지 않습니다.
    pub fn access_jwks(&self) -> AuthResult<Value> {
        let pem = pem_text(self.config.access.public_key.as_deref(), "access public")?;

        let public_key = RsaPublicKey::from_public_key_pem(&pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(&pem))
            .map_err(|e| AuthError::KeyDecodeError(format!("access public key: {}", e)))?;

        let n = public_key.n().to_bytes_be();
        let e = public_key.e().to_bytes_be();

        Ok(json!({
            "keys": [{
                "kty": "RSA",
                "use": "sig",
                "alg": "RS256",
                "n": general_purpose::URL_SAFE_NO_PAD.encode(&n),
                "e": general_purpose::URL_SAFE_NO_PAD.encode(&e),
            }]
        }))
    }

    fn keys(&self, role: KeyRole) -> &RoleKeys {
        match role {
            KeyRole::Access => &self.access,
            KeyRole::Refresh => &self.refresh,
        }
    }

    fn encoding_key(&self, role: KeyRole) -> AuthResult<&EncodingKey> {
        self.keys(role).encoding.get_or_try_init(|| {
            let (label, raw) = match role {
                KeyRole::Access => ("access private", &self.config.access.private_key),
                KeyRole::Refresh => ("refresh private", &self.config.refresh.private_key),
            };
            let pem = pem_bytes(raw.as_deref(), label)?;

            EncodingKey::from_rsa_pem(&pem)
                .map_err(|e| AuthError::KeyDecodeError(format!("{} key: {}", label, e)))
        })
    }

    fn decoding_key(&self, role: KeyRole) -> AuthResult<&DecodingKey> {
        self.keys(role).decoding.get_or_try_init(|| {
            let (label, raw) = match role {
                KeyRole::Access => ("access public", &self.config.access.public_key),
                KeyRole::Refresh => ("refresh public", &self.config.refresh.public_key),
            };
            let pem = pem_bytes(raw.as_deref(), label)?;

            DecodingKey::from_rsa_pem(&pem)
                .map_err(|e| AuthError::KeyDecodeError(format!("{} key: {}", label, e)))
        })
    }
}

/// 설정값(base64 로 인코딩된 PEM)을 PEM 바이트로 디코딩합니다.
fn pem_bytes(encoded: Option<&str>, label: &'static str) -> AuthResult<Vec<u8>> {
    let encoded = encoded.ok_or(AuthError::KeyNotConfigured(label))?;
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();

    general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| AuthError::KeyDecodeError(format!("{} key is not valid base64: {}", label, e)))
}

fn pem_text(encoded: Option<&str>, label: &'static str) -> AuthResult<String> {
    String::from_utf8(pem_bytes(encoded, label)?)
        .map_err(|_| AuthError::KeyDecodeError(format!("{} key is not a PEM document", label)))
}

fn verification_error(err: JwtError) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_)
        | ErrorKind::MissingRequiredClaim(_) => AuthError::MalformedToken(err.to_string()),
        ErrorKind::InvalidRsaKey(_) | ErrorKind::InvalidKeyFormat => {
            AuthError::KeyDecodeError(err.to_string())
        }
        _ => AuthError::TokenExpiredOrInvalid,
    }
}
