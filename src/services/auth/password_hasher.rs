//! 비밀번호 해싱 (bcrypt)
//!
//! 솔트는 해시마다 내부에서 무작위로 생성되며, 검증은 bcrypt 의 상수 시간
//! 비교를 사용합니다. 72바이트를 넘는 입력은 bcrypt 규칙대로 잘려서 해싱되므로
//! 입력 형태 때문에 실패하지 않습니다.

use crate::config::PasswordConfig;
use crate::core::errors::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// `BCRYPT_COST` / 실행 환경에 따른 비용으로 생성합니다.
    pub fn from_env() -> Self {
        Self::new(PasswordConfig::bcrypt_cost())
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// 평문 비밀번호를 해싱합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::HashError` - bcrypt 내부 실패 (잘못된 비용 값 등)
    pub fn hash(&self, plaintext: &str) -> AuthResult<String> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| AuthError::HashError(e.to_string()))
    }

    /// 해시와 평문을 비교합니다. 불일치는 에러가 아니라 `Ok(false)` 입니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::HashError` - 저장된 해시 문자열 형식이 잘못된 경우
    pub fn verify(&self, hash: &str, plaintext: &str) -> AuthResult<bool> {
        bcrypt::verify(plaintext, hash).map_err(|e| AuthError::HashError(e.to_string()))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
