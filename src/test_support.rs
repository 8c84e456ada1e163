//! 단위 테스트 공용 픽스처

use base64::{Engine as _, engine::general_purpose};

use crate::config::TokenConfig;
use crate::domain::entities::{Identity, NewIdentity};
use crate::services::auth::PasswordHasher;

const ACCESS_PRIVATE: &str = include_str!("../tests/fixtures/access_private.pem");
const ACCESS_PUBLIC: &str = include_str!("../tests/fixtures/access_public.pem");
const REFRESH_PRIVATE: &str = include_str!("../tests/fixtures/refresh_private.pem");
const REFRESH_PUBLIC: &str = include_str!("../tests/fixtures/refresh_public.pem");

/// 고정 테스트 키 쌍을 사용하는 토큰 설정
pub fn token_config() -> TokenConfig {
    TokenConfig::from_lookup(|key| {
        let pem = match key {
            "PRIVATE_ACCESS_KEY" => ACCESS_PRIVATE,
            "PUBLIC_ACCESS_KEY" => ACCESS_PUBLIC,
            "PRIVATE_REFRESH_KEY" => REFRESH_PRIVATE,
            "PUBLIC_REFRESH_KEY" => REFRESH_PUBLIC,
            "ISSUER" => return Some("tests".to_string()),
            _ => return None,
        };
        Some(general_purpose::STANDARD.encode(pem))
    })
}

/// 주어진 ID 와 비밀번호를 가진 계정 (bcrypt 비용 4)
pub fn identity(id: &str, email: Option<&str>, password: &str) -> Identity {
    let registration = NewIdentity {
        username: None,
        email: email.map(str::to_string),
        password: password.to_string(),
        display_name: None,
    };
    let hash = PasswordHasher::new(4).hash(password).expect("hash");

    let mut identity = Identity::new(&registration, hash);
    identity.id = id.to_string();
    identity
}
