//! 사용자 계정(Identity) 엔티티
//!
//! MongoDB `users` 컬렉션의 문서 구조와 1:1 로 대응합니다. 비밀번호 해시를
//! 포함하므로 HTTP 응답에는 절대 직접 직렬화하지 않고 `UserResponse` 로 변환합니다.

use std::collections::BTreeSet;
use std::fmt;

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 신규 계정에 부여되는 기본 역할
pub const DEFAULT_ROLE: &str = "user";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// UUID v4 문자열 (`_id`)
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub password_hash: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default)]
    pub roles: BTreeSet<String>,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Identity {
    /// 새 계정을 생성합니다. ID 는 UUID v4, 역할은 `user` 하나입니다.
    ///
    /// # Arguments
    ///
    /// * `registration` - 회원가입 입력 (평문 비밀번호는 사용하지 않음)
    /// * `password_hash` - 이미 해싱된 비밀번호
    pub fn new(registration: &NewIdentity, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: Uuid::new_v4().to_string(),
            username: registration.username.clone(),
            email: registration.email.clone(),
            password_hash,
            display_name: registration.display_name.clone(),
            roles: BTreeSet::from([DEFAULT_ROLE.to_string()]),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

/// 회원가입 입력
#[derive(Clone, Default)]
pub struct NewIdentity {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
    pub display_name: Option<String>,
}

impl fmt::Debug for NewIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewIdentity")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .finish()
    }
}
