use serde::{Deserialize, Serialize};

use crate::domain::entities::Identity;

/// 외부로 노출되는 계정 정보
///
/// 비밀번호 해시는 포함하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub roles: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Identity> for UserResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username,
            email: identity.email,
            display_name: identity.display_name,
            roles: identity.roles.into_iter().collect(),
            created_at: identity.created_at.try_to_rfc3339_string().unwrap_or_default(),
            updated_at: identity.updated_at.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewIdentity;

    #[test]
    fn test_password_hash_is_never_serialized() {
        let registration = NewIdentity {
            username: Some("carol".into()),
            email: Some("carol@example.com".into()),
            password: "Secret123".into(),
            display_name: Some("Carol".into()),
        };
        let identity = Identity::new(&registration, "$2b$04$abcdefghijklmnopqrstuv".into());

        let json = serde_json::to_string(&UserResponse::from(identity)).unwrap();

        assert!(!json.contains("password"));
        assert!(!json.contains("$2b$04$"));
        assert!(json.contains("\"roles\":[\"user\"]"));
    }
}
