use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::models::auth::LoginCredential;

/// 로그인 요청 DTO (`email` 또는 `username` + `password`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_has_login_name"))]
pub struct LoginRequest {
    pub email: Option<String>,
    pub username: Option<String>,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

impl From<LoginRequest> for LoginCredential {
    fn from(req: LoginRequest) -> Self {
        let non_empty = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };
        LoginCredential {
            email: non_empty(req.email),
            username: non_empty(req.username),
            password: req.password,
        }
    }
}

fn validate_has_login_name(req: &LoginRequest) -> Result<(), ValidationError> {
    let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
    if !present(&req.email) && !present(&req.username) {
        return Err(ValidationError::new("missing_login_name")
            .with_message("이메일 또는 사용자명을 입력해주세요".into()));
    }
    Ok(())
}
