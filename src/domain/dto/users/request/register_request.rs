//! 회원가입 요청 DTO
//!
//! 클라이언트 입력을 검증한 뒤 서비스 계층의 `NewIdentity` 로 변환합니다.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::NewIdentity;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_has_login_name"))]
pub struct RegisterRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,

    #[validate(length(min = 3, max = 30, message = "사용자명은 3-30자 사이여야 합니다"))]
    #[validate(custom(function = "validate_username"))]
    pub username: Option<String>,

    #[validate(length(min = 1, max = 50, message = "표시 이름은 1-50자 사이여야 합니다"))]
    pub display_name: Option<String>,

    #[validate(length(min = 8, max = 72, message = "비밀번호는 8-72자 사이여야 합니다"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
}

impl From<RegisterRequest> for NewIdentity {
    fn from(req: RegisterRequest) -> Self {
        NewIdentity {
            username: req.username.map(|v| v.trim().to_string()),
            email: req.email.map(|v| v.trim().to_string()),
            password: req.password,
            display_name: req.display_name,
        }
    }
}

fn validate_has_login_name(req: &RegisterRequest) -> Result<(), ValidationError> {
    let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
    if !present(&req.email) && !present(&req.username) {
        return Err(ValidationError::new("missing_login_name")
            .with_message("이메일 또는 사용자명 중 하나는 필요합니다".into()));
    }
    Ok(())
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(ValidationError::new("invalid_username")
            .with_message("사용자명은 알파벳, 숫자, 언더스코어만 사용 가능합니다".into()));
    }
    Ok(())
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(has_uppercase && has_lowercase && has_digit) {
        return Err(ValidationError::new("weak_password")
            .with_message("비밀번호는 대문자, 소문자, 숫자를 포함해야 합니다".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: Option<&str>, username: Option<&str>, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.map(str::to_string),
            username: username.map(str::to_string),
            display_name: None,
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request(Some("a@b.com"), Some("alice_1"), "Passw0rdX").validate().is_ok());
        assert!(request(None, Some("alice"), "Passw0rdX").validate().is_ok());
        assert!(request(Some("a@b.com"), None, "Passw0rdX").validate().is_ok());
    }

    #[test]
    fn test_requires_email_or_username() {
        assert!(request(None, None, "Passw0rdX").validate().is_err());
        assert!(request(Some("  "), None, "Passw0rdX").validate().is_err());
    }

    #[test]
    fn test_rejects_bad_fields() {
        assert!(request(Some("not-an-email"), None, "Passw0rdX").validate().is_err());
        assert!(request(None, Some("al"), "Passw0rdX").validate().is_err());
        assert!(request(None, Some("bad name!"), "Passw0rdX").validate().is_err());
        assert!(request(None, Some("alice"), "weakpassword").validate().is_err());
        assert!(request(None, Some("alice"), "Sh0rt").validate().is_err());
    }
}
