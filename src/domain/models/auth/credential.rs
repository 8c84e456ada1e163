use std::fmt;

/// 로그인 자격 증명
///
/// 이메일이 있으면 이메일로, 없으면 사용자명으로 계정을 찾습니다.
#[derive(Clone, Default)]
pub struct LoginCredential {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: String,
}

impl fmt::Debug for LoginCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredential")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
