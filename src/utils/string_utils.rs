//! 문자열 처리 유틸리티

use actix_web::http::header::{AUTHORIZATION, HeaderMap};

/// `Authorization: Bearer <token>` 헤더 값에서 토큰을 꺼냅니다.
///
/// 스킴 이름은 대소문자를 구분하지 않으며, 토큰이 비어 있으면 `None` 입니다.
///
/// # Examples
///
/// ```rust,ignore
/// assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
/// assert_eq!(extract_bearer_token("Basic dXNlcg=="), None);
/// ```
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    let (scheme, token) = auth_header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// 요청 헤더에서 Bearer 토큰을 꺼냅니다.
pub fn bearer_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(extract_bearer_token)
        .map(str::to_string)
}

/// 공백을 제거하고, 빈 문자열은 `None` 으로 바꿉니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
