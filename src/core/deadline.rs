//! 요청 처리 시한(deadline) 유틸리티

use std::future::Future;
use std::time::Duration;

use crate::core::errors::{AuthError, AuthResult};

/// `operation` 을 `deadline` 안에 완료시키고, 시간이 초과되면 future 를 drop 합니다.
///
/// drop 된 로그인/갱신 future 는 토큰을 반환하지 않습니다. 레지스트리 기록이 이미
/// 끝난 경우 그 항목은 호출자에게 전달되지 않은 채 TTL 로 소멸합니다.
///
/// # Errors
///
/// * `AuthError::DeadlineExceeded` - 시한 초과
/// * 그 외 - `operation` 이 반환한 에러 그대로
///
/// # Examples
///
/// ```rust,ignore
/// let pair = with_deadline(Duration::from_secs(20), tokens.login(credential)).await?;
/// ```
pub async fn with_deadline<F, T>(deadline: Duration, operation: F) -> AuthResult<T>
where
    F: Future<Output = AuthResult<T>>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result,
        Err(_) => {
            log::warn!("⏱️ 처리 시한 {:?} 초과, 작업을 중단합니다", deadline);
            Err(AuthError::DeadlineExceeded(deadline))
        }
    }
}
