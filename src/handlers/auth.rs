//! Authentication HTTP Handlers
//!
//! 토큰 수명주기와 회원가입 엔드포인트입니다. 모든 서비스 호출은
//! `AppState::request_timeout` 시한 안에서 실행됩니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | POST | `/api/v1/auth/register` | 회원가입 |
//! | POST | `/api/v1/auth/login` | 토큰 쌍 발급 |
//! | POST | `/api/v1/auth/verify` | 액세스 토큰 검증 |
//! | POST | `/api/v1/auth/refresh` | 리프레시 토큰 회전 |
//! | GET | `/api/v1/auth/profile` | 현재 사용자 (Bearer 필요) |
//! | GET | `/api/v1/auth/jwks.json` | 액세스 토큰 공개키 |

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use validator::Validate;

use crate::core::errors::{AuthError, AuthResult};
use crate::core::{AppState, with_deadline};
use crate::domain::dto::{
    ApiResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, VerifyTokenRequest,
    VerifyTokenResponse,
};
use crate::domain::models::auth::{AuthenticatedUser, LoginCredential};
use crate::middlewares::{AuthMiddleware, RequestId};
use crate::utils::string_utils::{bearer_from_headers, clean_optional_string};

/// 회원가입
///
/// # Request Body
///
/// ```json
/// { "email": "alice@example.com", "username": "alice", "password": "Passw0rd!", "display_name": "Alice" }
/// ```
///
/// # Responses
///
/// * `201 Created` - 생성된 계정 (비밀번호 해시 제외)
/// * `400 Bad Request` - 입력 검증 실패
/// * `409 Conflict` - 사용자명 또는 이메일 중복
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    request_id: RequestId,
    payload: web::Json<RegisterRequest>,
) -> AuthResult<HttpResponse> {
    let payload = payload.into_inner();
    payload.validate()?;

    log::info!("[{}] 회원가입 요청", request_id);

    let user = with_deadline(state.request_timeout, state.users.register(payload.into())).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success_with_message(user, "user registered")))
}

/// 로그인
///
/// 이메일이 있으면 이메일로, 없으면 사용자명으로 계정을 찾습니다. 계정이 없는
/// 경우와 비밀번호가 틀린 경우 모두 같은 `401` 응답을 받습니다.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    request_id: RequestId,
    payload: web::Json<LoginRequest>,
) -> AuthResult<HttpResponse> {
    let payload = payload.into_inner();
    payload.validate()?;

    log::info!("[{}] 로그인 요청", request_id);

    let credential: LoginCredential = payload.into();
    let pair = with_deadline(state.request_timeout, state.tokens.login(&credential)).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(pair)))
}

/// 액세스 토큰 검증
///
/// 본문의 `access_token` 이 없으면 `Authorization: Bearer` 헤더를 확인합니다.
#[post("/verify")]
pub async fn verify(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: Option<web::Json<VerifyTokenRequest>>,
) -> AuthResult<HttpResponse> {
    let token = payload
        .and_then(|body| clean_optional_string(body.into_inner().access_token))
        .or_else(|| bearer_from_headers(req.headers()))
        .ok_or_else(|| AuthError::Validation("access_token is required".to_string()))?;

    let claims = state.tokens.verify_access(&token)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(VerifyTokenResponse::from(claims))))
}

/// 리프레시 토큰 회전
///
/// 성공하면 전달한 리프레시 토큰은 더 이상 사용할 수 없습니다.
#[post("/refresh")]
pub async fn refresh(
    state: web::Data<AppState>,
    request_id: RequestId,
    payload: web::Json<RefreshTokenRequest>,
) -> AuthResult<HttpResponse> {
    payload.validate()?;

    log::info!("[{}] 토큰 갱신 요청", request_id);

    let pair = with_deadline(
        state.request_timeout,
        state.tokens.refresh(payload.refresh_token.trim()),
    )
    .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(pair)))
}

/// 현재 사용자 정보 (Bearer 액세스 토큰 필요)
#[get("/profile", wrap = "AuthMiddleware::required()")]
pub async fn profile(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> AuthResult<HttpResponse> {
    let profile = with_deadline(state.request_timeout, state.users.get_identity(&user.subject))
        .await
        .map_err(|e| match e {
            AuthError::IdentityNotFound => AuthError::AccountNotFound,
            other => other,
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(profile)))
}

/// 액세스 토큰 검증용 공개키 (JWKS)
#[get("/jwks.json")]
pub async fn jwks(state: web::Data<AppState>) -> AuthResult<HttpResponse> {
    let jwks = state.tokens.codec().access_jwks()?;
    Ok(HttpResponse::Ok().json(jwks))
}
