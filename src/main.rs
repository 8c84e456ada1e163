//! 인증 토큰 서비스 메인 애플리케이션
//!
//! 설정을 로드하고 MongoDB, Redis 에 연결한 뒤 서비스 계층을 조립해
//! Actix-web HTTP 서버를 구동합니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, middleware, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use auth_token_service::caching::RedisClient;
use auth_token_service::config::{
    CacheConfig, DatabaseConfig, Environment, ServerConfig, TokenConfig,
};
use auth_token_service::core::AppState;
use auth_token_service::db::Database;
use auth_token_service::middlewares::{ACCESS_LOG_FORMAT, request_id};
use auth_token_service::repositories::{TokenRepository, UserRepository};
use auth_token_service::routes::configure_all_routes;
use auth_token_service::services::auth::{ClaimCodec, PasswordHasher, TokenLifecycleManager};
use auth_token_service::services::users::UserService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 인증 토큰 서비스 시작중... (환경: {:?})", Environment::current());

    let state = match build_state().await {
        Ok(state) => state,
        Err(e) => {
            error!("❌ 서비스 초기화 실패: {}", e);
            return Err(std::io::Error::other(e));
        }
    };

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(state).await
}

/// 설정을 로드하고 저장소, 서비스, 공유 상태를 조립합니다
///
/// # Errors
///
/// * MongoDB 또는 Redis 연결 실패
/// * 사용자 컬렉션 인덱스 생성 실패
async fn build_state() -> Result<AppState, String> {
    let token_config = TokenConfig::from_env();
    let missing = token_config.missing_keys();
    if !missing.is_empty() {
        warn!("🔑 설정되지 않은 키: {:?} (해당 키를 쓰는 요청은 실패합니다)", missing);
    }

    let codec = Arc::new(ClaimCodec::new(token_config));
    for problem in codec.check_keys() {
        if !matches!(problem, auth_token_service::core::AuthError::KeyNotConfigured(_)) {
            warn!("🔑 키 점검 실패: {}", problem);
        }
    }

    info!("📡 데이터베이스 연결 중...");
    let database = Arc::new(
        Database::connect(&DatabaseConfig::uri(), &DatabaseConfig::database_name())
            .await
            .map_err(|e| format!("MongoDB 연결 실패: {}", e))?,
    );
    let redis = Arc::new(
        RedisClient::connect(&CacheConfig::redis_url())
            .await
            .map_err(|e| format!("Redis 연결 실패: {}", e))?,
    );

    let user_repository = Arc::new(UserRepository::new(database.clone()));
    user_repository
        .create_indexes()
        .await
        .map_err(|e| format!("인덱스 생성 실패: {}", e))?;
    let token_repository = Arc::new(TokenRepository::new(redis.clone()));

    let hasher = PasswordHasher::from_env();
    info!("🔒 bcrypt cost: {}", hasher.cost());

    let tokens = Arc::new(TokenLifecycleManager::new(
        user_repository.clone(),
        token_repository,
        codec,
        hasher,
    ));
    let users = Arc::new(UserService::new(user_repository, hasher));

    Ok(AppState::new(tokens, users, ServerConfig::request_timeout())
        .with_probe(database)
        .with_probe(redis))
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 접근 로그, 요청 ID, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(state: AppState) -> std::io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/healthz", bind_address);
    info!("📍 API: http://{}/api/v1/auth", bind_address);

    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(configure_cors())
            .wrap(middleware::Logger::new(ACCESS_LOG_FORMAT))
            .wrap(from_fn(request_id))
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 결과는 stderr 로 출력
    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    match loaded {
        Ok(file) => eprintln!("profile={} {} 파일 로드 됨", profile, file),
        Err(e) => eprintln!("profile={} 환경 파일 로드 실패: {}", profile, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// CORS 설정을 구성합니다
///
/// `CORS_ALLOWED_ORIGINS` (쉼표 구분)에 나열된 Origin 만 허용하며,
/// 비어 있으면 로컬 개발 주소를 허용합니다.
fn configure_cors() -> Cors {
    let origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(3600)
}
