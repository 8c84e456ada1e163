#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};

use auth_token_service::config::TokenConfig;
use auth_token_service::core::{AppState, HealthProbe};
use auth_token_service::repositories::{InMemoryIdentityStore, InMemoryTokenRegistry};
use auth_token_service::services::auth::{ClaimCodec, PasswordHasher, TokenLifecycleManager};
use auth_token_service::services::users::UserService;

const ACCESS_PRIVATE: &str = include_str!("../fixtures/access_private.pem");
const ACCESS_PUBLIC: &str = include_str!("../fixtures/access_public.pem");
const REFRESH_PRIVATE: &str = include_str!("../fixtures/refresh_private.pem");
const REFRESH_PUBLIC: &str = include_str!("../fixtures/refresh_public.pem");

pub const PASSWORD: &str = "Passw0rdX";

pub fn token_config() -> TokenConfig {
    TokenConfig::from_lookup(|key| {
        let pem = match key {
            "PRIVATE_ACCESS_KEY" => ACCESS_PRIVATE,
            "PUBLIC_ACCESS_KEY" => ACCESS_PUBLIC,
            "PRIVATE_REFRESH_KEY" => REFRESH_PRIVATE,
            "PUBLIC_REFRESH_KEY" => REFRESH_PUBLIC,
            "ISSUER" => return Some("integration-tests".to_string()),
            _ => return None,
        };
        Some(general_purpose::STANDARD.encode(pem))
    })
}

pub struct TestContext {
    pub state: AppState,
    pub registry: Arc<InMemoryTokenRegistry>,
    pub store: Arc<InMemoryIdentityStore>,
}

pub fn context() -> TestContext {
    let store = Arc::new(InMemoryIdentityStore::new());
    let registry = Arc::new(InMemoryTokenRegistry::new());
    let hasher = PasswordHasher::new(4);

    let tokens = Arc::new(TokenLifecycleManager::new(
        store.clone(),
        registry.clone(),
        Arc::new(ClaimCodec::new(token_config())),
        hasher,
    ));
    let users = Arc::new(UserService::new(store.clone(), hasher));

    TestContext {
        state: AppState::new(tokens, users, Duration::from_secs(5)),
        registry,
        store,
    }
}

/// 항상 지정한 결과를 돌려주는 헬스 체크 대상
pub struct StaticProbe {
    pub name: &'static str,
    pub healthy: bool,
}

#[async_trait]
impl HealthProbe for StaticProbe {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn ping(&self) -> Result<(), String> {
        if self.healthy {
            Ok(())
        } else {
            Err("connection refused".to_string())
        }
    }
}

macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .wrap(actix_web::middleware::from_fn(
                    auth_token_service::middlewares::request_id,
                ))
                .configure(auth_token_service::routes::configure_all_routes),
        )
        .await
    };
}
