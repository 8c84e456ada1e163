//! JWT 인증 미들웨어
//!
//! `Authorization: Bearer <access_token>` 을 액세스 키로 검증하고, 성공하면
//! `AuthenticatedUser` 를 request extensions 에 넣습니다. 실패하면 다음 서비스를
//! 호출하지 않고 401 을 반환합니다.
//!
//! ```rust,ignore
//! web::scope("/api/v1/auth")
//!     .service(
//!         web::resource("/profile")
//!             .wrap(AuthMiddleware::required())
//!             .route(web::get().to(handlers::auth::profile)),
//!     )
//! ```

use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::{
    Error, Result,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어 (인증 필수)
#[derive(Debug, Clone, Default)]
pub struct AuthMiddleware;

impl AuthMiddleware {
    pub fn required() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
