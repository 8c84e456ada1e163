//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, forward_ready};
use actix_web::{Error, HttpMessage, HttpResponse, ResponseError, web};
use futures_util::future::LocalBoxFuture;

use crate::core::AppState;
use crate::core::errors::{AuthError, AuthResult};
use crate::domain::dto::ApiResponse;
use crate::domain::models::auth::AuthenticatedUser;
use crate::utils::string_utils::bearer_from_headers;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                log::error!("AppState 가 등록되지 않아 인증을 수행할 수 없습니다");
                let response = HttpResponse::InternalServerError()
                    .json(ApiResponse::error("internal server error"));
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            };

            match authenticate(&req, &state) {
                Ok(user) => {
                    log::debug!("인증 성공: 사용자 ID {}", user.subject);
                    req.extensions_mut().insert(user);
                }
                Err(err) => {
                    log::warn!("인증 실패: {}", err);
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 요청의 Bearer 토큰을 액세스 키로 검증
fn authenticate(req: &ServiceRequest, state: &AppState) -> AuthResult<AuthenticatedUser> {
    let token = bearer_from_headers(req.headers())
        .ok_or_else(|| AuthError::MalformedToken("missing bearer token".to_string()))?;

    let claims = state.tokens.verify_access(&token)?;
    Ok(AuthenticatedUser::from(claims))
}
