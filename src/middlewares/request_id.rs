//! 요청 ID 미들웨어
//!
//! `x-request-id` 가 있으면 그대로, 없으면 `x-session-id`, 그것도 없으면 새
//! UUID 를 요청 ID 로 사용합니다. 요청 ID 는 extensions 에 저장되고 응답
//! 헤더 `x-request-id` 로 돌려보내며, 액세스 로그에도 기록됩니다.

use std::fmt;
use std::future::{Ready, ready};

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::middleware::Next;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 액세스 로그 형식. `Logger` 보다 바깥에 등록되므로 요청 헤더(`i`)에서 읽습니다.
pub const ACCESS_LOG_FORMAT: &str = r#"%a "%r" %s %b %Dms request_id=%{x-request-id}i"#;
const SESSION_ID_HEADER: &str = "x-session-id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromRequest for RequestId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let id = req
            .extensions()
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(|| RequestId("-".to_string()));
        ready(Ok(id))
    }
}

fn incoming_id(req: &ServiceRequest) -> Option<String> {
    [REQUEST_ID_HEADER, SESSION_ID_HEADER]
        .iter()
        .filter_map(|name| req.headers().get(*name))
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .find(|value| !value.is_empty() && value.len() <= 128)
        .map(str::to_string)
}

/// `App::wrap(from_fn(request_id))` 로 등록합니다.
pub async fn request_id(
    mut req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let id = incoming_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());

    if let Ok(value) = HeaderValue::from_str(&id) {
        req.headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.call(req).await?;

    if let Ok(value) = HeaderValue::from_str(&id) {
        res.headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::middleware::from_fn;
    use actix_web::{App, HttpResponse, test, web};

    async fn echo(id: RequestId) -> HttpResponse {
        HttpResponse::Ok().body(id.0)
    }

    #[actix_web::test]
    async fn test_existing_request_id_is_kept() {
        let app = test::init_service(
            App::new()
                .wrap(from_fn(request_id))
                .route("/", web::get().to(echo)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((REQUEST_ID_HEADER, "req-123"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.headers().get(REQUEST_ID_HEADER).unwrap(), "req-123");
        assert_eq!(test::read_body(res).await, "req-123");
    }

    #[actix_web::test]
    async fn test_session_id_is_used_as_fallback() {
        let app = test::init_service(
            App::new()
                .wrap(from_fn(request_id))
                .route("/", web::get().to(echo)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((SESSION_ID_HEADER, "sess-9"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.headers().get(REQUEST_ID_HEADER).unwrap(), "sess-9");
    }

    #[actix_web::test]
    async fn test_generated_request_id() {
        let app = test::init_service(
            App::new()
                .wrap(from_fn(request_id))
                .route("/", web::get().to(echo)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let id = res.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();

        assert!(Uuid::parse_str(id).is_ok());
    }

    #[actix_web::test]
    async fn test_generated_request_id_is_visible_on_request_headers() {
        let app = test::init_service(
            App::new().wrap(from_fn(request_id)).route(
                "/",
                web::get().to(|req: HttpRequest| async move {
                    let seen = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-")
                        .to_string();
                    HttpResponse::Ok().body(seen)
                }),
            ),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let returned = res.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap().to_string();

        assert_eq!(test::read_body(res).await, returned);
        assert!(ACCESS_LOG_FORMAT.contains("%{x-request-id}i"));
    }
}
