//! Fault guard middleware
//!
//! 捕获 handler 中的 panic，转换为统一的 500 响应，不让 worker 线程带着
//! 半个响应退出。需要 `panic = "unwind"`。
//!
//! 只能挂在 `web::resource(..).wrap(FaultGuard)` 上：App 级路由会在请求上
//! 写入 match_info，要求 `HttpRequest` 没有其他引用，而这里在调用期间
//! 持有一份请求用于构造 panic 响应。

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::rc::Rc;

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::FutureExt;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde_json::json;
use tracing::error;

use crate::errors::GENERIC_FAILURE_MESSAGE;

/// panic 之后返回给客户端的响应，与 5xx 错误的响应体一致
pub fn generic_failure_response() -> HttpResponse {
    HttpResponse::InternalServerError()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(json!({
            "error": "Internal Server Error",
            "message": GENERIC_FAILURE_MESSAGE,
        }))
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}

#[derive(Clone, Default)]
pub struct FaultGuard;

impl<S, B> Transform<S, ServiceRequest> for FaultGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = FaultGuardService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(FaultGuardService {
            service: Rc::new(service),
        }))
    }
}

pub struct FaultGuardService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for FaultGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let method = req.method().to_string();
        let path = req.path().to_string();
        // 路由已完成，此时持有 HttpRequest 不影响 match_info
        let http_req = req.request().clone();

        Box::pin(async move {
            let outcome = AssertUnwindSafe(async move { srv.call(req).await })
                .catch_unwind()
                .await;

            match outcome {
                Ok(Ok(response)) => Ok(response.map_into_left_body()),
                Ok(Err(e)) => Err(e),
                Err(payload) => {
                    error!(
                        "Handler panicked on {} {}: {}",
                        method,
                        path,
                        panic_message(&*payload)
                    );
                    Ok(ServiceResponse::new(http_req, generic_failure_response())
                        .map_into_right_body())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpRequest, http::StatusCode, test, web};

    async fn echo_id(req: HttpRequest) -> HttpResponse {
        let id = req.match_info().get("id").unwrap_or_default().to_string();
        HttpResponse::Ok().body(id)
    }

    async fn explode() -> HttpResponse {
        panic!("kaboom");
    }

    #[actix_web::test]
    async fn test_guarded_resource_keeps_path_params() {
        let app = test::init_service(
            App::new().service(
                web::resource("/items/{id}")
                    .route(web::get().to(echo_id))
                    .wrap(FaultGuard),
            ),
        )
        .await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/items/fest").to_request())
                .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, web::Bytes::from_static(b"fest"));
    }

    #[actix_web::test]
    async fn test_panic_becomes_generic_500() {
        let app = test::init_service(
            App::new().service(
                web::resource("/boom")
                    .route(web::get().to(explode))
                    .wrap(FaultGuard),
            ),
        )
        .await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/boom").to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], GENERIC_FAILURE_MESSAGE);
        assert!(!body.to_string().contains("kaboom"));
    }

    #[::core::prelude::v1::test]
    fn test_panic_message_extracts_payload() {
        let payload: Box<dyn Any + Send> = Box::new("static text");
        assert_eq!(panic_message(&*payload), "static text");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned text"));
        assert_eq!(panic_message(&*payload), "owned text");

        let payload: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(&*payload), "unknown panic payload");
    }
}
