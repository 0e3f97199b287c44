//! Request ID middleware
//!
//! 每个请求在带有 request_id 的 tracing span 中执行，响应头回写 `X-Request-ID`。
//! 上游（反向代理）已经带了合法的 `X-Request-ID` 时沿用它，否则生成 UUID v4。

use std::rc::Rc;
use std::time::Instant;

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    dev::{ServiceRequest, ServiceResponse},
    error::InternalError,
    http::header::{HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, debug, info_span};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_INBOUND_ID_LEN: usize = 64;

/// 请求 ID，handler 可通过 `req.extensions().get::<RequestId>()` 取得
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// 沿用的上游 id 只允许可见 ASCII 字符，长度有限
fn inbound_request_id(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?;
    let valid = !value.is_empty()
        && value.len() <= MAX_INBOUND_ID_LEN
        && value.chars().all(|c| c.is_ascii_graphic());
    valid.then(|| value.to_string())
}

fn attach_request_id(response: &mut HttpResponse<impl Sized>, request_id: &str) {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
}

#[derive(Clone, Default)]
pub struct RequestIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestIdService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdService {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestIdService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestIdService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let request_id = inbound_request_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());
        req.extensions_mut().insert(RequestId(request_id.clone()));

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %req.method(),
            path = %req.path(),
        );

        Box::pin(
            async move {
                let started = Instant::now();
                match srv.call(req).await {
                    Ok(mut response) => {
                        debug!(
                            status = response.status().as_u16(),
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            "request completed"
                        );
                        attach_request_id(response.response_mut(), &request_id);
                        Ok(response)
                    }
                    Err(e) => {
                        // 错误由 dispatcher 渲染，先生成响应再挂上 request id
                        let mut error_response = e.error_response();
                        debug!(
                            status = error_response.status().as_u16(),
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            "request failed"
                        );
                        attach_request_id(&mut error_response, &request_id);
                        Err(InternalError::from_response(e, error_response).into())
                    }
                }
            }
            .instrument(span),
        )
    }
}
