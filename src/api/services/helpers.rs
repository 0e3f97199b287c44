//! Handler helpers

use actix_web::{HttpRequest, HttpResponse, http::StatusCode};
use serde::Serialize;
use tracing::trace;

use crate::api::extract::resolve_event_id;
use crate::errors::CalclickError;

/// Build a JSON response with the given status
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(body)
}

/// 200 + JSON
pub fn ok_json<T: Serialize>(body: &T) -> HttpResponse {
    json_response(StatusCode::OK, body)
}

/// 所有 resource 的 default service：路径存在但方法不匹配
pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, CalclickError> {
    trace!("Method {} not allowed on {}", req.method(), req.path());
    Err(CalclickError::method_not_allowed("Method not allowed"))
}

/// 解析事件 id，找不到时返回校验错误
pub fn require_event_id(req: &HttpRequest) -> Result<String, CalclickError> {
    resolve_event_id(req).ok_or_else(|| CalclickError::validation("event id is required"))
}
