//! HTTP adapter
//!
//! actix-web 路由、中间件和请求解析。业务逻辑全部在 `services::CounterService`。

pub mod cors;
pub mod extract;
pub mod middleware;
pub mod services;

use actix_web::web;

pub use cors::build_cors_middleware;
pub use extract::resolve_event_id;
pub use middleware::{FaultGuard, RequestIdMiddleware};

/// 注册全部路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    services::health_routes(cfg);
    services::event_routes(cfg);
    services::stats_routes(cfg);
}
