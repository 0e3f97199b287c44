use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::{HttpResponse, http::StatusCode, web};
use serde_json::json;
use tracing::{error, trace};

use super::helpers::{json_response, method_not_allowed};
use crate::api::middleware::FaultGuard;
use crate::services::CounterService;

/// 存储探测的超时
const STORE_PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Health Service
///
/// 只做一次存储 ping，不经过业务逻辑。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(service: web::Data<Arc<CounterService>>) -> HttpResponse {
        let started = Instant::now();
        trace!("Received health check request");

        let healthy = match tokio::time::timeout(STORE_PING_TIMEOUT, service.store().ping()).await
        {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                error!("Storage health check failed: {}", e);
                false
            }
            Err(_) => {
                error!("Storage health check timeout");
                false
            }
        };

        trace!("Health check completed in {:?}", started.elapsed());

        if healthy {
            json_response(StatusCode::OK, &json!({ "ok": true }))
        } else {
            json_response(StatusCode::SERVICE_UNAVAILABLE, &json!({ "ok": false }))
        }
    }
}

/// Health 路由配置
pub fn health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/health")
            .route(web::get().to(HealthService::health_check))
            .route(web::head().to(HealthService::health_check))
            .default_service(web::to(method_not_allowed))
            .wrap(FaultGuard),
    );
}
