use std::sync::Arc;

use actix_web::{HttpResponse, web};
use serde::Serialize;

use super::helpers::{method_not_allowed, ok_json};
use crate::api::middleware::FaultGuard;
use crate::errors::CalclickError;
use crate::services::CounterService;
use crate::storage::PlatformCounts;

#[derive(Debug, Serialize)]
pub struct GlobalCountsResponse {
    pub counts: PlatformCounts,
}

pub struct StatsService;

impl StatsService {
    /// 所有事件按平台汇总
    pub async fn platform_totals(
        service: web::Data<Arc<CounterService>>,
    ) -> Result<HttpResponse, CalclickError> {
        let counts = service.global_counts().await?;
        Ok(ok_json(&GlobalCountsResponse { counts }))
    }
}

pub fn stats_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/stats/platforms")
            .route(web::get().to(StatsService::platform_totals))
            .default_service(web::to(method_not_allowed))
            .wrap(FaultGuard),
    );
}
