//! Event routes
//!
//! `/events` 下的全部 handler。事件 id 解析见 [`crate::api::extract`]。

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::helpers::{method_not_allowed, ok_json, require_event_id};
use crate::api::middleware::FaultGuard;
use crate::errors::CalclickError;
use crate::services::{CounterService, CreateEventRequest};
use crate::storage::CalendarStat;

// ============ Request/Response DTOs ============

/// POST /events/{id}/click 请求体
#[derive(Debug, Default, Deserialize)]
pub struct ClickBody {
    pub platform: Option<String>,
}

/// POST /events 请求体
#[derive(Debug, Deserialize)]
pub struct CreateEventBody {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CountsQuery {
    pub platform: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStatsResponse {
    pub event_id: String,
    pub stats: Vec<CalendarStat>,
}

// ============ Handlers ============

pub struct EventsService;

impl EventsService {
    pub async fn record_click(
        req: HttpRequest,
        body: web::Bytes,
        service: web::Data<Arc<CounterService>>,
    ) -> Result<HttpResponse, CalclickError> {
        let event_id = require_event_id(&req)?;
        // 没有 body 或不是 JSON 都按缺少 platform 处理
        let body: ClickBody = serde_json::from_slice(&body).unwrap_or_default();

        let stat = service
            .record_click(&event_id, body.platform.as_deref())
            .await?;
        Ok(ok_json(&stat))
    }

    pub async fn stats_for_event(
        req: HttpRequest,
        service: web::Data<Arc<CounterService>>,
    ) -> Result<HttpResponse, CalclickError> {
        let event_id = require_event_id(&req)?;
        let stats = service.stats_for_event(&event_id).await?;

        Ok(ok_json(&EventStatsResponse { event_id, stats }))
    }

    pub async fn counts_for_event(
        req: HttpRequest,
        service: web::Data<Arc<CounterService>>,
    ) -> Result<HttpResponse, CalclickError> {
        let event_id = require_event_id(&req)?;
        let platform = web::Query::<CountsQuery>::from_query(req.query_string())
            .ok()
            .and_then(|q| q.into_inner().platform);
        trace!("Counts requested for {} (platform={:?})", event_id, platform);

        let counts = service
            .counts_for_event(&event_id, platform.as_deref())
            .await?;
        Ok(ok_json(&counts))
    }

    pub async fn create_event(
        body: web::Bytes,
        service: web::Data<Arc<CounterService>>,
    ) -> Result<HttpResponse, CalclickError> {
        let body: CreateEventBody = serde_json::from_slice(&body)
            .map_err(|_| CalclickError::validation("request body must be a JSON object with an id"))?;

        let event = service
            .create_event(CreateEventRequest {
                id: body.id,
                name: body.name,
                description: body.description,
            })
            .await?;
        Ok(ok_json(&event))
    }

    pub async fn get_event(
        req: HttpRequest,
        service: web::Data<Arc<CounterService>>,
    ) -> Result<HttpResponse, CalclickError> {
        let event_id = require_event_id(&req)?;
        let detail = service.get_event(&event_id).await?;
        Ok(ok_json(&detail))
    }
}

/// Event 路由配置
pub fn event_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/events")
            .route(web::post().to(EventsService::create_event))
            .default_service(web::to(method_not_allowed))
            .wrap(FaultGuard),
    )
    .service(
        web::resource("/events/{id}")
            .route(web::get().to(EventsService::get_event))
            .default_service(web::to(method_not_allowed))
            .wrap(FaultGuard),
    )
    .service(
        web::resource("/events/{id}/click")
            .route(web::post().to(EventsService::record_click))
            .default_service(web::to(method_not_allowed))
            .wrap(FaultGuard),
    )
    .service(
        web::resource("/events/{id}/stats")
            .route(web::get().to(EventsService::stats_for_event))
            .default_service(web::to(method_not_allowed))
            .wrap(FaultGuard),
    )
    .service(
        web::resource("/events/{id}/counts")
            .route(web::get().to(EventsService::counts_for_event))
            .default_service(web::to(method_not_allowed))
            .wrap(FaultGuard),
    );
}
