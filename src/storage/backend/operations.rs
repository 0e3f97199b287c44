//! Write operations for SeaOrmStorage

use sea_orm::{
    ActiveValue::Set, ConnectionTrait, EntityTrait, ExprTrait,
    sea_query::{Expr, OnConflict},
};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::{event_to_active_model, model_to_stat};
use crate::errors::{CalclickError, Result};
use crate::storage::models::{CalendarStat, Event, StatKey};

use migration::entities::{calendar_stat, event};

impl SeaOrmStorage {
    /// INSERT ... ON CONFLICT DO NOTHING，重复调用无副作用
    pub(super) async fn insert_event_if_absent(&self, event: &Event) -> Result<()> {
        let db = &self.db;
        let model = event_to_active_model(event);
        let on_conflict = OnConflict::column(event::Column::Id)
            .do_nothing()
            .to_owned();

        let inserted = event::Entity::insert(model)
            .on_conflict(on_conflict)
            .exec_without_returning(db)
            .await
            .map_err(|e| {
                CalclickError::database_operation(format!("创建事件 '{}' 失败: {}", event.id, e))
            })?;

        if inserted > 0 {
            debug!("Event created on first click: {}", event.id);
        }
        Ok(())
    }

    /// 创建事件，已存在时覆盖 name / description
    pub(super) async fn save_event(&self, event: &Event) -> Result<Event> {
        let db = &self.db;
        let model = event_to_active_model(event);
        let on_conflict = OnConflict::column(event::Column::Id)
            .update_columns([event::Column::Name, event::Column::Description])
            .to_owned();

        event::Entity::insert(model)
            .on_conflict(on_conflict)
            .exec_without_returning(db)
            .await
            .map_err(|e| {
                CalclickError::database_operation(format!("保存事件 '{}' 失败: {}", event.id, e))
            })?;

        match self.find_event(&event.id).await? {
            Some(saved) => Ok(saved),
            None => Err(CalclickError::database_operation(format!(
                "保存事件 '{}' 后读取失败",
                event.id
            ))),
        }
    }

    /// 单条 upsert 完成创建或递增
    ///
    /// SQLite/PostgreSQL: ON CONFLICT (event_id, platform) DO UPDATE SET count = count + 1
    /// MySQL: ON DUPLICATE KEY UPDATE count = count + 1
    ///
    /// 递增不是幂等的，失败直接返回，不做重试
    pub(super) async fn increment_stat(&self, key: &StatKey, initial: i64) -> Result<CalendarStat> {
        let db = &self.db;
        let platform = key.platform.as_str();
        let model = calendar_stat::ActiveModel {
            event_id: Set(key.event_id.clone()),
            platform: Set(platform.to_string()),
            count: Set(initial),
        };
        let on_conflict = OnConflict::columns([
            calendar_stat::Column::EventId,
            calendar_stat::Column::Platform,
        ])
        .value(
            calendar_stat::Column::Count,
            Expr::col((calendar_stat::Entity, calendar_stat::Column::Count)).add(Expr::val(1i64)),
        )
        .to_owned();

        let err_map = |e: sea_orm::DbErr| {
            CalclickError::database_operation(format!(
                "递增计数 ({}, {}) 失败: {}",
                key.event_id, platform, e
            ))
        };

        if db.support_returning() {
            let saved = calendar_stat::Entity::insert(model)
                .on_conflict(on_conflict)
                .exec_with_returning(db)
                .await
                .map_err(err_map)?;
            return Ok(model_to_stat(saved));
        }

        calendar_stat::Entity::insert(model)
            .on_conflict(on_conflict)
            .exec_without_returning(db)
            .await
            .map_err(err_map)?;

        // 不支持 RETURNING 时回读；并发下读到的计数可能已包含其他请求的递增
        let saved = calendar_stat::Entity::find_by_id((key.event_id.clone(), platform.to_string()))
            .one(db)
            .await
            .map_err(err_map)?
            .ok_or_else(|| {
                CalclickError::database_operation(format!(
                    "递增计数 ({}, {}) 后读取失败",
                    key.event_id, platform
                ))
            })?;

        Ok(model_to_stat(saved))
    }
}
