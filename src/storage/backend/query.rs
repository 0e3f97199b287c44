//! Query operations for SeaOrmStorage

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use super::SeaOrmStorage;
use super::converters::{model_to_event, model_to_stat};
use crate::errors::{CalclickError, Result};
use crate::storage::models::{CalendarStat, Event};

use migration::entities::{calendar_stat, event};

impl SeaOrmStorage {
    pub(super) async fn find_event(&self, event_id: &str) -> Result<Option<Event>> {
        let db = &self.db;
        let model = event::Entity::find_by_id(event_id.to_string())
            .one(db)
            .await
            .map_err(|e| CalclickError::database_operation(format!("查询事件失败: {}", e)))?;

        Ok(model.map(model_to_event))
    }

    pub(super) async fn find_stats_for_event(&self, event_id: &str) -> Result<Vec<CalendarStat>> {
        let db = &self.db;

        let models = calendar_stat::Entity::find()
            .filter(calendar_stat::Column::EventId.eq(event_id))
            .order_by_asc(calendar_stat::Column::Platform)
            .all(db)
            .await
            .map_err(|e| CalclickError::database_operation(format!("查询事件计数失败: {}", e)))?;

        Ok(models.into_iter().map(model_to_stat).collect())
    }

    pub(super) async fn find_all_stats(&self) -> Result<Vec<CalendarStat>> {
        let db = &self.db;

        let models = calendar_stat::Entity::find()
            .order_by_asc(calendar_stat::Column::EventId)
            .order_by_asc(calendar_stat::Column::Platform)
            .all(db)
            .await
            .map_err(|e| CalclickError::database_operation(format!("查询全部计数失败: {}", e)))?;

        Ok(models.into_iter().map(model_to_stat).collect())
    }
}
