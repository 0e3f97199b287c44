//! 事件实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::calendar_stat::Entity")]
    CalendarStat,
}

impl Related<super::calendar_stat::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CalendarStat.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
