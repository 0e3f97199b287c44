use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 events 表
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .string_len(255)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Events::Description).text().null())
                    .to_owned(),
            )
            .await?;

        // 创建 calendar_stats 表，(event_id, platform) 复合主键保证唯一
        manager
            .create_table(
                Table::create()
                    .table(CalendarStats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CalendarStats::EventId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CalendarStats::Platform)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CalendarStats::Count)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_calendar_stats")
                            .col(CalendarStats::EventId)
                            .col(CalendarStats::Platform),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_calendar_stats_event")
                            .from(CalendarStats::Table, CalendarStats::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CalendarStats::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum CalendarStats {
    Table,
    EventId,
    Platform,
    Count,
}
