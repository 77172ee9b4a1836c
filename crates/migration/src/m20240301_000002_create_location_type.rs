//! Create `location_type` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LocationType::Table)
                    .if_not_exists()
                    .col(uuid(LocationType::Id).primary_key())
                    .col(string_len(LocationType::Code, 32).unique_key().not_null())
                    .col(string_len(LocationType::DisplayName, 128).not_null())
                    .col(ColumnDef::new(LocationType::Description).string_len(512).null())
                    .col(timestamp_with_time_zone(LocationType::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(LocationType::UpdatedAt).not_null())
                    .col(ColumnDef::new(LocationType::DeletedAt).timestamp_with_time_zone().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(LocationType::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum LocationType { Table, Id, Code, DisplayName, Description, CreatedAt, UpdatedAt, DeletedAt }
