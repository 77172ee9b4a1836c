//! Create `audit_log` table.
//!
//! `entity_id` is deliberately not a foreign key: log rows outlive the
//! records they describe.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuditLog::Table)
                    .if_not_exists()
                    .col(uuid(AuditLog::Id).primary_key())
                    .col(string_len(AuditLog::EntityType, 32).not_null())
                    .col(uuid(AuditLog::EntityId).not_null())
                    .col(string_len(AuditLog::Action, 16).not_null())
                    .col(ColumnDef::new(AuditLog::Actor).string_len(128).null())
                    .col(ColumnDef::new(AuditLog::Details).text().null())
                    .col(timestamp_with_time_zone(AuditLog::OccurredAt).not_null())
                    .col(timestamp_with_time_zone(AuditLog::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(AuditLog::UpdatedAt).not_null())
                    .col(ColumnDef::new(AuditLog::DeletedAt).timestamp_with_time_zone().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AuditLog::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AuditLog { Table, Id, EntityType, EntityId, Action, Actor, Details, OccurredAt, CreatedAt, UpdatedAt, DeletedAt }
