//! Create `license_type` table.
//!
//! Lookup vocabulary for professional licenses; `code` is unique.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LicenseType::Table)
                    .if_not_exists()
                    .col(uuid(LicenseType::Id).primary_key())
                    .col(string_len(LicenseType::Code, 32).unique_key().not_null())
                    .col(string_len(LicenseType::DisplayName, 128).not_null())
                    .col(ColumnDef::new(LicenseType::Description).string_len(512).null())
                    .col(ColumnDef::new(LicenseType::RenewalPeriodMonths).integer().null())
                    .col(timestamp_with_time_zone(LicenseType::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(LicenseType::UpdatedAt).not_null())
                    .col(ColumnDef::new(LicenseType::DeletedAt).timestamp_with_time_zone().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(LicenseType::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum LicenseType { Table, Id, Code, DisplayName, Description, RenewalPeriodMonths, CreatedAt, UpdatedAt, DeletedAt }
