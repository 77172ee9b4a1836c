//! Create `provider` table with FK to `license_type`.
//!
//! Individual healthcare providers; `npi` is unique. Soft-deleted rows keep
//! their NPI reserved.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Provider::Table)
                    .if_not_exists()
                    .col(uuid(Provider::Id).primary_key())
                    .col(string_len(Provider::FirstName, 100).not_null())
                    .col(string_len(Provider::LastName, 100).not_null())
                    .col(string_len(Provider::Npi, 10).unique_key().not_null())
                    .col(uuid(Provider::LicenseTypeId).not_null())
                    .col(string_len(Provider::LicenseNumber, 64).not_null())
                    .col(ColumnDef::new(Provider::LicenseExpiresOn).date().null())
                    .col(ColumnDef::new(Provider::YearsExperience).integer().null())
                    .col(ColumnDef::new(Provider::Email).string_len(254).null())
                    .col(timestamp_with_time_zone(Provider::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Provider::UpdatedAt).not_null())
                    .col(ColumnDef::new(Provider::DeletedAt).timestamp_with_time_zone().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_provider_license_type")
                            .from(Provider::Table, Provider::LicenseTypeId)
                            .to(LicenseType::Table, LicenseType::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Provider::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Provider {
    Table,
    Id,
    FirstName,
    LastName,
    Npi,
    LicenseTypeId,
    LicenseNumber,
    LicenseExpiresOn,
    YearsExperience,
    Email,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum LicenseType { Table, Id }
