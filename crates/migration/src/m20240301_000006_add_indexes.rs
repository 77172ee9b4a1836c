use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Default list order is created_at DESC over live rows
        for (name, table) in listing_indexes() {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(table)
                        .col(Alias::new("deleted_at"))
                        .col(Alias::new("created_at"))
                        .to_owned(),
                )
                .await?;
        }

        // Provider: lookup by license type
        manager
            .create_index(
                Index::create()
                    .name("idx_provider_license_type")
                    .table(Provider::Table)
                    .col(Provider::LicenseTypeId)
                    .to_owned(),
            )
            .await?;

        // Facility: lookup by location type
        manager
            .create_index(
                Index::create()
                    .name("idx_facility_location_type")
                    .table(Facility::Table)
                    .col(Facility::LocationTypeId)
                    .to_owned(),
            )
            .await?;

        // AuditLog: history of one entity
        manager
            .create_index(
                Index::create()
                    .name("idx_audit_log_entity")
                    .table(AuditLog::Table)
                    .col(AuditLog::EntityType)
                    .col(AuditLog::EntityId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table) in listing_indexes() {
            manager
                .drop_index(Index::drop().name(name).table(table).to_owned())
                .await?;
        }
        manager
            .drop_index(Index::drop().name("idx_provider_license_type").table(Provider::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_facility_location_type").table(Facility::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_audit_log_entity").table(AuditLog::Table).to_owned())
            .await
    }
}

fn listing_indexes() -> Vec<(&'static str, Alias)> {
    [
        ("idx_license_type_listing", "license_type"),
        ("idx_location_type_listing", "location_type"),
        ("idx_provider_listing", "provider"),
        ("idx_facility_listing", "facility"),
        ("idx_audit_log_listing", "audit_log"),
    ]
    .into_iter()
    .map(|(name, table)| (name, Alias::new(table)))
    .collect()
}

#[derive(DeriveIden)]
enum Provider { Table, LicenseTypeId }

#[derive(DeriveIden)]
enum Facility { Table, LocationTypeId }

#[derive(DeriveIden)]
enum AuditLog { Table, EntityType, EntityId }
