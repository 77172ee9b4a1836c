//! Create `facility` table with FK to `location_type`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Facility::Table)
                    .if_not_exists()
                    .col(uuid(Facility::Id).primary_key())
                    .col(string_len(Facility::Name, 200).not_null())
                    .col(uuid(Facility::LocationTypeId).not_null())
                    .col(string_len(Facility::AddressLine1, 200).not_null())
                    .col(string_len(Facility::City, 100).not_null())
                    .col(ColumnDef::new(Facility::Region).string_len(100).null())
                    .col(ColumnDef::new(Facility::PostalCode).string_len(20).null())
                    .col(ColumnDef::new(Facility::BedCount).integer().null())
                    .col(ColumnDef::new(Facility::OpenedOn).date().null())
                    .col(timestamp_with_time_zone(Facility::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Facility::UpdatedAt).not_null())
                    .col(ColumnDef::new(Facility::DeletedAt).timestamp_with_time_zone().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_facility_location_type")
                            .from(Facility::Table, Facility::LocationTypeId)
                            .to(LocationType::Table, LocationType::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Facility::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Facility {
    Table,
    Id,
    Name,
    LocationTypeId,
    AddressLine1,
    City,
    Region,
    PostalCode,
    BedCount,
    OpenedOn,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum LocationType { Table, Id }
