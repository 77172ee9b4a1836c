use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::base::{now, BaseRecord, RecordMeta};
use crate::db::connect_in_memory;
use crate::errors::StorageError;
use crate::{license_type, location_type, provider};

async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn location_type_am(code: &str) -> location_type::ActiveModel {
    let t = now();
    location_type::ActiveModel {
        id: Set(Uuid::new_v4()),
        code: Set(code.to_string()),
        display_name: Set(format!("{code} site")),
        description: Set(None),
        created_at: Set(t),
        updated_at: Set(t),
        deleted_at: Set(None),
    }
}

#[tokio::test]
async fn test_location_type_insert_and_meta() -> Result<()> {
    let db = setup_test_db().await?;

    let created = location_type_am("Clinic").insert(&db).await?;
    let meta = created.base();
    assert_eq!(meta.id, created.id);
    assert_eq!(meta.created_at, meta.updated_at);
    assert!(meta.deleted_at.is_none());

    let found = location_type::Entity::find()
        .filter(location_type::Entity::id_column().eq(created.id))
        .one(&db)
        .await?;
    assert_eq!(found, Some(created));
    Ok(())
}

#[tokio::test]
async fn test_duplicate_code_is_constraint_violation() -> Result<()> {
    let db = setup_test_db().await?;

    location_type_am("Hospital").insert(&db).await?;
    let err = location_type_am("Hospital").insert(&db).await.unwrap_err();
    assert!(matches!(StorageError::from(err), StorageError::ConstraintViolation(_)));
    Ok(())
}

#[tokio::test]
async fn test_missing_parent_is_constraint_violation() -> Result<()> {
    let db = setup_test_db().await?;

    let t = now();
    let orphan = provider::ActiveModel {
        id: Set(Uuid::new_v4()),
        first_name: Set("Ada".into()),
        last_name: Set("Lovelace".into()),
        npi: Set("1234567890".into()),
        license_type_id: Set(Uuid::new_v4()),
        license_number: Set("MD-1".into()),
        license_expires_on: Set(None),
        years_experience: Set(None),
        email: Set(None),
        created_at: Set(t),
        updated_at: Set(t),
        deleted_at: Set(None),
    };
    let err = orphan.insert(&db).await.unwrap_err();
    assert!(matches!(StorageError::from(err), StorageError::ConstraintViolation(_)));
    Ok(())
}

#[tokio::test]
async fn test_serializes_camel_case() -> Result<()> {
    let db = setup_test_db().await?;

    let t = now();
    let lt = license_type::ActiveModel {
        id: Set(Uuid::new_v4()),
        code: Set("RN".into()),
        display_name: Set("Registered Nurse".into()),
        description: Set(None),
        renewal_period_months: Set(Some(24)),
        created_at: Set(t),
        updated_at: Set(t),
        deleted_at: Set(None),
    }
    .insert(&db)
    .await?;

    let json = serde_json::to_value(&lt)?;
    assert_eq!(json["displayName"], "Registered Nurse");
    assert_eq!(json["renewalPeriodMonths"], 24);
    assert!(json["deletedAt"].is_null());
    Ok(())
}
