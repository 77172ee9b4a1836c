use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::license_type;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "provider")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub npi: String,
    pub license_type_id: Uuid,
    pub license_number: String,
    pub license_expires_on: Option<Date>,
    pub years_experience: Option<i32>,
    pub email: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    LicenseType,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::LicenseType => Entity::belongs_to(license_type::Entity)
                .from(Column::LicenseTypeId)
                .to(license_type::Column::Id)
                .into(),
        }
    }
}

impl Related<license_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LicenseType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

crate::impl_base_record!();
