use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::location_type;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "facility")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub location_type_id: Uuid,
    pub address_line1: String,
    pub city: String,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub bed_count: Option<i32>,
    pub opened_on: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    LocationType,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::LocationType => Entity::belongs_to(location_type::Entity)
                .from(Column::LocationTypeId)
                .to(location_type::Column::Id)
                .into(),
        }
    }
}

impl Related<location_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LocationType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

crate::impl_base_record!();
