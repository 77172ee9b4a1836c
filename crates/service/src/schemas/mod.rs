//! Per-entity validation schemas.
//!
//! An [`EntitySchema`] binds a SeaORM entity to its typed create/update
//! payloads and the parsers that produce them from raw JSON.

pub mod audit_log;
pub mod facility;
pub mod license_type;
pub mod location_type;
pub mod provider;

use models::base::{BaseRecord, MergeIntoActiveModel};
use sea_orm::{ActiveValue, EntityTrait, Order, Set};
use serde_json::Value;

use crate::repository::OrderBy;
use crate::validation::ValidationError;

pub use audit_log::AuditLogs;
pub use facility::Facilities;
pub use license_type::LicenseTypes;
pub use location_type::LocationTypes;
pub use provider::Providers;

type ActiveModelOf<S> = <<S as EntitySchema>::Entity as EntityTrait>::ActiveModel;

pub trait EntitySchema: Send + Sync + 'static {
    type Entity: BaseRecord;
    type Create: MergeIntoActiveModel<ActiveModelOf<Self>> + std::fmt::Debug + Send;
    type Update: MergeIntoActiveModel<ActiveModelOf<Self>> + std::fmt::Debug + Send;

    /// Resource name used in logs and error messages.
    const RESOURCE: &'static str;

    fn parse_create(raw: &Value) -> Result<Self::Create, ValidationError>;

    fn parse_update(raw: &Value) -> Result<Self::Update, ValidationError>;

    fn default_order() -> OrderBy<Self::Entity> {
        vec![(<Self::Entity as BaseRecord>::created_at_column(), Order::Desc)]
    }
}

/// `Set` the slot only when the patch carries a value. With `V = Option<T>`
/// this also covers nullable columns, where `Some(None)` clears.
pub(crate) fn set_if_present<V>(slot: &mut ActiveValue<V>, value: Option<V>)
where
    V: Into<sea_orm::Value>,
{
    if let Some(v) = value {
        *slot = Set(v);
    }
}
