//! Identity and audit columns shared by every persisted entity.
//!
//! SeaORM models are flat, so the base columns live directly on each
//! `Model`. [`BaseRecord`] maps them to the entity's `Column` enum for the
//! generic repository, and [`RecordMeta`] exposes them as one embedded
//! [`BaseFields`] value.

use chrono::{SubsecRound, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// The four base columns of a record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseFields {
    pub id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

/// Column descriptor implemented by every entity the generic repository
/// can manage.
pub trait BaseRecord: EntityTrait {
    fn id_column() -> Self::Column;
    fn created_at_column() -> Self::Column;
    fn updated_at_column() -> Self::Column;
    fn deleted_at_column() -> Self::Column;
}

/// Read access to the base columns of a loaded model.
pub trait RecordMeta {
    fn base(&self) -> BaseFields;
}

/// Writes the fields carried by a payload onto an active model.
///
/// Implementations must only `Set` the fields they actually carry; every
/// other column keeps its current state so a partial payload never clobbers
/// data it did not mention.
pub trait MergeIntoActiveModel<A> {
    fn merge_into_active_model(self, am: &mut A);
}

/// Current time truncated to microseconds, the precision Postgres keeps.
pub fn now() -> DateTimeWithTimeZone {
    Utc::now().trunc_subsecs(6).fixed_offset()
}

/// Implements [`BaseRecord`] and [`RecordMeta`] for the entity module the
/// macro is invoked in. The module must define `Entity`, `Column` and
/// `Model` with `id`, `created_at`, `updated_at` and `deleted_at` columns.
#[macro_export]
macro_rules! impl_base_record {
    () => {
        impl $crate::base::BaseRecord for Entity {
            fn id_column() -> Column {
                Column::Id
            }

            fn created_at_column() -> Column {
                Column::CreatedAt
            }

            fn updated_at_column() -> Column {
                Column::UpdatedAt
            }

            fn deleted_at_column() -> Column {
                Column::DeletedAt
            }
        }

        impl $crate::base::RecordMeta for Model {
            fn base(&self) -> $crate::base::BaseFields {
                $crate::base::BaseFields {
                    id: self.id,
                    created_at: self.created_at,
                    updated_at: self.updated_at,
                    deleted_at: self.deleted_at,
                }
            }
        }
    };
}
