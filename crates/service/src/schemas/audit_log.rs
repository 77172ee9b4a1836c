use chrono::{DateTime, FixedOffset};
use models::audit_log;
use models::base::MergeIntoActiveModel;
use sea_orm::{Order, Set};
use serde_json::Value;
use uuid::Uuid;

use super::{set_if_present, EntitySchema};
use crate::repository::OrderBy;
use crate::validation::rules::{text, timestamp, uuid, Text, TimestampRule, UuidRule};
use crate::validation::{ValidationError, Validator};

pub struct AuditLogs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAuditLog {
    pub entity_type: String,
    pub entity_id: Uuid,
    pub action: String,
    pub actor: Option<String>,
    pub details: Option<String>,
    pub occurred_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateAuditLog {
    pub entity_type: Option<String>,
    pub entity_id: Option<Uuid>,
    pub action: Option<String>,
    pub actor: Option<Option<String>>,
    pub details: Option<Option<String>>,
    pub occurred_at: Option<DateTime<FixedOffset>>,
}

fn entity_type() -> Text {
    text().one_of(audit_log::ENTITY_TYPES)
}

fn entity_id() -> UuidRule {
    uuid()
}

fn action() -> Text {
    text().one_of(audit_log::ACTIONS)
}

fn actor() -> Text {
    text().max_len(128)
}

fn details() -> Text {
    text().max_len(4096)
}

fn occurred_at() -> TimestampRule {
    timestamp()
}

impl EntitySchema for AuditLogs {
    type Entity = audit_log::Entity;
    type Create = CreateAuditLog;
    type Update = UpdateAuditLog;

    const RESOURCE: &'static str = "audit_log";

    fn parse_create(raw: &Value) -> Result<CreateAuditLog, ValidationError> {
        let mut v = Validator::new(raw);
        let entity_type = v.required("entityType", &entity_type());
        let entity_id = v.required("entityId", &entity_id());
        let action = v.required("action", &action());
        let actor = v.optional("actor", &actor());
        let details = v.optional("details", &details());
        let occurred_at = v.required("occurredAt", &occurred_at());
        let (Some(entity_type), Some(entity_id), Some(action), Some(actor), Some(details), Some(occurred_at)) =
            (entity_type, entity_id, action, actor, details, occurred_at)
        else {
            return Err(v.into_error());
        };
        Ok(CreateAuditLog { entity_type, entity_id, action, actor, details, occurred_at })
    }

    fn parse_update(raw: &Value) -> Result<UpdateAuditLog, ValidationError> {
        let mut v = Validator::new(raw);
        let entity_type = v.patch("entityType", &entity_type());
        let entity_id = v.patch("entityId", &entity_id());
        let action = v.patch("action", &action());
        let actor = v.patch_nullable("actor", &actor());
        let details = v.patch_nullable("details", &details());
        let occurred_at = v.patch("occurredAt", &occurred_at());
        let (Some(entity_type), Some(entity_id), Some(action), Some(actor), Some(details), Some(occurred_at)) =
            (entity_type, entity_id, action, actor, details, occurred_at)
        else {
            return Err(v.into_error());
        };
        Ok(UpdateAuditLog { entity_type, entity_id, action, actor, details, occurred_at })
    }

    /// Audit history reads newest event first.
    fn default_order() -> OrderBy<audit_log::Entity> {
        vec![
            (audit_log::Column::OccurredAt, Order::Desc),
            (audit_log::Column::CreatedAt, Order::Desc),
        ]
    }
}

impl MergeIntoActiveModel<audit_log::ActiveModel> for CreateAuditLog {
    fn merge_into_active_model(self, am: &mut audit_log::ActiveModel) {
        am.entity_type = Set(self.entity_type);
        am.entity_id = Set(self.entity_id);
        am.action = Set(self.action);
        am.actor = Set(self.actor);
        am.details = Set(self.details);
        am.occurred_at = Set(self.occurred_at);
    }
}

impl MergeIntoActiveModel<audit_log::ActiveModel> for UpdateAuditLog {
    fn merge_into_active_model(self, am: &mut audit_log::ActiveModel) {
        set_if_present(&mut am.entity_type, self.entity_type);
        set_if_present(&mut am.entity_id, self.entity_id);
        set_if_present(&mut am.action, self.action);
        set_if_present(&mut am.actor, self.actor);
        set_if_present(&mut am.details, self.details);
        set_if_present(&mut am.occurred_at, self.occurred_at);
    }
}
