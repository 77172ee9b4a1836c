//! Validation plus persistence for one entity type.
//!
//! [`EntityService`] is the only place where the validation schemas and the
//! repository meet; the HTTP adapter only ever talks to this type.

use std::time::Duration;

use sea_orm::{DatabaseConnection, EntityTrait, IntoActiveModel};
use serde_json::Value;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::pagination::{PageLimits, PageResult, Pagination};
use crate::repository::{Repository, RepositoryConfig};
use crate::schemas::EntitySchema;
use crate::validation::ValidationError;

pub type ModelOf<S> = <<S as EntitySchema>::Entity as EntityTrait>::Model;
type ActiveModelOf<S> = <<S as EntitySchema>::Entity as EntityTrait>::ActiveModel;

pub struct EntityService<S: EntitySchema> {
    repo: Repository<S::Entity>,
}

impl<S> EntityService<S>
where
    S: EntitySchema,
    ModelOf<S>: IntoActiveModel<ActiveModelOf<S>> + Sync,
    ActiveModelOf<S>: Send,
{
    pub fn new(db: DatabaseConnection, limits: PageLimits, timeout: Duration) -> Self {
        let config = RepositoryConfig::<S::Entity>::new(limits, timeout)
            .with_default_order(S::default_order());
        Self { repo: Repository::new(db, config) }
    }

    pub fn repository(&self) -> &Repository<S::Entity> {
        &self.repo
    }

    /// One page of live records in the schema's default order.
    #[instrument(skip(self), fields(resource = S::RESOURCE))]
    pub async fn list(&self, pagination: Pagination) -> Result<PageResult<ModelOf<S>>, ServiceError> {
        Ok(self.repo.find_paged(pagination, None, None).await?)
    }

    /// Live record by id; a malformed id is simply not found.
    #[instrument(skip(self), fields(resource = S::RESOURCE))]
    pub async fn get(&self, id: &str) -> Result<Option<ModelOf<S>>, ServiceError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.repo.find_by_id(id).await?)
    }

    #[instrument(skip(self, raw), fields(resource = S::RESOURCE))]
    pub async fn create(&self, raw: &Value) -> Result<ModelOf<S>, ServiceError> {
        let data = S::parse_create(raw).map_err(rejected)?;
        Ok(self.repo.create_one(data).await?)
    }

    /// Validates before looking the record up, so an invalid payload never
    /// reaches storage.
    #[instrument(skip(self, raw), fields(resource = S::RESOURCE))]
    pub async fn update(&self, id: &str, raw: &Value) -> Result<Option<ModelOf<S>>, ServiceError> {
        let patch = S::parse_update(raw).map_err(rejected)?;
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.repo.update_one(id, patch).await?)
    }

    /// Soft delete. Unknown, malformed and already-deleted ids are a no-op.
    #[instrument(skip(self), fields(resource = S::RESOURCE))]
    pub async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        let Some(id) = parse_id(id) else {
            return Ok(());
        };
        Ok(self.repo.soft_delete(id).await?)
    }
}

fn parse_id(raw: &str) -> Option<Uuid> {
    let parsed = Uuid::parse_str(raw.trim()).ok();
    if parsed.is_none() {
        debug!(id = raw, "malformed id treated as not found");
    }
    parsed
}

fn rejected(e: ValidationError) -> ServiceError {
    debug!(issues = e.issues.len(), "payload rejected");
    ServiceError::Validation(e)
}
