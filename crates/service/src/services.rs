use std::sync::Arc;
use std::time::Duration;

use configs::AppConfig;
use sea_orm::DatabaseConnection;

use crate::entity_service::EntityService;
use crate::pagination::PageLimits;
use crate::schemas::{AuditLogs, Facilities, LicenseTypes, LocationTypes, Providers};

/// One [`EntityService`] per resource, sharing a connection pool.
#[derive(Clone)]
pub struct Services {
    pub license_types: Arc<EntityService<LicenseTypes>>,
    pub location_types: Arc<EntityService<LocationTypes>>,
    pub providers: Arc<EntityService<Providers>>,
    pub facilities: Arc<EntityService<Facilities>>,
    pub audit_logs: Arc<EntityService<AuditLogs>>,
}

impl Services {
    pub fn new(db: DatabaseConnection, limits: PageLimits, timeout: Duration) -> Self {
        Self {
            license_types: Arc::new(EntityService::new(db.clone(), limits, timeout)),
            location_types: Arc::new(EntityService::new(db.clone(), limits, timeout)),
            providers: Arc::new(EntityService::new(db.clone(), limits, timeout)),
            facilities: Arc::new(EntityService::new(db.clone(), limits, timeout)),
            audit_logs: Arc::new(EntityService::new(db, limits, timeout)),
        }
    }

    pub fn from_config(db: DatabaseConnection, cfg: &AppConfig) -> Self {
        Self::new(
            db,
            PageLimits::from(cfg.pagination),
            Duration::from_secs(cfg.repository.operation_timeout_secs),
        )
    }
}

/// Access to a resource's service by schema type, for handlers that are
/// generic over the schema.
pub trait ServiceFor<S: crate::schemas::EntitySchema> {
    fn service(&self) -> Arc<EntityService<S>>;
}

macro_rules! service_for {
    ($schema:ty, $field:ident) => {
        impl ServiceFor<$schema> for Services {
            fn service(&self) -> Arc<EntityService<$schema>> {
                self.$field.clone()
            }
        }
    };
}

service_for!(LicenseTypes, license_types);
service_for!(LocationTypes, location_types);
service_for!(Providers, providers);
service_for!(Facilities, facilities);
service_for!(AuditLogs, audit_logs);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Pagination;
    use crate::test_support::get_db;
    use serde_json::json;

    #[tokio::test]
    async fn services_share_one_database() -> anyhow::Result<()> {
        let db = get_db().await?;
        let services = Services::from_config(db, &AppConfig::default());
        let lt = services
            .license_types
            .create(&json!({ "code": "NP", "displayName": "Nurse Practitioner" }))
            .await?;
        services
            .audit_logs
            .create(&json!({
                "entityType": "license_type",
                "entityId": lt.id.to_string(),
                "action": "create",
                "occurredAt": "2024-01-01T00:00:00Z"
            }))
            .await?;
        let via_trait = <Services as ServiceFor<AuditLogs>>::service(&services);
        let logs = via_trait.list(Pagination::default()).await?;
        assert_eq!(logs.total, 1);
        assert_eq!(logs.items[0].entity_id, lt.id);
        Ok(())
    }
}
