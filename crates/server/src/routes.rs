use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use sea_orm::{EntityTrait, IntoActiveModel};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::schemas::{AuditLogs, EntitySchema, Facilities, LicenseTypes, LocationTypes, Providers};
use service::{EntityService, ModelOf, PageResult, Pagination, ServiceFor, Services};

use crate::errors::JsonApiError;

type ActiveModelOf<S> = <<S as EntitySchema>::Entity as EntityTrait>::ActiveModel;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// `page` and `pageSize` arrive as raw strings so that junk values fall back
/// to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    #[serde(rename = "pageSize", alias = "page_size")]
    pub page_size: Option<String>,
}

impl PageQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page.as_deref(), self.page_size.as_deref())
    }
}

fn service_of<S>(services: &Services) -> Arc<EntityService<S>>
where
    S: EntitySchema,
    Services: ServiceFor<S>,
{
    <Services as ServiceFor<S>>::service(services)
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, JsonApiError> {
    body.map(|Json(v)| v)
        .map_err(|e| JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid JSON", Some(e.body_text())))
}

async fn list<S>(
    State(services): State<Services>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResult<ModelOf<S>>>, JsonApiError>
where
    S: EntitySchema,
    Services: ServiceFor<S>,
    ModelOf<S>: Serialize + IntoActiveModel<ActiveModelOf<S>> + Sync,
    ActiveModelOf<S>: Send,
{
    let page = service_of::<S>(&services).list(query.pagination()).await?;
    Ok(Json(page))
}

async fn fetch<S>(
    State(services): State<Services>,
    Path(id): Path<String>,
) -> Result<Json<ModelOf<S>>, JsonApiError>
where
    S: EntitySchema,
    Services: ServiceFor<S>,
    ModelOf<S>: Serialize + IntoActiveModel<ActiveModelOf<S>> + Sync,
    ActiveModelOf<S>: Send,
{
    service_of::<S>(&services)
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(S::RESOURCE))
}

async fn create<S>(
    State(services): State<Services>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ModelOf<S>>), JsonApiError>
where
    S: EntitySchema,
    Services: ServiceFor<S>,
    ModelOf<S>: Serialize + IntoActiveModel<ActiveModelOf<S>> + Sync,
    ActiveModelOf<S>: Send,
{
    let raw = json_body(body)?;
    let created = service_of::<S>(&services).create(&raw).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update<S>(
    State(services): State<Services>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ModelOf<S>>, JsonApiError>
where
    S: EntitySchema,
    Services: ServiceFor<S>,
    ModelOf<S>: Serialize + IntoActiveModel<ActiveModelOf<S>> + Sync,
    ActiveModelOf<S>: Send,
{
    let raw = json_body(body)?;
    service_of::<S>(&services)
        .update(&id, &raw)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(S::RESOURCE))
}

async fn remove<S>(
    State(services): State<Services>,
    Path(id): Path<String>,
) -> Result<StatusCode, JsonApiError>
where
    S: EntitySchema,
    Services: ServiceFor<S>,
    ModelOf<S>: Serialize + IntoActiveModel<ActiveModelOf<S>> + Sync,
    ActiveModelOf<S>: Send,
{
    service_of::<S>(&services).remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The five CRUD routes of one resource. PUT and PATCH are both partial
/// updates.
pub fn resource_router<S>() -> Router<Services>
where
    S: EntitySchema,
    Services: ServiceFor<S>,
    ModelOf<S>: Serialize + IntoActiveModel<ActiveModelOf<S>> + Sync,
    ActiveModelOf<S>: Send,
{
    Router::new()
        .route("/", get(list::<S>).post(create::<S>))
        .route(
            "/:id",
            get(fetch::<S>).put(update::<S>).patch(update::<S>).delete(remove::<S>),
        )
}

/// Build the full application router: health plus the versioned API.
pub fn build_router(services: Services, cors: CorsLayer) -> Router {
    let api = Router::new()
        .nest("/license-types", resource_router::<LicenseTypes>())
        .nest("/location-types", resource_router::<LocationTypes>())
        .nest("/providers", resource_router::<Providers>())
        .nest("/facilities", resource_router::<Facilities>())
        .nest("/audit-logs", resource_router::<AuditLogs>());

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .with_state(services)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
