//! CRUD core of the registry.
//! - `repository`: entity-agnostic paging and persistence over SeaORM.
//! - `validation` and `schemas`: raw JSON to typed create/update payloads.
//! - `entity_service`: validation plus persistence, one service per entity.

pub mod entity_service;
pub mod errors;
pub mod pagination;
pub mod repository;
pub mod schemas;
pub mod services;
pub mod validation;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use entity_service::{EntityService, ModelOf};
pub use errors::ServiceError;
pub use pagination::{PageLimits, PageResult, Pagination};
pub use services::{ServiceFor, Services};
pub use validation::{ValidationError, ValidationIssue};
