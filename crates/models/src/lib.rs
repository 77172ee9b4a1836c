//! SeaORM entities for the provider registry plus the shared base-record
//! plumbing every entity implements.

pub mod base;
pub mod errors;
pub mod db;
pub mod license_type;
pub mod location_type;
pub mod provider;
pub mod facility;
pub mod audit_log;

pub use base::{BaseFields, BaseRecord, MergeIntoActiveModel, RecordMeta};
pub use errors::StorageError;

#[cfg(test)]
mod tests;
