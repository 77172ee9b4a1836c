/// Entity mapping and storage error classification against a migrated
/// in-memory database
pub mod crud_tests;
