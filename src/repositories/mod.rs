//! SQL query layer
//!
//! Every function takes an explicit `&mut PgConnection` so the caller
//! decides the unit of work: a pool connection for single reads, an open
//! transaction for multi-record mutations. No function here begins or
//! commits a transaction on its own.

pub mod person_repository;
pub mod refill_repository;
pub mod usage_repository;
pub mod vehicle_repository;
