//! Business logic
//!
//! The settlement engine proper: pure calculation, the persistence seam,
//! and the request-scoped services the routes call into. Services are
//! stateless between calls; every multi-record mutation goes through one
//! atomic `FuelStore` operation.

pub mod activity_service;
pub mod calculator;
pub mod refill_service;
pub mod settlement_service;
pub mod store;
pub mod usage_service;
