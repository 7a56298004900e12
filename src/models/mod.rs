//! Row value types
//!
//! Plain data types mapping one-to-one onto the PostgreSQL schema. No
//! persistence mechanics or business logic lives here; repositories own
//! the queries and services own the rules.

pub mod person;
pub mod refill;
pub mod usage;
pub mod vehicle;
