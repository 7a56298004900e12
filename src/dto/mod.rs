//! Request and response shapes
//!
//! Transport-facing types only: deserialization, field validation and
//! presentation (time formatting, paid/unpaid marker rendering). The
//! services never depend on anything in here.

pub mod activity_dto;
pub mod common;
pub mod refill_dto;
pub mod usage_dto;
