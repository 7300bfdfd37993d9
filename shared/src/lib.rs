//! Shared data models and utilities for the Salones back office.
//!
//! The `models` module holds the entity structs and their Create/Update
//! payloads. Database row mapping (`sqlx::FromRow`) is gated behind the
//! `db` feature so non-server consumers stay free of sqlx.

pub mod models;
pub mod util;
