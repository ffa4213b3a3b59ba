
//! Database schema and row models.

pub mod models;
pub mod schema;
