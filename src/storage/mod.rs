//! Storage layer for weekly salary and projection data
//!
//! Slates are imported once (usually from a CSV export) and later loaded
//! back as a [`crate::PlayerPool`] for one site and week:
//! - `models`: Row structures
//! - `schema`: Database connection and schema management
//! - `queries`: Upserts, pool loading and maintenance

pub mod models;
pub mod queries;
pub mod schema;

#[cfg(test)]
mod tests;

pub use models::*;
pub use schema::PlayerDatabase;
