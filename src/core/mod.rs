//! Core utilities shared by the storage layer and the CLI.
//!
//! - `paths`: locating the player database on disk

pub mod paths;

pub use paths::database_path;
