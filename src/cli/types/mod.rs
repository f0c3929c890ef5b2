//! Type-safe wrappers and enums for lineup optimization inputs.

pub mod ids;
pub mod position;
pub mod site;
pub mod time;

pub use ids::{PlayerId, TeamCode};
pub use position::Position;
pub use site::Site;
pub use time::{Season, Week};
