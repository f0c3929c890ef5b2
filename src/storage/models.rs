//! Data models for the storage layer

use crate::cli::types::{PlayerId, Position, Season, Site, TeamCode, Week};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Site-independent player identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub name: String,
    pub team: TeamCode,
    pub position: Position,
}

/// One site's salary and projected points for a player in a given week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteProjection {
    pub player_id: PlayerId,
    pub site: Site,
    pub season: Season,
    pub week: Week,
    pub salary: u32,
    pub points: f64,
    /// Week of the game itself; differs from `week` on multi-week slates.
    #[serde(default)]
    pub game_week: Option<Week>,
    #[serde(default)]
    pub kickoff: Option<NaiveDateTime>,
}

/// Row counts written by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub players: usize,
    pub projections: usize,
}
