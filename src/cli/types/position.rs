//! Fantasy football position types and utilities.

use crate::error::DfsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fantasy football player positions.
///
/// This is the closed set of positions a player record can carry. Roster
/// slots such as FLEX are not positions; they are described by a slot's
/// eligible-position set in [`crate::schema::RosterSchema`].
///
/// # Examples
///
/// ```rust
/// use dfs_optimizer::Position;
///
/// let qb: Position = "quarterback".parse().unwrap();
/// assert_eq!(qb, Position::QB);
/// assert_eq!(Position::DST.to_string(), "DST");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    DST,
    K,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::DST,
        Position::K,
    ];

    /// Pass-catching positions that can complete a QB stack.
    pub fn is_receiver(&self) -> bool {
        matches!(self, Position::WR | Position::TE)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::DST => "DST",
            Position::K => "K",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Position {
    type Err = DfsError;

    /// Parses site spellings such as `D/ST`, `Def`, `Wide Receiver` or `te`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_uppercase();

        match normalized.as_str() {
            "QB" | "QUARTERBACK" => Ok(Position::QB),
            "RB" | "RUNNINGBACK" => Ok(Position::RB),
            "WR" | "WIDERECEIVER" => Ok(Position::WR),
            "TE" | "TIGHTEND" => Ok(Position::TE),
            "DST" | "DEF" | "D" | "DEFENSE" | "DEFENSESPECIALTEAMS" => Ok(Position::DST),
            "K" | "KICKER" => Ok(Position::K),
            _ => Err(DfsError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}
