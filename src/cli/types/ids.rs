//! ID types for players and teams.

use crate::error::{DfsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for player IDs.
///
/// Ids are unique within a [`crate::PlayerPool`]; display names are not.
///
/// # Examples
///
/// ```rust
/// use dfs_optimizer::PlayerId;
///
/// let id = PlayerId::new(1234);
/// assert_eq!(id.as_u64(), 1234);
/// assert_eq!(id.to_string(), "1234");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = DfsError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// League team abbreviation, stored uppercase (`"sf"` and `"SF"` are the same team).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TeamCode(String);

impl TeamCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TeamCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TeamCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<TeamCode> for String {
    fn from(team: TeamCode) -> Self {
        team.0
    }
}

impl FromStr for TeamCode {
    type Err = DfsError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::new(s))
    }
}
