//! Player pool: the read-only view of candidate players for one site.
//!
//! A [`PlayerPool`] is built once from normalized tabular data (see
//! [`ingest`]) or from storage, and is never mutated afterwards. Constraint
//! operations refer to players either by id or by display name; names are
//! resolved here with [`PlayerPool::resolve`].
//!
//! # Name matching
//!
//! Names match case-insensitively after trimming and collapsing runs of
//! whitespace. Nothing else is normalized: punctuation and suffixes such as
//! "Jr." or "III" must match exactly, so "Odell Beckham" does not resolve to
//! "Odell Beckham Jr.". A name shared by several ids is an ambiguity error
//! rather than a silent first match.

pub mod ingest;


use crate::{
    cli::types::{PlayerId, Position, Site, TeamCode, Week},
    error::{DfsError, Result},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// One candidate player with site-specific salary and projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    pub team: TeamCode,
    pub position: Position,
    pub salary: u32,
    pub projection: f64,
    /// Kickoff of the player's game, in the site's local (Eastern) time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kickoff: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<Week>,
}

impl PlayerRecord {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        team: impl Into<TeamCode>,
        position: Position,
        salary: u32,
        projection: f64,
    ) -> Self {
        Self {
            id: PlayerId::new(id),
            name: name.into(),
            team: team.into(),
            position,
            salary,
            projection,
            kickoff: None,
            week: None,
        }
    }

    /// Attach the week and kickoff time of the player's game.
    pub fn with_game(mut self, week: Week, kickoff: NaiveDateTime) -> Self {
        self.week = Some(week);
        self.kickoff = Some(kickoff);
        self
    }
}

/// How a caller refers to a player when setting a constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerRef {
    Id(PlayerId),
    Name(String),
}

impl fmt::Display for PlayerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerRef::Id(id) => write!(f, "id {}", id),
            PlayerRef::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<PlayerId> for PlayerRef {
    fn from(id: PlayerId) -> Self {
        PlayerRef::Id(id)
    }
}

impl From<&str> for PlayerRef {
    fn from(name: &str) -> Self {
        PlayerRef::Name(name.to_string())
    }
}

impl From<String> for PlayerRef {
    fn from(name: String) -> Self {
        PlayerRef::Name(name)
    }
}

/// Lowercase, trimmed, single-spaced form used for name lookups.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Ordered, immutable collection of players for one site, indexed by id and name.
#[derive(Debug, Clone)]
pub struct PlayerPool {
    site: Site,
    players: Vec<PlayerRecord>,
    by_id: HashMap<PlayerId, usize>,
    by_name: HashMap<String, Vec<usize>>,
}

impl PlayerPool {
    /// Build a pool, rejecting empty input, duplicate ids and invalid projections.
    pub fn new(site: Site, players: Vec<PlayerRecord>) -> Result<Self> {
        if players.is_empty() {
            return Err(DfsError::EmptyPool {
                site: site.to_string(),
            });
        }

        let mut by_id = HashMap::with_capacity(players.len());
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, player) in players.iter().enumerate() {
            if !player.projection.is_finite() || player.projection < 0.0 {
                return Err(DfsError::InvalidRecord {
                    row: idx + 1,
                    message: format!(
                        "projection for {} must be a non-negative number, got {}",
                        player.name, player.projection
                    ),
                });
            }
            if by_id.insert(player.id, idx).is_some() {
                return Err(DfsError::DuplicatePlayerId {
                    id: player.id.as_u64(),
                });
            }
            by_name
                .entry(normalize_name(&player.name))
                .or_default()
                .push(idx);
        }

        Ok(Self {
            site,
            players,
            by_id,
            by_name,
        })
    }

    pub fn site(&self) -> Site {
        self.site
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter()
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerRecord> {
        self.by_id.get(&id).map(|&idx| &self.players[idx])
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Every player whose normalized name equals the normalized query.
    pub fn find_by_name(&self, name: &str) -> Vec<&PlayerRecord> {
        self.by_name
            .get(&normalize_name(name))
            .map(|indices| indices.iter().map(|&idx| &self.players[idx]).collect())
            .unwrap_or_default()
    }

    /// Distinct team codes present in the pool.
    pub fn teams(&self) -> BTreeSet<&TeamCode> {
        self.players.iter().map(|p| &p.team).collect()
    }

    /// Distinct game weeks present in the pool, ignoring players without one.
    pub fn weeks(&self) -> BTreeSet<Week> {
        self.players.iter().filter_map(|p| p.week).collect()
    }

    /// Resolve a player reference to exactly one id.
    ///
    /// # Errors
    ///
    /// - [`DfsError::PlayerNotFound`] when no player matches
    /// - [`DfsError::AmbiguousPlayer`] when a name matches more than one id
    pub fn resolve(&self, player: &PlayerRef) -> Result<PlayerId> {
        match player {
            PlayerRef::Id(id) => {
                if self.contains(*id) {
                    Ok(*id)
                } else {
                    Err(DfsError::PlayerNotFound {
                        query: id.to_string(),
                    })
                }
            }
            PlayerRef::Name(name) => {
                let matches = self.find_by_name(name);
                match matches.as_slice() {
                    [] => Err(DfsError::PlayerNotFound {
                        query: name.clone(),
                    }),
                    [single] => Ok(single.id),
                    many => {
                        let mut ids: Vec<u64> = many.iter().map(|p| p.id.as_u64()).collect();
                        ids.sort_unstable();
                        Err(DfsError::AmbiguousPlayer {
                            query: name.clone(),
                            ids,
                        })
                    }
                }
            }
        }
    }
}
