//! Command implementations for the DFS optimizer CLI

pub mod import;
pub mod optimize;
pub mod sites;


use crate::{
    cli::types::{Season, Site, Week},
    error::Result,
    pool::{PlayerPool, PlayerRef},
    storage::PlayerDatabase,
};
use std::path::Path;

/// Interpret a CLI player argument: all digits is an id, anything else a name.
pub fn parse_player_ref(arg: &str) -> PlayerRef {
    match arg.trim().parse() {
        Ok(id) => PlayerRef::Id(id),
        Err(_) => PlayerRef::Name(arg.to_string()),
    }
}

/// Load a slate from a CSV file when given, otherwise from the database.
pub fn load_slate(site: Site, season: Season, week: Week, csv: Option<&Path>) -> Result<PlayerPool> {
    match csv {
        Some(path) => PlayerPool::from_csv_path(site, path),
        None => PlayerDatabase::new()?.load_pool(site, season, week),
    }
}
