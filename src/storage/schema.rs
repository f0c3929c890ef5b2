//! Database schema and connection management

use crate::{core::database_path, error::Result};
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

/// Connection to the player database.
pub struct PlayerDatabase {
    pub(crate) conn: Connection,
}

impl PlayerDatabase {
    /// Open the database at the configured location, creating it if needed.
    pub fn new() -> Result<Self> {
        Self::open(database_path()?)
    }

    /// Open (or create) a database file at `path` and ensure tables exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        debug!(path = %path.display(), "opening player database");
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Fresh database that lives only as long as the returned value.
    pub fn new_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                player_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                team TEXT NOT NULL,
                position TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS site_projections (
                player_id INTEGER NOT NULL,
                site TEXT NOT NULL,
                season INTEGER NOT NULL,
                week INTEGER NOT NULL,
                salary INTEGER NOT NULL,
                points REAL NOT NULL,
                game_week INTEGER,
                kickoff TEXT,
                PRIMARY KEY (player_id, site, season, week),
                FOREIGN KEY (player_id) REFERENCES players(player_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_site_season_week
             ON site_projections(site, season, week)",
            [],
        )?;

        Ok(())
    }
}
