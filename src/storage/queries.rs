//! Basic database query operations

use super::{models::*, schema::PlayerDatabase};
use crate::{
    cli::types::{PlayerId, Position, Season, Site, TeamCode, Week},
    error::Result,
    pool::{PlayerPool, PlayerRecord},
};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use tracing::{debug, info};

type PoolRow = (
    u64,
    String,
    String,
    String,
    u32,
    f64,
    Option<u16>,
    Option<NaiveDateTime>,
);

fn write_player(conn: &Connection, player: &Player) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO players (player_id, name, team, position)
         VALUES (?, ?, ?, ?)",
        params![
            player.player_id.as_u64(),
            player.name,
            player.team.as_str(),
            player.position.as_str()
        ],
    )?;
    Ok(())
}

fn write_projection(conn: &Connection, projection: &SiteProjection) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO site_projections
         (player_id, site, season, week, salary, points, game_week, kickoff)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            projection.player_id.as_u64(),
            projection.site.abbreviation(),
            projection.season.as_u16(),
            projection.week.as_u16(),
            projection.salary,
            projection.points,
            projection.game_week.map(|w| w.as_u16()),
            projection.kickoff
        ],
    )?;
    Ok(())
}

impl PlayerDatabase {
    /// Insert or update a player's identity
    pub fn upsert_player(&mut self, player: &Player) -> Result<()> {
        write_player(&self.conn, player)
    }

    /// Insert or update one site's salary and projection for a week
    pub fn upsert_projection(&mut self, projection: &SiteProjection) -> Result<()> {
        write_projection(&self.conn, projection)
    }

    /// Store a whole pool as the given week's slate, in one transaction
    pub fn import_pool(
        &mut self,
        pool: &PlayerPool,
        season: Season,
        week: Week,
    ) -> Result<ImportSummary> {
        let tx = self.conn.transaction()?;
        let mut summary = ImportSummary::default();

        for record in pool.iter() {
            write_player(
                &tx,
                &Player {
                    player_id: record.id,
                    name: record.name.clone(),
                    team: record.team.clone(),
                    position: record.position,
                },
            )?;
            summary.players += 1;

            write_projection(
                &tx,
                &SiteProjection {
                    player_id: record.id,
                    site: pool.site(),
                    season,
                    week,
                    salary: record.salary,
                    points: record.projection,
                    game_week: record.week,
                    kickoff: record.kickoff,
                },
            )?;
            summary.projections += 1;
        }

        tx.commit()?;
        info!(
            site = %pool.site(),
            season = season.as_u16(),
            week = week.as_u16(),
            players = summary.players,
            "imported slate"
        );
        Ok(summary)
    }

    /// Build the player pool for one site and week
    ///
    /// Fails with [`crate::DfsError::EmptyPool`] when nothing was imported for
    /// that slate.
    pub fn load_pool(&self, site: Site, season: Season, week: Week) -> Result<PlayerPool> {
        let mut stmt = self.conn.prepare(
            "SELECT p.player_id, p.name, p.team, p.position, s.salary, s.points,
                    s.game_week, s.kickoff
             FROM site_projections s
             JOIN players p ON p.player_id = s.player_id
             WHERE s.site = ? AND s.season = ? AND s.week = ?
             ORDER BY p.player_id",
        )?;

        let rows = stmt.query_map(
            params![site.abbreviation(), season.as_u16(), week.as_u16()],
            |row| -> rusqlite::Result<PoolRow> {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                    row.get(7)?,
                ))
            },
        )?;

        let mut players = Vec::new();
        for row in rows {
            let (id, name, team, position, salary, points, game_week, kickoff) = row?;
            players.push(PlayerRecord {
                id: PlayerId::new(id),
                name,
                team: TeamCode::new(team),
                position: position.parse::<Position>()?,
                salary,
                projection: points,
                kickoff,
                week: game_week.map(Week::new),
            });
        }

        debug!(site = %site, players = players.len(), "loaded pool from database");
        PlayerPool::new(site, players)
    }

    /// True if any projection exists for the slate
    pub fn has_data_for_week(&self, site: Site, season: Season, week: Week) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM site_projections
             WHERE site = ? AND season = ? AND week = ?",
            params![site.abbreviation(), season.as_u16(), week.as_u16()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn get_all_players(&self) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(
            "SELECT player_id, name, team, position FROM players ORDER BY player_id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, u64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut players = Vec::new();
        for row in rows {
            let (id, name, team, position) = row?;
            players.push(Player {
                player_id: PlayerId::new(id),
                name,
                team: TeamCode::new(team),
                position: position.parse()?,
            });
        }
        Ok(players)
    }

    /// Clear all data from the database
    pub fn clear_all_data(&mut self) -> Result<()> {
        // Projections first due to the foreign key
        self.conn.execute("DELETE FROM site_projections", [])?;
        self.conn.execute("DELETE FROM players", [])?;
        Ok(())
    }
}
