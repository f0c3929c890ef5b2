//! Build a [`PlayerPool`] from CSV player projections.
//!
//! Expected header columns are `id`, `name`, `team`, `position` plus the
//! site's points/salary pair (for example `dk_points` and `dk_salary`).
//! Optional `datetime` (game kickoff) and `week` columns feed game-slate
//! filtering. Other columns are ignored, so a single file can carry every site.

use super::{PlayerPool, PlayerRecord};
use crate::{
    cli::types::{PlayerId, Position, Site, TeamCode, Week},
    error::{DfsError, Result},
};
use chrono::NaiveDateTime;
use csv::StringRecord;
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, warn};

struct ColumnIndex {
    id: usize,
    name: usize,
    team: usize,
    position: usize,
    points: usize,
    salary: usize,
    kickoff: Option<usize>,
    week: Option<usize>,
}

/// Accepted layouts for the `datetime` column.
const KICKOFF_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

impl ColumnIndex {
    fn from_headers(headers: &StringRecord, site: Site) -> Result<Self> {
        let optional = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(column))
        };
        let find = |column: &str| -> Result<usize> {
            optional(column).ok_or_else(|| DfsError::InvalidRecord {
                row: 0,
                message: format!("missing required column {:?}", column),
            })
        };

        Ok(Self {
            id: find("id")?,
            name: find("name")?,
            team: find("team")?,
            position: find("position")?,
            points: find(&site.points_column())?,
            salary: find(&site.salary_column())?,
            kickoff: optional("datetime"),
            week: optional("week"),
        })
    }
}

impl PlayerPool {
    /// Read a pool for `site` from a CSV file on disk.
    pub fn from_csv_path(site: Site, path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_csv_reader(site, file)
    }

    /// Read a pool for `site` from any CSV source.
    ///
    /// Rows with a blank points or salary value for this site are skipped;
    /// the player is simply not on the site's slate. Any other malformed field
    /// is an [`DfsError::InvalidRecord`] carrying the 1-based data row.
    pub fn from_csv_reader<R: Read>(site: Site, reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = ColumnIndex::from_headers(csv_reader.headers()?, site)?;
        let mut players = Vec::new();
        let mut skipped = 0usize;

        for (idx, result) in csv_reader.records().enumerate() {
            let row = idx + 1;
            let record = result?;
            match parse_row(&record, &columns, row)? {
                Some(player) => players.push(player),
                None => {
                    skipped += 1;
                    warn!(row, site = %site, "skipping player without salary or points");
                }
            }
        }

        debug!(
            site = %site,
            players = players.len(),
            skipped,
            "loaded player pool from csv"
        );
        PlayerPool::new(site, players)
    }
}

fn field<'r>(record: &'r StringRecord, idx: usize, column: &str, row: usize) -> Result<&'r str> {
    match record.get(idx) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(DfsError::InvalidRecord {
            row,
            message: format!("missing value for {:?}", column),
        }),
    }
}

fn parse_row(record: &StringRecord, columns: &ColumnIndex, row: usize) -> Result<Option<PlayerRecord>> {
    let points = record.get(columns.points).unwrap_or_default();
    let salary = record.get(columns.salary).unwrap_or_default();
    if points.is_empty() || salary.is_empty() {
        return Ok(None);
    }

    let invalid = |message: String| DfsError::InvalidRecord { row, message };

    let id: PlayerId = field(record, columns.id, "id", row)?
        .parse()
        .map_err(|e| invalid(format!("invalid id: {}", e)))?;
    let name = field(record, columns.name, "name", row)?.to_string();
    let team = TeamCode::new(field(record, columns.team, "team", row)?);
    let position: Position = field(record, columns.position, "position", row)?
        .parse()
        .map_err(|e| invalid(format!("{}", e)))?;
    let projection: f64 = points
        .parse()
        .map_err(|_| invalid(format!("invalid points value {:?}", points)))?;
    // Some exports write salaries as "7500.0".
    let salary: u32 = salary
        .parse::<u32>()
        .ok()
        .or_else(|| {
            salary
                .parse::<f64>()
                .ok()
                .filter(|s| s.is_finite() && *s >= 0.0 && s.fract() == 0.0)
                .map(|s| s as u32)
        })
        .ok_or_else(|| invalid(format!("invalid salary value {:?}", salary)))?;

    let kickoff = optional_field(record, columns.kickoff)
        .map(|value| {
            parse_kickoff(value).ok_or_else(|| invalid(format!("invalid datetime {:?}", value)))
        })
        .transpose()?;
    let week = optional_field(record, columns.week)
        .map(|value| value.parse::<Week>().map_err(|e| invalid(e.to_string())))
        .transpose()?;

    Ok(Some(PlayerRecord {
        id,
        name,
        team,
        position,
        salary,
        projection,
        kickoff,
        week,
    }))
}

/// A present, non-blank value from an optional column.
fn optional_field(record: &StringRecord, idx: Option<usize>) -> Option<&str> {
    idx.and_then(|idx| record.get(idx))
        .filter(|value| !value.is_empty())
}

fn parse_kickoff(value: &str) -> Option<NaiveDateTime> {
    KICKOFF_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}
