//! Import command implementation

use crate::{
    cli::types::{Season, Site, Week},
    error::Result,
    pool::PlayerPool,
    storage::{ImportSummary, PlayerDatabase},
};
use std::path::Path;

/// Handle the import command against the configured database
pub fn handle_import(
    site: Site,
    season: Season,
    week: Week,
    csv: &Path,
    clear_db: bool,
) -> Result<ImportSummary> {
    let mut db = PlayerDatabase::new()?;
    let summary = import_csv(&mut db, site, season, week, csv, clear_db)?;
    println!(
        "✓ Imported {} {} players for {} week {}",
        summary.players,
        site.display_name(),
        season,
        week
    );
    Ok(summary)
}

/// Read `csv` for `site` and store it as the given week's slate.
pub fn import_csv(
    db: &mut PlayerDatabase,
    site: Site,
    season: Season,
    week: Week,
    csv: &Path,
    clear_db: bool,
) -> Result<ImportSummary> {
    let pool = PlayerPool::from_csv_path(site, csv)?;
    if clear_db {
        db.clear_all_data()?;
    }
    db.import_pool(&pool, season, week)
}
