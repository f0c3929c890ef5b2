//! Integration tests for on-disk storage

use dfs_optimizer::{
    storage::*, LineupOptimizer, PlayerId, PlayerPool, PlayerRecord, Position, Season, Site,
    TeamCode, Week,
};
use std::io::Write;

fn slate(site: Site) -> PlayerPool {
    use Position::*;
    PlayerPool::new(
        site,
        vec![
            PlayerRecord::new(1, "Jalen Hurts", "PHI", QB, 7900, 23.0),
            PlayerRecord::new(2, "Saquon Barkley", "PHI", RB, 8200, 20.0),
            PlayerRecord::new(3, "Derrick Henry", "BAL", RB, 7800, 19.0),
            PlayerRecord::new(4, "Justice Hill", "BAL", RB, 4200, 8.0),
            PlayerRecord::new(5, "A.J. Brown", "PHI", WR, 7500, 17.0),
            PlayerRecord::new(6, "DeVonta Smith", "PHI", WR, 6200, 14.0),
            PlayerRecord::new(7, "Zay Flowers", "BAL", WR, 6000, 13.5),
            PlayerRecord::new(8, "Rashod Bateman", "BAL", WR, 4400, 9.0),
            PlayerRecord::new(9, "Mark Andrews", "BAL", TE, 5200, 11.0),
            PlayerRecord::new(10, "Dallas Goedert", "PHI", TE, 4800, 10.0),
            PlayerRecord::new(11, "Eagles", "PHI", DST, 3400, 8.0),
            PlayerRecord::new(12, "Ravens", "BAL", DST, 3100, 7.0),
        ],
    )
    .unwrap()
}

#[test]
fn test_database_file_persists_between_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("players.db");

    {
        let mut db = PlayerDatabase::open(&path).unwrap();
        db.import_pool(&slate(Site::DraftKings), Season::new(2024), Week::new(3))
            .unwrap();
    }

    let db = PlayerDatabase::open(&path).unwrap();
    assert!(db
        .has_data_for_week(Site::DraftKings, Season::new(2024), Week::new(3))
        .unwrap());
    let pool = db
        .load_pool(Site::DraftKings, Season::new(2024), Week::new(3))
        .unwrap();
    assert_eq!(pool.len(), 12);
    assert_eq!(pool.resolve(&"a.j. brown".into()).unwrap(), PlayerId::new(5));
}

#[test]
fn test_stored_slate_optimizes() {
    let mut db = PlayerDatabase::new_in_memory().unwrap();
    db.import_pool(&slate(Site::FanDuel), Season::new(2024), Week::new(1))
        .unwrap();

    let pool = db
        .load_pool(Site::FanDuel, Season::new(2024), Week::new(1))
        .unwrap();
    let mut optimizer = LineupOptimizer::new("fd", pool).unwrap();
    optimizer.set_qb_receiver_stack("PHI");
    let lineup = optimizer.optimize_lineup().unwrap().into_lineup().unwrap();

    assert!(lineup.contains(PlayerId::new(1)));
    assert!(lineup.total_salary <= 60_000);
}

#[test]
fn test_sites_are_stored_separately() {
    let mut db = PlayerDatabase::new_in_memory().unwrap();
    db.import_pool(&slate(Site::DraftKings), Season::new(2024), Week::new(1))
        .unwrap();

    let projection = SiteProjection {
        player_id: PlayerId::new(1),
        site: Site::YahooMulti,
        season: Season::new(2024),
        week: Week::new(1),
        salary: 40,
        points: 22.0,
        game_week: None,
        kickoff: None,
    };
    db.upsert_projection(&projection).unwrap();

    let yahoo = db
        .load_pool(Site::YahooMulti, Season::new(2024), Week::new(1))
        .unwrap();
    assert_eq!(yahoo.len(), 1);
    assert_eq!(yahoo.get(PlayerId::new(1)).unwrap().salary, 40);

    let dk = db
        .load_pool(Site::DraftKings, Season::new(2024), Week::new(1))
        .unwrap();
    assert_eq!(dk.get(PlayerId::new(1)).unwrap().salary, 7900);
}

#[test]
fn test_csv_file_import() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "id,name,team,position,yh_points,yh_salary").unwrap();
    writeln!(file, "1,Lamar Jackson,BAL,Quarterback,26.0,45").unwrap();
    writeln!(file, "2,Ravens,BAL,Defense,8.0,").unwrap();

    let pool = PlayerPool::from_csv_path(Site::YahooMulti, file.path()).unwrap();
    assert_eq!(pool.len(), 1);

    let mut db = PlayerDatabase::new_in_memory().unwrap();
    db.import_pool(&pool, Season::new(2024), Week::new(2)).unwrap();

    let players = db.get_all_players().unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].team, TeamCode::new("BAL"));
    assert_eq!(players[0].position, Position::QB);
}
