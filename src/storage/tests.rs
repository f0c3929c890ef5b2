//! Unit tests for storage functionality

use super::*;
use crate::{
    cli::types::{PlayerId, Position, Season, Site, TeamCode, Week},
    error::DfsError,
    pool::{PlayerPool, PlayerRecord},
};

fn create_test_db() -> PlayerDatabase {
    PlayerDatabase::new_in_memory().unwrap()
}

fn test_player(id: u64, name: &str) -> Player {
    Player {
        player_id: PlayerId::new(id),
        name: name.to_string(),
        team: TeamCode::new("KC"),
        position: Position::WR,
    }
}

fn test_projection(id: u64, site: Site, week: u16, points: f64) -> SiteProjection {
    SiteProjection {
        player_id: PlayerId::new(id),
        site,
        season: Season::new(2024),
        week: Week::new(week),
        salary: 5000,
        points,
        game_week: None,
        kickoff: None,
    }
}

#[test]
fn test_database_creation() {
    let _db = create_test_db();
}

#[test]
fn test_upsert_player_replaces() {
    let mut db = create_test_db();
    db.upsert_player(&test_player(1, "Test Player")).unwrap();
    db.upsert_player(&test_player(1, "Updated Player")).unwrap();

    let players = db.get_all_players().unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].name, "Updated Player");
    assert_eq!(players[0].position, Position::WR);
}

#[test]
fn test_projection_requires_player() {
    let mut db = create_test_db();
    let result = db.upsert_projection(&test_projection(99, Site::DraftKings, 1, 10.0));
    assert!(matches!(result, Err(DfsError::Database(_))));
}

#[test]
fn test_load_pool_filters_by_site_and_week() {
    let mut db = create_test_db();
    db.upsert_player(&test_player(1, "Alpha")).unwrap();
    db.upsert_player(&test_player(2, "Beta")).unwrap();
    db.upsert_projection(&test_projection(1, Site::DraftKings, 1, 12.5))
        .unwrap();
    db.upsert_projection(&test_projection(2, Site::DraftKings, 2, 9.0))
        .unwrap();
    db.upsert_projection(&test_projection(2, Site::FanDuel, 1, 8.0))
        .unwrap();

    let pool = db
        .load_pool(Site::DraftKings, Season::new(2024), Week::new(1))
        .unwrap();
    assert_eq!(pool.len(), 1);
    assert_eq!(pool.site(), Site::DraftKings);
    let alpha = pool.get(PlayerId::new(1)).unwrap();
    assert_eq!(alpha.projection, 12.5);
    assert_eq!(alpha.team.as_str(), "KC");
}

#[test]
fn test_load_missing_slate_is_empty_pool() {
    let db = create_test_db();
    let result = db.load_pool(Site::FanDuel, Season::new(2024), Week::new(3));
    assert!(matches!(result, Err(DfsError::EmptyPool { .. })));
    assert!(!db
        .has_data_for_week(Site::FanDuel, Season::new(2024), Week::new(3))
        .unwrap());
}

#[test]
fn test_import_pool_round_trip() {
    let mut db = create_test_db();
    let pool = PlayerPool::new(
        Site::YahooMulti,
        vec![
            PlayerRecord::new(10, "Josh Allen", "BUF", Position::QB, 40, 24.1),
            PlayerRecord::new(11, "Bills", "BUF", Position::DST, 12, 7.0),
        ],
    )
    .unwrap();

    let summary = db
        .import_pool(&pool, Season::new(2024), Week::new(5))
        .unwrap();
    assert_eq!(summary.players, 2);
    assert_eq!(summary.projections, 2);

    let loaded = db
        .load_pool(Site::YahooMulti, Season::new(2024), Week::new(5))
        .unwrap();
    assert_eq!(loaded.players(), pool.players());
}

#[test]
fn test_import_pool_keeps_game_schedule() {
    let mut db = create_test_db();
    let kickoff = chrono::NaiveDate::from_ymd_opt(2024, 9, 16)
        .and_then(|d| d.and_hms_opt(20, 15, 0))
        .unwrap();
    let pool = PlayerPool::new(
        Site::DraftKings,
        vec![
            PlayerRecord::new(20, "Kyler Murray", "ARI", Position::QB, 6800, 19.0)
                .with_game(Week::new(2), kickoff),
            PlayerRecord::new(21, "Jalen Hurts", "PHI", Position::QB, 7900, 22.0),
        ],
    )
    .unwrap();

    db.import_pool(&pool, Season::new(2024), Week::new(2))
        .unwrap();
    let loaded = db
        .load_pool(Site::DraftKings, Season::new(2024), Week::new(2))
        .unwrap();

    let murray = loaded.get(PlayerId::new(20)).unwrap();
    assert_eq!(murray.week, Some(Week::new(2)));
    assert_eq!(murray.kickoff, Some(kickoff));
    let hurts = loaded.get(PlayerId::new(21)).unwrap();
    assert!(hurts.kickoff.is_none());
    assert!(hurts.week.is_none());
}

#[test]
fn test_clear_all_data() {
    let mut db = create_test_db();
    db.upsert_player(&test_player(1, "Alpha")).unwrap();
    db.upsert_projection(&test_projection(1, Site::DraftKings, 1, 12.5))
        .unwrap();

    db.clear_all_data().unwrap();
    assert!(db.get_all_players().unwrap().is_empty());
    assert!(!db
        .has_data_for_week(Site::DraftKings, Season::new(2024), Week::new(1))
        .unwrap());
}
