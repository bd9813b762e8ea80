//! End-to-end tests: generate a seeded dataset, load it into a scratch
//! SQLite file and check the loaded tables against the generated CSVs.

use rusqlite::Connection;
use std::collections::HashSet;
use std::path::Path;
use tempfile::TempDir;

use nba_stats_pipeline::config::{DatabaseUrl, GeneratorConfig, LoadOptions};
use nba_stats_pipeline::generator::records::PerMode;
use nba_stats_pipeline::generator::{save, GeneratedData, NbaGenerator};
use nba_stats_pipeline::schema::tables::{FILE_MAPPINGS, PLAYER_SEASON_STATS};
use nba_stats_pipeline::ui::SilentUi;
use nba_stats_pipeline::writer::{load_directory, SqliteStore};
use nba_stats_pipeline::{run_pipeline, PipelineConfig, PipelineError};

// =============================================================================
// Test Configuration
// =============================================================================

/// Seed shared by every generated dataset
const RANDOM_SEED: u64 = 42;

fn generator_config(dir: &Path, start_year: i32, end_year: i32) -> GeneratorConfig {
    GeneratorConfig {
        start_year,
        end_year,
        seed: Some(RANDOM_SEED),
        output_dir: dir.join("data"),
        ready_dir: None,
    }
}

fn generate(start_year: i32, end_year: i32) -> GeneratedData {
    let dir = TempDir::new().unwrap();
    NbaGenerator::new(&generator_config(dir.path(), start_year, end_year))
        .unwrap()
        .generate()
}

fn database_url(dir: &Path) -> DatabaseUrl {
    DatabaseUrl::parse(&format!("sqlite://{}", dir.join("nba.db").display())).unwrap()
}

fn count(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}

/// Data rows in a CSV file, header excluded
fn csv_rows(path: &Path) -> u64 {
    csv::Reader::from_path(path)
        .unwrap()
        .records()
        .count() as u64
}

// =============================================================================
// Generator Properties
// =============================================================================

#[test]
fn test_single_modern_season() {
    let data = generate(2020, 2020);

    let seasons: HashSet<_> = data.teams.iter().map(|t| t.season.as_str()).collect();
    assert_eq!(seasons, HashSet::from(["2020-21"]));
    assert_eq!(data.teams.len(), 30);

    let lebron = data
        .players
        .iter()
        .find(|p| p.player_name == "LeBron James")
        .expect("LeBron James is a 2020s legend");
    assert_eq!(lebron.team_abbreviation, "LAL");
}

#[test]
fn test_team_abbreviation_unique_per_season() {
    let data = generate(1995, 2005);

    let mut seen = HashSet::new();
    for team in &data.teams {
        assert!(
            seen.insert((team.team_abbreviation.as_str(), team.season.as_str())),
            "duplicate {} in {}",
            team.team_abbreviation,
            team.season
        );
    }
}

#[test]
fn test_references_resolve_within_season() {
    let data = generate(1988, 1992);

    let teams: HashSet<_> = data
        .teams
        .iter()
        .map(|t| (t.team_id, t.team_abbreviation.as_str(), t.season.as_str()))
        .collect();

    for player in &data.players {
        assert!(
            teams.contains(&(
                player.team_id,
                player.team_abbreviation.as_str(),
                player.season.as_str()
            )),
            "{} points at a team outside {}",
            player.player_name,
            player.season
        );
    }

    let players: HashSet<_> = data.players.iter().map(|p| p.player_id).collect();
    assert!(data.stats.iter().all(|s| players.contains(&s.player_id)));
}

#[test]
fn test_attempts_follow_percentages() {
    let data = generate(2015, 2016);

    for stat in data.stats_for(PerMode::PerGame) {
        for (made, attempted, pct) in [
            (stat.field_goals_made, stat.field_goals_attempted, stat.field_goal_percentage),
            (stat.three_pointers_made, stat.three_pointers_attempted, stat.three_point_percentage),
            (stat.free_throws_made, stat.free_throws_attempted, stat.free_throw_percentage),
        ] {
            assert!(pct > 0.0, "{} has a zero percentage", stat.player_name);
            assert!(
                (attempted - made / pct).abs() <= 0.051,
                "{}: {} / {} vs {}",
                stat.player_name,
                made,
                pct,
                attempted
            );
        }
    }
}

#[test]
fn test_one_row_per_mode() {
    let data = generate(2001, 2001);

    let per_game = data.stats_for(PerMode::PerGame).count();
    assert_eq!(per_game, data.players.len());
    assert_eq!(data.stats_for(PerMode::Totals).count(), per_game);
    assert_eq!(data.stats_for(PerMode::Per36).count(), per_game);
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_counts_match_csv_rows() {
    let dir = TempDir::new().unwrap();
    let config = generator_config(dir.path(), 2010, 2012);
    let data = NbaGenerator::new(&config).unwrap().generate();
    save(&data, &config.output_dir, &config.ready_dir()).unwrap();

    let url = database_url(dir.path());
    let report = load_directory(
        &url,
        &config.ready_dir(),
        &LoadOptions::default(),
        &mut SilentUi::new(),
    )
    .unwrap();
    assert!(report.success());
    assert_eq!(report.files_loaded(), FILE_MAPPINGS.len());

    for (table, files) in [
        ("teams", vec!["teams_all_seasons.csv"]),
        ("players", vec!["players_all_seasons.csv"]),
        (
            "player_season_stats",
            vec![
                "player_stats_per_game.csv",
                "player_stats_totals.csv",
                "player_stats_per_36.csv",
            ],
        ),
    ] {
        let expected: u64 = files
            .iter()
            .map(|f| csv_rows(&config.ready_dir().join(f)))
            .sum();
        assert_eq!(report.count(table), Some(expected), "{}", table);
    }
}

#[test]
fn test_full_refresh_is_repeatable() {
    let dir = TempDir::new().unwrap();
    let config = generator_config(dir.path(), 2018, 2019);
    let data = NbaGenerator::new(&config).unwrap().generate();
    save(&data, &config.output_dir, &config.ready_dir()).unwrap();

    let url = database_url(dir.path());
    let mut ui = SilentUi::new();
    let first = load_directory(&url, &config.ready_dir(), &LoadOptions::default(), &mut ui).unwrap();
    let second = load_directory(&url, &config.ready_dir(), &LoadOptions::default(), &mut ui).unwrap();

    assert_eq!(first.counts, second.counts);
    assert_eq!(second.count("teams"), Some(60));
}

#[test]
fn test_stat_rows_unique_per_mode_on_append() {
    let dir = TempDir::new().unwrap();
    let config = generator_config(dir.path(), 2003, 2003);
    let data = NbaGenerator::new(&config).unwrap().generate();
    save(&data, &config.output_dir, &config.ready_dir()).unwrap();

    let url = database_url(dir.path());
    let mut ui = SilentUi::new();
    let first = load_directory(&url, &config.ready_dir(), &LoadOptions::default(), &mut ui).unwrap();
    assert!(first.success());
    let stats_before = first.count("player_season_stats");
    assert_eq!(stats_before, Some(data.stats.len() as u64));

    // Appending the same per-game file again violates (player_id, season, per_mode)
    let mut store = SqliteStore::connect(&url).unwrap();
    let per_game = config.ready_dir().join(PerMode::PerGame.file_name());
    let report = store.import_file(&per_game, &PLAYER_SEASON_STATS, &mut ui);
    assert!(!report.succeeded());
    assert_eq!(report.rows_committed, 0);
    assert!(report.error.as_deref().unwrap().contains("UNIQUE constraint failed"));

    let counts = store.table_counts().unwrap();
    let stats_after = counts
        .iter()
        .find(|c| c.table == "player_season_stats")
        .map(|c| c.rows);
    assert_eq!(stats_after, stats_before);

    // A whole-directory append fails every file and leaves the counts alone
    let append = LoadOptions {
        clear_existing: false,
    };
    let second = load_directory(&url, &config.ready_dir(), &append, &mut ui).unwrap();
    assert_eq!(second.files_loaded(), 0);
    assert_eq!(second.counts, first.counts);
}

#[test]
fn test_missing_file_fails_only_that_file() {
    let dir = TempDir::new().unwrap();
    let config = generator_config(dir.path(), 2000, 2000);
    let data = NbaGenerator::new(&config).unwrap().generate();
    save(&data, &config.output_dir, &config.ready_dir()).unwrap();
    std::fs::remove_file(config.ready_dir().join("player_stats_per_36.csv")).unwrap();

    let report = load_directory(
        &database_url(dir.path()),
        &config.ready_dir(),
        &LoadOptions::default(),
        &mut SilentUi::new(),
    )
    .unwrap();

    assert!(!report.success());
    assert_eq!(report.files_loaded(), FILE_MAPPINGS.len() - 1);
    assert_eq!(report.count("teams"), Some(data.teams.len() as u64));
    assert_eq!(
        report.count("player_season_stats"),
        Some(2 * data.players.len() as u64)
    );
}

#[test]
fn test_views_are_queryable() {
    let dir = TempDir::new().unwrap();
    let config = generator_config(dir.path(), 2005, 2008);
    let data = NbaGenerator::new(&config).unwrap().generate();
    save(&data, &config.output_dir, &config.ready_dir()).unwrap();
    load_directory(
        &database_url(dir.path()),
        &config.ready_dir(),
        &LoadOptions::default(),
        &mut SilentUi::new(),
    )
    .unwrap();

    let conn = Connection::open(dir.path().join("nba.db")).unwrap();

    // Player ids are per season, so each career row covers one PerGame row
    let careers = count(&conn, "SELECT COUNT(*) FROM player_career_stats");
    assert_eq!(careers, data.players.len() as i64);
    assert_eq!(
        count(&conn, "SELECT COUNT(*) FROM player_career_stats WHERE seasons_played > 1"),
        0
    );

    let leaders = count(&conn, "SELECT COUNT(*) FROM season_leaders");
    let eligible = count(
        &conn,
        "SELECT COUNT(*) FROM player_season_stats WHERE per_mode = 'PerGame' AND games_played >= 50",
    );
    assert_eq!(leaders, eligible);
    assert_eq!(
        count(&conn, "SELECT COUNT(*) FROM season_leaders WHERE games_played < 50"),
        0
    );
    assert_eq!(
        count(&conn, "SELECT MIN(points_rank) FROM season_leaders"),
        1
    );
}

// =============================================================================
// Orchestrator
// =============================================================================

#[test]
fn test_pipeline_end_to_end() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig {
        generator: generator_config(dir.path(), 2020, 2020),
        database_url: database_url(dir.path()),
        load: LoadOptions::default(),
    };

    let report = run_pipeline(&config, &mut SilentUi::new()).unwrap();
    let names: Vec<_> = report.steps.iter().map(|s| s.name).collect();
    assert_eq!(
        names,
        [
            "Database connection test",
            "NBA data generation",
            "Database loading",
            "Data verification"
        ]
    );
    assert!(report
        .counts
        .iter()
        .any(|c| c.table == "teams" && c.rows == 30));
}

#[test]
fn test_pipeline_rejects_inverted_range() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig {
        generator: generator_config(dir.path(), 2021, 2020),
        database_url: database_url(dir.path()),
        load: LoadOptions::default(),
    };

    match run_pipeline(&config, &mut SilentUi::new()) {
        Err(PipelineError::StepFailed { step, .. }) => assert_eq!(step, 2),
        other => panic!("expected generation failure, got {:?}", other.map(|r| r.steps.len())),
    }
}
