//! Destination table and view definitions for the `nba` schema

use super::types::*;

// =============================================================================
// Tables
// =============================================================================

pub static TEAMS: TableSchema = TableSchema {
    name: "teams",
    columns: &[
        Column::required("team_id", ColumnType::Integer).primary(),
        Column::required("team_name", ColumnType::Text),
        Column::required("team_abbreviation", ColumnType::Text),
        Column::new("team_city", ColumnType::Text),
        Column::new("conference", ColumnType::Text),
        Column::new("division", ColumnType::Text),
        Column::new("season", ColumnType::Text),
        Column::new("created_at", ColumnType::Timestamp),
        Column::new("updated_at", ColumnType::Timestamp),
    ],
    indexes: &[
        Index::on("idx_teams_abbreviation", &["team_abbreviation"]),
        Index::on("idx_teams_season", &["season"]),
    ],
    unique: &[],
};

pub static PLAYERS: TableSchema = TableSchema {
    name: "players",
    columns: &[
        Column::required("player_id", ColumnType::Integer).primary(),
        Column::required("player_name", ColumnType::Text),
        Column::new("team_id", ColumnType::Integer),
        Column::new("team_abbreviation", ColumnType::Text),
        Column::new("jersey_number", ColumnType::Text),
        Column::new("position", ColumnType::Text),
        Column::new("height", ColumnType::Text),
        Column::new("weight", ColumnType::Text),
        Column::new("age", ColumnType::Integer),
        Column::new("college", ColumnType::Text),
        Column::new("country", ColumnType::Text),
        Column::new("draft_year", ColumnType::Integer),
        Column::new("draft_round", ColumnType::Integer),
        Column::new("draft_number", ColumnType::Integer),
        Column::new("season", ColumnType::Text),
        Column::new("created_at", ColumnType::Timestamp),
        Column::new("updated_at", ColumnType::Timestamp),
    ],
    indexes: &[
        Index::on("idx_players_name", &["player_name"]),
        Index::on("idx_players_season", &["season"]),
    ],
    unique: &[],
};

pub static PLAYER_SEASON_STATS: TableSchema = TableSchema {
    name: "player_season_stats",
    columns: &[
        Column::required("id", ColumnType::Serial).primary(),
        Column::required("player_id", ColumnType::Integer),
        Column::required("player_name", ColumnType::Text),
        Column::required("season", ColumnType::Text),
        Column::new("team_id", ColumnType::Integer),
        Column::new("team_abbreviation", ColumnType::Text),
        Column::new("per_mode", ColumnType::Text),
        Column::new("games_played", ColumnType::Integer),
        Column::new("games_started", ColumnType::Integer),
        Column::new("minutes_per_game", ColumnType::Decimal),
        Column::new("field_goals_made", ColumnType::Decimal),
        Column::new("field_goals_attempted", ColumnType::Decimal),
        Column::new("field_goal_percentage", ColumnType::Decimal),
        Column::new("three_pointers_made", ColumnType::Decimal),
        Column::new("three_pointers_attempted", ColumnType::Decimal),
        Column::new("three_point_percentage", ColumnType::Decimal),
        Column::new("free_throws_made", ColumnType::Decimal),
        Column::new("free_throws_attempted", ColumnType::Decimal),
        Column::new("free_throw_percentage", ColumnType::Decimal),
        Column::new("offensive_rebounds", ColumnType::Decimal),
        Column::new("defensive_rebounds", ColumnType::Decimal),
        Column::new("total_rebounds", ColumnType::Decimal),
        Column::new("assists", ColumnType::Decimal),
        Column::new("steals", ColumnType::Decimal),
        Column::new("blocks", ColumnType::Decimal),
        Column::new("turnovers", ColumnType::Decimal),
        Column::new("personal_fouls", ColumnType::Decimal),
        Column::new("points", ColumnType::Decimal),
        Column::new("plus_minus", ColumnType::Decimal),
        Column::new("created_at", ColumnType::Timestamp),
        Column::new("updated_at", ColumnType::Timestamp),
    ],
    indexes: &[
        Index::on(
            "idx_player_stats_player_season",
            &["player_id", "season"],
        ),
        Index::on("idx_player_stats_name", &["player_name"]),
        Index::on("idx_player_stats_season", &["season"]),
    ],
    // Aggregates over this table would double count if a mode were loaded twice
    unique: &[&["player_id", "season", "per_mode"]],
};

// =============================================================================
// Views
// =============================================================================

pub static PLAYER_CAREER_STATS: ViewSchema = ViewSchema {
    name: "player_career_stats",
    query: "SELECT
        player_id,
        player_name,
        COUNT(DISTINCT season) AS seasons_played,
        MIN(season) AS first_season,
        MAX(season) AS last_season,
        AVG(points) AS avg_points,
        AVG(total_rebounds) AS avg_rebounds,
        AVG(assists) AS avg_assists,
        AVG(field_goal_percentage) AS avg_fg_pct,
        AVG(three_point_percentage) AS avg_3pt_pct,
        SUM(points) AS total_points,
        SUM(total_rebounds) AS total_rebounds,
        SUM(assists) AS total_assists
    FROM player_season_stats
    WHERE per_mode = 'PerGame'
    GROUP BY player_id, player_name
    ORDER BY total_points DESC",
};

pub static SEASON_LEADERS: ViewSchema = ViewSchema {
    name: "season_leaders",
    query: "SELECT
        season,
        player_name,
        team_abbreviation,
        games_played,
        points,
        total_rebounds,
        assists,
        field_goal_percentage,
        ROW_NUMBER() OVER (PARTITION BY season ORDER BY points DESC) AS points_rank,
        ROW_NUMBER() OVER (PARTITION BY season ORDER BY total_rebounds DESC) AS rebounds_rank,
        ROW_NUMBER() OVER (PARTITION BY season ORDER BY assists DESC) AS assists_rank
    FROM player_season_stats
    WHERE per_mode = 'PerGame' AND games_played >= 50
    ORDER BY season, points DESC",
};

// =============================================================================
// Registry
// =============================================================================

/// All destination tables
pub static ALL_TABLES: &[&TableSchema] = &[&PLAYERS, &PLAYER_SEASON_STATS, &TEAMS];

/// All reporting views
pub static ALL_VIEWS: &[&ViewSchema] = &[&PLAYER_CAREER_STATS, &SEASON_LEADERS];

/// Source CSV file name → destination table. Three per-mode files share one table.
pub static FILE_MAPPINGS: &[(&str, &TableSchema)] = &[
    ("players_all_seasons.csv", &PLAYERS),
    ("player_stats_per_game.csv", &PLAYER_SEASON_STATS),
    ("player_stats_totals.csv", &PLAYER_SEASON_STATS),
    ("player_stats_per_36.csv", &PLAYER_SEASON_STATS),
    ("teams_all_seasons.csv", &TEAMS),
];
