use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub team_id: u32,
    pub team_name: String,
    pub team_abbreviation: String,
    pub team_city: String,
    pub conference: String,
    pub division: String,
    pub season: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub player_id: u32,
    pub player_name: String,
    pub team_id: u32,
    pub team_abbreviation: String,
    pub jersey_number: String,
    pub position: String,
    pub height: String,
    pub weight: String,
    pub age: u32,
    pub college: String,
    pub country: String,
    pub draft_year: i32,
    pub draft_round: u32,
    pub draft_number: u32,
    pub season: String,
}

/// How a stat row aggregates a season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PerMode {
    PerGame,
    Totals,
    Per36,
}

impl PerMode {
    pub const ALL: [PerMode; 3] = [PerMode::PerGame, PerMode::Totals, PerMode::Per36];

    /// CSV file the mode is written to
    pub fn file_name(&self) -> &'static str {
        match self {
            PerMode::PerGame => "player_stats_per_game.csv",
            PerMode::Totals => "player_stats_totals.csv",
            PerMode::Per36 => "player_stats_per_36.csv",
        }
    }
}

impl fmt::Display for PerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerMode::PerGame => write!(f, "PerGame"),
            PerMode::Totals => write!(f, "Totals"),
            PerMode::Per36 => write!(f, "Per36"),
        }
    }
}

/// Numeric part of a stat row
#[derive(Debug, Clone, PartialEq)]
pub struct StatLine {
    pub games_played: u32,
    pub games_started: u32,
    pub minutes_per_game: f64,
    pub field_goals_made: f64,
    pub field_goals_attempted: f64,
    pub field_goal_percentage: f64,
    pub three_pointers_made: f64,
    pub three_pointers_attempted: f64,
    pub three_point_percentage: f64,
    pub free_throws_made: f64,
    pub free_throws_attempted: f64,
    pub free_throw_percentage: f64,
    pub offensive_rebounds: f64,
    pub defensive_rebounds: f64,
    pub total_rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub turnovers: f64,
    pub personal_fouls: f64,
    pub points: f64,
}

// Kept flat: the csv serializer does not support `#[serde(flatten)]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonStat {
    pub player_id: u32,
    pub player_name: String,
    pub season: String,
    pub team_id: u32,
    pub team_abbreviation: String,
    pub per_mode: PerMode,
    pub games_played: u32,
    pub games_started: u32,
    pub minutes_per_game: f64,
    pub field_goals_made: f64,
    pub field_goals_attempted: f64,
    pub field_goal_percentage: f64,
    pub three_pointers_made: f64,
    pub three_pointers_attempted: f64,
    pub three_point_percentage: f64,
    pub free_throws_made: f64,
    pub free_throws_attempted: f64,
    pub free_throw_percentage: f64,
    pub offensive_rebounds: f64,
    pub defensive_rebounds: f64,
    pub total_rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub turnovers: f64,
    pub personal_fouls: f64,
    pub points: f64,
}

impl SeasonStat {
    pub fn new(player: &Player, per_mode: PerMode, line: StatLine) -> Self {
        Self {
            player_id: player.player_id,
            player_name: player.player_name.clone(),
            season: player.season.clone(),
            team_id: player.team_id,
            team_abbreviation: player.team_abbreviation.clone(),
            per_mode,
            games_played: line.games_played,
            games_started: line.games_started,
            minutes_per_game: line.minutes_per_game,
            field_goals_made: line.field_goals_made,
            field_goals_attempted: line.field_goals_attempted,
            field_goal_percentage: line.field_goal_percentage,
            three_pointers_made: line.three_pointers_made,
            three_pointers_attempted: line.three_pointers_attempted,
            three_point_percentage: line.three_point_percentage,
            free_throws_made: line.free_throws_made,
            free_throws_attempted: line.free_throws_attempted,
            free_throw_percentage: line.free_throw_percentage,
            offensive_rebounds: line.offensive_rebounds,
            defensive_rebounds: line.defensive_rebounds,
            total_rebounds: line.total_rebounds,
            assists: line.assists,
            steals: line.steals,
            blocks: line.blocks,
            turnovers: line.turnovers,
            personal_fouls: line.personal_fouls,
            points: line.points,
        }
    }

    pub fn line(&self) -> StatLine {
        StatLine {
            games_played: self.games_played,
            games_started: self.games_started,
            minutes_per_game: self.minutes_per_game,
            field_goals_made: self.field_goals_made,
            field_goals_attempted: self.field_goals_attempted,
            field_goal_percentage: self.field_goal_percentage,
            three_pointers_made: self.three_pointers_made,
            three_pointers_attempted: self.three_pointers_attempted,
            three_point_percentage: self.three_point_percentage,
            free_throws_made: self.free_throws_made,
            free_throws_attempted: self.free_throws_attempted,
            free_throw_percentage: self.free_throw_percentage,
            offensive_rebounds: self.offensive_rebounds,
            defensive_rebounds: self.defensive_rebounds,
            total_rebounds: self.total_rebounds,
            assists: self.assists,
            steals: self.steals,
            blocks: self.blocks,
            turnovers: self.turnovers,
            personal_fouls: self.personal_fouls,
            points: self.points,
        }
    }

    /// Same player and season expressed in another aggregation mode
    pub fn with_mode(&self, per_mode: PerMode) -> Self {
        let mut row = self.clone();
        row.per_mode = per_mode;
        row.set_line(self.line().rescaled(per_mode));
        row
    }

    fn set_line(&mut self, line: StatLine) {
        self.games_played = line.games_played;
        self.games_started = line.games_started;
        self.minutes_per_game = line.minutes_per_game;
        self.field_goals_made = line.field_goals_made;
        self.field_goals_attempted = line.field_goals_attempted;
        self.field_goal_percentage = line.field_goal_percentage;
        self.three_pointers_made = line.three_pointers_made;
        self.three_pointers_attempted = line.three_pointers_attempted;
        self.three_point_percentage = line.three_point_percentage;
        self.free_throws_made = line.free_throws_made;
        self.free_throws_attempted = line.free_throws_attempted;
        self.free_throw_percentage = line.free_throw_percentage;
        self.offensive_rebounds = line.offensive_rebounds;
        self.defensive_rebounds = line.defensive_rebounds;
        self.total_rebounds = line.total_rebounds;
        self.assists = line.assists;
        self.steals = line.steals;
        self.blocks = line.blocks;
        self.turnovers = line.turnovers;
        self.personal_fouls = line.personal_fouls;
        self.points = line.points;
    }
}
