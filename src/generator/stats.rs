//! Statistic synthesis: position templates scaled by era and star power

use rand::Rng;

use super::records::{PerMode, StatLine};

/// Percentages never drop below this, keeping attempted = made / pct finite
pub const MIN_PERCENTAGE: f64 = 0.01;

/// Share of points coming from each kind of made shot
const FG_SHARE: f64 = 0.38;
const THREE_SHARE: f64 = 0.15;
const FT_SHARE: f64 = 0.22;

/// Scale applied to seasons starting in or after this year
const HIGH_SCORING_START: i32 = 2020;

// =============================================================================
// Lookup tables
// =============================================================================

/// Per-game baseline for a position
#[derive(Debug, Clone, Copy)]
pub struct PositionBase {
    pub points: f64,
    pub assists: f64,
    pub rebounds: f64,
    pub steals: Option<f64>,
    pub blocks: Option<f64>,
}

pub static POSITION_BASES: &[(&str, PositionBase)] = &[
    (
        "PG",
        PositionBase { points: 12.0, assists: 6.0, rebounds: 3.0, steals: Some(1.2), blocks: None },
    ),
    (
        "SG",
        PositionBase { points: 14.0, assists: 3.0, rebounds: 4.0, steals: Some(1.0), blocks: None },
    ),
    (
        "SF",
        PositionBase { points: 13.0, assists: 3.0, rebounds: 5.0, steals: Some(1.1), blocks: None },
    ),
    (
        "PF",
        PositionBase { points: 12.0, assists: 2.0, rebounds: 7.0, steals: None, blocks: Some(0.8) },
    ),
    (
        "C",
        PositionBase { points: 11.0, assists: 1.0, rebounds: 8.0, steals: None, blocks: Some(1.2) },
    ),
];

#[derive(Debug, Clone, Copy)]
pub struct EraMultiplier {
    pub points: f64,
    pub assists: f64,
    pub rebounds: f64,
    pub three_pct: f64,
}

/// Label used for filler players and unknown eras
pub const REGULAR_ERA: &str = "regular";

pub static ERA_MULTIPLIERS: &[(&str, EraMultiplier)] = &[
    ("1980s", EraMultiplier { points: 0.9, assists: 1.1, rebounds: 1.0, three_pct: 0.3 }),
    ("1990s", EraMultiplier { points: 1.0, assists: 1.0, rebounds: 1.0, three_pct: 0.4 }),
    ("2000s", EraMultiplier { points: 1.0, assists: 1.0, rebounds: 1.0, three_pct: 0.5 }),
    ("2010s", EraMultiplier { points: 1.1, assists: 1.0, rebounds: 0.95, three_pct: 0.7 }),
    ("2020s", EraMultiplier { points: 1.2, assists: 1.1, rebounds: 0.9, three_pct: 0.8 }),
    (REGULAR_ERA, EraMultiplier { points: 1.0, assists: 1.0, rebounds: 1.0, three_pct: 0.5 }),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuperstarClass {
    HighScorer,
    Playmaker,
    RimProtector,
    Rebounder,
}

/// Evaluated in order; a name only ever gets the first class it matches
pub static SUPERSTARS: &[(SuperstarClass, &[&str])] = &[
    (
        SuperstarClass::HighScorer,
        &[
            "Michael Jordan",
            "LeBron James",
            "Kobe Bryant",
            "Kevin Durant",
            "Giannis Antetokounmpo",
            "Luka Doncic",
        ],
    ),
    (
        SuperstarClass::Playmaker,
        &["Magic Johnson", "Stephen Curry", "Damian Lillard", "Trae Young"],
    ),
    (
        SuperstarClass::RimProtector,
        &[
            "Shaquille O'Neal",
            "Hakeem Olajuwon",
            "David Robinson",
            "Nikola Jokic",
            "Joel Embiid",
        ],
    ),
    (SuperstarClass::Rebounder, &["Dennis Rodman", "Ben Wallace"]),
];

pub fn position_base(position: &str) -> PositionBase {
    let lookup = |pos: &str| POSITION_BASES.iter().find(|(p, _)| *p == pos).map(|(_, b)| *b);
    lookup(position)
        .or_else(|| lookup("SF"))
        .unwrap_or(PositionBase { points: 13.0, assists: 3.0, rebounds: 5.0, steals: Some(1.1), blocks: None })
}

/// Era multiplier for the label, with the modern scoring boost applied
pub fn era_multiplier(era: &str, year: i32) -> EraMultiplier {
    let find = |label: &str| ERA_MULTIPLIERS.iter().find(|(l, _)| *l == label).map(|(_, m)| *m);
    let mut mult = find(era)
        .or_else(|| find(REGULAR_ERA))
        .unwrap_or(EraMultiplier { points: 1.0, assists: 1.0, rebounds: 1.0, three_pct: 0.5 });

    if year >= HIGH_SCORING_START {
        mult.points *= 1.2;
        mult.three_pct = 0.8;
    }

    mult
}

pub fn superstar_class(player_name: &str) -> Option<SuperstarClass> {
    SUPERSTARS
        .iter()
        .find(|(_, names)| names.contains(&player_name))
        .map(|(class, _)| *class)
}

impl SuperstarClass {
    fn apply(&self, base: &mut PositionBase) {
        match self {
            SuperstarClass::HighScorer => {
                base.points *= 2.0;
                base.assists *= 1.5;
                base.rebounds *= 1.3;
            }
            SuperstarClass::Playmaker => {
                base.assists *= 2.0;
                base.points *= 1.7;
            }
            SuperstarClass::RimProtector => {
                base.rebounds *= 1.6;
                base.blocks = Some(base.blocks.unwrap_or(0.0) * 2.5);
                base.points *= 1.5;
            }
            SuperstarClass::Rebounder => {
                base.rebounds *= 2.5;
                base.points *= 0.7;
            }
        }
    }
}

// =============================================================================
// Synthesis
// =============================================================================

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

fn round_pct(pct: f64) -> f64 {
    round_to(pct.max(MIN_PERCENTAGE), 3)
}

/// Shot volume implied by a rounded made/percentage pair
fn attempted(made: f64, pct: f64) -> f64 {
    round1(made / pct.max(MIN_PERCENTAGE))
}

/// Per-game stat line for one player season
pub fn synthesize_stats<R: Rng + ?Sized>(
    rng: &mut R,
    player_name: &str,
    position: &str,
    year: i32,
    era: &str,
) -> StatLine {
    let mut base = position_base(position);
    let mult = era_multiplier(era, year);

    if let Some(class) = superstar_class(player_name) {
        class.apply(&mut base);
    }

    let games_played: u32 = rng.gen_range(65..=82);

    let points = (base.points * mult.points * rng.gen_range(0.8..=1.4)).max(0.1);
    let assists = (base.assists * mult.assists * rng.gen_range(0.7..=1.4)).max(0.1);
    let rebounds = (base.rebounds * mult.rebounds * rng.gen_range(0.8..=1.3)).max(0.1);

    let fg_pct = round_pct(rng.gen_range(0.40..=0.55));
    let three_pct = round_pct(rng.gen_range(0.25..=0.45) * mult.three_pct);
    let ft_pct = round_pct(rng.gen_range(0.70..=0.90));

    let field_goals_made = round1(points * FG_SHARE);
    let three_pointers_made = round1(points * THREE_SHARE);
    let free_throws_made = round1(points * FT_SHARE);

    StatLine {
        games_played,
        games_started: rng.gen_range(games_played / 2..=games_played),
        minutes_per_game: round1(rng.gen_range(25.0..=40.0)),
        field_goals_made,
        field_goals_attempted: attempted(field_goals_made, fg_pct),
        field_goal_percentage: fg_pct,
        three_pointers_made,
        three_pointers_attempted: attempted(three_pointers_made, three_pct),
        three_point_percentage: three_pct,
        free_throws_made,
        free_throws_attempted: attempted(free_throws_made, ft_pct),
        free_throw_percentage: ft_pct,
        offensive_rebounds: round1(rebounds * 0.25),
        defensive_rebounds: round1(rebounds * 0.75),
        total_rebounds: round1(rebounds),
        assists: round1(assists),
        steals: round1(base.steals.unwrap_or(1.0) * rng.gen_range(0.6..=1.4)),
        blocks: round1(base.blocks.unwrap_or(0.5) * rng.gen_range(0.4..=2.2)),
        turnovers: round1(rng.gen_range(1.8..=4.2)),
        personal_fouls: round1(rng.gen_range(1.8..=3.8)),
        points: round1(points),
    }
}

impl StatLine {
    /// Re-express a per-game line in `mode`.
    ///
    /// Counting stats scale; percentages, games and minutes stay as they are.
    pub fn rescaled(&self, mode: PerMode) -> StatLine {
        let factor = match mode {
            PerMode::PerGame => return self.clone(),
            PerMode::Totals => self.games_played as f64,
            PerMode::Per36 if self.minutes_per_game > 0.0 => 36.0 / self.minutes_per_game,
            PerMode::Per36 => 0.0,
        };
        let scale = |v: f64| round1(v * factor);

        let field_goals_made = scale(self.field_goals_made);
        let three_pointers_made = scale(self.three_pointers_made);
        let free_throws_made = scale(self.free_throws_made);

        StatLine {
            field_goals_made,
            field_goals_attempted: attempted(field_goals_made, self.field_goal_percentage),
            three_pointers_made,
            three_pointers_attempted: attempted(three_pointers_made, self.three_point_percentage),
            free_throws_made,
            free_throws_attempted: attempted(free_throws_made, self.free_throw_percentage),
            offensive_rebounds: scale(self.offensive_rebounds),
            defensive_rebounds: scale(self.defensive_rebounds),
            total_rebounds: scale(self.total_rebounds),
            assists: scale(self.assists),
            steals: scale(self.steals),
            blocks: scale(self.blocks),
            turnovers: scale(self.turnovers),
            personal_fouls: scale(self.personal_fouls),
            points: scale(self.points),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn consistent(made: f64, attempted: f64, pct: f64) -> bool {
        (attempted - made / pct).abs() <= 0.05 + 1e-9
    }

    #[test]
    fn test_era_multiplier_modern_boost() {
        let m = era_multiplier("2020s", 2021);
        assert!((m.points - 1.44).abs() < 1e-9);
        assert_eq!(m.three_pct, 0.8);

        // Fillers in the modern era get the boost too
        let m = era_multiplier(REGULAR_ERA, 2022);
        assert!((m.points - 1.2).abs() < 1e-9);
        assert_eq!(m.three_pct, 0.8);

        let m = era_multiplier("1950s", 1995);
        assert_eq!(m.points, 1.0);
        assert_eq!(m.three_pct, 0.5);
    }

    #[test]
    fn test_superstar_classes() {
        assert_eq!(superstar_class("LeBron James"), Some(SuperstarClass::HighScorer));
        assert_eq!(superstar_class("Stephen Curry"), Some(SuperstarClass::Playmaker));
        assert_eq!(superstar_class("Nikola Jokic"), Some(SuperstarClass::RimProtector));
        assert_eq!(superstar_class("Dennis Rodman"), Some(SuperstarClass::Rebounder));
        assert_eq!(superstar_class("Alex Smith"), None);
    }

    #[test]
    fn test_rim_protector_guard_blocks() {
        let mut base = position_base("PG");
        SuperstarClass::RimProtector.apply(&mut base);
        assert_eq!(base.blocks, Some(0.0));
    }

    #[test]
    fn test_unknown_position_uses_small_forward() {
        let base = position_base("G-F");
        assert_eq!(base.points, 13.0);
        assert_eq!(base.rebounds, 5.0);
    }

    #[test]
    fn test_synthesized_shooting_is_consistent() {
        let mut rng = StdRng::seed_from_u64(7);
        for year in [1980, 1995, 2010, 2024] {
            for pos in ["PG", "SG", "SF", "PF", "C"] {
                let line = synthesize_stats(&mut rng, "Alex Smith", pos, year, REGULAR_ERA);
                assert!(line.field_goal_percentage >= MIN_PERCENTAGE);
                assert!(line.three_point_percentage >= MIN_PERCENTAGE);
                assert!(consistent(line.field_goals_made, line.field_goals_attempted, line.field_goal_percentage));
                assert!(consistent(line.three_pointers_made, line.three_pointers_attempted, line.three_point_percentage));
                assert!(consistent(line.free_throws_made, line.free_throws_attempted, line.free_throw_percentage));
                assert!((65..=82).contains(&line.games_played));
                assert!(line.games_started <= line.games_played);
            }
        }
    }

    #[test]
    fn test_attempted_with_tiny_percentage() {
        assert_eq!(attempted(1.0, 0.0), 100.0);
        assert_eq!(round_pct(0.0001), MIN_PERCENTAGE);
    }

    #[test]
    fn test_rescaled_totals() {
        let mut rng = StdRng::seed_from_u64(11);
        let line = synthesize_stats(&mut rng, "Larry Bird", "SF", 1985, "1980s");
        let totals = line.rescaled(PerMode::Totals);

        let games = line.games_played as f64;
        assert!((totals.points - line.points * games).abs() < 0.051);
        assert_eq!(totals.field_goal_percentage, line.field_goal_percentage);
        assert_eq!(totals.games_played, line.games_played);
        assert!(consistent(totals.field_goals_made, totals.field_goals_attempted, totals.field_goal_percentage));
    }

    #[test]
    fn test_rescaled_per_36() {
        let mut rng = StdRng::seed_from_u64(3);
        let line = synthesize_stats(&mut rng, "Alex Smith", "C", 2001, REGULAR_ERA);
        let per36 = line.rescaled(PerMode::Per36);
        let expected = round_to(line.assists * 36.0 / line.minutes_per_game, 1);
        assert_eq!(per36.assists, expected);
        assert_eq!(line.rescaled(PerMode::PerGame), line);
    }
}
