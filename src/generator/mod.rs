//! Synthetic NBA data generation
//!
//! Produces teams, players and season stats for every season in a year range:
//! - team metadata from the historical (pre-2000) or modern table
//! - legendary players by era bucket, placed on teams via career timelines
//! - 40-80 procedurally named filler players per season
//! - per-game stat lines plus derived totals and per-36 rows

pub mod output;
pub mod records;
pub mod rosters;
pub mod stats;
pub mod timeline;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::error::PipelineError;
use records::{PerMode, Player, SeasonStat, Team};
use rosters::{LegendaryPlayer, COLLEGES, COUNTRIES, FIRST_NAMES, LAST_NAMES, POSITIONS};
use stats::{synthesize_stats, REGULAR_ERA};

pub use output::save;

/// Earliest draft year handed out to any player
const MIN_DRAFT_YEAR: i32 = 1975;

/// Season start years the generator accepts
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1946..=2999;

/// Season label for the season starting in `year`, e.g. 1999 -> "1999-00"
pub fn season_label(year: i32) -> String {
    format!("{}-{:02}", year, (year + 1).rem_euclid(100))
}

/// Output of one generation run
#[derive(Debug, Default)]
pub struct GeneratedData {
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    /// Rows for every per-mode, per-game rows first
    pub stats: Vec<SeasonStat>,
}

impl GeneratedData {
    pub fn stats_for(&self, mode: PerMode) -> impl Iterator<Item = &SeasonStat> {
        self.stats.iter().filter(move |s| s.per_mode == mode)
    }

    pub fn total_records(&self) -> usize {
        self.teams.len() + self.players.len() + self.stats.len()
    }

    /// Drop repeated (team_id, season), (player_id, season) and
    /// (player_id, season, per_mode) keys, keeping the first occurrence
    fn dedup(&mut self) {
        let mut seen = HashSet::new();
        self.teams.retain(|t| seen.insert((t.team_id, t.season.clone())));

        let mut seen = HashSet::new();
        self.players
            .retain(|p| seen.insert((p.player_id, p.season.clone())));

        let mut seen = HashSet::new();
        self.stats
            .retain(|s| seen.insert((s.player_id, s.season.clone(), s.per_mode)));
    }
}

/// Which roster a generated player came from
enum Origin<'a> {
    Legend {
        era: &'static str,
        info: &'a LegendaryPlayer,
    },
    Filler,
}

pub struct NbaGenerator {
    start_year: i32,
    end_year: i32,
    rng: StdRng,
    next_team_id: u32,
    next_player_id: u32,
}

impl NbaGenerator {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        if config.start_year > config.end_year {
            return Err(PipelineError::InvalidYearRange {
                start: config.start_year,
                end: config.end_year,
            }
            .into());
        }
        for year in [config.start_year, config.end_year] {
            if !SUPPORTED_YEARS.contains(&year) {
                return Err(PipelineError::YearOutOfRange {
                    year,
                    min: *SUPPORTED_YEARS.start(),
                    max: *SUPPORTED_YEARS.end(),
                }
                .into());
            }
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            start_year: config.start_year,
            end_year: config.end_year,
            rng,
            next_team_id: 1,
            next_player_id: 1,
        })
    }

    /// Generate every season in the configured range
    pub fn generate(&mut self) -> GeneratedData {
        info!(
            start = self.start_year,
            end = self.end_year,
            "Generating NBA data"
        );

        let mut data = GeneratedData::default();

        for year in self.start_year..=self.end_year {
            self.generate_season(year, &mut data);
        }

        let per_game: Vec<SeasonStat> = data.stats.clone();
        for mode in [PerMode::Totals, PerMode::Per36] {
            data.stats.extend(per_game.iter().map(|s| s.with_mode(mode)));
        }

        data.dedup();

        info!("Generated {} team records", data.teams.len());
        info!("Generated {} player records", data.players.len());
        info!("Generated {} stat records", data.stats.len());

        data
    }

    fn generate_season(&mut self, year: i32, data: &mut GeneratedData) {
        let season = season_label(year);
        debug!("Processing season {}", season);

        let team_table = rosters::teams_for_year(year);
        let mut team_ids: HashMap<&'static str, u32> = HashMap::new();

        for info in team_table {
            let team_id = self.next_team_id;
            self.next_team_id += 1;
            team_ids.insert(info.abbreviation, team_id);

            data.teams.push(Team {
                team_id,
                team_name: info.name.to_string(),
                team_abbreviation: info.abbreviation.to_string(),
                team_city: info.city.to_string(),
                conference: info.conference.to_string(),
                division: info.division.to_string(),
                season: season.clone(),
            });
        }

        for (era, info) in rosters::legends_for_year(year) {
            let Some(abbrev) = timeline::team_for_player(info.name, info.teams, year) else {
                continue;
            };
            // Timelines can point at a franchise missing from this era's table
            let Some(&team_id) = team_ids.get(abbrev) else {
                debug!("Skipping {} in {}: {} not in season", info.name, season, abbrev);
                continue;
            };

            self.push_player(
                data,
                year,
                &season,
                Origin::Legend { era, info },
                (team_id, abbrev),
            );
        }

        let filler_count: usize = self.rng.gen_range(40..=80);
        for _ in 0..filler_count {
            let Some(info) = team_table.choose(&mut self.rng) else {
                break;
            };
            let team_id = team_ids[info.abbreviation];
            self.push_player(
                data,
                year,
                &season,
                Origin::Filler,
                (team_id, info.abbreviation),
            );
        }
    }

    fn push_player(
        &mut self,
        data: &mut GeneratedData,
        year: i32,
        season: &str,
        origin: Origin<'_>,
        (team_id, abbrev): (u32, &str),
    ) {
        let rng = &mut self.rng;

        let (name, position, era, age) = match origin {
            Origin::Legend { era, info } => (
                info.name.to_string(),
                info.position,
                era,
                rng.gen_range(22..=38),
            ),
            Origin::Filler => (
                format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES)),
                pick(rng, POSITIONS),
                REGULAR_ERA,
                rng.gen_range(20..=35),
            ),
        };

        let player = Player {
            player_id: self.next_player_id,
            player_name: name,
            team_id,
            team_abbreviation: abbrev.to_string(),
            jersey_number: rng.gen_range(0..=99u32).to_string(),
            position: position.to_string(),
            height: format!("{}-{}", rng.gen_range(6..=7u32), rng.gen_range(0..=11u32)),
            weight: rng.gen_range(180..=280u32).to_string(),
            age,
            college: pick(rng, COLLEGES).to_string(),
            country: pick(rng, COUNTRIES).to_string(),
            draft_year: rng.gen_range(MIN_DRAFT_YEAR.max(year - 20)..=year.max(MIN_DRAFT_YEAR)),
            draft_round: rng.gen_range(1..=2),
            draft_number: rng.gen_range(1..=60),
            season: season.to_string(),
        };
        self.next_player_id += 1;

        let line = synthesize_stats(rng, &player.player_name, position, year, era);
        data.stats.push(SeasonStat::new(&player, PerMode::PerGame, line));
        data.players.push(player);
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[&'static str]) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(start: i32, end: i32, seed: u64) -> GeneratedData {
        let config = GeneratorConfig {
            start_year: start,
            end_year: end,
            seed: Some(seed),
            ..GeneratorConfig::default()
        };
        NbaGenerator::new(&config).unwrap().generate()
    }

    #[test]
    fn test_season_label() {
        assert_eq!(season_label(1999), "1999-00");
        assert_eq!(season_label(2020), "2020-21");
        assert_eq!(season_label(1980), "1980-81");
        assert_eq!(season_label(2009), "2009-10");
    }

    #[test]
    fn test_rejects_inverted_range() {
        let config = GeneratorConfig {
            start_year: 2001,
            end_year: 2000,
            ..GeneratorConfig::default()
        };
        assert!(NbaGenerator::new(&config).is_err());
    }

    #[test]
    fn test_rejects_years_outside_supported_range() {
        for (start, end) in [(i32::MIN, 2000), (2000, i32::MAX), (1900, 1950)] {
            let config = GeneratorConfig {
                start_year: start,
                end_year: end,
                ..GeneratorConfig::default()
            };
            let err = NbaGenerator::new(&config).err().unwrap();
            assert!(matches!(
                err.downcast_ref::<PipelineError>(),
                Some(PipelineError::YearOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_same_seed_same_data() {
        let a = generate(1998, 2001, 99);
        let b = generate(1998, 2001, 99);
        assert_eq!(a.players, b.players);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn test_filler_count_in_range() {
        let data = generate(1990, 1990, 5);
        // 10 legends in the 1990s bucket, 40-80 fillers
        let per_game = data.stats_for(PerMode::PerGame).count();
        assert!((50..=90).contains(&per_game), "{}", per_game);
        assert_eq!(data.players.len(), per_game);
        assert_eq!(data.stats.len(), per_game * 3);
    }

    #[test]
    fn test_legends_follow_timelines() {
        let data = generate(2002, 2006, 1);
        let team_of = |name: &str, season: &str| {
            data.players
                .iter()
                .find(|p| p.player_name == name && p.season == season)
                .map(|p| p.team_abbreviation.clone())
        };
        assert_eq!(team_of("Shaquille O'Neal", "2002-03").as_deref(), Some("LAL"));
        assert_eq!(team_of("Shaquille O'Neal", "2006-07").as_deref(), Some("MIA"));
        assert_eq!(team_of("Kevin Garnett", "2004-05").as_deref(), Some("MIN"));
    }

    #[test]
    fn test_ids_are_sequential() {
        let data = generate(2000, 2001, 8);
        for (i, team) in data.teams.iter().enumerate() {
            assert_eq!(team.team_id as usize, i + 1);
        }
        for (i, player) in data.players.iter().enumerate() {
            assert_eq!(player.player_id as usize, i + 1);
        }
    }

    #[test]
    fn test_draft_year_bounds() {
        let data = generate(1980, 2000, 4);
        for p in &data.players {
            let year: i32 = p.season[..4].parse().unwrap();
            assert!(p.draft_year >= 1975.max(year - 20));
            assert!(p.draft_year <= year);
        }
    }
}
