//! Per-player career timelines used to pick a legendary player's team

/// Player is on `team` for every season starting in or before `through`
#[derive(Debug, Clone, Copy)]
pub struct TeamRule {
    pub through: Option<i32>,
    pub team: &'static str,
}

const fn until(through: i32, team: &'static str) -> TeamRule {
    TeamRule {
        through: Some(through),
        team,
    }
}

const fn after(team: &'static str) -> TeamRule {
    TeamRule {
        through: None,
        team,
    }
}

/// Ordered rules per player, evaluated first-match
pub static TEAM_TIMELINES: &[(&str, &[TeamRule])] = &[
    (
        "LeBron James",
        &[until(2010, "CLE"), until(2014, "MIA"), until(2018, "CLE"), after("LAL")],
    ),
    (
        "Kevin Durant",
        &[until(2016, "OKC"), until(2019, "GSW"), until(2022, "BKN"), after("PHX")],
    ),
    (
        "Shaquille O'Neal",
        &[until(1996, "ORL"), until(2004, "LAL"), until(2008, "MIA"), after("PHX")],
    ),
    ("Dennis Rodman", &[until(1993, "DET"), after("CHI")]),
    ("Charles Barkley", &[until(1992, "PHI"), after("PHX")]),
    ("Clyde Drexler", &[until(1995, "POR"), after("HOU")]),
    (
        "Russell Westbrook",
        &[until(2019, "OKC"), until(2021, "HOU"), until(2023, "LAL"), after("LAC")],
    ),
    (
        "James Harden",
        &[
            until(2012, "OKC"),
            until(2020, "HOU"),
            until(2022, "BKN"),
            until(2024, "PHI"),
            after("LAC"),
        ],
    ),
    (
        "Chris Paul",
        &[
            until(2011, "NOP"),
            until(2017, "LAC"),
            until(2021, "HOU"),
            until(2023, "PHX"),
            after("GSW"),
        ],
    ),
    ("Anthony Davis", &[until(2019, "NOP"), after("LAL")]),
    (
        "Kawhi Leonard",
        &[until(2018, "SAS"), until(2019, "TOR"), after("LAC")],
    ),
    (
        "Paul George",
        &[until(2017, "IND"), until(2019, "OKC"), after("LAC")],
    ),
    ("Blake Griffin", &[until(2018, "LAC"), after("DET")]),
    ("Kevin Garnett", &[until(2007, "MIN"), after("BOS")]),
    ("Damian Lillard", &[until(2023, "POR"), after("MIL")]),
];

fn rule_matches(rule: &TeamRule, year: i32) -> bool {
    rule.through.map_or(true, |through| year <= through)
}

/// Team abbreviation for `player_name` in the season starting in `year`.
///
/// Falls back to the first entry of `possible_teams` when the player has no
/// timeline or no rule matches.
pub fn team_for_player(
    player_name: &str,
    possible_teams: &[&'static str],
    year: i32,
) -> Option<&'static str> {
    TEAM_TIMELINES
        .iter()
        .find(|(name, _)| *name == player_name)
        .and_then(|(_, rules)| rules.iter().find(|r| rule_matches(r, year)))
        .map(|r| r.team)
        .or_else(|| possible_teams.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lebron_timeline() {
        let teams = &["MIA", "CLE", "LAL"];
        assert_eq!(team_for_player("LeBron James", teams, 2003), Some("CLE"));
        assert_eq!(team_for_player("LeBron James", teams, 2010), Some("CLE"));
        assert_eq!(team_for_player("LeBron James", teams, 2011), Some("MIA"));
        assert_eq!(team_for_player("LeBron James", teams, 2016), Some("CLE"));
        assert_eq!(team_for_player("LeBron James", teams, 2020), Some("LAL"));
    }

    #[test]
    fn test_single_year_rule() {
        let teams = &["SAS", "TOR", "LAC"];
        assert_eq!(team_for_player("Kawhi Leonard", teams, 2019), Some("TOR"));
        assert_eq!(team_for_player("Kawhi Leonard", teams, 2020), Some("LAC"));
    }

    #[test]
    fn test_fallback_to_first_team() {
        assert_eq!(team_for_player("Tim Duncan", &["SAS"], 2005), Some("SAS"));
        assert_eq!(team_for_player("Nobody", &[], 2005), None);
    }

    #[test]
    fn test_every_timeline_ends_open() {
        for (name, rules) in TEAM_TIMELINES {
            assert!(rules.last().unwrap().through.is_none(), "{}", name);
        }
    }
}
