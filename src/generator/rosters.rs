//! Static team and player tables

/// Team metadata for one franchise in one era
#[derive(Debug, Clone, Copy)]
pub struct TeamInfo {
    pub abbreviation: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub conference: &'static str,
    pub division: &'static str,
}

const fn team(
    abbreviation: &'static str,
    name: &'static str,
    city: &'static str,
    conference: &'static str,
    division: &'static str,
) -> TeamInfo {
    TeamInfo {
        abbreviation,
        name,
        city,
        conference,
        division,
    }
}

/// First season (by starting year) that uses the modern table
pub const MODERN_ERA_START: i32 = 2000;

// =============================================================================
// Teams
// =============================================================================

pub static HISTORICAL_TEAMS: &[TeamInfo] = &[
    team("ATL", "Atlanta Hawks", "Atlanta", "Eastern", "Central"),
    team("BOS", "Boston Celtics", "Boston", "Eastern", "Atlantic"),
    team("CHI", "Chicago Bulls", "Chicago", "Eastern", "Central"),
    team("CLE", "Cleveland Cavaliers", "Cleveland", "Eastern", "Central"),
    team("DAL", "Dallas Mavericks", "Dallas", "Western", "Midwest"),
    team("DEN", "Denver Nuggets", "Denver", "Western", "Midwest"),
    team("DET", "Detroit Pistons", "Detroit", "Eastern", "Central"),
    team("GSW", "Golden State Warriors", "San Francisco", "Western", "Pacific"),
    team("HOU", "Houston Rockets", "Houston", "Western", "Midwest"),
    team("IND", "Indiana Pacers", "Indianapolis", "Eastern", "Central"),
    team("LAC", "LA Clippers", "Los Angeles", "Western", "Pacific"),
    team("LAL", "Los Angeles Lakers", "Los Angeles", "Western", "Pacific"),
    team("MIA", "Miami Heat", "Miami", "Eastern", "Atlantic"),
    team("MIL", "Milwaukee Bucks", "Milwaukee", "Eastern", "Central"),
    team("NJN", "New Jersey Nets", "East Rutherford", "Eastern", "Atlantic"),
    team("NYK", "New York Knicks", "New York", "Eastern", "Atlantic"),
    team("ORL", "Orlando Magic", "Orlando", "Eastern", "Atlantic"),
    team("PHI", "Philadelphia 76ers", "Philadelphia", "Eastern", "Atlantic"),
    team("PHX", "Phoenix Suns", "Phoenix", "Western", "Pacific"),
    team("POR", "Portland Trail Blazers", "Portland", "Western", "Pacific"),
    team("SAC", "Sacramento Kings", "Sacramento", "Western", "Pacific"),
    team("SAS", "San Antonio Spurs", "San Antonio", "Western", "Midwest"),
    team("SEA", "Seattle SuperSonics", "Seattle", "Western", "Pacific"),
    team("UTA", "Utah Jazz", "Salt Lake City", "Western", "Midwest"),
    team("WAS", "Washington Bullets", "Washington", "Eastern", "Atlantic"),
];

// Divisions follow the 2004 realignment, so some franchises move between tables.
pub static MODERN_TEAMS: &[TeamInfo] = &[
    team("ATL", "Atlanta Hawks", "Atlanta", "Eastern", "Southeast"),
    team("BOS", "Boston Celtics", "Boston", "Eastern", "Atlantic"),
    team("BKN", "Brooklyn Nets", "Brooklyn", "Eastern", "Atlantic"),
    team("CHA", "Charlotte Hornets", "Charlotte", "Eastern", "Southeast"),
    team("CHI", "Chicago Bulls", "Chicago", "Eastern", "Central"),
    team("CLE", "Cleveland Cavaliers", "Cleveland", "Eastern", "Central"),
    team("DAL", "Dallas Mavericks", "Dallas", "Western", "Southwest"),
    team("DEN", "Denver Nuggets", "Denver", "Western", "Northwest"),
    team("DET", "Detroit Pistons", "Detroit", "Eastern", "Central"),
    team("GSW", "Golden State Warriors", "San Francisco", "Western", "Pacific"),
    team("HOU", "Houston Rockets", "Houston", "Western", "Southwest"),
    team("IND", "Indiana Pacers", "Indianapolis", "Eastern", "Central"),
    team("LAC", "LA Clippers", "Los Angeles", "Western", "Pacific"),
    team("LAL", "Los Angeles Lakers", "Los Angeles", "Western", "Pacific"),
    team("MEM", "Memphis Grizzlies", "Memphis", "Western", "Southwest"),
    team("MIA", "Miami Heat", "Miami", "Eastern", "Southeast"),
    team("MIL", "Milwaukee Bucks", "Milwaukee", "Eastern", "Central"),
    team("MIN", "Minnesota Timberwolves", "Minneapolis", "Western", "Northwest"),
    team("NOP", "New Orleans Pelicans", "New Orleans", "Western", "Southwest"),
    team("NYK", "New York Knicks", "New York", "Eastern", "Atlantic"),
    team("OKC", "Oklahoma City Thunder", "Oklahoma City", "Western", "Northwest"),
    team("ORL", "Orlando Magic", "Orlando", "Eastern", "Southeast"),
    team("PHI", "Philadelphia 76ers", "Philadelphia", "Eastern", "Atlantic"),
    team("PHX", "Phoenix Suns", "Phoenix", "Western", "Pacific"),
    team("POR", "Portland Trail Blazers", "Portland", "Western", "Northwest"),
    team("SAC", "Sacramento Kings", "Sacramento", "Western", "Pacific"),
    team("SAS", "San Antonio Spurs", "San Antonio", "Western", "Southwest"),
    team("TOR", "Toronto Raptors", "Toronto", "Eastern", "Atlantic"),
    team("UTA", "Utah Jazz", "Salt Lake City", "Western", "Northwest"),
    team("WAS", "Washington Wizards", "Washington", "Eastern", "Southeast"),
];

/// Team table in effect for a season starting in `year`
pub fn teams_for_year(year: i32) -> &'static [TeamInfo] {
    if year < MODERN_ERA_START {
        HISTORICAL_TEAMS
    } else {
        MODERN_TEAMS
    }
}

// =============================================================================
// Legendary players
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct LegendaryPlayer {
    pub name: &'static str,
    pub position: &'static str,
    /// Teams the player appeared for during the era, first is the fallback
    pub teams: &'static [&'static str],
}

const fn legend(
    name: &'static str,
    position: &'static str,
    teams: &'static [&'static str],
) -> LegendaryPlayer {
    LegendaryPlayer {
        name,
        position,
        teams,
    }
}

/// Decade bucket with its inclusive year range and roster
#[derive(Debug)]
pub struct EraBucket {
    pub label: &'static str,
    pub first_year: i32,
    pub last_year: i32,
    pub players: &'static [LegendaryPlayer],
}

impl EraBucket {
    pub fn contains(&self, year: i32) -> bool {
        (self.first_year..=self.last_year).contains(&year)
    }
}

pub static ERA_BUCKETS: &[EraBucket] = &[
    EraBucket {
        label: "1980s",
        first_year: 1980,
        last_year: 1989,
        players: &[
            legend("Magic Johnson", "PG", &["LAL"]),
            legend("Larry Bird", "SF", &["BOS"]),
            legend("Kareem Abdul-Jabbar", "C", &["LAL"]),
            legend("Isiah Thomas", "PG", &["DET"]),
            legend("Dominique Wilkins", "SF", &["ATL"]),
            legend("Julius Erving", "SF", &["PHI"]),
            legend("Moses Malone", "C", &["PHI"]),
            legend("James Worthy", "SF", &["LAL"]),
        ],
    },
    EraBucket {
        label: "1990s",
        first_year: 1990,
        last_year: 1999,
        players: &[
            legend("Michael Jordan", "SG", &["CHI"]),
            legend("Scottie Pippen", "SF", &["CHI"]),
            legend("Dennis Rodman", "PF", &["CHI", "DET"]),
            legend("Karl Malone", "PF", &["UTA"]),
            legend("John Stockton", "PG", &["UTA"]),
            legend("Hakeem Olajuwon", "C", &["HOU"]),
            legend("Charles Barkley", "PF", &["PHI", "PHX"]),
            legend("Patrick Ewing", "C", &["NYK"]),
            legend("David Robinson", "C", &["SAS"]),
            legend("Clyde Drexler", "SG", &["POR", "HOU"]),
        ],
    },
    EraBucket {
        label: "2000s",
        first_year: 2000,
        last_year: 2009,
        players: &[
            legend("Tim Duncan", "PF", &["SAS"]),
            legend("Kobe Bryant", "SG", &["LAL"]),
            legend("Shaquille O'Neal", "C", &["LAL", "MIA"]),
            legend("LeBron James", "SF", &["CLE"]),
            legend("Dwyane Wade", "SG", &["MIA"]),
            legend("Kevin Garnett", "PF", &["MIN", "BOS"]),
            legend("Dirk Nowitzki", "PF", &["DAL"]),
            legend("Steve Nash", "PG", &["PHX"]),
            legend("Tracy McGrady", "SG", &["HOU"]),
            legend("Vince Carter", "SG", &["TOR"]),
        ],
    },
    EraBucket {
        label: "2010s",
        first_year: 2010,
        last_year: 2019,
        players: &[
            legend("LeBron James", "SF", &["MIA", "CLE", "LAL"]),
            legend("Stephen Curry", "PG", &["GSW"]),
            legend("Kevin Durant", "SF", &["OKC", "GSW"]),
            legend("Russell Westbrook", "PG", &["OKC"]),
            legend("James Harden", "SG", &["HOU"]),
            legend("Chris Paul", "PG", &["LAC", "HOU"]),
            legend("Anthony Davis", "PF", &["NOP", "LAL"]),
            legend("Kawhi Leonard", "SF", &["SAS", "TOR", "LAC"]),
            legend("Paul George", "SF", &["IND", "OKC", "LAC"]),
            legend("Blake Griffin", "PF", &["LAC", "DET"]),
        ],
    },
    EraBucket {
        label: "2020s",
        first_year: 2020,
        last_year: 2025,
        players: &[
            legend("LeBron James", "SF", &["LAL"]),
            legend("Stephen Curry", "PG", &["GSW"]),
            legend("Kevin Durant", "SF", &["BKN", "PHX"]),
            legend("Giannis Antetokounmpo", "PF", &["MIL"]),
            legend("Luka Doncic", "PG", &["DAL"]),
            legend("Jayson Tatum", "SF", &["BOS"]),
            legend("Nikola Jokic", "C", &["DEN"]),
            legend("Joel Embiid", "C", &["PHI"]),
            legend("Anthony Davis", "PF", &["LAL"]),
            legend("Jimmy Butler", "SF", &["MIA"]),
        ],
    },
];

/// Legendary players active in `year`, tagged with their era label
pub fn legends_for_year(year: i32) -> Vec<(&'static str, &'static LegendaryPlayer)> {
    ERA_BUCKETS
        .iter()
        .filter(|bucket| bucket.contains(year))
        .flat_map(|bucket| bucket.players.iter().map(move |p| (bucket.label, p)))
        .collect()
}

// =============================================================================
// Filler pools
// =============================================================================

pub static FIRST_NAMES: &[&str] = &[
    "Alex", "Marcus", "Devin", "Tyler", "Jordan", "Mason", "Logan", "Ethan", "Noah", "Liam",
    "James", "Michael", "David", "Chris", "Kevin",
];

pub static LAST_NAMES: &[&str] = &[
    "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Wilson", "Smith", "Anderson", "Taylor", "Thomas", "Jackson",
];

pub static POSITIONS: &[&str] = &["PG", "SG", "SF", "PF", "C"];

pub static COLLEGES: &[&str] = &[
    "Duke",
    "Kentucky",
    "North Carolina",
    "UCLA",
    "Kansas",
    "Michigan State",
];

pub static COUNTRIES: &[&str] = &["USA", "Canada", "France", "Germany", "Australia", "Spain"];
