//! Runtime configuration carried from the CLI into the library

use anyhow::{bail, Result};
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_START_YEAR: i32 = 1980;
pub const DEFAULT_END_YEAR: i32 = 2025;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/nba.db";

/// Sub-directory of the output directory holding the copy used for loading
pub const LOAD_READY_DIR: &str = "load_ready";

/// Log files appended to by the `load` and `run` commands
pub const LOADER_LOG_FILE: &str = "nba_loader.log";
pub const PIPELINE_LOG_FILE: &str = "nba_pipeline.log";

/// Settings for one generation run
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub start_year: i32,
    pub end_year: i32,
    /// Fixed seed for reproducible output; `None` draws from entropy
    pub seed: Option<u64>,
    pub output_dir: PathBuf,
    /// Defaults to `<output_dir>/load_ready`
    pub ready_dir: Option<PathBuf>,
}

impl GeneratorConfig {
    pub fn ready_dir(&self) -> PathBuf {
        self.ready_dir
            .clone()
            .unwrap_or_else(|| self.output_dir.join(LOAD_READY_DIR))
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
            seed: None,
            output_dir: PathBuf::from(DEFAULT_DATA_DIR),
            ready_dir: None,
        }
    }
}

/// Settings for one load run
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Delete existing rows before loading (full refresh)
    pub clear_existing: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            clear_existing: true,
        }
    }
}

/// Location of the destination SQLite file
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseUrl {
    raw: String,
    path: PathBuf,
}

impl DatabaseUrl {
    /// Accepts `sqlite://path`, `sqlite:path` or a bare path
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let path = trimmed
            .strip_prefix("sqlite://")
            .or_else(|| trimmed.strip_prefix("sqlite:"))
            .unwrap_or(trimmed);

        if path.is_empty() {
            bail!("Database URL '{}' does not name a file", raw);
        }
        if let Some((scheme, _)) = path.split_once("://") {
            bail!("Unsupported database scheme '{}'", scheme);
        }

        Ok(Self {
            raw: trimmed.to_string(),
            path: PathBuf::from(path),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_database_url() {
        let url = DatabaseUrl::parse("sqlite://data/nba.db").unwrap();
        assert_eq!(url.path(), Path::new("data/nba.db"));

        let url = DatabaseUrl::parse("sqlite:/tmp/nba.db").unwrap();
        assert_eq!(url.path(), Path::new("/tmp/nba.db"));

        let url = DatabaseUrl::parse("nba.db").unwrap();
        assert_eq!(url.path(), Path::new("nba.db"));
    }

    #[test]
    fn test_parse_database_url_rejects_other_schemes() {
        assert!(DatabaseUrl::parse("postgresql://localhost/nba").is_err());
        assert!(DatabaseUrl::parse("sqlite://").is_err());
    }

    #[test]
    fn test_ready_dir_default() {
        let config = GeneratorConfig::default();
        assert_eq!(config.ready_dir(), PathBuf::from("data/load_ready"));
    }
}
