use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{
    DatabaseUrl, GeneratorConfig, LoadOptions, DEFAULT_DATABASE_URL, DEFAULT_DATA_DIR,
    DEFAULT_END_YEAR, DEFAULT_START_YEAR, LOADER_LOG_FILE, LOAD_READY_DIR, PIPELINE_LOG_FILE,
};
use crate::pipeline::PipelineConfig;

#[derive(Parser, Debug)]
#[command(name = "nba-stats-pipeline")]
#[command(version, about = "Generate synthetic NBA statistics and load them into SQLite")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate team, player and season stat CSV files
    Generate(GenerateArgs),

    /// Load generated CSV files into the database
    Load(LoadArgs),

    /// Generate, load and verify in one run
    Run {
        #[command(flatten)]
        generate: GenerateArgs,

        #[command(flatten)]
        database: DatabaseArgs,

        /// Append to existing rows instead of a full refresh
        #[arg(long)]
        keep_existing: bool,

        /// Show a terminal dashboard instead of log output
        #[arg(long)]
        tui: bool,
    },

    /// Test database connectivity
    Check(DatabaseArgs),

    /// Show row counts for every table
    Counts {
        #[command(flatten)]
        database: DatabaseArgs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List destination tables, indexes and views
    Tables,

    /// Manage the scheduled automation job
    Schedule {
        #[command(subcommand)]
        action: ScheduleAction,
    },
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// First season start year
    #[arg(long, env = "START_YEAR", default_value_t = DEFAULT_START_YEAR)]
    pub start_year: i32,

    /// Last season start year (inclusive)
    #[arg(long, env = "END_YEAR", default_value_t = DEFAULT_END_YEAR)]
    pub end_year: i32,

    /// Directory for generated CSV files
    #[arg(short, long, env = "NBA_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub output_dir: PathBuf,

    /// Directory for the load-ready copy [default: <output-dir>/load_ready]
    #[arg(long)]
    pub ready_dir: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(long, env = "NBA_SEED")]
    pub seed: Option<u64>,
}

impl GenerateArgs {
    pub fn to_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            start_year: self.start_year,
            end_year: self.end_year,
            seed: self.seed,
            output_dir: self.output_dir.clone(),
            ready_dir: self.ready_dir.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// SQLite database, as `sqlite://path` or a plain path
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,
}

impl DatabaseArgs {
    pub fn url(&self) -> Result<DatabaseUrl> {
        DatabaseUrl::parse(&self.database_url)
    }
}

#[derive(Args, Debug, Clone)]
pub struct LoadArgs {
    /// Directory holding the CSV files [default: <NBA_DATA_DIR>/load_ready]
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    #[arg(long, env = "NBA_DATA_DIR", default_value = DEFAULT_DATA_DIR, hide = true)]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub database: DatabaseArgs,

    /// Append to existing rows instead of a full refresh
    #[arg(long)]
    pub keep_existing: bool,
}

impl LoadArgs {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| self.output_dir.join(LOAD_READY_DIR))
    }

    pub fn options(&self) -> LoadOptions {
        LoadOptions {
            clear_existing: !self.keep_existing,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ScheduleAction {
    /// Add the cron entry (daily at 6 AM unless a schedule is given)
    Install {
        /// Five-field cron expression
        #[arg(long, conflicts_with = "weekly")]
        cron: Option<String>,

        /// Mondays at 6 AM
        #[arg(long)]
        weekly: bool,

        /// Where to write the automation script
        #[arg(long)]
        script_dir: Option<PathBuf>,
    },

    /// Remove the cron entry
    Remove,

    /// Print the current crontab
    List,

    /// Run the automation script once
    Test {
        #[arg(long)]
        script_dir: Option<PathBuf>,
    },

    /// Interactive menu
    Menu {
        #[arg(long)]
        script_dir: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

impl Commands {
    /// File in the working directory that also receives this command's log
    pub fn log_file(&self) -> Option<&'static str> {
        match self {
            Commands::Load(_) => Some(LOADER_LOG_FILE),
            Commands::Run { .. } => Some(PIPELINE_LOG_FILE),
            _ => None,
        }
    }
}

/// Assemble the orchestrator settings from `run` arguments
pub fn pipeline_config(
    generate: &GenerateArgs,
    database: &DatabaseArgs,
    keep_existing: bool,
) -> Result<PipelineConfig> {
    Ok(PipelineConfig {
        generator: generate.to_config(),
        database_url: database.url()?,
        load: LoadOptions {
            clear_existing: !keep_existing,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults_to_ready_dir() {
        let cli = Cli::try_parse_from(["nba-stats-pipeline", "load", "--database-url", "x.db"]).unwrap();
        let Commands::Load(args) = cli.command else {
            panic!("expected load");
        };
        assert!(args.data_dir().ends_with(LOAD_READY_DIR));
        assert!(args.options().clear_existing);
        assert_eq!(args.database.url().unwrap().path(), std::path::Path::new("x.db"));
    }

    #[test]
    fn test_run_collects_generator_options() {
        let cli = Cli::try_parse_from([
            "nba-stats-pipeline",
            "run",
            "--start-year",
            "2020",
            "--end-year",
            "2021",
            "--seed",
            "9",
            "--database-url",
            "sqlite://t.db",
            "--keep-existing",
        ])
        .unwrap();
        let Commands::Run {
            generate,
            database,
            keep_existing,
            tui,
        } = cli.command
        else {
            panic!("expected run");
        };
        let config = pipeline_config(&generate, &database, keep_existing).unwrap();
        assert_eq!(config.generator.start_year, 2020);
        assert_eq!(config.generator.seed, Some(9));
        assert!(!config.load.clear_existing);
        assert!(!tui);
    }

    #[test]
    fn test_log_file_per_command() {
        let log_file = |args: &[&str]| Cli::try_parse_from(args.iter().copied()).unwrap().command.log_file();

        assert_eq!(log_file(&["nba-stats-pipeline", "load"]), Some("nba_loader.log"));
        assert_eq!(log_file(&["nba-stats-pipeline", "run", "--tui"]), Some("nba_pipeline.log"));
        assert_eq!(log_file(&["nba-stats-pipeline", "generate"]), None);
        assert_eq!(log_file(&["nba-stats-pipeline", "tables"]), None);
    }

    #[test]
    fn test_schedule_flags_conflict() {
        let result = Cli::try_parse_from([
            "nba-stats-pipeline",
            "schedule",
            "install",
            "--weekly",
            "--cron",
            "0 1 * * *",
        ]);
        assert!(result.is_err());
    }
}
