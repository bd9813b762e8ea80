use anyhow::{bail, Context, Result};
use nba_stats_pipeline::{
    cli::{pipeline_config, Cli, Commands, ScheduleAction},
    generator::{save, NbaGenerator},
    pipeline::run_pipeline,
    schedule::{AutomationScript, CronSchedule, InstallOutcome, Scheduler, SystemCrontab},
    schema::tables::{ALL_TABLES, ALL_VIEWS},
    ui::menu::{self, MenuChoice},
    writer::{load_directory, SqliteStore},
    LogUi, Phase, UiApp,
};
use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Variables forwarded into the automation script when set
const FORWARDED_ENV: &[&str] = &["DATABASE_URL", "NBA_DATA_DIR", "START_YEAR", "END_YEAR"];

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let tui = matches!(cli.command, Commands::Run { tui: true, .. });
    init_tracing(tui, cli.command.log_file());

    match cli.command {
        Commands::Generate(args) => {
            let start = Instant::now();
            let config = args.to_config();

            let data = NbaGenerator::new(&config)?.generate();
            save(&data, &config.output_dir, &config.ready_dir())?;

            println!(
                "\nGenerated {} teams, {} players and {} stat rows in {:.1}s",
                data.teams.len(),
                data.players.len(),
                data.stats.len(),
                start.elapsed().as_secs_f64()
            );
            println!("Files ready for loading in {:?}", config.ready_dir());
        }

        Commands::Load(args) => {
            let start = Instant::now();
            let url = args.database.url()?;

            let report = load_directory(&url, &args.data_dir(), &args.options(), &mut LogUi::new())?;

            for file in report.files.iter().filter(|f| !f.succeeded()) {
                eprintln!(
                    "  {}: {}",
                    file.file,
                    file.error.as_deref().unwrap_or("unknown error")
                );
            }
            println!(
                "\nLoaded {}/{} files into {} in {:.1}s",
                report.files_loaded(),
                report.files.len(),
                url,
                start.elapsed().as_secs_f64()
            );
            if !report.success() {
                bail!("{} file(s) failed to load", report.files.len() - report.files_loaded());
            }
        }

        Commands::Run {
            generate,
            database,
            keep_existing,
            tui,
        } => {
            let config = pipeline_config(&generate, &database, keep_existing)?;

            if tui {
                let mut app = UiApp::new()?;
                let result = run_pipeline(&config, &mut app);
                match &result {
                    Ok(report) => app.finish(
                        Phase::Complete,
                        &format!("Pipeline completed in {:.1}s", report.elapsed.as_secs_f64()),
                    )?,
                    Err(e) => app.finish(Phase::Failed, &e.to_string())?,
                }
                result?;
            } else {
                let report = run_pipeline(&config, &mut LogUi::new())?;
                println!(
                    "\nPipeline completed in {:.1}s",
                    report.elapsed.as_secs_f64()
                );
            }
        }

        Commands::Check(database) => {
            let url = database.url()?;
            SqliteStore::connect(&url)?;
            println!("Database connection successful: {}", url);
        }

        Commands::Counts { database, json } => {
            let url = database.url()?;
            let store = SqliteStore::connect(&url)?;
            let counts = store
                .table_counts()
                .context("Could not count rows; has the database been loaded?")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&counts)?);
            } else {
                println!("Table record counts:\n");
                for count in &counts {
                    println!("  {:20} {}", count.table, count.rows);
                }
            }
        }

        Commands::Tables => {
            println!("Tables:\n");
            for table in ALL_TABLES {
                println!("  {} ({} columns)", table.qualified_name(), table.columns.len());
                for index in table.indexes {
                    println!("    index {} ({})", index.name, index.columns.join(", "));
                }
            }
            println!("\nViews:\n");
            for view in ALL_VIEWS {
                println!("  nba.{}", view.name);
            }
        }

        Commands::Schedule { action } => run_schedule(action)?,
    }

    Ok(())
}

fn init_tracing(tui: bool, log_file: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // The dashboard owns the terminal; log lines would tear the screen
    let console = (!tui).then(|| fmt::layer().with_target(false).with_writer(io::stderr));

    let file = log_file.and_then(|name| {
        match OpenOptions::new().create(true).append(true).open(name) {
            Ok(file) => Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            ),
            Err(e) => {
                eprintln!("Cannot open log file {}: {}", name, e);
                None
            }
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();
}

fn scheduler(script_dir: Option<PathBuf>) -> Result<Scheduler<SystemCrontab>> {
    let mut script = AutomationScript::for_current_exe(script_dir)?;
    for key in FORWARDED_ENV {
        if let Ok(value) = std::env::var(key) {
            script = script.with_env(*key, value);
        }
    }
    Ok(Scheduler::new(SystemCrontab, script))
}

fn run_schedule(action: ScheduleAction) -> Result<()> {
    match action {
        ScheduleAction::Install {
            cron,
            weekly,
            script_dir,
        } => {
            let schedule = match cron {
                Some(expr) => CronSchedule::parse(&expr)?,
                None if weekly => CronSchedule::weekly(),
                None => CronSchedule::daily(),
            };
            install(&scheduler(script_dir)?, &schedule)?;
        }
        ScheduleAction::Remove => {
            scheduler(None)?.remove()?;
        }
        ScheduleAction::List => list(&scheduler(None)?)?,
        ScheduleAction::Test { script_dir } => test(&scheduler(script_dir)?)?,
        ScheduleAction::Menu { script_dir } => run_menu(&scheduler(script_dir)?)?,
    }
    Ok(())
}

fn install(scheduler: &Scheduler<SystemCrontab>, schedule: &CronSchedule) -> Result<()> {
    match scheduler.install(schedule)? {
        InstallOutcome::Installed { schedule, script } => {
            println!("Cron job added");
            println!("  Schedule: {}", schedule);
            println!("  Script:   {}", script.display());
        }
        InstallOutcome::AlreadyPresent => {
            println!("NBA automation cron job already exists; remove it first to change the schedule");
        }
    }
    Ok(())
}

fn list(scheduler: &Scheduler<SystemCrontab>) -> Result<()> {
    let table = scheduler.list()?;
    if table.trim().is_empty() {
        println!("No cron jobs found");
    } else {
        println!("Current cron jobs:\n{}", table);
    }
    Ok(())
}

fn test(scheduler: &Scheduler<SystemCrontab>) -> Result<()> {
    let run = scheduler.test()?;
    print!("{}", run.stdout);
    eprint!("{}", run.stderr);
    if !run.success {
        bail!("Automation script failed");
    }
    println!("Automation script test completed successfully");
    Ok(())
}

fn run_menu(scheduler: &Scheduler<SystemCrontab>) -> Result<()> {
    loop {
        let outcome = match menu::select_choice()? {
            MenuChoice::Daily => install(scheduler, &CronSchedule::daily()),
            MenuChoice::Weekly => install(scheduler, &CronSchedule::weekly()),
            MenuChoice::Custom => match menu::prompt_schedule()? {
                Some(expr) => CronSchedule::parse(&expr)
                    .map_err(anyhow::Error::from)
                    .and_then(|schedule| install(scheduler, &schedule)),
                None => continue,
            },
            MenuChoice::Test => test(scheduler),
            MenuChoice::List => list(scheduler),
            MenuChoice::Remove => scheduler.remove().map(|_| ()),
            MenuChoice::Exit => return Ok(()),
        };

        if let Err(e) = outcome {
            eprintln!("Error: {:#}", e);
        }
        pause()?;
    }
}

fn pause() -> Result<()> {
    print!("\nPress Enter to return to the menu...");
    io::stdout().flush()?;
    io::stdin().lock().read_line(&mut String::new())?;
    Ok(())
}
