//! Four-step orchestrator: connect, generate, load, verify
//!
//! Steps run in order and the first failure halts the run. There are no
//! retries; a failed run starts over from step 1.

use anyhow::{bail, Result};
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::config::{DatabaseUrl, GeneratorConfig, LoadOptions};
use crate::error::PipelineError;
use crate::generator::{save, NbaGenerator};
use crate::ui::{Phase, Ui};
use crate::writer::{load_directory, log_counts, LoadReport, SqliteStore, TableCount};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub generator: GeneratorConfig,
    pub database_url: DatabaseUrl,
    pub load: LoadOptions,
}

/// Captured output of a step that succeeded
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub step: usize,
    pub name: &'static str,
    pub output: String,
}

#[derive(Debug)]
pub struct PipelineReport {
    pub steps: Vec<StepOutcome>,
    pub load: Option<LoadReport>,
    pub counts: Vec<TableCount>,
    pub elapsed: Duration,
}

struct Runner<'a, U: Ui> {
    ui: &'a mut U,
    steps: Vec<StepOutcome>,
}

impl<'a, U: Ui> Runner<'a, U> {
    fn step<T>(
        &mut self,
        phase: Phase,
        name: &'static str,
        f: impl FnOnce(&mut U) -> Result<(T, String)>,
    ) -> Result<T, PipelineError> {
        let step = self.steps.len() + 1;
        info!("Step {}: {}...", step, name);
        self.ui.set_phase(phase);

        match f(&mut *self.ui) {
            Ok((value, output)) => {
                info!("{} completed successfully", name);
                if !output.is_empty() {
                    info!("Output: {}", output);
                }
                self.ui.log(format!("✓ {}", output));
                self.steps.push(StepOutcome { step, name, output });
                Ok(value)
            }
            Err(e) => {
                let message = format!("{:#}", e);
                error!("{} failed: {}", name, message);
                self.ui.set_phase(Phase::Failed);
                self.ui.log(format!("✗ {} failed: {}", name, message));
                Err(PipelineError::StepFailed {
                    step,
                    name,
                    message,
                })
            }
        }
    }
}

/// Run the complete pipeline
pub fn run_pipeline(
    config: &PipelineConfig,
    ui: &mut impl Ui,
) -> Result<PipelineReport, PipelineError> {
    let start = Instant::now();
    info!("NBA complete data pipeline started");

    let mut runner = Runner {
        ui,
        steps: Vec::new(),
    };
    let url = &config.database_url;

    runner.step(Phase::Connecting, "Database connection test", |_| {
        SqliteStore::connect(url)?;
        Ok(((), format!("Database connection successful: {}", url)))
    })?;

    runner.step(Phase::Generating, "NBA data generation", |ui| {
        let gen_config = &config.generator;
        ui.set_info(format!(
            "Seasons {} to {}",
            gen_config.start_year, gen_config.end_year
        ));
        let data = NbaGenerator::new(gen_config)?.generate();
        save(&data, &gen_config.output_dir, &gen_config.ready_dir())?;
        Ok((
            (),
            format!(
                "Generated {} records ({} teams, {} players, {} stats)",
                data.total_records(),
                data.teams.len(),
                data.players.len(),
                data.stats.len()
            ),
        ))
    })?;

    let load = runner.step(Phase::Loading, "Database loading", |ui| {
        let report = load_directory(url, &config.generator.ready_dir(), &config.load, ui)?;
        if !report.success() {
            let failed: Vec<&str> = report
                .files
                .iter()
                .filter(|f| !f.succeeded())
                .map(|f| f.file.as_str())
                .collect();
            bail!(
                "{}/{} files loaded, failed: {}",
                report.files_loaded(),
                report.files.len(),
                failed.join(", ")
            );
        }
        let output = format!("Loaded {} files", report.files_loaded());
        Ok((report, output))
    })?;

    let counts = runner.step(Phase::Verifying, "Data verification", |_| {
        let store = SqliteStore::connect(url)?;
        let counts = store.table_counts()?;
        log_counts(&counts);
        let summary = counts
            .iter()
            .map(|c| format!("{}={}", c.table, c.rows))
            .collect::<Vec<_>>()
            .join(", ");
        Ok((counts, summary))
    })?;

    runner.ui.set_phase(Phase::Complete);
    let elapsed = start.elapsed();
    info!("NBA data pipeline completed successfully");
    info!("Total time: {:.1}s", elapsed.as_secs_f64());

    Ok(PipelineReport {
        steps: runner.steps,
        load: Some(load),
        counts,
        elapsed,
    })
}
