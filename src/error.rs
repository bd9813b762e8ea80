use std::path::PathBuf;

/// Failure kinds surfaced by the pipeline
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Destination store could not be opened or queried
    #[error("Cannot reach database {url}")]
    Connectivity {
        url: String,
        #[source]
        source: rusqlite::Error,
    },

    /// A DDL statement was rejected
    #[error("Schema statement for {object} rejected")]
    Schema {
        object: String,
        #[source]
        source: rusqlite::Error,
    },

    /// An expected input file is absent
    #[error("Input file not found: {0:?}")]
    MissingInput(PathBuf),

    /// A single file failed to load
    #[error("Failed to load {file}: {reason}")]
    FileLoad { file: String, reason: String },

    #[error("Invalid year range: start {start} is after end {end}")]
    InvalidYearRange { start: i32, end: i32 },

    #[error("Year {year} is outside the supported range {min}-{max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("Invalid cron schedule '{0}': {1}")]
    InvalidSchedule(String, String),

    /// An orchestrator step failed, halting the run
    #[error("Step {step} ({name}) failed: {message}")]
    StepFailed {
        step: usize,
        name: &'static str,
        message: String,
    },
}
