pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod parser;
pub mod pipeline;
pub mod schedule;
pub mod schema;
pub mod ui;
pub mod writer;

pub use cli::{Cli, Commands};
pub use config::{DatabaseUrl, GeneratorConfig, LoadOptions};
pub use error::PipelineError;
pub use pipeline::{run_pipeline, PipelineConfig, PipelineReport};
pub use ui::{LogUi, Phase, SilentUi, Ui, UiApp};
