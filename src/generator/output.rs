//! CSV output for generated data

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::records::PerMode;
use super::GeneratedData;

pub const TEAMS_FILE: &str = "teams_all_seasons.csv";
pub const PLAYERS_FILE: &str = "players_all_seasons.csv";

/// Write every CSV into `output_dir`, then copy them into `ready_dir`.
///
/// Returns the paths written under `output_dir`.
pub fn save(data: &GeneratedData, output_dir: &Path, ready_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    let mut written = Vec::new();

    written.push(write_csv(&output_dir.join(TEAMS_FILE), data.teams.iter())?);
    info!("Saved {} team records", data.teams.len());

    written.push(write_csv(&output_dir.join(PLAYERS_FILE), data.players.iter())?);
    info!("Saved {} player records", data.players.len());

    for mode in PerMode::ALL {
        let path = output_dir.join(mode.file_name());
        written.push(write_csv(&path, data.stats_for(mode))?);
    }
    info!("Saved {} stat records", data.stats.len());

    fs::create_dir_all(ready_dir)
        .with_context(|| format!("Failed to create directory: {:?}", ready_dir))?;

    for path in &written {
        if let Some(name) = path.file_name() {
            fs::copy(path, ready_dir.join(name))
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, ready_dir))?;
        }
    }
    info!("Copied {} files to {:?} for loading", written.len(), ready_dir);

    Ok(written)
}

fn write_csv<'a, T, I>(path: &Path, rows: I) -> Result<PathBuf>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create: {:?}", path))?;

    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write row to {:?}", path))?;
    }

    writer.flush()?;
    Ok(path.to_path_buf())
}
