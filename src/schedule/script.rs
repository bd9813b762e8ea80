use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use super::cron::SCRIPT_NAME;

/// Log file the script appends to, relative to the project directory
pub const LOG_FILE: &str = "nba_automation.log";

/// Shell script that runs generate then load unattended
#[derive(Debug, Clone)]
pub struct AutomationScript {
    /// Directory the script is written to
    pub script_dir: PathBuf,
    /// Working directory for the scheduled run
    pub project_dir: PathBuf,
    /// Binary invoked for both steps
    pub executable: PathBuf,
    /// Exported before the steps run
    pub env: Vec<(String, String)>,
}

impl AutomationScript {
    /// Script for the running binary, working in the current directory
    pub fn for_current_exe(script_dir: Option<PathBuf>) -> Result<Self> {
        let script_dir = match script_dir {
            Some(dir) => dir,
            None => default_script_dir()?,
        };
        Ok(Self {
            script_dir,
            project_dir: std::env::current_dir().context("Could not determine working directory")?,
            executable: std::env::current_exe().context("Could not locate the running executable")?,
            env: Vec::new(),
        })
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn path(&self) -> PathBuf {
        self.script_dir.join(SCRIPT_NAME)
    }

    pub fn render(&self) -> String {
        let exe = shell_quote(&self.executable.to_string_lossy());
        let mut script = String::new();

        script.push_str("#!/bin/bash\n");
        script.push_str("# NBA data automation, generated by nba-stats-pipeline\n\n");
        script.push_str(&format!("cd {} || exit 1\n\n", shell_quote(&self.project_dir.to_string_lossy())));
        for (key, value) in &self.env {
            script.push_str(&format!("export {}={}\n", key, shell_quote(value)));
        }
        if !self.env.is_empty() {
            script.push('\n');
        }

        script.push_str("echo \"$(date): Starting NBA data generation and loading...\"\n\n");

        for (step, (command, label)) in [("generate", "Data generation"), ("load", "Data loading")]
            .iter()
            .enumerate()
        {
            script.push_str(&format!("# Step {}\n", step + 1));
            script.push_str(&format!("{} {} >> {} 2>&1\n", exe, command, LOG_FILE));
            script.push_str("if [ $? -ne 0 ]; then\n");
            script.push_str(&format!("    echo \"$(date): ERROR: {} failed\"\n", label));
            script.push_str("    exit 1\n");
            script.push_str("fi\n");
            script.push_str(&format!("echo \"$(date): {} completed successfully\"\n\n", label));
        }

        script.push_str("echo \"$(date): NBA data pipeline completed successfully\"\n");
        script
    }

    /// Write the script, executable by its owner and readable by all
    pub fn write(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.script_dir)
            .with_context(|| format!("Failed to create {:?}", self.script_dir))?;

        let path = self.path();
        fs::write(&path, self.render()).with_context(|| format!("Failed to write {:?}", path))?;
        make_executable(&path)?;

        tracing::info!("Created automation script: {}", path.display());
        Ok(path)
    }
}

/// Per-user data directory for the script
pub fn default_script_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "nba-stats-pipeline")
        .context("Could not determine data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("Failed to mark {:?} executable", path))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

fn shell_quote(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn script_in(dir: &Path) -> AutomationScript {
        AutomationScript {
            script_dir: dir.join("bin"),
            project_dir: PathBuf::from("/srv/nba's data"),
            executable: PathBuf::from("/usr/local/bin/nba-stats-pipeline"),
            env: Vec::new(),
        }
        .with_env("DATABASE_URL", "sqlite://data/nba.db")
    }

    #[test]
    fn test_render_runs_both_steps_in_order() {
        let script = script_in(Path::new("/tmp")).render();
        assert!(script.starts_with("#!/bin/bash\n"));
        assert!(script.contains("cd '/srv/nba'\\''s data' || exit 1"));
        assert!(script.contains("export DATABASE_URL='sqlite://data/nba.db'"));

        let generate = script
            .find("'/usr/local/bin/nba-stats-pipeline' generate >> nba_automation.log 2>&1")
            .unwrap();
        let load = script
            .find("'/usr/local/bin/nba-stats-pipeline' load >> nba_automation.log 2>&1")
            .unwrap();
        assert!(generate < load);
        assert_eq!(script.matches("exit 1\n").count(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_sets_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = script_in(dir.path()).write().unwrap();
        assert_eq!(path.file_name().unwrap(), SCRIPT_NAME);

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
