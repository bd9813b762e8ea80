//! Unattended runs through the user's crontab
//!
//! Installing writes the automation script, then adds a marked entry that
//! invokes it. Only one entry is ever managed; installing again is a no-op
//! until it is removed.

pub mod cron;
pub mod crontab;
pub mod script;

pub use cron::CronSchedule;
pub use crontab::{Crontab, MemoryCrontab, SystemCrontab};
pub use script::AutomationScript;

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Command;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum InstallOutcome {
    Installed { schedule: CronSchedule, script: PathBuf },
    AlreadyPresent,
}

/// Output of one manual script run
#[derive(Debug, Clone)]
pub struct ScriptRun {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

pub struct Scheduler<C: Crontab> {
    crontab: C,
    script: AutomationScript,
}

impl<C: Crontab> Scheduler<C> {
    pub fn new(crontab: C, script: AutomationScript) -> Self {
        Self { crontab, script }
    }

    pub fn install(&self, schedule: &CronSchedule) -> Result<InstallOutcome> {
        let script_path = self.script.write()?;
        let current = self.crontab.read()?;
        let entry = format!("{} {}", schedule, script_path.display());

        let Some(updated) = cron::add_entry(&current, &entry) else {
            info!("NBA automation cron job already exists");
            return Ok(InstallOutcome::AlreadyPresent);
        };

        self.crontab.write(&updated).context("Failed to add cron job")?;
        info!("Cron job added: {} -> {}", schedule, script_path.display());

        Ok(InstallOutcome::Installed {
            schedule: schedule.clone(),
            script: script_path,
        })
    }

    /// Returns whether an entry was present
    pub fn remove(&self) -> Result<bool> {
        let current = self.crontab.read()?;
        if !cron::has_entry(&current) {
            info!("No NBA automation cron job installed");
            return Ok(false);
        }

        self.crontab
            .write(&cron::remove_entry(&current))
            .context("Failed to remove cron job")?;
        info!("NBA automation cron job removed");
        Ok(true)
    }

    pub fn list(&self) -> Result<String> {
        self.crontab.read()
    }

    /// Write the script and run it once in the foreground
    pub fn test(&self) -> Result<ScriptRun> {
        let path = self.script.write()?;
        info!("Testing automation script {}", path.display());

        let output = Command::new("bash")
            .arg(&path)
            .output()
            .with_context(|| format!("Failed to run {:?}", path))?;

        let run = ScriptRun {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        if run.success {
            info!("Automation script test completed successfully");
        } else {
            warn!("Automation script test failed");
        }
        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scheduler(dir: &TempDir, existing: &str) -> Scheduler<MemoryCrontab> {
        let script = AutomationScript {
            script_dir: dir.path().to_path_buf(),
            project_dir: dir.path().to_path_buf(),
            executable: PathBuf::from("/usr/local/bin/nba-stats-pipeline"),
            env: Vec::new(),
        };
        Scheduler::new(MemoryCrontab::new(existing), script)
    }

    #[test]
    fn test_install_twice_keeps_one_entry() {
        let dir = TempDir::new().unwrap();
        let scheduler = scheduler(&dir, "");

        let first = scheduler.install(&CronSchedule::daily()).unwrap();
        assert!(matches!(first, InstallOutcome::Installed { .. }));
        let second = scheduler.install(&CronSchedule::weekly()).unwrap();
        assert_eq!(second, InstallOutcome::AlreadyPresent);

        let table = scheduler.list().unwrap();
        assert_eq!(table.matches(cron::SCRIPT_NAME).count(), 1);
        assert!(table.contains("0 6 * * * "));
        assert!(dir.path().join(cron::SCRIPT_NAME).exists());
    }

    #[test]
    fn test_remove_restores_other_jobs() {
        let dir = TempDir::new().unwrap();
        let scheduler = scheduler(&dir, "30 2 * * * /usr/bin/backup\n");

        scheduler.install(&CronSchedule::weekly()).unwrap();
        assert!(scheduler.remove().unwrap());
        assert_eq!(scheduler.list().unwrap(), "30 2 * * * /usr/bin/backup\n");
        assert!(!scheduler.remove().unwrap());
    }
}
