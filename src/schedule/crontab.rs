use anyhow::{bail, Context, Result};
use std::cell::RefCell;
use std::io::Write;
use std::process::{Command, Stdio};

/// Access to the user's crontab
pub trait Crontab {
    /// Current contents; empty when no crontab exists yet
    fn read(&self) -> Result<String>;

    /// Replace the whole crontab
    fn write(&self, contents: &str) -> Result<()>;
}

/// The `crontab` binary on `PATH`
#[derive(Debug, Default)]
pub struct SystemCrontab;

impl Crontab for SystemCrontab {
    fn read(&self) -> Result<String> {
        let output = Command::new("crontab")
            .arg("-l")
            .output()
            .context("Failed to run crontab -l")?;

        // `crontab -l` exits non-zero when the user has no crontab
        if !output.status.success() {
            return Ok(String::new());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn write(&self, contents: &str) -> Result<()> {
        let mut child = Command::new("crontab")
            .arg("-")
            .stdin(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to run crontab -")?;

        child
            .stdin
            .take()
            .context("crontab stdin unavailable")?
            .write_all(contents.as_bytes())
            .context("Failed to write crontab")?;

        let output = child.wait_with_output()?;
        if !output.status.success() {
            bail!(
                "crontab rejected the new table: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}

/// Crontab held in memory
#[derive(Debug, Default)]
pub struct MemoryCrontab {
    contents: RefCell<String>,
}

impl MemoryCrontab {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: RefCell::new(contents.into()),
        }
    }

    pub fn contents(&self) -> String {
        self.contents.borrow().clone()
    }
}

impl Crontab for MemoryCrontab {
    fn read(&self) -> Result<String> {
        Ok(self.contents())
    }

    fn write(&self, contents: &str) -> Result<()> {
        *self.contents.borrow_mut() = contents.to_string();
        Ok(())
    }
}
