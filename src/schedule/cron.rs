use crate::error::PipelineError;
use std::fmt;

/// Comment line written above the managed crontab entry
pub const MARKER: &str = "# NBA Data Automation";

/// File name of the automation script, also used to detect an installed entry
pub const SCRIPT_NAME: &str = "run_nba_pipeline.sh";

/// A validated five-field cron expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronSchedule(String);

impl CronSchedule {
    /// Every day at 06:00
    pub fn daily() -> Self {
        Self("0 6 * * *".to_string())
    }

    /// Mondays at 06:00
    pub fn weekly() -> Self {
        Self("0 6 * * 1".to_string())
    }

    /// Checks field count and the characters each field may contain.
    /// Ranges are not checked against the calendar; cron itself rejects those.
    pub fn parse(expr: &str) -> Result<Self, PipelineError> {
        let invalid = |reason: &str| PipelineError::InvalidSchedule(expr.to_string(), reason.to_string());

        let fields: Vec<&str> = expr.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(invalid(&format!("expected 5 fields, found {}", fields.len())));
        }

        for field in &fields {
            if let Some(c) = field
                .chars()
                .find(|c| !(c.is_ascii_digit() || matches!(c, '*' | '/' | ',' | '-')))
            {
                return Err(invalid(&format!("unexpected character '{}' in '{}'", c, field)));
            }
        }

        Ok(Self(fields.join(" ")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CronSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// True when the crontab already carries the automation entry
pub fn has_entry(crontab: &str) -> bool {
    crontab.contains(SCRIPT_NAME)
}

/// Crontab text with the marker and `entry` appended, or `None` if an
/// automation entry is already present
pub fn add_entry(crontab: &str, entry: &str) -> Option<String> {
    if has_entry(crontab) {
        return None;
    }

    let existing = crontab.trim_end();
    let mut updated = String::with_capacity(existing.len() + entry.len() + MARKER.len() + 3);
    if !existing.is_empty() {
        updated.push_str(existing);
        updated.push('\n');
    }
    updated.push_str(MARKER);
    updated.push('\n');
    updated.push_str(entry);
    updated.push('\n');
    Some(updated)
}

/// Crontab text with the marker and automation lines dropped
pub fn remove_entry(crontab: &str) -> String {
    let marker_text = MARKER.trim_start_matches("# ");
    let kept: Vec<&str> = crontab
        .lines()
        .filter(|line| !line.contains(marker_text) && !line.contains(SCRIPT_NAME))
        .collect();

    let mut updated = kept.join("\n").trim_end().to_string();
    if !updated.is_empty() {
        updated.push('\n');
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_presets_and_steps() {
        assert_eq!(CronSchedule::parse("0 6 * * *").unwrap(), CronSchedule::daily());
        assert_eq!(CronSchedule::parse(" 0  6 * * 1 ").unwrap(), CronSchedule::weekly());
        assert_eq!(
            CronSchedule::parse("0 */6 * * 1-5").unwrap().as_str(),
            "0 */6 * * 1-5"
        );
        assert!(CronSchedule::parse("15,45 0 1 1,7 *").is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            CronSchedule::parse("0 6 * *"),
            Err(PipelineError::InvalidSchedule(..))
        ));
        assert!(CronSchedule::parse("0 6 * * * *").is_err());
        assert!(CronSchedule::parse("@daily").is_err());
        assert!(CronSchedule::parse("0 6 * * MON").is_err());
        assert!(CronSchedule::parse("").is_err());
    }

    #[test]
    fn test_add_entry_is_idempotent() {
        let entry = "0 6 * * * /opt/nba/run_nba_pipeline.sh";
        let first = add_entry("", entry).unwrap();
        assert_eq!(first, format!("{}\n{}\n", MARKER, entry));
        assert!(add_entry(&first, entry).is_none());
    }

    #[test]
    fn test_add_entry_keeps_existing_jobs() {
        let current = "30 2 * * * /usr/bin/backup\n\n";
        let updated = add_entry(current, "0 6 * * 1 /x/run_nba_pipeline.sh").unwrap();
        assert!(updated.starts_with("30 2 * * * /usr/bin/backup\n# NBA"));
        assert!(updated.ends_with("run_nba_pipeline.sh\n"));
    }

    #[test]
    fn test_remove_entry_leaves_other_jobs() {
        let current = "30 2 * * * /usr/bin/backup\n# NBA Data Automation\n0 6 * * * /x/run_nba_pipeline.sh\n";
        assert_eq!(remove_entry(current), "30 2 * * * /usr/bin/backup\n");
        assert_eq!(remove_entry("# NBA Data Automation\n0 6 * * * /x/run_nba_pipeline.sh\n"), "");
    }
}
