use std::path::PathBuf;

use ticketdesk_core::maturity::{
    MaturityThresholds, DEFAULT_AGING_HOURS, DEFAULT_DUE_SOON_HOURS, DEFAULT_DUE_WARNING_HOURS,
    DEFAULT_FRESH_HOURS,
};

use crate::error::DeskError;

/// Default number of days covered by a department report.
pub const DEFAULT_REPORT_WINDOW_DAYS: u32 = 30;

/// Longest accepted report window, roughly a century.
pub const MAX_REPORT_WINDOW_DAYS: u32 = 36_500;

/// Default snapshot location, relative to the working directory.
pub const DEFAULT_SNAPSHOT_PATH: &str = "snapshot.json";

/// Desk configuration loaded from environment variables.
///
/// Every field has a default, so an empty environment yields a working
/// configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DeskConfig {
    /// Classifier hour boundaries.
    pub thresholds: MaturityThresholds,
    /// Path of the JSON snapshot read by the report binary.
    pub snapshot_path: PathBuf,
    /// Days covered by the default report window (default: `30`).
    pub report_window_days: u32,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            thresholds: MaturityThresholds::default(),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            report_window_days: DEFAULT_REPORT_WINDOW_DAYS,
        }
    }
}

impl DeskConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default         |
    /// |----------------------------|-----------------|
    /// | `MATURITY_FRESH_HOURS`     | `72`            |
    /// | `MATURITY_AGING_HOURS`     | `144`           |
    /// | `MATURITY_DUE_SOON_HOURS`  | `24`            |
    /// | `MATURITY_DUE_WARN_HOURS`  | `72`            |
    /// | `SNAPSHOT_PATH`            | `snapshot.json` |
    /// | `REPORT_WINDOW_DAYS`       | `30`            |
    ///
    /// `REPORT_WINDOW_DAYS` must lie in `1..=MAX_REPORT_WINDOW_DAYS`.
    pub fn from_env() -> Result<Self, DeskError> {
        Self::from_lookup(|key: &str| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads values through
    /// `lookup`, so tests never touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DeskError> {
        let thresholds = MaturityThresholds {
            fresh_hours: parse_or(&lookup, "MATURITY_FRESH_HOURS", DEFAULT_FRESH_HOURS)?,
            aging_hours: parse_or(&lookup, "MATURITY_AGING_HOURS", DEFAULT_AGING_HOURS)?,
            due_soon_hours: parse_or(&lookup, "MATURITY_DUE_SOON_HOURS", DEFAULT_DUE_SOON_HOURS)?,
            due_warning_hours: parse_or(
                &lookup,
                "MATURITY_DUE_WARN_HOURS",
                DEFAULT_DUE_WARNING_HOURS,
            )?,
        };
        thresholds.validate()?;

        let snapshot_path = lookup("SNAPSHOT_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH));

        let report_window_days =
            parse_or(&lookup, "REPORT_WINDOW_DAYS", DEFAULT_REPORT_WINDOW_DAYS)?;
        if !(1..=MAX_REPORT_WINDOW_DAYS).contains(&report_window_days) {
            return Err(DeskError::Config(format!(
                "REPORT_WINDOW_DAYS must be between 1 and {MAX_REPORT_WINDOW_DAYS}, got {report_window_days}"
            )));
        }

        Ok(Self {
            thresholds,
            snapshot_path,
            report_window_days,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, DeskError> {
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| DeskError::Config(format!("{key} must be a valid number, got {raw:?}"))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;
    use ticketdesk_core::error::CoreError;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = DeskConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DeskConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = DeskConfig::from_lookup(lookup(&[
            ("MATURITY_FRESH_HOURS", "48"),
            ("MATURITY_DUE_WARN_HOURS", " 96 "),
            ("SNAPSHOT_PATH", "/tmp/desk.json"),
            ("REPORT_WINDOW_DAYS", "7"),
        ]))
        .unwrap();
        assert_eq!(config.thresholds.fresh_hours, 48);
        assert_eq!(config.thresholds.aging_hours, DEFAULT_AGING_HOURS);
        assert_eq!(config.thresholds.due_warning_hours, 96);
        assert_eq!(config.snapshot_path, PathBuf::from("/tmp/desk.json"));
        assert_eq!(config.report_window_days, 7);
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        let err = DeskConfig::from_lookup(lookup(&[("MATURITY_AGING_HOURS", "soon")])).unwrap_err();
        assert_matches!(err, DeskError::Config(msg) if msg.contains("MATURITY_AGING_HOURS"));
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let err = DeskConfig::from_lookup(lookup(&[
            ("MATURITY_FRESH_HOURS", "200"),
            ("MATURITY_AGING_HOURS", "100"),
        ]))
        .unwrap_err();
        assert_matches!(err, DeskError::Core(CoreError::Validation(_)));
    }

    #[test]
    fn zero_day_window_is_rejected() {
        let err = DeskConfig::from_lookup(lookup(&[("REPORT_WINDOW_DAYS", "0")])).unwrap_err();
        assert_matches!(err, DeskError::Config(_));
    }

    #[test]
    fn oversized_window_is_rejected() {
        let err =
            DeskConfig::from_lookup(lookup(&[("REPORT_WINDOW_DAYS", "200000000")])).unwrap_err();
        assert_matches!(err, DeskError::Config(msg) if msg.contains("REPORT_WINDOW_DAYS"));

        let max = MAX_REPORT_WINDOW_DAYS.to_string();
        let config = DeskConfig::from_lookup(lookup(&[("REPORT_WINDOW_DAYS", max.as_str())])).unwrap();
        assert_eq!(config.report_window_days, MAX_REPORT_WINDOW_DAYS);
    }
}
