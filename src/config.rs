//! Runtime configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `SACI_LOG_MODE` | `auto` (`file` when stdout is a terminal, else `stdout`) |
//! | `SACI_LOG_FILE` | `saci.log` |
//! | `SACI_VIEW` | `breakdown` |
//! | `SACI_SANITIZE_MAX_BYTES` | 16384 |

use std::path::PathBuf;

use crate::domain::ScoreView;

pub const ENV_LOG_MODE: &str = "SACI_LOG_MODE";
pub const ENV_LOG_FILE: &str = "SACI_LOG_FILE";
pub const ENV_VIEW: &str = "SACI_VIEW";
pub const ENV_SANITIZE_MAX_BYTES: &str = "SACI_SANITIZE_MAX_BYTES";

const DEFAULT_LOG_FILE: &str = "saci.log";

/// Default cap on bytes sanitized per log line (16 KiB).
pub const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// File when interactive, stdout otherwise
    #[default]
    Auto,
    File,
    Stdout,
}

impl LogMode {
    /// Resolve `Auto` against whether stdout is a terminal.
    ///
    /// Writing logs to the terminal would corrupt the TUI's alternate screen.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

impl std::str::FromStr for LogMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "file" => Ok(Self::File),
            "stdout" => Ok(Self::Stdout),
            other => Err(format!("Unknown log mode '{other}'")),
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    pub view: ScoreView,
    pub sanitize_max_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            view: ScoreView::Breakdown,
            sanitize_max_bytes: DEFAULT_SANITIZE_MAX_BYTES,
        }
    }
}

impl AppConfig {
    /// Load settings from the process environment.
    ///
    /// Unparseable values are reported in the returned warnings and replaced
    /// by defaults. Logging is not up yet when this runs, so the caller
    /// decides how to surface them.
    #[must_use]
    pub fn from_env() -> (Self, Vec<String>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut warnings = Vec::new();

        if let Some(raw) = lookup(ENV_LOG_MODE) {
            match raw.parse() {
                Ok(mode) => config.log_mode = mode,
                Err(e) => warnings.push(format!("{ENV_LOG_MODE}: {e}; using auto")),
            }
        }

        if let Some(path) = lookup(ENV_LOG_FILE).filter(|p| !p.trim().is_empty()) {
            config.log_file = PathBuf::from(path);
        }

        if let Some(raw) = lookup(ENV_VIEW) {
            match raw.parse() {
                Ok(view) => config.view = view,
                Err(e) => warnings.push(format!("{ENV_VIEW}: {e}; using breakdown")),
            }
        }

        if let Some(raw) = lookup(ENV_SANITIZE_MAX_BYTES) {
            match raw.trim().parse::<usize>() {
                Ok(v) if v > 0 => config.sanitize_max_bytes = v,
                _ => warnings.push(format!(
                    "{ENV_SANITIZE_MAX_BYTES}: '{raw}' is not a positive integer; using {DEFAULT_SANITIZE_MAX_BYTES}"
                )),
            }
        }

        (config, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let (config, warnings) = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_reads_all_variables() {
        let (config, warnings) = AppConfig::from_lookup(lookup_from(&[
            (ENV_LOG_MODE, "stdout"),
            (ENV_LOG_FILE, "/tmp/saci-test.log"),
            (ENV_VIEW, "composite"),
            (ENV_SANITIZE_MAX_BYTES, "4096"),
        ]));
        assert!(warnings.is_empty());
        assert_eq!(config.log_mode, LogMode::Stdout);
        assert_eq!(config.log_file, PathBuf::from("/tmp/saci-test.log"));
        assert_eq!(config.view, ScoreView::Composite);
        assert_eq!(config.sanitize_max_bytes, 4096);
    }

    #[test]
    fn test_bad_values_fall_back_with_warnings() {
        let (config, warnings) = AppConfig::from_lookup(lookup_from(&[
            (ENV_LOG_MODE, "syslog"),
            (ENV_VIEW, "pie"),
            (ENV_SANITIZE_MAX_BYTES, "0"),
        ]));
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}
