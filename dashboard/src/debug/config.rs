//! Logging configuration from environment variables

use std::path::PathBuf;

pub const DEFAULT_LOG_LEVEL: &str = "dashboard=info,warn";
pub const LOG_FILE_NAME: &str = "dashboard.log";

/// Logging system configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log directory (for rotation)
    pub log_dir: PathBuf,
    /// Log file path inside `log_dir`
    pub log_file: PathBuf,
    /// Log level filter (e.g., "dashboard=debug,info")
    pub log_level: String,
    /// Mirror log records to stderr
    pub stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        let log_dir = PathBuf::from("logs");
        Self {
            log_file: log_dir.join(LOG_FILE_NAME),
            log_dir,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            stderr: false,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_dir = lookup("FLUX_LOG_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("logs"));

        Self {
            log_file: log_dir.join(LOG_FILE_NAME),
            log_dir,
            log_level: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            stderr: lookup("FLUX_LOG_STDERR").is_some_and(|v| v == "1"),
        }
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LogConfig::from_lookup(|_| None);
        assert_eq!(config, LogConfig::default());
        assert_eq!(config.log_file, PathBuf::from("logs/dashboard.log"));
        assert!(!config.is_debug_enabled());
    }

    #[test]
    fn test_env_overrides() {
        let config = LogConfig::from_lookup(|key| match key {
            "FLUX_LOG_DIR" => Some("/tmp/flux".into()),
            "RUST_LOG" => Some("dashboard=debug".into()),
            "FLUX_LOG_STDERR" => Some("1".into()),
            _ => None,
        });

        assert_eq!(config.log_file, PathBuf::from("/tmp/flux/dashboard.log"));
        assert!(config.stderr);
        assert!(config.is_debug_enabled());
    }
}
