//! Runtime configuration resolved from flags, environment and defaults.

use std::path::PathBuf;
use taskboard_core::default_log_level;

const DEFAULT_DB_FILE_NAME: &str = "taskboard.sqlite3";

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Log level passed to `init_logging`.
    pub log_level: String,
    /// Absolute log directory; file logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl BoardConfig {
    /// Overlays explicitly supplied values on top of the defaults.
    ///
    /// Environment fallbacks are already folded into the arguments by clap.
    pub fn resolve(
        db_path: Option<PathBuf>,
        log_level: Option<String>,
        log_dir: Option<PathBuf>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            db_path: db_path.unwrap_or(defaults.db_path),
            log_level: log_level
                .filter(|level| !level.trim().is_empty())
                .unwrap_or(defaults.log_level),
            log_dir: log_dir.or(defaults.log_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BoardConfig;
    use std::path::PathBuf;

    #[test]
    fn defaults_apply_when_nothing_is_supplied() {
        let config = BoardConfig::resolve(None, None, None);
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.db_path, PathBuf::from("taskboard.sqlite3"));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn supplied_values_win_and_blank_level_is_ignored() {
        let config = BoardConfig::resolve(
            Some(PathBuf::from("/tmp/board.db")),
            Some("  ".to_string()),
            Some(PathBuf::from("/tmp/logs")),
        );
        assert_eq!(config.db_path, PathBuf::from("/tmp/board.db"));
        assert_eq!(config.log_level, BoardConfig::default().log_level);
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
    }
}
