//! # Rules Configuration
//!
//! Board and run-length bounds are start-of-game constants. They default to the
//! classic Connect X limits and can be narrowed (or widened) from a TOML file,
//! for instance to forbid boards larger than a renderer can show.
//!
//! ```toml
//! max_rows = 12
//! max_columns = 12
//! detect_early_draw = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONNECT_THREE: usize = 3;
pub const CONNECT_FOUR: usize = 4;
pub const CONNECT_FIVE: usize = 5;
pub const CONNECT_SIX: usize = 6;
pub const CONNECT_SEVEN: usize = 7;
pub const CONNECT_EIGHT: usize = 8;
pub const CONNECT_NINE: usize = 9;

pub const NB_ROWS_MIN: usize = 6;
pub const NB_ROWS_MAX: usize = 64;
pub const NB_COLUMNS_MIN: usize = 7;
pub const NB_COLUMNS_MAX: usize = 64;

/// How a vertical window is judged once its contents and the owner's budget
/// allow it. Columns fill bottom-up, so every cell under the window and inside
/// it must be filled before the run exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalRule {
    /// The owner must have enough moves to fill the column up to the top of
    /// the window on its own: the other players' remaining moves have to fit in
    /// the empty cells left once those cells are set aside.
    #[default]
    ColumnBudget,
    /// Only the moves the others make before the owner's last drop into the
    /// window are counted, and cells under the window count as room for them.
    TurnOrder,
}

/// Limits and switches consumed by the board, game and draw oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub min_rows: usize,
    pub max_rows: usize,
    pub min_columns: usize,
    pub max_columns: usize,
    pub min_run_length: usize,
    pub max_run_length: usize,
    /// Consult the draw oracle after every move that neither wins nor fills the board
    pub detect_early_draw: bool,
    /// Evaluate players and directions concurrently on a read-only board borrow
    pub parallel_oracle: bool,
    /// Worker threads for the parallel oracle; 0 means one per CPU
    pub oracle_threads: usize,
    pub vertical_rule: VerticalRule,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            min_rows: NB_ROWS_MIN,
            max_rows: NB_ROWS_MAX,
            min_columns: NB_COLUMNS_MIN,
            max_columns: NB_COLUMNS_MAX,
            min_run_length: 2,
            max_run_length: CONNECT_NINE,
            detect_early_draw: true,
            parallel_oracle: false,
            oracle_threads: 0,
            vertical_rule: VerticalRule::ColumnBudget,
        }
    }
}

impl RulesConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "rules config not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_rows == 0 || self.min_columns == 0 {
            return Err(ConfigError::Validation(
                "min_rows and min_columns must be > 0".into(),
            ));
        }
        if self.min_rows > self.max_rows {
            return Err(ConfigError::Validation(
                "min_rows must be <= max_rows".into(),
            ));
        }
        if self.min_columns > self.max_columns {
            return Err(ConfigError::Validation(
                "min_columns must be <= max_columns".into(),
            ));
        }
        if self.min_run_length < 2 {
            return Err(ConfigError::Validation(
                "min_run_length must be >= 2".into(),
            ));
        }
        if self.min_run_length > self.max_run_length {
            return Err(ConfigError::Validation(
                "min_run_length must be <= max_run_length".into(),
            ));
        }
        Ok(())
    }

    /// Thread count the parallel oracle should use
    pub fn effective_oracle_threads(&self) -> usize {
        if self.oracle_threads == 0 {
            num_cpus::get()
        } else {
            self.oracle_threads
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = RulesConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_rows, 6);
        assert_eq!(config.max_columns, 64);
        assert!(config.detect_early_draw);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RulesConfig::from_toml_str("max_rows = 12\nparallel_oracle = true\n").unwrap();
        assert_eq!(config.max_rows, 12);
        assert!(config.parallel_oracle);
        assert_eq!(config.min_columns, NB_COLUMNS_MIN);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = RulesConfig::from_toml_str("min_rows = 10\nmax_rows = 8\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_run_length_below_two_rejected() {
        let config = RulesConfig {
            min_run_length: 1,
            ..RulesConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_vertical_rule_from_toml() {
        assert_eq!(RulesConfig::default().vertical_rule, VerticalRule::ColumnBudget);
        let config = RulesConfig::from_toml_str("vertical_rule = \"turn_order\"\n").unwrap();
        assert_eq!(config.vertical_rule, VerticalRule::TurnOrder);
        assert!(RulesConfig::from_toml_str("vertical_rule = \"sideways\"\n").is_err());
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = RulesConfig::from_toml_str("max_rows = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "max_columns = 9\noracle_threads = 2").unwrap();

        let config = RulesConfig::load(&path).unwrap();
        assert_eq!(config.max_columns, 9);
        assert_eq!(config.effective_oracle_threads(), 2);
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = RulesConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, RulesConfig::default());
    }
}
