use std::path::PathBuf;

/// Precondition violations raised by the board and game operations.
///
/// None of these are recoverable by the engine itself; they are returned to
/// the caller at the point where the invariant would otherwise be broken.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("column {column} is outside a board of {columns} columns")]
    ColumnOutOfBounds { column: usize, columns: usize },

    #[error("position ({row}, {column}) is outside a {rows}x{columns} board")]
    PositionOutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    #[error("board of {rows}x{columns} is outside the allowed {min_rows}..={max_rows} rows by {min_columns}..={max_columns} columns")]
    InvalidDimensions {
        rows: usize,
        columns: usize,
        min_rows: usize,
        max_rows: usize,
        min_columns: usize,
        max_columns: usize,
    },

    #[error("run length {run_length} must be in {min}..={max}")]
    InvalidRunLength { run_length: usize, min: usize, max: usize },

    #[error("{players} players cannot share this board (allowed: 2..={max})")]
    InvalidPlayerCount { players: usize, max: usize },

    #[error("{cells} cells cannot be split evenly between {players} players")]
    UnevenMoveDistribution { cells: usize, players: usize },

    #[error("marker {0} is used by more than one player")]
    DuplicateMarker(String),

    #[error("marker {0} on the board belongs to no player")]
    UnknownMarker(String),

    #[error("the empty marker cannot be dropped or assigned to a player")]
    EmptyMarker,

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameOver,

    #[error("player index {index} is outside a game of {players} players")]
    UnknownPlayer { index: usize, players: usize },
}

/// Errors that can occur when loading a rules configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
