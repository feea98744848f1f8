//! # Connect X Rules
//!
//! Rule engine for generalized Connect-K drop games: any board between 6x7 and
//! 64x64, any run length K from 2 up to the smaller board side, and any number
//! of players that can share the board evenly.
//!
//! The engine decides two things after every move:
//! - whether the marker just dropped completes a run of K ([`scanner`]),
//! - whether the game can already be called a draw because no player can
//!   complete a run any more, even though cells remain ([`oracle`]).
//!
//! ## Layout
//! - [`board`]: the grid and gravity drops
//! - [`scanner`]: local win detection around one position
//! - [`allocator`]: how many moves each player has left
//! - [`reachability`]: which windows a player can still complete
//! - [`oracle`]: early-draw detection over all players and directions
//! - [`game`]: the per-move state machine tying everything together
//! - [`playout`]: seeded random playouts for benchmarks and tests
//!
//! ## Example
//! ```
//! use connectx::{Board, Marker, Position};
//!
//! let mut board = Board::classic();
//! for column in 0..4 {
//!     connectx::drop_marker(&mut board, column, Marker::RED).unwrap();
//! }
//! assert!(connectx::has_win_at(&board, Position::new(0, 3), 4).unwrap());
//! ```

pub mod allocator;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod marker;
pub mod oracle;
pub mod playout;
pub mod reachability;
pub mod scanner;

pub use board::{Board, Position};
pub use config::RulesConfig;
pub use connectx_lines::{windows_across, Dimensions, Direction, Window};
pub use error::{ConfigError, RulesError};
pub use game::{GameState, GameStatus, MoveOutcome};
pub use marker::{Marker, Player};
pub use oracle::DrawOracle;
pub use playout::{PlayoutRecord, PlayoutSummary, RandomPlayout};
pub use reachability::{Reachability, WindowStatus};

/// Drops `marker` into `column` of `board` and returns where it landed.
///
/// A full column is left untouched and its top cell is returned.
pub fn drop_marker(board: &mut Board, column: usize, marker: Marker) -> Result<Position, RulesError> {
    board.drop_marker(column, marker)
}

/// True if the marker at `position` is part of a run of `run_length` identical markers
pub fn has_win_at(board: &Board, position: Position, run_length: usize) -> Result<bool, RulesError> {
    scanner::has_win_at(board, position, run_length)
}

/// True if no player of `state` can complete a run any more
pub fn compute_early_draw(state: &GameState) -> bool {
    state.compute_early_draw()
}

/// Moves the player with turn index `player` still gets before the board fills
pub fn remaining_moves(state: &GameState, player: usize) -> Result<usize, RulesError> {
    state.remaining_moves(player)
}
