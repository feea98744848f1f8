//! # Alignment Scanner
//!
//! Decides whether the marker just placed at a position completes a run of
//! K identical markers. Only the windows that contain that position are
//! inspected, so the cost is proportional to K per direction and independent
//! of the board size. This is the check run after every single move.
//!
//! ## Algorithm
//! For each of the four directions:
//! 1. Clip the line through the position to the board, reaching at most K-1
//!    cells either way (see [`connectx_lines::span_through`]).
//! 2. The clipped span holds `span length - (K - 1)` candidate windows.
//! 3. A window wins iff each of its K-1 adjacent pairs holds two identical,
//!    non-empty markers.
//!
//! The scan stops at the first winning window.

use connectx_lines::{span_through, Direction, Window};
use tracing::instrument;

use crate::board::{Board, Position};
use crate::error::RulesError;

fn check_run_length(run_length: usize) -> Result<(), RulesError> {
    if run_length < 2 {
        return Err(RulesError::InvalidRunLength {
            run_length,
            min: 2,
            max: usize::MAX,
        });
    }
    Ok(())
}

/// Returns true if every adjacent pair in `window` holds two identical non-empty markers
pub(crate) fn is_winning_window(board: &Board, window: &Window) -> bool {
    (0..window.len - 1).all(|t| {
        let (r0, c0) = window.cell(t);
        let (r1, c1) = window.cell(t + 1);
        let first = board.cell(r0, c0);
        !first.is_empty() && first == board.cell(r1, c1)
    })
}

/// Finds a winning window through `position` in `direction`, if any
pub fn winning_window_in(
    board: &Board,
    position: Position,
    direction: Direction,
    run_length: usize,
) -> Option<Window> {
    let span = span_through(
        board.dimensions(),
        (position.row, position.column),
        direction,
        run_length,
    );
    span.windows().find(|w| is_winning_window(board, w))
}

/// Finds the first winning window through `position`, trying directions in
/// the order horizontal, vertical, ascending diagonal, descending diagonal.
pub fn winning_window(
    board: &Board,
    position: Position,
    run_length: usize,
) -> Result<Option<Window>, RulesError> {
    check_run_length(run_length)?;
    // Validates the position.
    board.cell_at(position)?;

    Ok(Direction::ALL
        .iter()
        .find_map(|&d| winning_window_in(board, position, d, run_length)))
}

/// Checks whether a run of `run_length` identical markers passes through `position`.
///
/// # Arguments
/// * `board` - The board to inspect; never modified
/// * `position` - Usually the position of the last drop
/// * `run_length` - K, at least 2
///
/// # Returns
/// `Ok(true)` if a winning run contains `position`, an error if the position
/// is off the board or K is below 2.
#[instrument(level = "trace", skip(board))]
pub fn has_win_at(board: &Board, position: Position, run_length: usize) -> Result<bool, RulesError> {
    Ok(winning_window(board, position, run_length)?.is_some())
}
