//! # Reachability Analyzer
//!
//! Answers "can this player still complete a run in this direction?" by
//! scanning every K-length window of the direction over the whole board,
//! not just the windows near the last move.
//!
//! A window is reachable for a player when:
//! - every cell is empty or already holds the player's marker,
//! - the player has at least as many remaining moves as the window has empty cells,
//! - for vertical windows only, the column can be filled up to the window
//!   without the other players being pushed into it (see [`VerticalRule`]).

use connectx_lines::{windows_across, Direction, Window};

use crate::allocator::{moves_by_others_before, remaining_moves_for};
use crate::board::Board;
use crate::config::VerticalRule;
use crate::error::RulesError;
use crate::marker::Marker;

/// Verdict on one window for one player
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowStatus {
    /// Holds another player's marker
    Blocked,
    /// Needs more drops than the player has left
    OverBudget { empty: usize, budget: usize },
    /// Vertical window the other players would be forced into: their `others`
    /// moves do not fit in the `room` left for them
    Crowded { others: usize, room: usize },
    /// Still completable with `empty` more drops
    Reachable { empty: usize },
}

impl WindowStatus {
    pub fn is_reachable(self) -> bool {
        matches!(self, WindowStatus::Reachable { .. })
    }
}

/// Read-only view of a position used to test reachability
#[derive(Clone, Copy, Debug)]
pub struct Reachability<'a> {
    board: &'a Board,
    markers: &'a [Marker],
    run_length: usize,
    next_turn: usize,
    vertical_rule: VerticalRule,
}

impl<'a> Reachability<'a> {
    /// # Arguments
    /// * `board` - Position to analyse
    /// * `markers` - Marker of each player, indexed by turn index
    /// * `run_length` - K
    /// * `next_turn` - Turn index of the player about to move
    pub fn new(board: &'a Board, markers: &'a [Marker], run_length: usize, next_turn: usize) -> Self {
        Self {
            board,
            markers,
            run_length,
            next_turn,
            vertical_rule: VerticalRule::default(),
        }
    }

    pub fn with_vertical_rule(mut self, rule: VerticalRule) -> Self {
        self.vertical_rule = rule;
        self
    }

    pub fn player_count(&self) -> usize {
        self.markers.len()
    }

    fn check_player(&self, player: usize) -> Result<(), RulesError> {
        if player >= self.markers.len() {
            return Err(RulesError::UnknownPlayer {
                index: player,
                players: self.markers.len(),
            });
        }
        Ok(())
    }

    /// Moves `player` will still make before the board fills
    pub fn remaining_moves(&self, player: usize) -> Result<usize, RulesError> {
        self.check_player(player)?;
        Ok(self.budget(player))
    }

    fn budget(&self, player: usize) -> usize {
        remaining_moves_for(
            self.board.empty_count(),
            self.player_count(),
            self.next_turn,
            player,
        )
    }

    /// Classifies `window` for `player`
    pub fn window_status(&self, player: usize, window: &Window) -> Result<WindowStatus, RulesError> {
        self.check_player(player)?;
        Ok(self.classify(player, window))
    }

    /// `player` must be a valid turn index
    fn classify(&self, player: usize, window: &Window) -> WindowStatus {
        let marker = self.markers[player];
        let mut empty = 0;
        for (r, c) in window.cells() {
            let cell = self.board.cell(r, c);
            if cell.is_empty() {
                empty += 1;
            } else if cell != marker {
                return WindowStatus::Blocked;
            }
        }

        let budget = self.budget(player);
        if empty > budget {
            return WindowStatus::OverBudget { empty, budget };
        }

        if window.direction == Direction::Vertical && empty > 0 {
            let (bottom, column) = window.start;
            let height = self.board.height(column);
            let below = bottom.saturating_sub(height);
            let free = self.board.empty_count();
            let (others, room) = match self.vertical_rule {
                VerticalRule::ColumnBudget => (free - budget, free - (below + empty)),
                VerticalRule::TurnOrder => (
                    moves_by_others_before(self.player_count(), self.next_turn, player, empty),
                    free - (self.board.rows() - height) + below,
                ),
            };
            if others > room {
                return WindowStatus::Crowded { others, room };
            }
        }

        WindowStatus::Reachable { empty }
    }

    /// First reachable window for `player` in `direction`, scanning row-major
    pub fn reachable_window(&self, player: usize, direction: Direction) -> Result<Option<Window>, RulesError> {
        self.check_player(player)?;
        Ok(self.first_open(player, direction))
    }

    fn first_open(&self, player: usize, direction: Direction) -> Option<Window> {
        windows_across(self.board.dimensions(), direction, self.run_length)
            .find(|w| self.classify(player, w).is_reachable())
    }

    /// True if at least one window of `direction` remains winnable for `player`
    pub fn can_win(&self, player: usize, direction: Direction) -> Result<bool, RulesError> {
        self.check_player(player)?;
        Ok(self.line_open(player, direction))
    }

    /// True if `player` can still win in any direction
    pub fn can_win_any(&self, player: usize) -> Result<bool, RulesError> {
        self.check_player(player)?;
        Ok(Direction::ALL.iter().any(|&d| self.line_open(player, d)))
    }

    /// Unchecked [`Reachability::can_win`] for turn indices below [`Reachability::player_count`]
    pub(crate) fn line_open(&self, player: usize, direction: Direction) -> bool {
        self.first_open(player, direction).is_some()
    }
}
