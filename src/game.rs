//! # Game State
//!
//! Ties the board, the player rotation and the run length together and runs
//! the per-move state machine:
//!
//! ```text
//! InProgress ──play──► Won(marker) | Drawn | EarlyDraw | InProgress
//! ```
//!
//! After each drop the alignment scanner checks the new position; if nothing
//! was won and the board is not full, the draw oracle decides whether anyone
//! can still win. `Won`, `Drawn` and `EarlyDraw` are terminal.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::instrument;

use crate::allocator;
use crate::board::{Board, Position};
use crate::config::{RulesConfig, VerticalRule};
use crate::error::RulesError;
use crate::marker::{Marker, Player};
use crate::oracle::DrawOracle;
use crate::reachability::Reachability;
use crate::scanner;

/// Where a game stands
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GameStatus {
    InProgress,
    /// A run of K was completed with this marker
    Won(Marker),
    /// The board filled up without a winner
    Drawn,
    /// Cells remain but nobody can complete a run any more
    EarlyDraw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Won(marker) => write!(f, "won by {}", marker.name()),
            GameStatus::Drawn => write!(f, "drawn"),
            GameStatus::EarlyDraw => write!(f, "early draw"),
        }
    }
}

/// Result of one successful move
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveOutcome {
    /// Where the marker landed
    pub position: Position,
    /// Turn index of the player who moved
    pub player: usize,
    /// Status after the move
    pub status: GameStatus,
}

/// The complete state of one game
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    players: Vec<Player>,
    /// Marker of each player, indexed by turn index
    markers: Vec<Marker>,
    run_length: usize,
    moves_played: usize,
    /// Turn index of the player about to move
    turn: usize,
    status: GameStatus,
    /// Positions of completed moves, oldest first
    history: Vec<Position>,
    detect_early_draw: bool,
    vertical_rule: VerticalRule,
    oracle: Arc<DrawOracle>,
}

impl GameState {
    /// Creates a game on `board`.
    ///
    /// The board may already hold markers, in which case the game resumes from
    /// it: the moves played equal the occupied cells and the turn continues the
    /// rotation from there.
    ///
    /// # Errors
    /// - `InvalidRunLength` unless `2 <= run_length <= min(rows, columns)` and
    ///   `run_length` is inside the configured range
    /// - `InvalidPlayerCount` unless `2 <= players <= cells / run_length`
    /// - `UnevenMoveDistribution` if the cells cannot be split evenly between players
    /// - `DuplicateMarker` if two players share a marker
    /// - `UnknownMarker` if the board holds a marker no player owns
    pub fn new(
        board: Board,
        players: Vec<Player>,
        run_length: usize,
        config: &RulesConfig,
    ) -> Result<Self, RulesError> {
        let min_run = config.min_run_length.max(2);
        let max_run = config
            .max_run_length
            .min(board.rows())
            .min(board.columns());
        if run_length < min_run || run_length > max_run {
            return Err(RulesError::InvalidRunLength {
                run_length,
                min: min_run,
                max: max_run,
            });
        }

        let cells = board.cell_count();
        let max_players = cells / run_length;
        if players.len() < 2 || players.len() > max_players {
            return Err(RulesError::InvalidPlayerCount {
                players: players.len(),
                max: max_players,
            });
        }
        if cells % players.len() != 0 {
            return Err(RulesError::UnevenMoveDistribution {
                cells,
                players: players.len(),
            });
        }

        let mut seen = HashSet::new();
        for player in &players {
            if !seen.insert(player.marker()) {
                return Err(RulesError::DuplicateMarker(player.marker().name()));
            }
        }
        if let Some(stray) = board
            .positions()
            .map(|p| board.cell(p.row, p.column))
            .find(|m| !m.is_empty() && !seen.contains(m))
        {
            return Err(RulesError::UnknownMarker(stray.name()));
        }

        let markers = players.iter().map(Player::marker).collect();
        let moves_played = cells - board.empty_count();
        let mut state = Self {
            turn: moves_played % players.len(),
            board,
            players,
            markers,
            run_length,
            moves_played,
            status: GameStatus::InProgress,
            history: Vec::new(),
            detect_early_draw: config.detect_early_draw,
            vertical_rule: config.vertical_rule,
            oracle: Arc::new(DrawOracle::from_config(config)),
        };
        state.status = state.initial_status();
        Ok(state)
    }

    /// Two players, classic board, connect four
    pub fn classic(first: Player, second: Player) -> Result<Self, RulesError> {
        Self::new(
            Board::classic(),
            vec![first, second],
            crate::config::CONNECT_FOUR,
            &RulesConfig::default(),
        )
    }

    /// Replaces the draw oracle, e.g. to share one thread pool between games
    pub fn with_oracle(mut self, oracle: Arc<DrawOracle>) -> Self {
        self.oracle = oracle;
        self
    }

    /// Status of a freshly created or resumed game
    fn initial_status(&self) -> GameStatus {
        let winner = self.board.positions().find_map(|p| {
            let marker = self.board.cell(p.row, p.column);
            if marker.is_empty() {
                return None;
            }
            scanner::has_win_at(&self.board, p, self.run_length)
                .ok()
                .filter(|&won| won)
                .map(|_| marker)
        });
        if let Some(marker) = winner {
            GameStatus::Won(marker)
        } else if self.board.is_full() {
            GameStatus::Drawn
        } else if self.detect_early_draw && self.moves_played > 0 && self.compute_early_draw() {
            GameStatus::EarlyDraw
        } else {
            GameStatus::InProgress
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The player whose turn it is
    pub fn active_player(&self) -> &Player {
        &self.players[self.turn]
    }

    /// Turn index of the player about to move
    pub fn current_turn(&self) -> usize {
        self.turn
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    pub fn run_length(&self) -> usize {
        self.run_length
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Position of the most recent move made through [`GameState::play`]
    pub fn last_position(&self) -> Option<Position> {
        self.history.last().copied()
    }

    /// Positions of the moves made through [`GameState::play`], oldest first
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Columns that can still take a marker
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        self.board.open_columns()
    }

    /// Read-only reachability view of the current position
    pub fn reachability(&self) -> Reachability<'_> {
        Reachability::new(&self.board, &self.markers, self.run_length, self.turn)
            .with_vertical_rule(self.vertical_rule)
    }

    /// Moves the player with turn index `player` will still make before the board fills
    pub fn remaining_moves(&self, player: usize) -> Result<usize, RulesError> {
        if player >= self.players.len() {
            return Err(RulesError::UnknownPlayer {
                index: player,
                players: self.players.len(),
            });
        }
        Ok(allocator::remaining_moves_for(
            self.board.cell_count() - self.moves_played,
            self.players.len(),
            self.turn,
            player,
        ))
    }

    /// True once every cell holds a marker
    pub fn is_draw(&self) -> bool {
        self.board.is_full()
    }

    /// True if the last move completed a run
    pub fn is_won(&self) -> bool {
        matches!(self.status, GameStatus::Won(_))
    }

    /// Asks the draw oracle whether nobody can win any more.
    ///
    /// This does not look for an existing winning run; a completed run counts
    /// as reachable, so a won board is never reported as an early draw.
    pub fn compute_early_draw(&self) -> bool {
        self.oracle.is_early_draw(&self.reachability())
    }

    /// Drops the active player's marker into `column` and advances the game.
    ///
    /// # Errors
    /// - `GameOver` once the game reached a terminal status
    /// - `ColumnOutOfBounds` for a column outside the board
    /// - `ColumnFull` if the column cannot take another marker; nothing changes
    #[instrument(level = "debug", skip(self), fields(turn = self.turn, moves = self.moves_played))]
    pub fn play(&mut self, column: usize) -> Result<MoveOutcome, RulesError> {
        if self.status.is_terminal() {
            return Err(RulesError::GameOver);
        }
        if self.board.is_column_full(column)? {
            return Err(RulesError::ColumnFull(column));
        }

        let player = self.turn;
        let marker = self.markers[player];
        let position = self.board.drop_marker(column, marker)?;
        self.history.push(position);
        self.moves_played += 1;
        self.turn = (self.turn + 1) % self.players.len();

        self.status = if scanner::has_win_at(&self.board, position, self.run_length)? {
            GameStatus::Won(marker)
        } else if self.board.is_full() {
            GameStatus::Drawn
        } else if self.detect_early_draw && self.compute_early_draw() {
            GameStatus::EarlyDraw
        } else {
            GameStatus::InProgress
        };

        tracing::debug!(%position, player, status = %self.status, "move applied");
        if self.status.is_terminal() {
            tracing::info!(moves = self.moves_played, status = %self.status, "game finished");
        }

        Ok(MoveOutcome {
            position,
            player,
            status: self.status,
        })
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(
            f,
            "connect {} | move {} | {} to play | {}",
            self.run_length,
            self.moves_played,
            self.active_player(),
            self.status
        )
    }
}
