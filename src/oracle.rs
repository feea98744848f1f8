//! # Draw Oracle
//!
//! A game is an early draw when no player, in no direction, has a window left
//! that it could still complete. This can be decided long before the board
//! physically fills.
//!
//! The oracle only reads the board. In parallel mode the player/direction
//! pairs are spread over a dedicated rayon pool, all sharing one borrow of the
//! board, so every evaluation sees the position exactly as it stood when the
//! oracle was called.

use connectx_lines::Direction;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::instrument;

use crate::config::RulesConfig;
use crate::reachability::Reachability;

/// Early-draw detector
#[derive(Debug, Default)]
pub struct DrawOracle {
    /// Pool for parallel evaluation; `None` evaluates on the calling thread
    pool: Option<ThreadPool>,
}

impl DrawOracle {
    /// Oracle that evaluates on the calling thread and stops at the first open line
    pub fn sequential() -> Self {
        Self { pool: None }
    }

    /// Oracle backed by its own thread pool.
    ///
    /// # Arguments
    /// * `num_threads` - The number of worker threads. If 0, rayon picks the default.
    pub fn parallel(num_threads: usize) -> Self {
        let pool_builder = ThreadPoolBuilder::new().thread_name(|i| format!("draw-oracle-{}", i));
        let pool_builder = if num_threads > 0 {
            pool_builder.num_threads(num_threads)
        } else {
            pool_builder
        };
        match pool_builder.build() {
            Ok(pool) => Self { pool: Some(pool) },
            Err(err) => {
                tracing::warn!(%err, "could not build oracle thread pool, evaluating sequentially");
                Self::sequential()
            }
        }
    }

    pub fn from_config(config: &RulesConfig) -> Self {
        if config.parallel_oracle {
            Self::parallel(config.effective_oracle_threads())
        } else {
            Self::sequential()
        }
    }

    pub fn is_parallel(&self) -> bool {
        self.pool.is_some()
    }

    /// Returns true if no player can complete a run in any direction.
    #[instrument(level = "debug", skip_all, fields(players = view.player_count()))]
    pub fn is_early_draw(&self, view: &Reachability<'_>) -> bool {
        let lines: Vec<(usize, Direction)> = (0..view.player_count())
            .flat_map(|p| Direction::ALL.into_iter().map(move |d| (p, d)))
            .collect();

        let open = match &self.pool {
            Some(pool) => pool.install(|| lines.par_iter().any(|&(p, d)| view.line_open(p, d))),
            None => lines.iter().any(|&(p, d)| view.line_open(p, d)),
        };
        !open
    }

    /// Every (player, direction) pair that still has a reachable window
    pub fn open_lines(&self, view: &Reachability<'_>) -> Vec<(usize, Direction)> {
        let lines: Vec<(usize, Direction)> = (0..view.player_count())
            .flat_map(|p| Direction::ALL.into_iter().map(move |d| (p, d)))
            .collect();

        match &self.pool {
            Some(pool) => pool.install(|| {
                lines
                    .par_iter()
                    .copied()
                    .filter(|&(p, d)| view.line_open(p, d))
                    .collect()
            }),
            None => lines
                .into_iter()
                .filter(|&(p, d)| view.line_open(p, d))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::marker::Marker;

    const TWO: [Marker; 2] = [Marker::RED, Marker::YELLOW];

    /// Rows 0-4 full in a pattern without any four, plus `B . . A . . B` on row 5.
    fn blocked_board() -> Board {
        let mut board = Board::classic();
        for c in 0..7 {
            for r in 0..5 {
                let marker = if (r + c / 2) % 2 == 0 { Marker::RED } else { Marker::YELLOW };
                board.drop_marker(c, marker).unwrap();
            }
        }
        board.drop_marker(0, Marker::YELLOW).unwrap();
        board.drop_marker(3, Marker::RED).unwrap();
        board.drop_marker(6, Marker::YELLOW).unwrap();
        board
    }

    #[test]
    fn test_empty_board_is_not_a_draw() {
        let board = Board::classic();
        let view = Reachability::new(&board, &TWO, 4, 0);
        assert!(!DrawOracle::sequential().is_early_draw(&view));
        assert_eq!(DrawOracle::sequential().open_lines(&view).len(), 8);
    }

    #[test]
    fn test_blocked_board_is_early_draw() {
        let board = blocked_board();
        assert_eq!(board.empty_count(), 4);
        let view = Reachability::new(&board, &TWO, 4, 0);
        assert!(DrawOracle::sequential().is_early_draw(&view));
        assert!(DrawOracle::sequential().open_lines(&view).is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let parallel = DrawOracle::parallel(2);
        assert!(parallel.is_parallel());
        let sequential = DrawOracle::sequential();

        let open = Board::classic();
        let blocked = blocked_board();
        for (board, turn) in [(&open, 0), (&blocked, 0)] {
            let view = Reachability::new(board, &TWO, 4, turn);
            assert_eq!(parallel.is_early_draw(&view), sequential.is_early_draw(&view));
            let mut a = parallel.open_lines(&view);
            let mut b = sequential.open_lines(&view);
            a.sort_by_key(|&(p, d)| (p, d as usize));
            b.sort_by_key(|&(p, d)| (p, d as usize));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_from_config() {
        let config = RulesConfig {
            parallel_oracle: true,
            oracle_threads: 1,
            ..RulesConfig::default()
        };
        assert!(DrawOracle::from_config(&config).is_parallel());
        assert!(!DrawOracle::from_config(&RulesConfig::default()).is_parallel());
    }
}
