//! # Random Playouts
//!
//! Plays games to the end with uniformly random legal moves. Used by the
//! benchmark binary to measure how early the draw oracle ends games, and by
//! the tests to drive the rule engine through many reachable positions.
//!
//! Every playout is seeded, so a batch is reproducible from its base seed no
//! matter how the work is spread over threads.

use std::collections::HashMap;

use parking_lot::Mutex;
use rand_xoshiro::rand_core::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::error::RulesError;
use crate::game::{GameState, GameStatus};
use crate::marker::Marker;

/// How one playout ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayoutRecord {
    pub status: GameStatus,
    /// Moves on the board when the game ended
    pub moves: usize,
    /// Empty cells left when the game ended
    pub empty_cells: usize,
    /// Move count at which the oracle first reported an early draw
    pub early_draw_at: Option<usize>,
    /// The oracle reported an early draw and the game later changed its mind
    /// (a win, or the oracle no longer reporting a draw)
    pub retracted_draw: bool,
}

/// Random move generator over a seeded xoshiro stream
#[derive(Debug, Clone)]
pub struct RandomPlayout {
    rng: Xoshiro256PlusPlus,
    play_through: bool,
}

impl RandomPlayout {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            play_through: false,
        }
    }

    /// Keep asking the oracle after every move instead of relying on the game
    /// to stop at an early draw. Only meaningful for games created with
    /// early-draw detection switched off; those keep going until the board is
    /// full or someone wins.
    pub fn play_through(mut self, enabled: bool) -> Self {
        self.play_through = enabled;
        self
    }

    /// Picks a random legal column, or `None` once the game is over
    pub fn choose_column(&mut self, state: &GameState) -> Option<usize> {
        let columns = state.legal_columns();
        if columns.is_empty() {
            return None;
        }
        let index = (self.rng.next_u64() % columns.len() as u64) as usize;
        Some(columns[index])
    }

    /// Plays `state` to a terminal status
    pub fn run(&mut self, mut state: GameState) -> Result<PlayoutRecord, RulesError> {
        let mut early_draw_at = match state.status() {
            GameStatus::EarlyDraw => Some(state.moves_played()),
            _ => None,
        };
        let mut retracted_draw = false;

        while let Some(column) = self.choose_column(&state) {
            let outcome = state.play(column)?;
            if outcome.status == GameStatus::EarlyDraw && early_draw_at.is_none() {
                early_draw_at = Some(state.moves_played());
            }
            if self.play_through && outcome.status == GameStatus::InProgress {
                let draw = state.compute_early_draw();
                match (early_draw_at, draw) {
                    (None, true) => early_draw_at = Some(state.moves_played()),
                    (Some(_), false) => retracted_draw = true,
                    _ => {}
                }
            }
            if early_draw_at.is_some() && matches!(outcome.status, GameStatus::Won(_)) {
                retracted_draw = true;
            }
        }

        Ok(PlayoutRecord {
            status: state.status(),
            moves: state.moves_played(),
            empty_cells: state.board().empty_count(),
            early_draw_at,
            retracted_draw,
        })
    }
}

/// Aggregate over a batch of playouts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayoutSummary {
    pub playouts: usize,
    pub wins: HashMap<Marker, usize>,
    pub full_board_draws: usize,
    pub early_draws: usize,
    pub total_moves: usize,
    /// Empty cells left on the board summed over early draws
    pub cells_saved: usize,
    pub retracted_draws: usize,
}

impl PlayoutSummary {
    pub fn record(&mut self, record: &PlayoutRecord) {
        self.playouts += 1;
        self.total_moves += record.moves;
        match record.status {
            GameStatus::Won(marker) => *self.wins.entry(marker).or_insert(0) += 1,
            GameStatus::Drawn => self.full_board_draws += 1,
            GameStatus::EarlyDraw => {
                self.early_draws += 1;
                self.cells_saved += record.empty_cells;
            }
            GameStatus::InProgress => {}
        }
        if record.retracted_draw {
            self.retracted_draws += 1;
        }
    }

    pub fn total_wins(&self) -> usize {
        self.wins.values().sum()
    }

    pub fn average_moves(&self) -> f64 {
        if self.playouts == 0 {
            return 0.0;
        }
        self.total_moves as f64 / self.playouts as f64
    }
}

/// Runs `count` playouts of `template` across a rayon pool.
///
/// # Arguments
/// * `template` - Starting position, cloned for every playout
/// * `count` - Number of playouts
/// * `seed` - Base seed; playout `i` uses `seed + i`
/// * `num_threads` - Worker threads. If 0, rayon picks the default.
/// * `play_through` - See [`RandomPlayout::play_through`]
pub fn run_batch(
    template: &GameState,
    count: usize,
    seed: u64,
    num_threads: usize,
    play_through: bool,
) -> Result<PlayoutSummary, RulesError> {
    let summary = Mutex::new(PlayoutSummary::default());
    let failure: Mutex<Option<RulesError>> = Mutex::new(None);

    let work = || {
        (0..count).into_par_iter().for_each(|i| {
            let mut playout = RandomPlayout::new(seed.wrapping_add(i as u64)).play_through(play_through);
            match playout.run(template.clone()) {
                Ok(record) => summary.lock().record(&record),
                Err(err) => {
                    failure.lock().get_or_insert(err);
                }
            }
        })
    };

    let pool_builder = ThreadPoolBuilder::new().thread_name(|i| format!("playout-{}", i));
    let pool_builder = if num_threads > 0 {
        pool_builder.num_threads(num_threads)
    } else {
        pool_builder
    };
    match pool_builder.build() {
        Ok(pool) => pool.install(work),
        Err(err) => {
            tracing::warn!(%err, "could not build playout thread pool, using the global pool");
            work();
        }
    }

    if let Some(err) = failure.into_inner() {
        return Err(err);
    }
    let summary = summary.into_inner();
    tracing::info!(
        playouts = summary.playouts,
        early_draws = summary.early_draws,
        retracted = summary.retracted_draws,
        "playout batch finished"
    );
    Ok(summary)
}
