use connectx::allocator::allocate;
use connectx::{Board, DrawOracle, GameState, GameStatus, Marker, Player, Position, RulesConfig, RulesError};
use std::sync::Arc;

fn red_and_yellow() -> Vec<Player> {
    vec![
        Player::new("Red", Marker::RED).expect("Valid player"),
        Player::new("Yellow", Marker::YELLOW).expect("Valid player"),
    ]
}

/// Rows 0-4 filled in column pairs so that no four line up anywhere, then
/// `Y . . R . . Y` on row 5. Red is next with two moves left, as is yellow.
fn blocked_board() -> Board {
    let mut board = Board::classic();
    for column in 0..7 {
        for row in 0..5 {
            let marker = if (row + column / 2) % 2 == 0 { Marker::RED } else { Marker::YELLOW };
            connectx::drop_marker(&mut board, column, marker).expect("Drop failed");
        }
    }
    for (column, marker) in [(0, Marker::YELLOW), (3, Marker::RED), (6, Marker::YELLOW)] {
        connectx::drop_marker(&mut board, column, marker).expect("Drop failed");
    }
    board
}

#[test]
fn test_fourth_drop_on_row_zero_wins() {
    let mut board = Board::classic();
    let mut last = Position::new(0, 0);
    for column in 0..3 {
        last = connectx::drop_marker(&mut board, column, Marker::RED).expect("Drop failed");
    }
    assert!(!connectx::has_win_at(&board, last, 4).expect("Valid query"));

    last = connectx::drop_marker(&mut board, 3, Marker::RED).expect("Drop failed");
    assert_eq!(last, Position::new(0, 3));
    assert!(connectx::has_win_at(&board, last, 4).expect("Valid query"));
}

#[test]
fn test_blocked_board_is_an_early_draw() {
    let board = blocked_board();
    assert_eq!(board.empty_count(), 4);

    let game = GameState::new(board, red_and_yellow(), 4, &RulesConfig::default()).expect("Failed to create game");
    assert_eq!(game.moves_played(), 38);
    assert_eq!(game.current_turn(), 0);
    assert_eq!(connectx::remaining_moves(&game, 0).expect("Known player"), 2);
    assert_eq!(connectx::remaining_moves(&game, 1).expect("Known player"), 2);
    assert!(connectx::compute_early_draw(&game));
    assert_eq!(game.status(), GameStatus::EarlyDraw);
    assert!(!game.is_draw());
}

#[test]
fn test_parallel_oracle_agrees_on_blocked_board() {
    let config = RulesConfig {
        parallel_oracle: true,
        oracle_threads: 2,
        ..RulesConfig::default()
    };
    let game = GameState::new(blocked_board(), red_and_yellow(), 4, &config).expect("Failed to create game");
    assert_eq!(game.status(), GameStatus::EarlyDraw);

    let shared = Arc::new(DrawOracle::parallel(2));
    let open = GameState::new(Board::classic(), red_and_yellow(), 4, &config)
        .expect("Failed to create game")
        .with_oracle(shared);
    assert!(!connectx::compute_early_draw(&open));
}

#[test]
fn test_extra_move_goes_to_next_player() {
    assert_eq!(allocate(10, 3, 1), vec![3, 4, 3]);
}

#[test]
fn test_game_reaches_early_draw_by_playing() {
    // Rows 0-4 of the blocked board, then the top row played through the game.
    let mut board = Board::classic();
    for column in 0..7 {
        for row in 0..5 {
            let marker = if (row + column / 2) % 2 == 0 { Marker::RED } else { Marker::YELLOW };
            connectx::drop_marker(&mut board, column, marker).expect("Drop failed");
        }
    }
    let mut game = GameState::new(board, red_and_yellow(), 4, &RulesConfig::default()).expect("Failed to create game");
    assert_eq!(game.status(), GameStatus::InProgress);
    assert_eq!(game.current_turn(), 1);

    // Yellow still has 0-3 on the top row.
    let outcome = game.play(0).expect("Legal move");
    assert_eq!(outcome.status, GameStatus::InProgress);

    // Red in column 3 cuts every yellow window; red's own need 3 drops with 2 left.
    let outcome = game.play(3).expect("Legal move");
    assert_eq!(outcome.status, GameStatus::EarlyDraw);
    assert_eq!(game.board().empty_count(), 5);
    assert_eq!(game.play(6), Err(RulesError::GameOver));
}

#[test]
fn test_full_column_drop_is_a_no_op_on_the_board() {
    let mut board = Board::classic();
    for _ in 0..6 {
        connectx::drop_marker(&mut board, 2, Marker::RED).expect("Drop failed");
    }
    let top = connectx::drop_marker(&mut board, 2, Marker::YELLOW).expect("Drop failed");
    assert_eq!(top, Position::new(5, 2));
    assert_eq!(board.cell_at(top).expect("Cell in range"), Marker::RED);
    assert_eq!(board.empty_count(), 36);
}

#[test]
fn test_out_of_range_and_empty_marker_are_rejected() {
    let mut board = Board::classic();
    assert!(matches!(
        connectx::drop_marker(&mut board, 7, Marker::RED),
        Err(RulesError::ColumnOutOfBounds { column: 7, columns: 7 })
    ));
    assert_eq!(
        connectx::drop_marker(&mut board, 0, Marker::EMPTY),
        Err(RulesError::EmptyMarker)
    );
    assert!(matches!(
        connectx::has_win_at(&board, Position::new(6, 0), 4),
        Err(RulesError::PositionOutOfBounds { .. })
    ));
    assert!(matches!(
        Board::new(5, 7, &RulesConfig::default()),
        Err(RulesError::InvalidDimensions { .. })
    ));
}
