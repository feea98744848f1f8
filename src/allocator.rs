//! # Remaining-Move Allocator
//!
//! Splits the cells still empty between the players in turn order. Every
//! player gets `R div N` moves; the `R mod N` leftover moves go to the players
//! next to act, starting with whoever's turn it is.

/// Number of moves `player` will still make before the board fills.
///
/// # Arguments
/// * `remaining_cells` - R, the number of empty cells left
/// * `player_count` - N, the number of players in the rotation
/// * `next_turn` - Turn index of the player about to move
/// * `player` - Turn index of the player asked about
pub fn remaining_moves_for(remaining_cells: usize, player_count: usize, next_turn: usize, player: usize) -> usize {
    if player_count == 0 {
        return 0;
    }
    let base = remaining_cells / player_count;
    let extra = remaining_cells % player_count;
    // Distance in the rotation from the player about to move.
    let distance = (player % player_count + player_count - next_turn % player_count) % player_count;
    if distance < extra {
        base + 1
    } else {
        base
    }
}

/// Remaining moves of every player, indexed by turn index
pub fn allocate(remaining_cells: usize, player_count: usize, next_turn: usize) -> Vec<usize> {
    (0..player_count)
        .map(|p| remaining_moves_for(remaining_cells, player_count, next_turn, p))
        .collect()
}

/// Number of moves the other players make before `player` has made `own_moves`
/// more moves, assuming strict rotation starting at `next_turn`.
pub fn moves_by_others_before(player_count: usize, next_turn: usize, player: usize, own_moves: usize) -> usize {
    if own_moves == 0 || player_count == 0 {
        return 0;
    }
    let wait = (player % player_count + player_count - next_turn % player_count) % player_count;
    wait + (own_moves - 1) * (player_count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_move_goes_to_next_player() {
        assert_eq!(allocate(10, 3, 1), vec![3, 4, 3]);
    }

    #[test]
    fn test_extras_wrap_around_the_rotation() {
        assert_eq!(allocate(11, 3, 2), vec![4, 3, 4]);
        assert_eq!(allocate(5, 4, 3), vec![1, 1, 1, 2]);
    }

    #[test]
    fn test_even_split() {
        assert_eq!(allocate(42, 2, 0), vec![21, 21]);
        assert_eq!(allocate(0, 3, 2), vec![0, 0, 0]);
    }

    #[test]
    fn test_allocation_is_fair() {
        for r in 0..50 {
            for n in 1..7 {
                for t in 0..n {
                    let shares = allocate(r, n, t);
                    assert_eq!(shares.iter().sum::<usize>(), r);
                    let max = *shares.iter().max().unwrap();
                    let min = *shares.iter().min().unwrap();
                    assert!(max - min <= 1);
                }
            }
        }
    }

    #[test]
    fn test_moves_by_others() {
        // Player about to move needs one move: nobody else plays first.
        assert_eq!(moves_by_others_before(2, 0, 0, 1), 0);
        assert_eq!(moves_by_others_before(2, 0, 0, 3), 2);
        // Player 2 of 3 waits for players 0 and 1.
        assert_eq!(moves_by_others_before(3, 0, 2, 1), 2);
        assert_eq!(moves_by_others_before(3, 0, 2, 2), 4);
        assert_eq!(moves_by_others_before(3, 1, 0, 0), 0);
    }
}
