use crate::games::MoveRng;
use super::board::Board;
use super::bot_controller::{search, FULL_DEPTH};
use super::types::{Difficulty, Mark};

pub const MEDIUM_RANDOM_CHANCE: f64 = 0.3;
pub const MEDIUM_DEPTH: u32 = 3;

/// Corners and centre, equally weighted, for the hard bot's opening.
pub const OPENING_MOVES: [usize; 5] = [0, 2, 4, 6, 8];

/// Picks a move for `mark` on `board` according to `difficulty`.
///
/// Returns `None` only when the board has no empty cell. The returned index is always empty.
pub fn calculate_move(
    difficulty: Difficulty,
    board: &Board,
    mark: Mark,
    rng: &mut impl MoveRng,
) -> Option<usize> {
    let available_moves = board.available_moves();
    if available_moves.is_empty() {
        return None;
    }

    match difficulty {
        Difficulty::Easy => Some(random_move(&available_moves, rng)),
        Difficulty::Medium => {
            if rng.chance(MEDIUM_RANDOM_CHANCE) {
                Some(random_move(&available_moves, rng))
            } else {
                Some(searched_move(board, MEDIUM_DEPTH, mark, &available_moves))
            }
        }
        Difficulty::Hard => {
            if board.is_empty() {
                Some(OPENING_MOVES[rng.random_index(OPENING_MOVES.len())])
            } else {
                Some(searched_move(board, FULL_DEPTH, mark, &available_moves))
            }
        }
    }
}

fn random_move(available_moves: &[usize], rng: &mut impl MoveRng) -> usize {
    available_moves[rng.random_index(available_moves.len())]
}

fn searched_move(board: &Board, depth_limit: u32, mark: Mark, available_moves: &[usize]) -> usize {
    search(board, depth_limit, mark)
        .best_move
        .filter(|index| board.is_cell_empty(*index))
        .unwrap_or(available_moves[0])
}
