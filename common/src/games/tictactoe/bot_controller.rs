use super::board::Board;
use super::types::{Mark, Outcome};
use super::win_detector::evaluate;

/// Depth that exhausts every line of play on a 3x3 board.
pub const FULL_DEPTH: u32 = 9;

const WIN_SCORE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchResult {
    pub score: i32,
    pub best_move: Option<usize>,
}

impl SearchResult {
    fn leaf(score: i32) -> Self {
        Self {
            score,
            best_move: None,
        }
    }
}

/// Minimax with alpha-beta pruning, scored from `maximizing`'s point of view.
///
/// `maximizing` is the mark to move at the root. Wins score `10 - depth`, losses
/// `depth - 10`, draws and nodes cut off at `depth_limit` score `0`. Moves are tried in
/// ascending index order and the first one reaching the best score is kept. A board
/// that is already decided returns its terminal score and no move.
pub fn search(board: &Board, depth_limit: u32, maximizing: Mark) -> SearchResult {
    if maximizing == Mark::Empty {
        return SearchResult::default();
    }
    minimax(board, 0, depth_limit, maximizing, maximizing, i32::MIN, i32::MAX)
}

fn terminal_score(outcome: Outcome, depth: i32, maximizing: Mark) -> Option<i32> {
    match outcome {
        Outcome::Won { mark, .. } if mark == maximizing => Some(WIN_SCORE - depth),
        Outcome::Won { .. } => Some(depth - WIN_SCORE),
        Outcome::Draw => Some(0),
        Outcome::InProgress => None,
    }
}

fn minimax(
    board: &Board,
    depth: u32,
    depth_limit: u32,
    to_move: Mark,
    maximizing: Mark,
    mut alpha: i32,
    mut beta: i32,
) -> SearchResult {
    if let Some(score) = terminal_score(evaluate(board), depth as i32, maximizing) {
        return SearchResult::leaf(score);
    }

    if depth >= depth_limit {
        return SearchResult::leaf(0);
    }

    let Some(next_to_move) = to_move.opponent() else {
        return SearchResult::leaf(0);
    };
    let is_maximizing = to_move == maximizing;

    let mut best = SearchResult {
        score: if is_maximizing { i32::MIN } else { i32::MAX },
        best_move: None,
    };

    for index in board.available_moves() {
        let Ok(next) = board.apply_move(index, to_move) else {
            continue;
        };
        let child = minimax(
            &next,
            depth + 1,
            depth_limit,
            next_to_move,
            maximizing,
            alpha,
            beta,
        );

        if is_maximizing {
            if child.score > best.score {
                best = SearchResult {
                    score: child.score,
                    best_move: Some(index),
                };
            }
            alpha = alpha.max(best.score);
        } else {
            if child.score < best.score {
                best = SearchResult {
                    score: child.score,
                    best_move: Some(index),
                };
            }
            beta = beta.min(best.score);
        }

        if beta <= alpha {
            break;
        }
    }

    best
}
