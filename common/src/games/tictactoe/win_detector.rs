use super::board::Board;
use super::types::{Mark, Outcome, WINNING_LINES};

/// Scans every winning line in table order; the first completed line decides the winner.
pub fn evaluate(board: &Board) -> Outcome {
    let cells = board.cells();
    for line in WINNING_LINES {
        let [a, b, c] = line;
        let mark = cells[a];
        if mark != Mark::Empty && mark == cells[b] && mark == cells[c] {
            return Outcome::Won { mark, line };
        }
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
