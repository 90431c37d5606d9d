use std::fmt;

use crate::error::{GameError, GameResult};
use super::types::{Mark, Player, BOARD_SIZE};

/// 3x3 grid, row-major: 0-1-2 top row, 6-7-8 bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Mark; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Mark; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Parses nine characters of `X`, `O` and `.`/`_`/`-`/space; anything else is rejected.
    pub fn parse(text: &str) -> Option<Self> {
        let mut cells = [Mark::Empty; BOARD_SIZE];
        let mut count = 0;
        for c in text.chars() {
            if count == BOARD_SIZE {
                return None;
            }
            cells[count] = match c {
                'X' | 'x' => Mark::X,
                'O' | 'o' => Mark::O,
                '.' | '_' | '-' | ' ' => Mark::Empty,
                _ => return None,
            };
            count += 1;
        }
        (count == BOARD_SIZE).then_some(Self { cells })
    }

    pub fn cells(&self) -> &[Mark; BOARD_SIZE] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn is_cell_empty(&self, index: usize) -> bool {
        self.get(index) == Some(Mark::Empty)
    }

    /// Returns a new board with `mark` placed at `index`; `self` is left untouched.
    pub fn apply_move(&self, index: usize, mark: Mark) -> GameResult<Board> {
        if mark == Mark::Empty || !self.is_cell_empty(index) {
            return Err(GameError::InvalidMove { index });
        }
        let mut next = *self;
        next.cells[index] = mark;
        Ok(next)
    }

    pub fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Mark::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell != Mark::Empty).count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count() == BOARD_SIZE
    }

    /// Whose move it is, assuming the human opened the game.
    pub fn turn_by_parity(&self) -> Player {
        if self.occupied_count() % 2 == 0 {
            Player::Human
        } else {
            Player::Ai
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in chunk {
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}
