use serde::{Deserialize, Serialize};
use std::fmt;

pub const BOARD_SIZE: usize = 9;

pub type WinningLine = [usize; 3];

/// Rows, then columns, then diagonals. Scan order is the tie-break when a
/// reconstructed board holds more than one completed line.
pub const WINNING_LINES: [WinningLine; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Who owns a turn. The human always plays X and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Human,
    Ai,
}

impl Player {
    pub fn mark(&self) -> Mark {
        match self {
            Player::Human => Mark::X,
            Player::Ai => Mark::O,
        }
    }

    pub fn from_mark(mark: Mark) -> Option<Player> {
        match mark {
            Mark::X => Some(Player::Human),
            Mark::O => Some(Player::Ai),
            Mark::Empty => None,
        }
    }

    pub fn other(&self) -> Player {
        match self {
            Player::Human => Player::Ai,
            Player::Ai => Player::Human,
        }
    }
}

/// Result of scanning a board. Always derived, never stored apart from its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won { mark: Mark, line: WinningLine },
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Won { mark, .. } => Some(*mark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    pub player: u32,
    pub ai: u32,
    pub draws: u32,
}

impl Scores {
    pub fn record(&mut self, status: GameStatus) {
        match status {
            GameStatus::Won(Player::Human) => self.player = self.player.saturating_add(1),
            GameStatus::Won(Player::Ai) => self.ai = self.ai.saturating_add(1),
            GameStatus::Draw => self.draws = self.draws.saturating_add(1),
            GameStatus::InProgress => {}
        }
    }

    #[cfg(test)]
    pub(crate) const fn new(player: u32, ai: u32, draws: u32) -> Self {
        Self { player, ai, draws }
    }

    pub fn games_played(&self) -> u32 {
        self.player
            .saturating_add(self.ai)
            .saturating_add(self.draws)
    }
}
