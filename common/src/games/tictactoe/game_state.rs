use crate::games::MoveRng;
use crate::{log, log_debug};
use super::board::Board;
use super::difficulty::calculate_move;
use super::types::{Difficulty, GameStatus, Outcome, Player, Scores, WinningLine};
use super::win_detector::evaluate;

/// Authoritative state of one human-versus-AI session.
///
/// Every rejected action is a no-op that reports `false`; nothing here panics on
/// routine UI input such as clicking an occupied cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeGameState {
    board: Board,
    current_player: Player,
    status: GameStatus,
    winning_line: Option<WinningLine>,
    ai_thinking: bool,
    difficulty: Difficulty,
    scores: Scores,
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new(Difficulty::default(), Scores::default())
    }
}

impl TicTacToeGameState {
    pub fn new(difficulty: Difficulty, scores: Scores) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::Human,
            status: GameStatus::InProgress,
            winning_line: None,
            ai_thinking: false,
            difficulty,
            scores,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        self.winning_line
    }

    pub fn is_ai_thinking(&self) -> bool {
        self.ai_thinking
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn is_game_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    pub fn can_human_move(&self) -> bool {
        self.status == GameStatus::InProgress
            && self.current_player == Player::Human
            && !self.ai_thinking
    }

    /// Places the human's mark. On success the AI flag is raised unless the move ended the game.
    pub fn submit_human_move(&mut self, index: usize) -> bool {
        if !self.can_human_move() || !self.board.is_cell_empty(index) {
            return false;
        }
        log_debug!("Human plays {}", index);
        self.place(Player::Human, index)
    }

    /// Applies an AI move chosen elsewhere. Only valid while the AI flag is raised.
    pub fn apply_ai_move(&mut self, index: usize) -> bool {
        if !self.ai_thinking
            || self.status != GameStatus::InProgress
            || self.current_player != Player::Ai
            || !self.board.is_cell_empty(index)
        {
            return false;
        }
        log_debug!("AI ({}) plays {}", self.difficulty.label(), index);
        self.place(Player::Ai, index)
    }

    /// Chooses the AI move with the current difficulty and applies it, without any delay.
    pub fn compute_ai_move(&mut self, rng: &mut impl MoveRng) -> Option<usize> {
        if !self.ai_thinking {
            return None;
        }
        let index = calculate_move(self.difficulty, &self.board, Player::Ai.mark(), rng)?;
        self.apply_ai_move(index).then_some(index)
    }

    pub fn reset_board(&mut self) {
        *self = Self::new(self.difficulty, self.scores);
    }

    pub fn reset_scores(&mut self) {
        self.scores = Scores::default();
    }

    /// Rejected while an AI move is in flight; the pending move keeps the tier it started with.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.ai_thinking {
            return false;
        }
        self.difficulty = difficulty;
        true
    }

    fn place(&mut self, player: Player, index: usize) -> bool {
        let Ok(board) = self.board.apply_move(index, player.mark()) else {
            return false;
        };

        let outcome = evaluate(&board);
        let (status, winning_line) = match outcome {
            Outcome::InProgress => (GameStatus::InProgress, None),
            Outcome::Draw => (GameStatus::Draw, None),
            Outcome::Won { mark, line } => match Player::from_mark(mark) {
                Some(winner) => (GameStatus::Won(winner), Some(line)),
                None => return false,
            },
        };

        self.board = board;
        self.status = status;
        self.winning_line = winning_line;

        if status == GameStatus::InProgress {
            self.current_player = player.other();
            self.ai_thinking = self.current_player == Player::Ai;
            debug_assert_eq!(self.current_player, self.board.turn_by_parity());
        } else {
            self.ai_thinking = false;
            self.scores.record(status);
            log!(
                "Game over: {:?} (you {} / draws {} / AI {})",
                status,
                self.scores.player,
                self.scores.draws,
                self.scores.ai
            );
        }
        true
    }
}
