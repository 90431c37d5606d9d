mod audio;
mod board;
mod bot_controller;
mod difficulty;
mod game_state;
mod session;
mod storage;
mod types;
mod win_detector;

pub use audio::{AudioSink, SoundCue};
pub use board::Board;
pub use bot_controller::{search, SearchResult, FULL_DEPTH};
pub use difficulty::{calculate_move, MEDIUM_DEPTH, MEDIUM_RANDOM_CHANCE, OPENING_MOVES};
pub use game_state::TicTacToeGameState;
pub use session::{SessionSettings, TicTacToeSession, DEFAULT_THINK_DELAY};
pub use storage::{ConfigScoreStore, MemoryScoreStore, PersistedState, ScoreStore, STORAGE_KEY};
pub use types::{
    Difficulty, GameStatus, Mark, Outcome, Player, Scores, WinningLine, BOARD_SIZE, WINNING_LINES,
};
pub use win_detector::evaluate;
