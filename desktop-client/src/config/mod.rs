use clap::Parser;
use common::games::tictactoe::{SessionSettings, DEFAULT_THINK_DELAY};
use common::logger::LogLevel;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "tictactoe_client", version, about = "Tic-Tac-Toe against the computer")]
pub struct ClientArgs {
    /// Directory holding the saved difficulty and scores. Defaults to the executable's directory.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// How long the AI "thinks" before answering, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_THINK_DELAY.as_millis() as u64)]
    pub think_delay_ms: u64,

    /// Seed for the AI's random choices, for reproducible games.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}

impl ClientArgs {
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            think_delay: Duration::from_millis(self.think_delay_ms),
            seed: self.seed,
        }
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            return exe_dir.to_path_buf();
        }
        PathBuf::from(".")
    }
}
