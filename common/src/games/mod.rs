mod broadcaster;
mod session_rng;

pub mod tictactoe;

pub use broadcaster::{GameBroadcaster, NoopBroadcaster};
pub use session_rng::{MoveRng, SessionRng};
