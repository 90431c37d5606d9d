use common::games::GameBroadcaster;
use common::games::tictactoe::TicTacToeGameState;
use common::log;
use eframe::egui;

/// Wakes the UI when the AI task changes the board from a runtime thread.
pub struct RepaintBroadcaster {
    ctx: egui::Context,
}

impl RepaintBroadcaster {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl GameBroadcaster<TicTacToeGameState> for RepaintBroadcaster {
    fn broadcast_state(&self, _state: &TicTacToeGameState) {
        self.ctx.request_repaint();
    }

    fn broadcast_game_over(&self, state: &TicTacToeGameState) {
        log!("Final board:\n{}", state.board());
    }
}
