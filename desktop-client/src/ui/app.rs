use common::games::tictactoe::{
    Difficulty, GameStatus, Player, TicTacToeGameState, TicTacToeSession,
};
use eframe::egui;

use super::board::TicTacToeBoardUi;

pub struct TicTacToeApp {
    session: TicTacToeSession,
    board_ui: TicTacToeBoardUi,
}

pub fn status_text(state: &TicTacToeGameState) -> (&'static str, egui::Color32) {
    match state.status() {
        GameStatus::Won(Player::Human) => ("You won!", egui::Color32::from_rgb(22, 163, 74)),
        GameStatus::Won(Player::Ai) => ("AI won!", egui::Color32::from_rgb(220, 38, 38)),
        GameStatus::Draw => ("It's a draw!", egui::Color32::from_rgb(202, 138, 4)),
        GameStatus::InProgress if state.is_ai_thinking() => {
            ("AI is thinking...", egui::Color32::from_rgb(37, 99, 235))
        }
        GameStatus::InProgress => match state.current_player() {
            Player::Human => ("Your turn", egui::Color32::DARK_GRAY),
            Player::Ai => ("AI turn", egui::Color32::DARK_GRAY),
        },
    }
}

impl TicTacToeApp {
    pub fn new(session: TicTacToeSession) -> Self {
        Self {
            session,
            board_ui: TicTacToeBoardUi::new(),
        }
    }

    fn render_scores(&self, ui: &mut egui::Ui, state: &TicTacToeGameState) {
        let scores = state.scores();
        ui.group(|ui| {
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("Score").strong());
                ui.horizontal(|ui| {
                    for (label, value, color) in [
                        ("You", scores.player, egui::Color32::from_rgb(37, 99, 235)),
                        ("Draws", scores.draws, egui::Color32::from_rgb(202, 138, 4)),
                        ("AI", scores.ai, egui::Color32::from_rgb(220, 38, 38)),
                    ] {
                        ui.vertical(|ui| {
                            let text = egui::RichText::new(value.to_string())
                                .color(color)
                                .size(22.0)
                                .strong();
                            ui.label(text);
                            ui.label(label);
                        });
                        ui.add_space(16.0);
                    }
                });
            });
        });
    }

    fn render_difficulty(&mut self, ui: &mut egui::Ui, state: &TicTacToeGameState) {
        ui.horizontal(|ui| {
            ui.label("Difficulty:");
            ui.add_enabled_ui(!state.is_ai_thinking(), |ui| {
                for difficulty in Difficulty::ALL {
                    let selected = state.difficulty() == difficulty;
                    if ui.selectable_label(selected, difficulty.label()).clicked() && !selected {
                        self.session.set_difficulty(difficulty);
                    }
                }
            });
        });
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("New Game").clicked() {
                self.session.reset_board();
            }
            if ui.button("Reset Scores").clicked() {
                self.session.reset_scores();
            }
        });
    }
}

impl eframe::App for TicTacToeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = self.session.snapshot();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Tic Tac Toe");
                ui.add_space(8.0);

                self.render_difficulty(ui, &state);
                self.render_scores(ui, &state);

                let (text, color) = status_text(&state);
                ui.add_space(8.0);
                ui.label(egui::RichText::new(text).color(color).size(20.0));
                if state.is_ai_thinking() {
                    ui.spinner();
                }
                ui.add_space(8.0);

                if let Some(index) = self.board_ui.render(ui, &state) {
                    self.session.submit_human_move(index);
                }

                ui.add_space(12.0);
                self.render_controls(ui);
            });
        });
    }
}
