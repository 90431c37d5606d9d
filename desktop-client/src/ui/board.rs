use common::games::tictactoe::{Mark, TicTacToeGameState};
use eframe::egui;

/// Paints the 3x3 grid and turns clicks into cell indices.
pub struct TicTacToeBoardUi {
    last_hover: Option<usize>,
}

impl TicTacToeBoardUi {
    const MIN_CELL_SIZE: f32 = 60.0;
    const MAX_CELL_SIZE: f32 = 140.0;
    const LINE_WIDTH: f32 = 2.0;
    const MARK_WIDTH: f32 = 6.0;

    pub fn new() -> Self {
        Self { last_hover: None }
    }

    pub fn calculate_cell_size(available_width: f32, available_height: f32) -> f32 {
        (available_width.min(available_height) / 3.0)
            .clamp(Self::MIN_CELL_SIZE, Self::MAX_CELL_SIZE)
    }

    /// Index of the cell under `pos`, if any.
    pub fn cell_at(rect: egui::Rect, cell_size: f32, pos: egui::Pos2) -> Option<usize> {
        if !rect.contains(pos) {
            return None;
        }
        let x = ((pos.x - rect.left()) / cell_size) as usize;
        let y = ((pos.y - rect.top()) / cell_size) as usize;
        (x < 3 && y < 3).then_some(y * 3 + x)
    }

    fn cell_rect(rect: egui::Rect, cell_size: f32, index: usize) -> egui::Rect {
        let (x, y) = (index % 3, index / 3);
        egui::Rect::from_min_size(
            egui::pos2(
                rect.left() + x as f32 * cell_size,
                rect.top() + y as f32 * cell_size,
            ),
            egui::vec2(cell_size, cell_size),
        )
    }

    /// Renders the board and returns the cell the human clicked, if the click is playable.
    pub fn render(&mut self, ui: &mut egui::Ui, state: &TicTacToeGameState) -> Option<usize> {
        let cell_size = Self::calculate_cell_size(ui.available_width(), ui.available_height());
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(cell_size * 3.0, cell_size * 3.0),
            egui::Sense::click(),
        );
        let painter = ui.painter();

        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(245, 245, 245));

        if let Some(line) = state.winning_line() {
            for index in line {
                painter.rect_filled(
                    Self::cell_rect(rect, cell_size, index).shrink(Self::LINE_WIDTH),
                    4.0,
                    egui::Color32::from_rgb(200, 240, 200),
                );
            }
        }

        for i in 0..=3 {
            let offset = i as f32 * cell_size;
            let stroke = egui::Stroke::new(Self::LINE_WIDTH, egui::Color32::DARK_GRAY);
            painter.line_segment(
                [
                    egui::pos2(rect.left() + offset, rect.top()),
                    egui::pos2(rect.left() + offset, rect.bottom()),
                ],
                stroke,
            );
            painter.line_segment(
                [
                    egui::pos2(rect.left(), rect.top() + offset),
                    egui::pos2(rect.right(), rect.top() + offset),
                ],
                stroke,
            );
        }

        for (index, mark) in state.board().cells().iter().enumerate() {
            let cell_rect = Self::cell_rect(rect, cell_size, index);
            match mark {
                Mark::X => self.draw_x(painter, cell_rect),
                Mark::O => self.draw_o(painter, cell_rect),
                Mark::Empty => {}
            }
        }

        self.last_hover = None;
        if !state.can_human_move() {
            return None;
        }

        if let Some(hover_pos) = response.hover_pos()
            && let Some(index) = Self::cell_at(rect, cell_size, hover_pos)
            && state.board().is_cell_empty(index)
        {
            painter.rect_filled(
                Self::cell_rect(rect, cell_size, index).shrink(Self::LINE_WIDTH),
                0.0,
                egui::Color32::from_rgba_unmultiplied(100, 150, 255, 50),
            );
            self.last_hover = Some(index);
        }

        if response.clicked() {
            self.last_hover
        } else {
            None
        }
    }

    fn draw_x(&self, painter: &egui::Painter, rect: egui::Rect) {
        let padding = rect.width() * 0.22;
        let stroke = egui::Stroke::new(Self::MARK_WIDTH, egui::Color32::from_rgb(37, 99, 235));

        painter.line_segment(
            [
                egui::pos2(rect.left() + padding, rect.top() + padding),
                egui::pos2(rect.right() - padding, rect.bottom() - padding),
            ],
            stroke,
        );
        painter.line_segment(
            [
                egui::pos2(rect.right() - padding, rect.top() + padding),
                egui::pos2(rect.left() + padding, rect.bottom() - padding),
            ],
            stroke,
        );
    }

    fn draw_o(&self, painter: &egui::Painter, rect: egui::Rect) {
        let padding = rect.width() * 0.2;
        let radius = (rect.width() / 2.0) - padding;
        let stroke = egui::Stroke::new(Self::MARK_WIDTH, egui::Color32::from_rgb(220, 38, 38));
        painter.circle_stroke(rect.center(), radius, stroke);
    }
}
