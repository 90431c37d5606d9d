mod audio;
mod broadcaster;
mod config;
mod ui;

use clap::Parser;
use common::games::tictactoe::{ConfigScoreStore, TicTacToeSession};
use common::logger::init_logger;
use common::log;
use eframe::egui;

use audio::BellAudio;
use broadcaster::RepaintBroadcaster;
use config::ClientArgs;
use ui::TicTacToeApp;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ClientArgs::parse();
    init_logger(Some("client".to_string()), args.log_level);

    let runtime = tokio::runtime::Runtime::new()?;
    let data_dir = args.resolve_data_dir();
    let settings = args.session_settings();
    log!("Storing scores in {}", data_dir.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([460.0, 680.0])
            .with_min_inner_size([320.0, 520.0])
            .with_title("Tic Tac Toe"),
        ..Default::default()
    };

    let runtime_handle = runtime.handle().clone();
    eframe::run_native(
        "Tic Tac Toe",
        options,
        Box::new(move |cc| {
            let session = TicTacToeSession::new(
                settings,
                ConfigScoreStore::in_dir(&data_dir),
                BellAudio,
                RepaintBroadcaster::new(cc.egui_ctx.clone()),
                runtime_handle,
            );
            Ok(Box::new(TicTacToeApp::new(session)))
        }),
    )?;

    Ok(())
}
