use common::games::tictactoe::{AudioSink, SoundCue};
use common::log_debug;
use std::io::Write;

/// Terminal bell on game end; moves are only logged.
pub struct BellAudio;

impl AudioSink for BellAudio {
    fn play(&self, cue: SoundCue) {
        log_debug!("Sound cue: {:?}", cue);
        if cue != SoundCue::Move {
            let mut stdout = std::io::stdout();
            let _ = stdout.write_all(b"\x07").and_then(|_| stdout.flush());
        }
    }
}
