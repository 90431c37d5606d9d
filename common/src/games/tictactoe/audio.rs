#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Move,
    Win,
    Loss,
    Draw,
}

/// Fire-and-forget cue playback. Implementations swallow their own failures.
pub trait AudioSink: Send + Sync + 'static {
    fn play(&self, cue: SoundCue);
}
