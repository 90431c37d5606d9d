/// Receives a copy of the session state after every applied transition.
///
/// Called outside the session lock, possibly from a runtime worker thread.
pub trait GameBroadcaster<TState>: Send + Sync + 'static {
    fn broadcast_state(&self, state: &TState);

    fn broadcast_game_over(&self, _state: &TState) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBroadcaster;

impl<TState> GameBroadcaster<TState> for NoopBroadcaster {
    fn broadcast_state(&self, _state: &TState) {}
}
