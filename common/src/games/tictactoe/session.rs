use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::games::{GameBroadcaster, SessionRng};
use crate::{log_debug, log_error, log_warn};
use super::audio::{AudioSink, SoundCue};
use super::difficulty::calculate_move;
use super::game_state::TicTacToeGameState;
use super::storage::{PersistedState, ScoreStore};
use super::types::{Difficulty, GameStatus, Player};

pub const DEFAULT_THINK_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub think_delay: Duration,
    pub seed: Option<u64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            think_delay: DEFAULT_THINK_DELAY,
            seed: None,
        }
    }
}

struct SessionInner {
    state: TicTacToeGameState,
    rng: SessionRng,
    // Bumped on every board reset; an AI task only applies its move if it still matches.
    generation: u64,
}

struct SessionServices {
    store: Box<dyn ScoreStore>,
    audio: Box<dyn AudioSink>,
    broadcaster: Box<dyn GameBroadcaster<TicTacToeGameState>>,
}

impl SessionServices {
    /// Called with the session lock held so stored state follows the order of transitions.
    fn persist(&self, before: PersistedState, state: &TicTacToeGameState) {
        let after = persisted(state);
        if after != before {
            self.store.save(&after);
        }
    }

    fn notify(&self, state: &TicTacToeGameState) {
        self.broadcaster.broadcast_state(state);
        if state.is_game_over() {
            self.broadcaster.broadcast_game_over(state);
        }
    }

    fn play_outcome(&self, state: &TicTacToeGameState) {
        let cue = match state.status() {
            GameStatus::Won(Player::Human) => SoundCue::Win,
            GameStatus::Won(Player::Ai) => SoundCue::Loss,
            GameStatus::Draw => SoundCue::Draw,
            GameStatus::InProgress => return,
        };
        self.audio.play(cue);
    }
}

fn persisted(state: &TicTacToeGameState) -> PersistedState {
    PersistedState {
        difficulty: state.difficulty(),
        scores: state.scores(),
    }
}

fn lock(inner: &Mutex<SessionInner>) -> MutexGuard<'_, SessionInner> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A game against the computer, wired to its collaborators.
///
/// Human actions are synchronous. A human move that hands the turn to the AI schedules
/// a task on `runtime` that waits out the thinking delay, picks a move and applies it.
/// Resetting the board aborts that task, and a task that already passed its delay
/// is discarded by the generation check.
pub struct TicTacToeSession {
    inner: Arc<Mutex<SessionInner>>,
    services: Arc<SessionServices>,
    runtime: Handle,
    think_delay: Duration,
    pending_ai_move: Option<JoinHandle<()>>,
}

impl TicTacToeSession {
    pub fn new(
        settings: SessionSettings,
        store: impl ScoreStore,
        audio: impl AudioSink,
        broadcaster: impl GameBroadcaster<TicTacToeGameState>,
        runtime: Handle,
    ) -> Self {
        let stored = store.load();
        let rng = match settings.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };
        log_debug!(
            "New session: difficulty {}, seed {}, scores {:?}",
            stored.difficulty.label(),
            rng.seed(),
            stored.scores
        );

        Self {
            inner: Arc::new(Mutex::new(SessionInner {
                state: TicTacToeGameState::new(stored.difficulty, stored.scores),
                rng,
                generation: 0,
            })),
            services: Arc::new(SessionServices {
                store: Box::new(store),
                audio: Box::new(audio),
                broadcaster: Box::new(broadcaster),
            }),
            runtime,
            think_delay: settings.think_delay,
            pending_ai_move: None,
        }
    }

    pub fn snapshot(&self) -> TicTacToeGameState {
        lock(&self.inner).state.clone()
    }

    pub fn submit_human_move(&mut self, index: usize) -> bool {
        let (state, generation) = {
            let mut inner = lock(&self.inner);
            let before = persisted(&inner.state);
            if !inner.state.submit_human_move(index) {
                return false;
            }
            self.services.persist(before, &inner.state);
            (inner.state.clone(), inner.generation)
        };

        self.services.audio.play(SoundCue::Move);
        self.services.play_outcome(&state);
        self.services.notify(&state);

        if state.is_ai_thinking() {
            self.schedule_ai_move(generation);
        }
        true
    }

    pub fn reset_board(&mut self) {
        if let Some(task) = self.pending_ai_move.take() {
            task.abort();
        }
        let state = {
            let mut inner = lock(&self.inner);
            inner.generation += 1;
            let before = persisted(&inner.state);
            inner.state.reset_board();
            self.services.persist(before, &inner.state);
            inner.state.clone()
        };
        self.services.notify(&state);
    }

    pub fn reset_scores(&mut self) {
        self.update(|state| {
            state.reset_scores();
            true
        });
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        self.update(|state| state.set_difficulty(difficulty))
    }

    /// Resolves once the scheduled AI move, if any, has been applied or discarded.
    pub async fn wait_for_ai(&mut self) {
        if let Some(task) = self.pending_ai_move.take()
            && let Err(e) = task.await
            && !e.is_cancelled()
        {
            log_error!("AI move task failed: {}", e);
        }
    }

    fn update(&mut self, transition: impl FnOnce(&mut TicTacToeGameState) -> bool) -> bool {
        let state = {
            let mut inner = lock(&self.inner);
            let before = persisted(&inner.state);
            if !transition(&mut inner.state) {
                return false;
            }
            self.services.persist(before, &inner.state);
            inner.state.clone()
        };
        self.services.notify(&state);
        true
    }

    fn schedule_ai_move(&mut self, generation: u64) {
        let inner = Arc::clone(&self.inner);
        let services = Arc::clone(&self.services);
        let think_delay = self.think_delay;

        let task = self.runtime.spawn(async move {
            tokio::time::sleep(think_delay).await;
            play_ai_turn(&inner, &services, generation).await;
        });

        if let Some(stale) = self.pending_ai_move.replace(task) {
            stale.abort();
        }
    }
}

async fn play_ai_turn(inner: &Mutex<SessionInner>, services: &SessionServices, generation: u64) {
    let (board, difficulty, mut rng) = {
        let mut guard = lock(inner);
        if guard.generation != generation || !guard.state.is_ai_thinking() {
            log_debug!("Discarding stale AI turn");
            return;
        }
        let rng = guard.rng.fork();
        (*guard.state.board(), guard.state.difficulty(), rng)
    };

    let calculated_move = tokio::task::spawn_blocking(move || {
        calculate_move(difficulty, &board, Player::Ai.mark(), &mut rng)
    })
    .await
    .unwrap_or_else(|e| {
        log_error!("AI move calculation failed: {}", e);
        None
    });

    finish_ai_turn(inner, services, generation, calculated_move);
}

/// Applies the AI move picked off-thread. Without a usable move the choice is made
/// again under the lock, so the AI flag is always cleared by a real move.
fn finish_ai_turn(
    inner: &Mutex<SessionInner>,
    services: &SessionServices,
    generation: u64,
    calculated_move: Option<usize>,
) {
    let state = {
        let mut guard = lock(inner);
        if guard.generation != generation {
            log_debug!("Discarding AI move {:?} computed before reset", calculated_move);
            return;
        }
        let before = persisted(&guard.state);
        let SessionInner { state, rng, .. } = &mut *guard;

        let applied = calculated_move.is_some_and(|index| state.apply_ai_move(index));
        if !applied {
            if !state.is_ai_thinking() {
                return;
            }
            log_warn!("AI move {:?} unusable, choosing again", calculated_move);
            // A raised AI flag means the game is in progress, so an empty cell exists.
            if state.compute_ai_move(rng).is_none() {
                log_error!("No AI move available on board {}", state.board());
                return;
            }
        }

        services.persist(before, state);
        state.clone()
    };

    services.play_outcome(&state);
    services.notify(&state);
}

impl Drop for TicTacToeSession {
    fn drop(&mut self) {
        if let Some(task) = self.pending_ai_move.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryContentProvider;
    use crate::games::NoopBroadcaster;
    use crate::games::tictactoe::storage::{ConfigScoreStore, MemoryScoreStore};
    use crate::games::tictactoe::types::{Mark, Scores};

    #[derive(Clone, Default)]
    struct RecordingAudio {
        cues: Arc<Mutex<Vec<SoundCue>>>,
    }

    impl RecordingAudio {
        fn cues(&self) -> Vec<SoundCue> {
            self.cues.lock().unwrap().clone()
        }
    }

    impl AudioSink for RecordingAudio {
        fn play(&self, cue: SoundCue) {
            self.cues.lock().unwrap().push(cue);
        }
    }

    #[derive(Clone, Default)]
    struct CountingBroadcaster {
        updates: Arc<Mutex<usize>>,
        game_overs: Arc<Mutex<usize>>,
    }

    impl GameBroadcaster<TicTacToeGameState> for CountingBroadcaster {
        fn broadcast_state(&self, _state: &TicTacToeGameState) {
            *self.updates.lock().unwrap() += 1;
        }

        fn broadcast_game_over(&self, _state: &TicTacToeGameState) {
            *self.game_overs.lock().unwrap() += 1;
        }
    }

    #[derive(Clone, Default)]
    struct RecordingStore {
        saved: Arc<Mutex<Vec<PersistedState>>>,
    }

    impl ScoreStore for RecordingStore {
        fn load(&self) -> PersistedState {
            PersistedState::default()
        }

        fn save(&self, state: &PersistedState) {
            self.saved.lock().unwrap().push(*state);
        }
    }

    fn settings() -> SessionSettings {
        SessionSettings {
            think_delay: DEFAULT_THINK_DELAY,
            seed: Some(42),
        }
    }

    fn session_with(provider: MemoryContentProvider, audio: RecordingAudio) -> TicTacToeSession {
        TicTacToeSession::new(
            settings(),
            ConfigScoreStore::new(provider),
            audio,
            NoopBroadcaster,
            Handle::current(),
        )
    }

    fn session() -> TicTacToeSession {
        TicTacToeSession::new(
            settings(),
            MemoryScoreStore::in_memory(),
            RecordingAudio::default(),
            NoopBroadcaster,
            Handle::current(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_human_move_raises_ai_flag() {
        let mut session = session();
        assert!(session.submit_human_move(4));
        let state = session.snapshot();
        assert_eq!(state.board().get(4), Some(Mark::X));
        assert_eq!(state.current_player(), Player::Ai);
        assert!(state.is_ai_thinking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ai_moves_only_after_delay() {
        let mut session = session();
        assert!(session.submit_human_move(4));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(session.snapshot().is_ai_thinking());
        assert_eq!(session.snapshot().board().occupied_count(), 1);

        session.wait_for_ai().await;
        let state = session.snapshot();
        assert!(!state.is_ai_thinking());
        assert_eq!(state.current_player(), Player::Human);
        assert_eq!(state.board().occupied_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_human_move_blocked_while_thinking() {
        let mut session = session();
        assert!(session.submit_human_move(0));
        assert!(!session.submit_human_move(1));
        session.wait_for_ai().await;
        let open = session.snapshot().board().available_moves()[0];
        assert!(session.submit_human_move(open));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_discards_pending_ai_move() {
        let mut session = session();
        assert!(session.submit_human_move(4));
        session.reset_board();

        tokio::time::sleep(DEFAULT_THINK_DELAY * 4).await;
        let state = session.snapshot();
        assert!(state.board().is_empty());
        assert!(!state.is_ai_thinking());
        assert_eq!(state.current_player(), Player::Human);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_board_twice_is_idempotent() {
        let mut session = session();
        assert!(session.submit_human_move(4));
        session.reset_board();
        let first = session.snapshot();
        session.reset_board();
        assert_eq!(session.snapshot(), first);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loads_persisted_state() {
        let provider = MemoryContentProvider::with_content(
            "difficulty: hard\nscores:\n  player: 3\n  ai: 1\n  draws: 2\n",
        );
        let session = session_with(provider, RecordingAudio::default());
        let state = session.snapshot();
        assert_eq!(state.difficulty(), Difficulty::Hard);
        assert_eq!(state.scores(), Scores::new(3, 1, 2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_corrupted_storage_uses_defaults() {
        let provider = MemoryContentProvider::with_content("{{{ nope");
        let session = session_with(provider, RecordingAudio::default());
        let state = session.snapshot();
        assert_eq!(state.difficulty(), Difficulty::Medium);
        assert_eq!(state.scores(), Scores::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_scores_is_persisted() {
        let provider = MemoryContentProvider::with_content(
            "difficulty: easy\nscores:\n  player: 3\n  ai: 1\n  draws: 2\n",
        );
        let mut session = session_with(provider.clone(), RecordingAudio::default());
        assert!(session.submit_human_move(4));
        session.reset_scores();

        let state = session.snapshot();
        assert_eq!(state.scores(), Scores::default());
        assert_eq!(state.difficulty(), Difficulty::Easy);
        assert_eq!(state.board().get(4), Some(Mark::X));

        let reloaded = ConfigScoreStore::new(provider).load();
        assert_eq!(reloaded.scores, Scores::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_difficulty_change_is_persisted() {
        let provider = MemoryContentProvider::new();
        let mut session = session_with(provider.clone(), RecordingAudio::default());
        assert!(session.set_difficulty(Difficulty::Hard));
        assert_eq!(ConfigScoreStore::new(provider).load().difficulty, Difficulty::Hard);

        assert!(session.submit_human_move(0));
        assert!(!session.set_difficulty(Difficulty::Easy));
        session.wait_for_ai().await;
        assert!(session.set_difficulty(Difficulty::Easy));
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_game_records_score_and_cues() {
        let provider = MemoryContentProvider::new();
        let audio = RecordingAudio::default();
        let mut session = session_with(provider.clone(), audio.clone());
        assert!(session.set_difficulty(Difficulty::Hard));

        while !session.snapshot().is_game_over() {
            let index = session.snapshot().board().available_moves()[0];
            assert!(session.submit_human_move(index));
            session.wait_for_ai().await;
        }

        let state = session.snapshot();
        assert_ne!(state.status(), GameStatus::Won(Player::Human));
        assert_eq!(state.scores().games_played(), 1);
        assert_eq!(ConfigScoreStore::new(provider).load().scores, state.scores());

        let cues = audio.cues();
        let last = *cues.last().unwrap();
        assert!(last == SoundCue::Loss || last == SoundCue::Draw);
        let moves = cues.iter().filter(|c| **c == SoundCue::Move).count();
        assert_eq!(moves, state.board().cells().iter().filter(|m| **m == Mark::X).count());
    }

    #[tokio::test(start_paused = true)]
    async fn test_broadcasts_every_transition() {
        let broadcaster = CountingBroadcaster::default();
        let mut session = TicTacToeSession::new(
            settings(),
            MemoryScoreStore::in_memory(),
            RecordingAudio::default(),
            broadcaster.clone(),
            Handle::current(),
        );
        assert!(session.submit_human_move(4));
        session.wait_for_ai().await;
        assert_eq!(*broadcaster.updates.lock().unwrap(), 2);
        session.reset_board();
        assert_eq!(*broadcaster.updates.lock().unwrap(), 3);
        assert_eq!(*broadcaster.game_overs.lock().unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_after_delay_discards_ai_move() {
        let mut session = session();
        assert!(session.submit_human_move(4));
        tokio::time::sleep(DEFAULT_THINK_DELAY).await;
        session.reset_board();
        session.wait_for_ai().await;

        tokio::time::sleep(DEFAULT_THINK_DELAY * 4).await;
        let state = session.snapshot();
        assert!(state.board().is_empty());
        assert!(!state.is_ai_thinking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_move_from_previous_generation_is_ignored() {
        let mut session = session();
        assert!(session.submit_human_move(4));
        let stale_generation = lock(&session.inner).generation;
        session.reset_board();
        assert!(session.submit_human_move(0));

        finish_ai_turn(&session.inner, &session.services, stale_generation, Some(8));
        let state = session.snapshot();
        assert_eq!(state.board().occupied_count(), 1);
        assert_eq!(state.board().get(8), Some(Mark::Empty));
        assert!(state.is_ai_thinking());

        session.wait_for_ai().await;
        assert_eq!(session.snapshot().board().occupied_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_ai_move_is_chosen_again() {
        let mut session = session();
        assert!(session.submit_human_move(4));
        let generation = lock(&session.inner).generation;

        finish_ai_turn(&session.inner, &session.services, generation, None);
        let state = session.snapshot();
        assert!(!state.is_ai_thinking());
        assert_eq!(state.current_player(), Player::Human);
        assert_eq!(state.board().occupied_count(), 2);

        let open = state.board().available_moves()[0];
        assert!(session.submit_human_move(open));
        finish_ai_turn(&session.inner, &session.services, generation, Some(4));
        let state = session.snapshot();
        assert!(!state.is_ai_thinking());
        assert_eq!(state.board().occupied_count(), 4);

        // The scheduled tasks find the turn already taken.
        session.wait_for_ai().await;
        assert_eq!(session.snapshot().board().occupied_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_maximal_stored_tally_survives_human_win() {
        let provider = MemoryContentProvider::with_content(
            "difficulty: easy\nscores:\n  player: 4294967295\n  ai: 0\n  draws: 0\n",
        );
        let mut session = session_with(provider.clone(), RecordingAudio::default());
        assert_eq!(session.snapshot().scores().player, u32::MAX);

        let mut human_won = false;
        for _ in 0..100 {
            while !session.snapshot().is_game_over() {
                let index = session.snapshot().board().available_moves()[0];
                assert!(session.submit_human_move(index));
                session.wait_for_ai().await;
            }
            if session.snapshot().status() == GameStatus::Won(Player::Human) {
                human_won = true;
                break;
            }
            session.reset_board();
        }

        assert!(human_won);
        assert_eq!(session.snapshot().scores().player, u32::MAX);
        assert_eq!(ConfigScoreStore::new(provider).load().scores.player, u32::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_save_matches_state() {
        let store = RecordingStore::default();
        let mut session = TicTacToeSession::new(
            settings(),
            store.clone(),
            RecordingAudio::default(),
            NoopBroadcaster,
            Handle::current(),
        );
        assert!(session.set_difficulty(Difficulty::Hard));

        while !session.snapshot().is_game_over() {
            let index = session.snapshot().board().available_moves()[0];
            assert!(session.submit_human_move(index));
            session.wait_for_ai().await;
        }
        let expected = persisted(&session.snapshot());
        assert_eq!(store.saved.lock().unwrap().last(), Some(&expected));

        session.reset_scores();
        let expected = persisted(&session.snapshot());
        assert_eq!(expected.scores, Scores::default());
        assert_eq!(store.saved.lock().unwrap().last(), Some(&expected));
    }
}
