use serde::{Deserialize, Serialize};

use crate::*;

/// Default pause before a mismatched pair is turned back face down.
pub const DEFAULT_REVERT_DELAY_MS: u32 = 1000;

const SEED_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub seed: u64,
    pub tier: Tier,
    pub revert_delay_ms: u32,
}

impl SessionConfig {
    pub const fn new(seed: u64) -> Self {
        Self {
            seed,
            tier: Tier::Easy,
            revert_delay_ms: DEFAULT_REVERT_DELAY_MS,
        }
    }

    pub const fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    pub const fn with_revert_delay(mut self, revert_delay_ms: u32) -> Self {
        self.revert_delay_ms = revert_delay_ms;
        self
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Idle,
    Playing,
    Won,
}

impl SessionState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// What the player sees once the last pair is matched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinSummary {
    pub tier: Tier,
    pub moves: u32,
    pub elapsed_secs: u32,
    pub is_new_record: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FlipResult {
    pub outcome: TurnOutcome,
    pub win: Option<WinSummary>,
}

/// Player input, one variant per UI event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Restart,
    ChangeDifficulty(Tier),
    Flip(Position),
    DismissWin,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Started,
    Flipped(FlipResult),
    TierChanged,
    Dismissed,
    NoChange,
}

impl CommandOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Started | Self::TierChanged | Self::Dismissed => true,
            Self::Flipped(result) => result.outcome.has_update(),
            Self::NoChange => false,
        }
    }
}

/// One player's game: owns the current board, the clock and the best scores, and drives deferred work
/// through the injected scheduler.
#[derive(Debug)]
pub struct GameSession<S, K> {
    config: SessionConfig,
    catalog: &'static [Symbol],
    tier: Tier,
    next_seed: u64,
    generation: u64,
    state: SessionState,
    engine: Option<PlayEngine>,
    clock: GameClock,
    scores: ScoreStore<K>,
    scheduler: S,
    tick_handle: Option<TaskHandle>,
    revert_handle: Option<TaskHandle>,
    last_win: Option<WinSummary>,
    win_dialog_open: bool,
}

impl<S: Scheduler, K: Storage> GameSession<S, K> {
    pub fn new(config: SessionConfig, scheduler: S, storage: K) -> Self {
        Self {
            config,
            catalog: CATALOG,
            tier: config.tier,
            next_seed: config.seed,
            generation: 0,
            state: SessionState::Idle,
            engine: None,
            clock: GameClock::new(),
            scores: ScoreStore::load(storage),
            scheduler,
            tick_handle: None,
            revert_handle: None,
            last_win: None,
            win_dialog_open: false,
        }
    }

    /// Draws symbols from `catalog` instead of [`CATALOG`].
    pub fn with_catalog(mut self, catalog: &'static [Symbol]) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn engine(&self) -> Option<&PlayEngine> {
        self.engine.as_ref()
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn scores(&self) -> &ScoreStore<K> {
        &self.scores
    }

    pub fn best_score(&self) -> Option<u32> {
        self.scores.best(self.tier)
    }

    pub fn last_win(&self) -> Option<WinSummary> {
        self.last_win
    }

    /// The win summary while its dialog is still open.
    pub fn win_dialog(&self) -> Option<WinSummary> {
        self.last_win.filter(|_| self.win_dialog_open)
    }

    pub fn card_count(&self) -> CardCount {
        self.engine
            .as_ref()
            .map_or_else(|| self.tier.card_count(), PlayEngine::len)
    }

    pub fn face_at(&self, position: Position) -> CardFace {
        self.engine
            .as_ref()
            .filter(|engine| position < engine.len())
            .map_or(CardFace::Down, |engine| engine.face_at(position))
    }

    /// Glyph to draw for a card, only for cards the player may currently see.
    pub fn visible_glyph(&self, position: Position) -> Option<&'static str> {
        let engine = self.engine.as_ref()?;
        if self.face_at(position).is_down() {
            return None;
        }
        let pair_id = engine.card_at(position).pair_id;
        self.catalog
            .iter()
            .find(|symbol| symbol.id == pair_id)
            .map(|symbol| symbol.glyph)
    }

    pub fn moves(&self) -> u32 {
        self.engine.as_ref().map_or(0, PlayEngine::moves)
    }

    pub fn matched_pairs(&self) -> CardCount {
        self.engine.as_ref().map_or(0, PlayEngine::matched_pairs)
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.clock.elapsed_secs()
    }

    pub fn handle(&mut self, command: Command) -> Result<CommandOutcome> {
        Ok(match command {
            Command::Start => {
                self.start()?;
                CommandOutcome::Started
            }
            Command::Restart => {
                self.restart()?;
                CommandOutcome::Started
            }
            Command::ChangeDifficulty(tier) => {
                if self.change_difficulty(tier)? {
                    CommandOutcome::TierChanged
                } else {
                    CommandOutcome::NoChange
                }
            }
            Command::Flip(position) => CommandOutcome::Flipped(self.flip(position)?),
            Command::DismissWin if self.win_dialog_open => {
                self.dismiss_win();
                CommandOutcome::Dismissed
            }
            Command::DismissWin => CommandOutcome::NoChange,
        })
    }

    /// Deals a new board at the current tier and starts the clock. Any running game is discarded.
    ///
    /// When no deck can be dealt the session is left exactly as it was.
    pub fn start(&mut self) -> Result<()> {
        let seed = self.next_seed;
        let deck = RandomDeckGenerator::with_catalog(seed, self.catalog).generate(self.tier)?;
        self.next_seed = seed.wrapping_add(SEED_STEP);

        self.cancel_pending();
        self.generation += 1;

        self.engine = Some(PlayEngine::new(deck));
        self.state = SessionState::Playing;
        self.last_win = None;
        self.win_dialog_open = false;

        self.clock.start();
        self.tick_handle = Some(self.scheduler.schedule(
            TICK_MS,
            Task::Tick {
                generation: self.generation,
            },
        ));

        log::debug!(
            "Game {} started: {:?}, seed {}",
            self.generation,
            self.tier,
            seed
        );
        Ok(())
    }

    pub fn restart(&mut self) -> Result<()> {
        self.start()
    }

    /// Switches tier, returns whether it changed. A game in progress or finished is replaced by a
    /// fresh one at the new tier; if that deal fails the old tier is kept.
    pub fn change_difficulty(&mut self, tier: Tier) -> Result<bool> {
        if tier == self.tier {
            return Ok(false);
        }

        let previous = core::mem::replace(&mut self.tier, tier);
        let redeal = match self.state {
            SessionState::Idle => Ok(()),
            SessionState::Playing | SessionState::Won => self.start(),
        };
        if let Err(err) = redeal {
            self.tier = previous;
            return Err(err);
        }
        Ok(true)
    }

    pub fn flip(&mut self, position: Position) -> Result<FlipResult> {
        let ignored = FlipResult {
            outcome: TurnOutcome::IgnoredNotPlaying,
            win: None,
        };

        let Some(engine) = self.engine.as_mut() else {
            if position >= self.tier.card_count() {
                return Err(GameError::InvalidPosition);
            }
            return Ok(ignored);
        };

        if !self.state.is_playing() {
            engine.deck().validate_position(position)?;
            return Ok(ignored);
        }

        let outcome = engine.flip(position)?;
        let mut win = None;
        match outcome {
            TurnOutcome::ResolvedMismatch => {
                self.revert_handle = Some(self.scheduler.schedule(
                    self.config.revert_delay_ms,
                    Task::RevertMismatch {
                        generation: self.generation,
                    },
                ));
            }
            TurnOutcome::ResolvedMatch if engine.is_won() => {
                win = Some(self.finish());
            }
            _ => {}
        }

        Ok(FlipResult { outcome, win })
    }

    pub fn dismiss_win(&mut self) {
        self.win_dialog_open = false;
    }

    /// Applies a fired task, returns whether anything visible changed.
    pub fn on_task(&mut self, task: Task) -> bool {
        if task.generation() != self.generation || !self.state.is_playing() {
            log::trace!("Dropping stale {:?}", task);
            return false;
        }

        match task {
            Task::Tick { .. } => {
                self.tick_handle = None;
                if !self.clock.tick() {
                    return false;
                }
                self.tick_handle = Some(self.scheduler.schedule(TICK_MS, task));
                true
            }
            Task::RevertMismatch { .. } => {
                self.revert_handle = None;
                self.engine
                    .as_mut()
                    .is_some_and(PlayEngine::settle_mismatch)
            }
        }
    }

    fn finish(&mut self) -> WinSummary {
        self.cancel_pending();
        self.clock.stop();
        self.state = SessionState::Won;

        let moves = self.moves();
        let is_new_record = self.scores.submit(self.tier, moves);
        let summary = WinSummary {
            tier: self.tier,
            moves,
            elapsed_secs: self.clock.elapsed_secs(),
            is_new_record,
        };
        log::debug!("Game {} won: {:?}", self.generation, summary);

        self.last_win = Some(summary);
        self.win_dialog_open = true;
        summary
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.revert_handle.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<K: Storage> GameSession<ManualScheduler, K> {
    /// Lets `delta_ms` of fake time pass, feeding every task that comes due back into the session.
    pub fn advance_time(&mut self, delta_ms: u64) {
        let until_ms = self.scheduler.now_ms().saturating_add(delta_ms);
        while let Some(task) = self.scheduler.pop_due(until_ms) {
            self.on_task(task);
        }
        self.scheduler.set_now(until_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestSession = GameSession<ManualScheduler, MemoryStorage>;

    fn session() -> TestSession {
        GameSession::new(
            SessionConfig::new(42),
            ManualScheduler::new(),
            MemoryStorage::new(),
        )
    }

    /// Positions of both cards of every pair, in board order of the first card.
    fn pairs(session: &TestSession) -> alloc::vec::Vec<(Position, Position)> {
        let cards = session.engine().unwrap().deck().cards();
        cards
            .iter()
            .filter(|card| card.instance == Instance::A)
            .map(|a| {
                let b = cards
                    .iter()
                    .find(|card| card.pair_id == a.pair_id && card.instance == Instance::B)
                    .unwrap();
                (a.position, b.position)
            })
            .collect()
    }

    fn mismatch(session: &TestSession) -> (Position, Position) {
        let pairs = pairs(session);
        (pairs[0].0, pairs[1].0)
    }

    #[test]
    fn new_session_is_idle_and_ignores_flips() {
        let mut session = session();

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.card_count(), 12);
        assert_eq!(
            session.flip(0).unwrap().outcome,
            TurnOutcome::IgnoredNotPlaying
        );
        assert_eq!(session.flip(12), Err(GameError::InvalidPosition));
    }

    #[test]
    fn start_deals_and_schedules_a_single_tick() {
        let mut session = session();
        session.start().unwrap();

        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.scheduler().pending_count(), 1);

        session.advance_time(3500);
        assert_eq!(session.elapsed_secs(), 3);
        assert_eq!(session.scheduler().pending_count(), 1);
    }

    #[test]
    fn mismatch_reverts_after_delay() {
        let mut session = session();
        session.start().unwrap();
        let (a, b) = mismatch(&session);

        session.flip(a).unwrap();
        assert_eq!(
            session.flip(b).unwrap().outcome,
            TurnOutcome::ResolvedMismatch
        );
        assert!(session.engine().unwrap().is_locked());

        session.advance_time(999);
        assert!(session.engine().unwrap().is_locked());
        assert_eq!(session.face_at(a), CardFace::Up);

        session.advance_time(1);
        let engine = session.engine().unwrap();
        assert!(!engine.is_locked());
        assert!(engine.face_up().is_empty());
        assert_eq!(session.face_at(a), CardFace::Down);
        assert_eq!(session.face_at(b), CardFace::Down);
    }

    #[test]
    fn winning_stops_the_clock_and_records_best() {
        let mut session = session();
        session.start().unwrap();
        session.advance_time(2000);

        let pairs = pairs(&session);
        let mut last = None;
        for (a, b) in pairs {
            session.flip(a).unwrap();
            last = Some(session.flip(b).unwrap());
        }

        let win = last.unwrap().win.unwrap();
        assert_eq!(session.state(), SessionState::Won);
        assert_eq!(win.moves, 6);
        assert_eq!(win.elapsed_secs, 2);
        assert!(win.is_new_record);
        assert_eq!(session.best_score(), Some(6));
        assert_eq!(session.scheduler().pending_count(), 0);

        session.advance_time(5000);
        assert_eq!(session.elapsed_secs(), 2);
        assert_eq!(
            session.flip(0).unwrap().outcome,
            TurnOutcome::IgnoredNotPlaying
        );
    }

    #[test]
    fn dismissing_keeps_the_game_won() {
        let mut session = session();
        session.start().unwrap();
        for (a, b) in pairs(&session) {
            session.flip(a).unwrap();
            session.flip(b).unwrap();
        }

        assert!(session.win_dialog().is_some());
        assert_eq!(
            session.handle(Command::DismissWin).unwrap(),
            CommandOutcome::Dismissed
        );
        assert_eq!(session.win_dialog(), None);
        assert!(session.last_win().is_some());
        assert_eq!(session.state(), SessionState::Won);
        assert_eq!(
            session.handle(Command::DismissWin).unwrap(),
            CommandOutcome::NoChange
        );
    }

    #[test]
    fn restart_discards_pending_revert() {
        let mut session = session();
        session.start().unwrap();
        let (a, b) = mismatch(&session);
        session.flip(a).unwrap();
        session.flip(b).unwrap();

        session.restart().unwrap();
        assert_eq!(session.scheduler().pending_count(), 1);

        let first = pairs(&session)[0].0;
        session.flip(first).unwrap();
        session.advance_time(1500);

        assert_eq!(session.face_at(first), CardFace::Up);
        assert_eq!(session.engine().unwrap().face_up(), &[first]);
    }

    #[test]
    fn stale_tasks_are_dropped() {
        let mut session = session();
        session.start().unwrap();
        let (a, b) = mismatch(&session);
        session.flip(a).unwrap();
        session.flip(b).unwrap();
        session.restart().unwrap();

        let first = pairs(&session)[0].0;
        let second = pairs(&session)[1].0;
        session.flip(first).unwrap();
        session.flip(second).unwrap();

        assert!(!session.on_task(Task::RevertMismatch { generation: 1 }));
        assert!(!session.on_task(Task::Tick { generation: 1 }));
        assert!(session.engine().unwrap().is_locked());
        assert_eq!(session.elapsed_secs(), 0);
    }

    #[test]
    fn change_difficulty_redeals_unless_idle() {
        let mut session = session();

        assert_eq!(
            session.handle(Command::ChangeDifficulty(Tier::Hard)).unwrap(),
            CommandOutcome::TierChanged
        );
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.card_count(), 24);

        session.handle(Command::Start).unwrap();
        assert_eq!(session.engine().unwrap().len(), 24);

        session.handle(Command::ChangeDifficulty(Tier::Easy)).unwrap();
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.engine().unwrap().len(), 12);
        assert_eq!(
            session.handle(Command::ChangeDifficulty(Tier::Easy)).unwrap(),
            CommandOutcome::NoChange
        );
    }

    #[test]
    fn change_difficulty_to_the_same_tier_keeps_the_game() {
        let mut session = session();
        session.start().unwrap();
        let deck = session.engine().unwrap().deck().clone();

        assert_eq!(session.change_difficulty(Tier::Easy), Ok(false));
        assert_eq!(session.engine().unwrap().deck(), &deck);
        assert_eq!(session.change_difficulty(Tier::Hard), Ok(true));
        assert_eq!(session.engine().unwrap().len(), 24);
    }

    #[test]
    fn failed_deal_leaves_the_session_untouched() {
        let mut session = session().with_catalog(&CATALOG[..4]);

        assert_eq!(
            session.handle(Command::Start),
            Err(GameError::CatalogTooSmall {
                required: 6,
                available: 4
            })
        );
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.engine().is_none());
        assert_eq!(session.scheduler().pending_count(), 0);
    }

    #[test]
    fn failed_redeal_keeps_the_running_game_and_tier() {
        let mut session = session().with_catalog(&CATALOG[..6]);
        session.start().unwrap();
        session.flip(0).unwrap();
        let deck = session.engine().unwrap().deck().clone();

        assert_eq!(
            session.change_difficulty(Tier::Hard),
            Err(GameError::CatalogTooSmall {
                required: 12,
                available: 6
            })
        );
        assert_eq!(session.tier(), Tier::Easy);
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.engine().unwrap().deck(), &deck);
        assert_eq!(session.face_at(0), CardFace::Up);
        assert_eq!(session.scheduler().pending_count(), 1);
    }

    #[test]
    fn consecutive_games_get_different_seeds() {
        let mut session = session();
        session.start().unwrap();
        let first = session.engine().unwrap().deck().clone();
        session.restart().unwrap();

        assert_ne!(session.engine().unwrap().deck(), &first);
    }

    #[test]
    fn only_face_up_cards_show_glyphs() {
        let mut session = session();
        assert_eq!(session.visible_glyph(0), None);

        session.start().unwrap();
        assert_eq!(session.visible_glyph(0), None);
        session.flip(0).unwrap();
        assert!(session.visible_glyph(0).is_some());
    }
}
