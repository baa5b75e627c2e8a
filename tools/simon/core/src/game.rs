use log::{debug, info, warn};

use crate::board::Board;
use crate::config::{ConfigError, SimonConfig};
use crate::input::CaptureState;
use crate::layout::{self, Line};
use crate::playback::{PlaybackState, SequencePlayback};
use crate::region::Paint;
use crate::sequence::{RandomSequence, Sequence, SequenceGenerator, SequenceStore};
use crate::trace::{LogObserver, MachineId, StateName, StateObserver, StateTrace};
use crate::verify::{SequenceVerifier, VerifyError, VerifyState};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Init,
    IntroMessage,
    IntroWaitTouch,
    FlashSequence,
    VerifySequence,
    GameOverMessage,
    GameOver,
    Congratulate,
    CongratulateDelay,
    CongratulateWaitTouch,
}

impl StateName for GameState {
    fn name(&self) -> &'static str {
        match self {
            GameState::Init => "init",
            GameState::IntroMessage => "intro message",
            GameState::IntroWaitTouch => "intro wait for touch",
            GameState::FlashSequence => "flash sequence",
            GameState::VerifySequence => "verify sequence",
            GameState::GameOverMessage => "game over message",
            GameState::GameOver => "game over",
            GameState::Congratulate => "congratulate",
            GameState::CongratulateDelay => "congratulate delay",
            GameState::CongratulateWaitTouch => "congratulate wait for touch",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Traces {
    game: StateTrace<GameState>,
    playback: StateTrace<PlaybackState>,
    verify: StateTrace<VerifyState>,
    input: StateTrace<CaptureState>,
}

impl Traces {
    const fn new() -> Self {
        Self {
            game: StateTrace::new(MachineId::Game),
            playback: StateTrace::new(MachineId::Playback),
            verify: StateTrace::new(MachineId::Verify),
            input: StateTrace::new(MachineId::Input),
        }
    }
}

/// The top-level machine. Owns the sequence and the subordinate machines and
/// hands control back and forth between playback and verification.
///
/// `tick()` runs the game's own transition first and then ticks every
/// subordinate once. At most one of playback and verification is enabled at
/// any time.
pub struct Simon<B: Board, G: SequenceGenerator = RandomSequence, O: StateObserver = LogObserver> {
    config: SimonConfig,
    board: B,
    generator: G,
    observer: O,

    store: SequenceStore,
    playback: SequencePlayback,
    verifier: SequenceVerifier,

    state: GameState,
    round_length: usize,
    // passes of the current round verified in full
    verified_length: usize,
    last_error: Option<VerifyError>,
    game_over_line: Line,

    seed_counter: u64,
    delay_counter: u16,
    // wider than the bound so `> bound` is always reachable
    touch_wait_counter: u32,

    traces: Traces,
}

impl<B: Board> Simon<B> {
    pub fn new(config: SimonConfig, board: B) -> Result<Self, ConfigError> {
        Simon::with_parts(config, board, RandomSequence, LogObserver)
    }
}

impl<B: Board, G: SequenceGenerator, O: StateObserver> Simon<B, G, O> {
    pub fn with_parts(config: SimonConfig, board: B, generator: G, observer: O) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut simon = Self {
            config,
            board,
            generator,
            observer,
            store: SequenceStore::new(),
            playback: SequencePlayback::new(config.playback_pause_ticks),
            verifier: SequenceVerifier::new(config.verify_timeout_ticks, config.extents),
            state: GameState::Init,
            round_length: config.initial_round_length,
            verified_length: 0,
            last_error: None,
            game_over_line: Line::new(),
            seed_counter: 0,
            delay_counter: 0,
            touch_wait_counter: 0,
            traces: Traces::new(),
        };
        simon.init();
        Ok(simon)
    }

    /// Puts every machine back in its initial state. Also a hard reset.
    pub fn init(&mut self) {
        self.state = GameState::Init;
        self.round_length = self.config.initial_round_length;
        self.verified_length = 0;
        self.last_error = None;
        self.game_over_line.clear();
        self.delay_counter = 0;
        self.touch_wait_counter = 0;

        self.store = SequenceStore::new();
        self.playback.init();
        self.verifier.init();

        self.traces = Traces::new();
        self.observe();
    }

    pub fn tick(&mut self) {
        self.seed_counter = self.seed_counter.wrapping_add(1);

        self.state = self.transition();

        self.playback.tick(&self.store, &mut self.board);
        self.verifier.tick(&self.store, &mut self.board);

        debug_assert!(
            !(self.playback.is_enabled() && self.verifier.is_enabled()),
            "playback and verification enabled together"
        );

        self.observe();
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn round_length(&self) -> usize {
        self.round_length
    }

    /// How many passes of the current (or last) round were verified in full.
    pub fn verified_length(&self) -> usize {
        self.verified_length
    }

    /// Why the last round ended, if it was lost.
    pub fn last_error(&self) -> Option<VerifyError> {
        self.last_error
    }

    pub fn store(&self) -> &SequenceStore {
        &self.store
    }

    pub fn playback(&self) -> &SequencePlayback {
        &self.playback
    }

    pub fn verifier(&self) -> &SequenceVerifier {
        &self.verifier
    }

    pub fn config(&self) -> &SimonConfig {
        &self.config
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    fn observe(&mut self) {
        self.traces.game.observe(self.state, &mut self.observer);
        self.traces.playback.observe(self.playback.state(), &mut self.observer);
        self.traces.verify.observe(self.verifier.state(), &mut self.observer);
        self.traces.input.observe(self.verifier.input().state(), &mut self.observer);
    }

    fn transition(&mut self) -> GameState {
        use GameState::*;

        match self.state {
            Init => {
                self.regenerate();
                self.store.set_active_length(1);
                IntroMessage
            }
            IntroMessage => {
                layout::draw_intro(&mut self.board, self.round_length, true);
                // only touches made while the prompt is up count
                self.board.clear_pending_touch();
                IntroWaitTouch
            }
            IntroWaitTouch => {
                if !self.board.is_touched() {
                    return IntroWaitTouch;
                }
                self.board.clear_pending_touch();
                layout::draw_intro(&mut self.board, self.round_length, false);
                self.start_round();
                FlashSequence
            }
            FlashSequence => {
                if !self.playback.is_complete() {
                    return FlashSequence;
                }
                self.playback.disable();
                self.start_verification();
                VerifySequence
            }
            VerifySequence => {
                if !self.verifier.is_complete() {
                    return VerifySequence;
                }
                self.verifier.disable();
                self.board.draw_all_markers(Paint::Erase);

                let active = self.store.active_length();
                if let Some(error) = self.verifier.error() {
                    info!("round lost at length {}/{}: {}", active, self.round_length, error);
                    self.last_error = Some(error);
                    self.verified_length = active.saturating_sub(1);
                    GameOverMessage
                } else if active >= self.round_length {
                    info!("round of length {} complete", self.round_length);
                    self.verified_length = active;
                    Congratulate
                } else {
                    self.verified_length = active;
                    self.store.set_active_length(active + 1);
                    self.start_playback();
                    FlashSequence
                }
            }
            GameOverMessage => {
                self.game_over_line = layout::last_sequence_line(self.verified_length, self.round_length);
                self.board.draw_text(layout::GAME_OVER_POS, layout::BODY_SIZE, layout::text_color(true), &self.game_over_line);
                self.regenerate();
                self.delay_counter = 0;
                GameOver
            }
            GameOver => {
                self.delay_counter += 1;
                if self.delay_counter < self.config.game_over_delay_ticks {
                    return GameOver;
                }
                self.delay_counter = 0;
                self.board.draw_text(layout::GAME_OVER_POS, layout::BODY_SIZE, layout::text_color(false), &self.game_over_line);
                if self.last_error.take().is_some() {
                    self.round_length = self.config.initial_round_length;
                }
                self.store.set_active_length(1);
                IntroMessage
            }
            Congratulate => {
                self.board.draw_text(layout::CONGRATULATE_POS, layout::CONGRATULATE_SIZE, layout::text_color(true), layout::CONGRATULATE);
                self.delay_counter = 0;
                CongratulateDelay
            }
            CongratulateDelay => {
                if self.delay_counter < self.config.congratulate_delay_ticks {
                    self.delay_counter += 1;
                    return CongratulateDelay;
                }
                self.delay_counter = 0;
                self.board.draw_text(layout::CONGRATULATE_POS, layout::CONGRATULATE_SIZE, layout::text_color(false), layout::CONGRATULATE);
                self.board.draw_text(layout::TRY_AGAIN_POS, layout::BODY_SIZE, layout::text_color(true), layout::TRY_AGAIN);
                self.board.clear_pending_touch();
                self.touch_wait_counter = 0;
                CongratulateWaitTouch
            }
            CongratulateWaitTouch => {
                if self.touch_wait_counter > u32::from(self.config.congratulate_touch_timeout_ticks) {
                    debug!("nobody asked for another round, starting over");
                    self.touch_wait_counter = 0;
                    self.board.draw_text(layout::TRY_AGAIN_POS, layout::BODY_SIZE, layout::text_color(false), layout::TRY_AGAIN);
                    self.regenerate();
                    GameOverMessage
                } else if self.board.is_touched() {
                    self.board.clear_pending_touch();
                    self.touch_wait_counter = 0;
                    self.board.draw_text(layout::TRY_AGAIN_POS, layout::BODY_SIZE, layout::text_color(false), layout::TRY_AGAIN);
                    self.grow_round();
                    self.start_round();
                    FlashSequence
                } else {
                    self.touch_wait_counter += 1;
                    CongratulateWaitTouch
                }
            }
        }
    }

    fn grow_round(&mut self) {
        if self.round_length < self.config.sequence_capacity {
            self.round_length += 1;
        } else {
            warn!("round length already at the sequence capacity ({})", self.config.sequence_capacity);
        }
    }

    /// Fresh sequence, one symbol in play, and playback starts.
    fn start_round(&mut self) {
        self.regenerate();
        self.store.set_active_length(1);
        self.verified_length = 0;
        self.start_playback();
    }

    fn start_playback(&mut self) {
        debug_assert!(!self.verifier.is_enabled(), "verification still enabled");
        self.playback.enable();
    }

    fn start_verification(&mut self) {
        debug_assert!(!self.playback.is_enabled(), "playback still enabled");
        self.verifier.enable();
        self.board.draw_all_markers(Paint::Draw);
    }

    fn regenerate(&mut self) {
        let seed = self.config.seed ^ self.seed_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let mut sequence = Sequence::new();
        self.generator.generate(seed, self.config.sequence_capacity, &mut sequence);
        self.store.set_sequence(&sequence);
    }
}
