use log::{debug, info};
use thiserror::Error;

use crate::board::Board;
use crate::input::InputCapture;
use crate::interlock::Interlock;
use crate::region::Extents;
use crate::sequence::SequenceStore;
use crate::trace::StateName;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VerifyState {
    ArmInput,
    AwaitingInput,
    Done,
}

impl StateName for VerifyState {
    fn name(&self) -> &'static str {
        match self {
            VerifyState::ArmInput => "arm input",
            VerifyState::AwaitingInput => "awaiting input",
            VerifyState::Done => "done",
        }
    }
}

/// Why a verification pass ended early. Both end the round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("the player did not touch the screen in time")]
    Timeout,
    #[error("the player touched the wrong region")]
    Mismatch,
}

/// Checks the player's touches against the active prefix, one symbol per
/// touch, driving its own [`InputCapture`].
///
/// The timeout counts ticks spent both arming and waiting, so a player who
/// never touches is still caught. It restarts on every detected release.
#[derive(Debug, Clone)]
pub struct SequenceVerifier {
    state: VerifyState,
    interlock: Interlock,
    input: InputCapture,

    index: usize,
    timeout_ticks: u16,
    // wider than the bound so `> bound` is always reachable
    timeout_counter: u32,
    error: Option<VerifyError>,
}

impl SequenceVerifier {
    pub fn new(timeout_ticks: u16, extents: Extents) -> Self {
        Self {
            state: VerifyState::ArmInput,
            interlock: Interlock::new(),
            input: InputCapture::new(extents),
            index: 0,
            timeout_ticks,
            timeout_counter: 0,
            error: None,
        }
    }

    pub fn init(&mut self) {
        self.state = VerifyState::ArmInput;
        self.interlock = Interlock::new();
        self.input.init();
        self.index = 0;
        self.timeout_counter = 0;
        self.error = None;
    }

    pub fn enable(&mut self) {
        self.interlock.arm();
    }

    pub fn disable(&mut self) {
        self.interlock.release();
    }

    #[inline(always)]
    pub fn is_enabled(&self) -> bool {
        self.interlock.is_enabled()
    }

    #[inline(always)]
    pub fn is_complete(&self) -> bool {
        self.interlock.is_complete()
    }

    #[inline(always)]
    pub fn is_timeout_error(&self) -> bool {
        self.error == Some(VerifyError::Timeout)
    }

    #[inline(always)]
    pub fn is_mismatch_error(&self) -> bool {
        self.error == Some(VerifyError::Mismatch)
    }

    /// Latched until the next enable.
    #[inline(always)]
    pub fn error(&self) -> Option<VerifyError> {
        self.error
    }

    #[inline(always)]
    pub fn state(&self) -> VerifyState {
        self.state
    }

    /// Position of the symbol the player is expected to touch next.
    #[inline(always)]
    pub fn cursor(&self) -> usize {
        self.index
    }

    pub fn input(&self) -> &InputCapture {
        &self.input
    }

    pub fn tick<B: Board + ?Sized>(&mut self, store: &SequenceStore, board: &mut B) {
        let stray = !self.interlock.is_enabled() && self.state != VerifyState::ArmInput;
        if self.interlock.take_restart() || stray {
            self.reset();
        }

        self.state = self.transition(store);

        if self.state == VerifyState::Done {
            self.interlock.signal_complete();
        }

        self.input.tick(board);
    }

    fn reset(&mut self) {
        self.input.disable();
        self.index = 0;
        self.timeout_counter = 0;
        self.interlock.clear_complete();
        if self.interlock.is_enabled() {
            self.error = None;
        }
        self.state = VerifyState::ArmInput;
    }

    fn transition(&mut self, store: &SequenceStore) -> VerifyState {
        use VerifyState::*;

        match self.state {
            ArmInput => {
                if !self.interlock.is_enabled() {
                    self.timeout_counter = 0;
                    return ArmInput;
                }

                if self.timeout_counter > u32::from(self.timeout_ticks) {
                    return self.timed_out();
                }

                self.timeout_counter += 1;
                self.error = None;
                self.input.enable();
                AwaitingInput
            }
            AwaitingInput => {
                if self.timeout_counter > u32::from(self.timeout_ticks) {
                    return self.timed_out();
                }
                self.timeout_counter += 1;

                if !self.input.is_release_detected() {
                    return AwaitingInput;
                }

                self.input.disable();
                self.timeout_counter = 0;

                let expected = store.value_at(self.index);
                let touched = self.input.current_region();
                if expected.is_some() && touched == expected {
                    if self.index + 1 >= store.active_length() {
                        debug!("all {} symbols matched", store.active_length());
                        self.index = 0;
                        Done
                    } else {
                        self.index += 1;
                        ArmInput
                    }
                } else {
                    info!("mismatch at position {}: expected {:?}, touched {:?}", self.index, expected, touched);
                    self.error = Some(VerifyError::Mismatch);
                    self.index = 0;
                    Done
                }
            }
            Done => Done,
        }
    }

    fn timed_out(&mut self) -> VerifyState {
        info!("timed out waiting for position {}", self.index);
        self.input.disable();
        self.timeout_counter = 0;
        self.error = Some(VerifyError::Timeout);
        self.index = 0;
        VerifyState::Done
    }
}
