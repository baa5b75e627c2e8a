use log::debug;

use crate::board::Board;
use crate::interlock::Interlock;
use crate::region::{point_to_region, Extents, Paint, Region};
use crate::trace::StateName;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    AwaitingTouch,
    Sampling,
    AwaitingRelease,
    Settled,
}

impl StateName for CaptureState {
    fn name(&self) -> &'static str {
        match self {
            CaptureState::Idle => "idle",
            CaptureState::AwaitingTouch => "awaiting touch",
            CaptureState::Sampling => "sampling",
            CaptureState::AwaitingRelease => "awaiting release",
            CaptureState::Settled => "settled",
        }
    }
}

/// Waits for one touch, figures out which region it landed in, and waits for
/// the finger to come back up.
///
/// Has no timeout of its own. Whoever enables it decides how long to wait and
/// disables it when done; a disabled machine is back in `Idle` after one tick,
/// with any highlight it drew erased.
#[derive(Debug, Clone)]
pub struct InputCapture {
    state: CaptureState,
    interlock: Interlock,
    extents: Extents,

    released: bool,
    region: Option<Region>,
    // highlight still on screen that must be erased on the way out
    lit: Option<Region>,
}

impl InputCapture {
    pub fn new(extents: Extents) -> Self {
        Self {
            state: CaptureState::Idle,
            interlock: Interlock::new(),
            extents,
            released: false,
            region: None,
            lit: None,
        }
    }

    /// Back to the power-on state. Does not touch the display.
    pub fn init(&mut self) {
        *self = Self::new(self.extents);
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
    pub fn is_release_detected(&self) -> bool {
        self.released
    }

    #[inline(always)]
    pub fn is_complete(&self) -> bool {
        self.interlock.is_complete()
    }

    /// Region of the last sampled touch. Survives `disable` until the next enable.
    #[inline(always)]
    pub fn current_region(&self) -> Option<Region> {
        self.region
    }

    #[inline(always)]
    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn tick<B: Board + ?Sized>(&mut self, board: &mut B) {
        let stray = !self.interlock.is_enabled() && self.state != CaptureState::Idle;
        if self.interlock.take_restart() || stray {
            self.reset(board);
        }

        self.state = self.transition(board);

        if self.state == CaptureState::Settled {
            self.interlock.signal_complete();
        }
    }

    fn reset<B: Board + ?Sized>(&mut self, board: &mut B) {
        if let Some(region) = self.lit.take() {
            board.draw_region_highlight(region, Paint::Erase);
        }
        self.released = false;
        self.interlock.clear_complete();
        self.state = CaptureState::Idle;
    }

    fn transition<B: Board + ?Sized>(&mut self, board: &mut B) -> CaptureState {
        use CaptureState::*;

        match self.state {
            Idle => {
                if self.interlock.is_enabled() {
                    self.released = false;
                    self.region = None;
                    // a tap latched while nobody was listening is not an answer
                    board.clear_pending_touch();
                    AwaitingTouch
                } else {
                    Idle
                }
            }
            AwaitingTouch => {
                if board.is_touched() {
                    // stale coordinates would otherwise be sampled again next time
                    board.clear_pending_touch();
                    Sampling
                } else {
                    AwaitingTouch
                }
            }
            Sampling => {
                let sample = board.sample_touch_point();
                let region = point_to_region(sample.point(), self.extents);
                debug!("touch at ({}, {}) p={} -> region {}", sample.x, sample.y, sample.pressure, region);

                self.region = Some(region);
                board.draw_region_highlight(region, Paint::Draw);
                self.lit = Some(region);
                AwaitingRelease
            }
            AwaitingRelease => {
                if board.is_touched() {
                    return AwaitingRelease;
                }

                if let Some(region) = self.lit.take() {
                    board.draw_region_highlight(region, Paint::Erase);
                }
                if let Some(region) = self.region {
                    board.draw_region_marker(region, Paint::Draw);
                }
                self.released = true;
                Settled
            }
            Settled => Settled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TouchPanel;
    use crate::virtual_board::{DrawOp, VirtualBoard};

    fn armed() -> (InputCapture, VirtualBoard) {
        let board = VirtualBoard::default();
        let mut input = InputCapture::new(board.extents());
        input.enable();
        (input, board)
    }

    #[test]
    fn captures_a_tap() {
        let (mut input, mut board) = armed();

        input.tick(&mut board);
        assert_eq!(input.state(), CaptureState::AwaitingTouch);
        input.tick(&mut board);
        assert_eq!(input.state(), CaptureState::AwaitingTouch);

        board.tap_region(Region::TopRight);
        input.tick(&mut board);
        assert_eq!(input.state(), CaptureState::Sampling);
        assert!(!board.is_touched(), "pending touch should be cleared");

        input.tick(&mut board);
        assert_eq!(input.state(), CaptureState::AwaitingRelease);
        assert!(board.highlight_lit(Region::TopRight));
        assert!(!input.is_release_detected());

        input.tick(&mut board);
        assert_eq!(input.state(), CaptureState::Settled);
        assert!(input.is_release_detected());
        assert!(input.is_complete());
        assert_eq!(input.current_region(), Some(Region::TopRight));
        assert!(!board.highlight_lit(Region::TopRight));
        assert!(board.marker_lit(Region::TopRight));
    }

    #[test]
    fn waits_while_the_finger_stays_down() {
        let (mut input, mut board) = armed();
        board.press_region(Region::BottomLeft);
        for _ in 0..10 {
            input.tick(&mut board);
        }
        assert_eq!(input.state(), CaptureState::AwaitingRelease);
        assert!(!input.is_release_detected());

        board.release();
        input.tick(&mut board);
        assert!(input.is_release_detected());
        assert_eq!(input.current_region(), Some(Region::BottomLeft));
    }

    #[test]
    fn stays_idle_until_enabled() {
        let mut board = VirtualBoard::default();
        let mut input = InputCapture::new(board.extents());
        board.tap_region(Region::TopLeft);
        for _ in 0..3 {
            input.tick(&mut board);
        }
        assert_eq!(input.state(), CaptureState::Idle);
        assert!(board.is_touched(), "an idle machine must not consume touches");
    }

    #[test]
    fn tap_before_arming_is_dropped() {
        let mut board = VirtualBoard::default();
        let mut input = InputCapture::new(board.extents());
        board.tap_region(Region::TopLeft);
        input.tick(&mut board);

        input.enable();
        for _ in 0..5 {
            input.tick(&mut board);
        }
        assert_eq!(input.state(), CaptureState::AwaitingTouch);
        assert_eq!(input.current_region(), None);
        assert!(!board.is_touched());
    }

    #[test]
    fn finger_still_down_when_armed_counts() {
        let (mut input, mut board) = armed();
        board.press_region(Region::TopRight);
        for _ in 0..3 {
            input.tick(&mut board);
        }
        assert_eq!(input.state(), CaptureState::AwaitingRelease);
        assert_eq!(input.current_region(), Some(Region::TopRight));
    }

    #[test]
    fn disabling_mid_press_erases_the_highlight() {
        let (mut input, mut board) = armed();
        board.press_region(Region::BottomRight);
        input.tick(&mut board);
        input.tick(&mut board);
        input.tick(&mut board);
        assert!(board.highlight_lit(Region::BottomRight));

        input.disable();
        input.tick(&mut board);
        assert_eq!(input.state(), CaptureState::Idle);
        assert!(!board.highlight_lit(Region::BottomRight));
        assert!(!input.is_release_detected());
        assert!(!input.is_complete());
    }

    #[test]
    fn disable_clears_flags_but_keeps_the_region() {
        let (mut input, mut board) = armed();
        input.tick(&mut board);
        board.tap_region(Region::TopLeft);
        for _ in 0..3 {
            input.tick(&mut board);
        }
        assert!(input.is_complete());

        input.disable();
        assert_eq!(input.current_region(), Some(Region::TopLeft));
        input.tick(&mut board);
        assert_eq!(input.state(), CaptureState::Idle);
        assert!(!input.is_complete());
        assert!(!input.is_release_detected());
    }

    #[test]
    fn rearming_in_the_same_tick_behaves_like_a_fresh_enable() {
        let (mut input, mut board) = armed();
        input.tick(&mut board);
        board.tap_region(Region::TopLeft);
        for _ in 0..3 {
            input.tick(&mut board);
        }
        assert_eq!(input.state(), CaptureState::Settled);

        input.disable();
        input.enable();
        assert!(!input.is_complete());

        let (mut fresh, mut fresh_board) = armed();
        board.clear_history();
        for _ in 0..3 {
            input.tick(&mut board);
            fresh.tick(&mut fresh_board);
            assert_eq!(input.state(), fresh.state());
            assert_eq!(input.is_complete(), fresh.is_complete());
            assert_eq!(input.is_release_detected(), fresh.is_release_detected());
        }
        assert_eq!(input.state(), CaptureState::AwaitingTouch);
        assert_eq!(board.history().count(), 0);
    }

    #[test]
    fn release_always_follows_a_sample() {
        let (mut input, mut board) = armed();
        input.tick(&mut board);
        board.tap_region(Region::BottomLeft);
        let mut sampled = false;
        for _ in 0..6 {
            input.tick(&mut board);
            if input.state() == CaptureState::Sampling {
                sampled = true;
            }
            if input.is_release_detected() {
                assert!(sampled);
                assert!(input.current_region().is_some());
            }
        }
        let highlights = board
            .history()
            .filter(|op| matches!(op, DrawOp::Highlight(_, _)))
            .count();
        assert_eq!(highlights, 2);
    }
}
