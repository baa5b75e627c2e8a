use log::{debug, warn};

use crate::board::Board;
use crate::interlock::Interlock;
use crate::region::{Paint, Region};
use crate::sequence::SequenceStore;
use crate::trace::StateName;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    ShowSymbol,
    Pause,
    HideSymbol,
    Done,
}

impl StateName for PlaybackState {
    fn name(&self) -> &'static str {
        match self {
            PlaybackState::Idle => "idle",
            PlaybackState::ShowSymbol => "show symbol",
            PlaybackState::Pause => "pause",
            PlaybackState::HideSymbol => "hide symbol",
            PlaybackState::Done => "done",
        }
    }
}

/// Flashes the active prefix of the sequence, one symbol at a time.
///
/// Every symbol is lit for the same number of ticks, then erased before the
/// next one is shown.
#[derive(Debug, Clone)]
pub struct SequencePlayback {
    state: PlaybackState,
    interlock: Interlock,

    index: usize,
    pause_ticks: u16,
    pause_counter: u16,
    lit: Option<Region>,
}

impl SequencePlayback {
    pub fn new(pause_ticks: u16) -> Self {
        Self {
            state: PlaybackState::Idle,
            interlock: Interlock::new(),
            index: 0,
            pause_ticks: pause_ticks.max(1),
            pause_counter: 0,
            lit: None,
        }
    }

    pub fn init(&mut self) {
        *self = Self::new(self.pause_ticks);
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
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Position of the symbol being flashed.
    #[inline(always)]
    pub fn cursor(&self) -> usize {
        self.index
    }

    pub fn tick<B: Board + ?Sized>(&mut self, store: &SequenceStore, board: &mut B) {
        let stray = !self.interlock.is_enabled() && self.state != PlaybackState::Idle;
        if self.interlock.take_restart() || stray {
            self.reset(board);
        }

        self.state = self.transition(store, board);

        if self.state == PlaybackState::Done {
            self.interlock.signal_complete();
        }
    }

    fn reset<B: Board + ?Sized>(&mut self, board: &mut B) {
        if let Some(region) = self.lit.take() {
            board.draw_region_highlight(region, Paint::Erase);
        }
        self.index = 0;
        self.pause_counter = 0;
        self.interlock.clear_complete();
        self.state = PlaybackState::Idle;
    }

    fn transition<B: Board + ?Sized>(&mut self, store: &SequenceStore, board: &mut B) -> PlaybackState {
        use PlaybackState::*;

        match self.state {
            Idle => {
                if self.interlock.is_enabled() {
                    debug!("flashing {} symbols", store.active_length());
                    self.show(store, board)
                } else {
                    Idle
                }
            }
            ShowSymbol => Pause,
            Pause => {
                self.pause_counter += 1;
                if self.pause_counter < self.pause_ticks {
                    Pause
                } else {
                    self.pause_counter = 0;
                    HideSymbol
                }
            }
            HideSymbol => {
                if let Some(region) = self.lit.take() {
                    board.draw_region_highlight(region, Paint::Erase);
                }

                if self.index + 1 < store.active_length() {
                    self.index += 1;
                    self.show(store, board)
                } else {
                    self.index = 0;
                    Done
                }
            }
            Done => Done,
        }
    }

    /// Entry action of `ShowSymbol`.
    fn show<B: Board + ?Sized>(&mut self, store: &SequenceStore, board: &mut B) -> PlaybackState {
        match store.value_at(self.index) {
            Some(region) => {
                board.draw_region_highlight(region, Paint::Draw);
                self.lit = Some(region);
                PlaybackState::ShowSymbol
            }
            None => {
                warn!("nothing to flash at position {} (active length {})", self.index, store.active_length());
                self.index = 0;
                PlaybackState::Done
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::virtual_board::{DrawOp, VirtualBoard};
    use alloc::vec::Vec;
    use Region::*;

    fn store(symbols: &[Region], active: usize) -> SequenceStore {
        let mut store = SequenceStore::new();
        store.set_sequence(symbols);
        store.set_active_length(active);
        store
    }

    fn run_to_completion(playback: &mut SequencePlayback, store: &SequenceStore, board: &mut VirtualBoard) -> usize {
        for ticks in 1..=200 {
            playback.tick(store, board);
            if playback.is_complete() {
                return ticks;
            }
        }
        panic!("playback never completed");
    }

    fn flashed(board: &VirtualBoard) -> Vec<Region> {
        board
            .history()
            .filter_map(|op| match op {
                DrawOp::Highlight(region, Paint::Draw) => Some(*region),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn flashes_only_the_active_prefix_in_order() {
        let store = store(&[TopLeft, TopRight, BottomLeft, BottomRight], 3);
        let mut board = VirtualBoard::default();
        let mut playback = SequencePlayback::new(2);
        playback.enable();

        run_to_completion(&mut playback, &store, &mut board);

        assert_eq!(flashed(&board), [TopLeft, TopRight, BottomLeft]);
        assert_eq!(board.lit_highlights().count(), 0);
        assert_eq!(playback.state(), PlaybackState::Done);
        assert_eq!(playback.cursor(), 0);
    }

    #[test]
    fn every_symbol_is_lit_for_the_same_time() {
        let store = store(&[TopLeft, BottomRight], 2);
        let mut board = VirtualBoard::default();
        let mut playback = SequencePlayback::new(3);
        playback.enable();

        let mut lit_ticks = [0usize; 4];
        while !playback.is_complete() {
            playback.tick(&store, &mut board);
            for region in board.lit_highlights() {
                lit_ticks[region.index()] += 1;
            }
        }
        assert!(lit_ticks[TopLeft.index()] > 0);
        assert_eq!(lit_ticks[TopLeft.index()], lit_ticks[BottomRight.index()]);
    }

    #[test]
    fn one_symbol_takes_a_fixed_number_of_ticks() {
        let store = store(&[BottomLeft], 1);
        let mut board = VirtualBoard::default();
        let mut playback = SequencePlayback::new(2);
        playback.enable();

        // show, pause x2, hide, done
        assert_eq!(run_to_completion(&mut playback, &store, &mut board), 5);
    }

    #[test]
    fn pause_lasts_exactly_the_configured_ticks() {
        let store = store(&[TopRight, TopLeft], 2);
        for pause_ticks in [1, 2, 7] {
            let mut board = VirtualBoard::default();
            let mut playback = SequencePlayback::new(pause_ticks);
            playback.enable();

            let mut paused = 0;
            while !playback.is_complete() {
                playback.tick(&store, &mut board);
                if playback.state() == PlaybackState::Pause {
                    paused += 1;
                }
            }
            assert_eq!(paused, 2 * pause_ticks as usize, "pause_ticks = {}", pause_ticks);
        }
    }

    #[test]
    fn rearming_in_the_same_tick_behaves_like_a_fresh_enable() {
        let store = store(&[TopLeft, TopRight, BottomLeft], 3);
        let mut board = VirtualBoard::default();
        let mut playback = SequencePlayback::new(2);
        playback.enable();
        for _ in 0..6 {
            playback.tick(&store, &mut board);
        }
        assert_eq!(playback.cursor(), 1);

        playback.disable();
        playback.enable();
        assert!(!playback.is_complete());

        let mut fresh_board = VirtualBoard::default();
        let mut fresh = SequencePlayback::new(2);
        fresh.enable();
        while !fresh.is_complete() {
            playback.tick(&store, &mut board);
            fresh.tick(&store, &mut fresh_board);
            assert_eq!(playback.state(), fresh.state());
            assert_eq!(playback.cursor(), fresh.cursor());
            assert_eq!(playback.is_complete(), fresh.is_complete());
            assert_eq!(board.lit_highlights().collect::<Vec<_>>(), fresh_board.lit_highlights().collect::<Vec<_>>());
        }
        assert!(playback.is_complete());
    }

    #[test]
    fn disable_erases_and_resets() {
        let store = store(&[TopLeft, TopRight], 2);
        let mut board = VirtualBoard::default();
        let mut playback = SequencePlayback::new(2);
        playback.enable();
        playback.tick(&store, &mut board);
        assert!(board.highlight_lit(TopLeft));

        playback.disable();
        playback.tick(&store, &mut board);
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert!(!board.highlight_lit(TopLeft));

        // stays put while disabled
        playback.tick(&store, &mut board);
        assert_eq!(playback.state(), PlaybackState::Idle);

        playback.enable();
        board.clear_history();
        run_to_completion(&mut playback, &store, &mut board);
        assert_eq!(flashed(&board), [TopLeft, TopRight]);
    }

    #[test]
    fn done_clears_on_disable() {
        let store = store(&[TopLeft], 1);
        let mut board = VirtualBoard::default();
        let mut playback = SequencePlayback::new(1);
        playback.enable();
        run_to_completion(&mut playback, &store, &mut board);

        playback.tick(&store, &mut board);
        assert!(playback.is_complete());

        playback.disable();
        playback.tick(&store, &mut board);
        assert!(!playback.is_complete());
        assert_eq!(playback.state(), PlaybackState::Idle);
    }

    #[test]
    fn empty_store_completes_immediately() {
        let store = SequenceStore::new();
        let mut board = VirtualBoard::default();
        let mut playback = SequencePlayback::new(2);
        playback.enable();
        playback.tick(&store, &mut board);
        assert!(playback.is_complete());
        assert_eq!(board.history().count(), 0);
    }
}
