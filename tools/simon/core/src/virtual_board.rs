use alloc::collections::VecDeque;
use alloc::vec::Vec;
use heapless::String;
use log::warn;

use crate::board::{SimonDisplay, TouchPanel, TouchPoint};
use crate::region::{Color, Extents, Paint, Point, Region};

const HISTORY_LIMIT: usize = 512;

pub type Text = String<48>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawOp {
    Highlight(Region, Paint),
    Marker(Region, Paint),
    Text { position: Point, size: u8, color: Color, text: Text },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextItem {
    pub position: Point,
    pub size: u8,
    pub color: Color,
    pub text: Text,
}

/// A screen and touch panel that live in memory.
///
/// Keeps what is currently visible plus a bounded history of draw calls.
/// Touches go through a press latch: a press and release that both happen
/// between two ticks still read as one touch until the game clears it.
#[derive(Debug, Clone)]
pub struct VirtualBoard {
    extents: Extents,
    highlights: [bool; 4],
    markers: [bool; 4],
    texts: Vec<TextItem>,
    history: VecDeque<DrawOp>,

    held: bool,
    pressed: bool,
    point: TouchPoint,
}

impl Default for VirtualBoard {
    fn default() -> Self {
        Self::new(Extents::default())
    }
}

impl VirtualBoard {
    pub fn new(extents: Extents) -> Self {
        Self {
            extents,
            highlights: [false; 4],
            markers: [false; 4],
            texts: Vec::new(),
            history: VecDeque::new(),
            held: false,
            pressed: false,
            point: TouchPoint::default(),
        }
    }

    pub fn extents(&self) -> Extents {
        self.extents
    }

    /// Finger down at `point`. Stays touched until [`VirtualBoard::release`].
    pub fn press(&mut self, point: Point) {
        self.held = true;
        self.pressed = true;
        self.point = TouchPoint { x: point.x, y: point.y, pressure: 255 };
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    /// Press and release before the next tick.
    pub fn tap(&mut self, point: Point) {
        self.press(point);
        self.release();
    }

    pub fn tap_region(&mut self, region: Region) {
        self.tap(self.extents.center_of(region));
    }

    pub fn press_region(&mut self, region: Region) {
        self.press(self.extents.center_of(region));
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Where the last press landed.
    pub fn touch_point(&self) -> TouchPoint {
        self.point
    }

    pub fn highlight_lit(&self, region: Region) -> bool {
        self.highlights[region.index()]
    }

    pub fn marker_lit(&self, region: Region) -> bool {
        self.markers[region.index()]
    }

    pub fn lit_highlights(&self) -> impl Iterator<Item = Region> + '_ {
        Region::ALL.into_iter().filter(move |r| self.highlight_lit(*r))
    }

    pub fn texts(&self) -> &[TextItem] {
        &self.texts
    }

    pub fn shows_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|item| item.text.contains(needle))
    }

    pub fn history(&self) -> impl Iterator<Item = &DrawOp> {
        self.history.iter()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Wipes the screen, keeping touch state.
    pub fn clear_screen(&mut self) {
        self.highlights = [false; 4];
        self.markers = [false; 4];
        self.texts.clear();
    }

    fn record(&mut self, op: DrawOp) {
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(op);
    }
}

impl TouchPanel for VirtualBoard {
    fn is_touched(&self) -> bool {
        self.held || self.pressed
    }

    fn clear_pending_touch(&mut self) {
        self.pressed = false;
    }

    fn sample_touch_point(&mut self) -> TouchPoint {
        self.point
    }
}

impl SimonDisplay for VirtualBoard {
    fn draw_region_highlight(&mut self, region: Region, paint: Paint) {
        self.highlights[region.index()] = paint == Paint::Draw;
        self.record(DrawOp::Highlight(region, paint));
    }

    fn draw_region_marker(&mut self, region: Region, paint: Paint) {
        self.markers[region.index()] = paint == Paint::Draw;
        self.record(DrawOp::Marker(region, paint));
    }

    fn draw_text(&mut self, position: Point, size: u8, color: Color, text: &str) {
        let mut owned = Text::new();
        if owned.push_str(text).is_err() {
            warn!("text too long for the virtual board: {:?}", text);
        }

        self.texts.retain(|item| !(item.position == position && item.text == owned));
        if color != Color::Black {
            self.texts.push(TextItem { position, size, color, text: owned.clone() });
        }

        self.record(DrawOp::Text { position, size, color, text: owned });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_is_latched_until_cleared() {
        let mut board = VirtualBoard::default();
        board.tap_region(Region::BottomLeft);

        assert!(board.is_touched());
        assert!(!board.is_held());
        let sample = board.sample_touch_point();
        assert_eq!(sample.point(), board.extents().center_of(Region::BottomLeft));

        board.clear_pending_touch();
        assert!(!board.is_touched());
    }

    #[test]
    fn held_press_survives_clearing() {
        let mut board = VirtualBoard::default();
        board.press_region(Region::TopRight);
        board.clear_pending_touch();
        assert!(board.is_touched());
        board.release();
        assert!(!board.is_touched());
    }

    #[test]
    fn black_text_erases() {
        let mut board = VirtualBoard::default();
        board.draw_text(Point::new(1, 2), 2, Color::White, "hello");
        assert!(board.shows_text("hello"));
        board.draw_text(Point::new(1, 2), 2, Color::Black, "hello");
        assert!(!board.shows_text("hello"));
        assert_eq!(board.history().count(), 2);
    }

    #[test]
    fn shapes_track_draw_and_erase() {
        let mut board = VirtualBoard::default();
        board.draw_region_highlight(Region::TopLeft, Paint::Draw);
        board.draw_all_markers(Paint::Draw);
        assert_eq!(board.lit_highlights().collect::<Vec<_>>(), [Region::TopLeft]);
        assert!(Region::ALL.iter().all(|r| board.marker_lit(*r)));

        board.draw_region_highlight(Region::TopLeft, Paint::Erase);
        board.draw_region_marker(Region::BottomRight, Paint::Erase);
        assert_eq!(board.lit_highlights().count(), 0);
        assert!(!board.marker_lit(Region::BottomRight));
    }
}
