//! Where the game's text goes on a 320x240 panel.

use heapless::String;
use core::fmt::Write;

use crate::board::SimonDisplay;
use crate::region::{Color, Point};

pub const TITLE_POS: Point = Point::new(100, 80);
pub const TITLE_SIZE: u8 = 4;
pub const TOUCH_TO_PLAY_POS: Point = Point::new(85, 125);
pub const LENGTH_POS: Point = Point::new(100, 155);
pub const GAME_OVER_POS: Point = Point::new(50, 80);
pub const CONGRATULATE_POS: Point = Point::new(100, 80);
pub const CONGRATULATE_SIZE: u8 = 5;
pub const TRY_AGAIN_POS: Point = Point::new(50, 100);
pub const BODY_SIZE: u8 = 2;

pub const TITLE: &str = "SIMON";
pub const TOUCH_TO_PLAY: &str = "Touch to play";
pub const CONGRATULATE: &str = "Yay!";
pub const TRY_AGAIN: &str = "Touch to Try Again";

pub type Line = String<48>;

/// `"Length: 4"`
pub fn length_line(round_length: usize) -> Line {
    let mut line = Line::new();
    // 48 bytes always fits two usizes and the label
    let _ = write!(line, "Length: {}", round_length);
    line
}

/// `"Last Sequence: 2 / 4"`
pub fn last_sequence_line(completed: usize, round_length: usize) -> Line {
    let mut line = Line::new();
    let _ = write!(line, "Last Sequence: {} / {}", completed, round_length);
    line
}

/// Text is erased by redrawing it in the background color.
#[inline]
pub fn text_color(draw: bool) -> Color {
    if draw { Color::White } else { Color::Black }
}

pub fn draw_intro<D: SimonDisplay + ?Sized>(display: &mut D, round_length: usize, draw: bool) {
    let color = text_color(draw);
    display.draw_text(TITLE_POS, TITLE_SIZE, color, TITLE);
    display.draw_text(TOUCH_TO_PLAY_POS, BODY_SIZE, color, TOUCH_TO_PLAY);
    display.draw_text(LENGTH_POS, BODY_SIZE, color, &length_line(round_length));
}
