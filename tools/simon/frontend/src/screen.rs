use ratatui::{buffer::Buffer, crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind}, layout::{Position, Rect}, style::{Color, Modifier, Style}, widgets::Widget};
use simon_core::{region::{highlight_rect, marker_rect}, point_to_region, Extents, Point, Region, VirtualBoard};

use crate::helpers::SCHEME;

/// Draws a [`VirtualBoard`] into a terminal rectangle, one cell per scaled pixel block.
pub struct BoardView<'a> {
    board: &'a VirtualBoard,
}

impl<'a> BoardView<'a> {
    pub fn new(board: &'a VirtualBoard) -> Self {
        Self { board }
    }
}

fn region_color(region: Region, shade: usize) -> Color {
    match region.color() {
        simon_core::Color::Red => SCHEME.red[shade],
        simon_core::Color::Yellow => SCHEME.yellow[shade],
        simon_core::Color::Blue => SCHEME.blue[shade],
        simon_core::Color::Green => SCHEME.green[shade],
        simon_core::Color::White => SCHEME.white[shade],
        simon_core::Color::Black => SCHEME.black[shade],
    }
}

fn text_color(color: simon_core::Color) -> Color {
    match color {
        simon_core::Color::Black => SCHEME.black[0],
        simon_core::Color::White => SCHEME.white[1],
        simon_core::Color::Red => SCHEME.red[3],
        simon_core::Color::Yellow => SCHEME.yellow[3],
        simon_core::Color::Blue => SCHEME.blue[3],
        simon_core::Color::Green => SCHEME.green[3],
    }
}

/// Board pixel under the middle of a terminal cell.
pub fn cell_to_point(area: Rect, extents: Extents, column: u16, row: u16) -> Option<Point> {
    if area.width == 0 || area.height == 0 || !area.contains(Position::new(column, row)) {
        return None;
    }

    let dx = (column - area.x) as i32 * 2 + 1;
    let dy = (row - area.y) as i32 * 2 + 1;
    let x = dx * extents.width as i32 / (area.width as i32 * 2);
    let y = dy * extents.height as i32 / (area.height as i32 * 2);
    Some(Point::new(x as i16, y as i16))
}

/// Terminal cell a board pixel falls into.
pub fn point_to_cell(area: Rect, extents: Extents, point: Point) -> (u16, u16) {
    let x = (point.x.max(0) as i32 * area.width as i32 / extents.width.max(1) as i32).min(area.width.saturating_sub(1) as i32);
    let y = (point.y.max(0) as i32 * area.height as i32 / extents.height.max(1) as i32).min(area.height.saturating_sub(1) as i32);
    (area.x + x as u16, area.y + y as u16)
}

/// Feeds mouse buttons and the 1-4 keys into the board's touch panel.
/// Returns whether the event was a touch.
pub fn apply_touch(board: &mut VirtualBoard, area: Rect, event: &Event) -> bool {
    match event {
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match cell_to_point(area, board.extents(), mouse.column, mouse.row) {
                    Some(point) => {
                        board.press(point);
                        true
                    }
                    None => false,
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                board.release();
                true
            }
            _ => false,
        },
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Char(c @ '1'..='4') => {
                board.tap_region(Region::from_index(c as usize - '1' as usize));
                true
            }
            _ => false,
        },
        _ => false,
    }
}

impl Widget for BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let extents = self.board.extents();

        for row in area.top()..area.bottom() {
            for column in area.left()..area.right() {
                let Some(point) = cell_to_point(area, extents, column, row) else { continue };
                let region = point_to_region(point, extents);

                let bg = if marker_rect(region, extents).contains(point) && self.board.marker_lit(region) {
                    region_color(region, 1)
                } else if highlight_rect(region, extents).contains(point) && self.board.highlight_lit(region) {
                    region_color(region, 3)
                } else if highlight_rect(region, extents).contains(point) {
                    SCHEME.black[2]
                } else {
                    SCHEME.black[0]
                };

                if let Some(cell) = buf.cell_mut(Position::new(column, row)) {
                    cell.set_char(' ').set_bg(bg);
                }
            }
        }

        for item in self.board.texts() {
            let (x, y) = point_to_cell(area, extents, item.position);
            let mut style = Style::default().fg(text_color(item.color));
            if item.size >= 4 {
                style = style.add_modifier(Modifier::BOLD);
            }
            let room = area.right().saturating_sub(x) as usize;
            buf.set_stringn(x, y, item.text.as_str(), room, style);
        }

        if self.board.is_held() {
            let (x, y) = point_to_cell(area, extents, self.board.touch_point().point());
            if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                cell.set_char('+').set_fg(SCHEME.white[0]);
            }
        }
    }
}
