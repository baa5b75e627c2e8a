use crate::region::{Color, Paint, Point, Region};

/// A raw sample from the touch controller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TouchPoint {
    pub x: i16,
    pub y: i16,
    pub pressure: u8,
}

impl TouchPoint {
    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

pub trait TouchPanel {
    fn is_touched(&self) -> bool;

    /// Drop whatever touch data is latched so the next sample is fresh.
    fn clear_pending_touch(&mut self);

    fn sample_touch_point(&mut self) -> TouchPoint;
}

pub trait SimonDisplay {
    /// The large square covering most of a region.
    fn draw_region_highlight(&mut self, region: Region, paint: Paint);

    /// The small button in the middle of a region.
    fn draw_region_marker(&mut self, region: Region, paint: Paint);

    fn draw_text(&mut self, position: Point, size: u8, color: Color, text: &str);

    fn draw_all_markers(&mut self, paint: Paint) {
        for region in Region::ALL {
            self.draw_region_marker(region, paint);
        }
    }
}

/// Everything a machine is allowed to touch outside of itself.
pub trait Board: TouchPanel + SimonDisplay {}

impl<T: TouchPanel + SimonDisplay> Board for T {}
