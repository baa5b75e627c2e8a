use core::fmt::{Display, Formatter};

/// The four touch zones, numbered left to right, top to bottom.
///
/// ```text
/// |----------|----------|
/// |    0     |    1     |
/// |  (red)   | (yellow) |
/// |----------|----------|
/// |    2     |    3     |
/// |  (blue)  | (green)  |
/// |----------|----------|
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::TopLeft, Region::TopRight, Region::BottomLeft, Region::BottomRight];

    #[inline(always)]
    pub const fn index(self) -> usize {
        match self {
            Region::TopLeft => 0,
            Region::TopRight => 1,
            Region::BottomLeft => 2,
            Region::BottomRight => 3,
        }
    }

    /// Inverse of [`Region::index`]; anything past 3 wraps.
    #[inline(always)]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    pub const fn color(self) -> Color {
        match self {
            Region::TopLeft => Color::Red,
            Region::TopRight => Color::Yellow,
            Region::BottomLeft => Color::Blue,
            Region::BottomRight => Color::Green,
        }
    }

    const fn is_right(self) -> bool {
        matches!(self, Region::TopRight | Region::BottomRight)
    }

    const fn is_bottom(self) -> bool {
        matches!(self, Region::BottomLeft | Region::BottomRight)
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.index())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
    Red,
    Yellow,
    Blue,
    Green,
}

/// Whether a draw call paints in the region's color or in the background.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Paint {
    Draw,
    Erase,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
}

impl Rect {
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x + self.width
            && point.y < self.y + self.height
    }
}

/// Size of the touch surface in panel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Extents {
    pub width: i16,
    pub height: i16,
}

impl Default for Extents {
    fn default() -> Self {
        Self { width: 320, height: 240 }
    }
}

impl Extents {
    #[inline(always)]
    pub const fn half_width(&self) -> i16 {
        self.width / 2
    }

    #[inline(always)]
    pub const fn half_height(&self) -> i16 {
        self.height / 2
    }

    /// Center of a region's quadrant, handy for synthesizing touches.
    pub const fn center_of(&self, region: Region) -> Point {
        let quad = quadrant_rect(region, *self);
        Point::new(quad.x + quad.width / 2, quad.y + quad.height / 2)
    }
}

/// Maps a touched point to its quadrant.
///
/// The split lines belong to the right and bottom regions. Points outside the
/// panel are clamped onto it first, touch controllers overshoot at the edges.
pub fn point_to_region(point: Point, extents: Extents) -> Region {
    let x = point.x.clamp(0, extents.width.max(1) - 1);
    let y = point.y.clamp(0, extents.height.max(1) - 1);

    match (x >= extents.half_width(), y >= extents.half_height()) {
        (false, false) => Region::TopLeft,
        (true, false) => Region::TopRight,
        (false, true) => Region::BottomLeft,
        (true, true) => Region::BottomRight,
    }
}

const fn quadrant_rect(region: Region, extents: Extents) -> Rect {
    let half_w = extents.half_width();
    let half_h = extents.half_height();
    Rect {
        x: if region.is_right() { half_w } else { 0 },
        y: if region.is_bottom() { half_h } else { 0 },
        width: if region.is_right() { extents.width - half_w } else { half_w },
        height: if region.is_bottom() { extents.height - half_h } else { half_h },
    }
}

/// The coarse square lit while a region is flashed or held down.
///
/// Inset by 1/16 of the panel so neighbouring highlights never touch.
pub const fn highlight_rect(region: Region, extents: Extents) -> Rect {
    let quad = quadrant_rect(region, extents);
    let inset_x = extents.width / 32;
    let inset_y = extents.height / 32;
    Rect {
        x: quad.x + inset_x,
        y: quad.y + inset_y,
        width: quad.width - inset_x * 2,
        height: quad.height - inset_y * 2,
    }
}

/// The smaller button centered in a region, reminding the player where to touch.
pub const fn marker_rect(region: Region, extents: Extents) -> Rect {
    let quad = quadrant_rect(region, extents);
    let width = quad.width / 3;
    let height = quad.height / 3;
    Rect {
        x: quad.x + (quad.width - width) / 2,
        y: quad.y + (quad.height - height) / 2,
        width,
        height,
    }
}
