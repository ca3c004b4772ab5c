//! Rectangles, containment tests and pixel → output-unit converters.

use serde::{Deserialize, Serialize};

/// An axis-aligned box with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: 0.0,
        h: 0.0,
    };

    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// `true` when every edge of `self` lies within `outer` (edges inclusive).
    pub fn is_inside(&self, outer: &Rect) -> bool {
        self.x >= outer.x
            && self.right() <= outer.right()
            && self.y >= outer.y
            && self.bottom() <= outer.bottom()
    }

    /// `true` when the two boxes intersect. Boxes that only touch along an
    /// edge count as overlapping.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() < other.x
            || self.x > other.right()
            || self.bottom() < other.y
            || self.y > other.bottom())
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Grow the box outwards by the given margins.
    pub fn expand(&self, m: &Margins) -> Rect {
        Rect {
            x: self.x - m.left,
            y: self.y - m.top,
            w: self.w + m.left + m.right,
            h: self.h + m.top + m.bottom,
        }
    }
}

/// Per-side margins, in whatever unit the owning element uses.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn scale(&mut self, factor: f32) {
        self.top *= factor;
        self.right *= factor;
        self.bottom *= factor;
        self.left *= factor;
    }
}

/// Independent horizontal and vertical pixel → output-unit factors.
///
/// The slide aspect ratio generally differs from the dashboard's, so the two
/// axes are converted separately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitScale {
    pub x: f32,
    pub y: f32,
}

impl UnitScale {
    /// Pixels in, pixels out.
    pub const IDENTITY: UnitScale = UnitScale { x: 1.0, y: 1.0 };

    pub fn to_x(&self, px: f32) -> f32 {
        px * self.x
    }

    pub fn to_y(&self, px: f32) -> f32 {
        px * self.y
    }

    /// Converters that map a root of `root_width` × `root_height` pixels onto
    /// a `target_width` × `target_height` surface. Degenerate root sizes are
    /// clamped to one pixel.
    pub fn fit(root_width: f32, root_height: f32, target_width: f32, target_height: f32) -> Self {
        Self {
            x: target_width / root_width.max(1.0),
            y: target_height / root_height.max(1.0),
        }
    }
}
