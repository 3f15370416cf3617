//! Axis-aligned hit testing with a forgiveness margin.

/// An axis-aligned rectangle in world units (`y` grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// True if `a` and `b` interpenetrate by more than `padding` on both axes.
///
/// Sprites that merely touch, or overlap by `padding` or less along either
/// axis, do not collide.
pub fn overlaps_padded(a: &Rect, b: &Rect, padding: f64) -> bool {
    let overlap_x = a.right().min(b.right()) - a.x.max(b.x);
    let overlap_y = a.bottom().min(b.bottom()) - a.y.max(b.y);
    overlap_x > padding && overlap_y > padding
}
