//! Play-field geometry: bounds, rectangles and circle overlap.

use glam::Vec2;

/// Width and height of the play field in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    /// The 600x800 portrait field the game is laid out for.
    pub const FIELD: Bounds = Bounds::new(600, 800);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The whole field as a rectangle anchored at the origin.
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::FIELD
    }
}

/// Axis-aligned rectangle, `x`/`y` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `size` centered on `center`.
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// True if `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Strict overlap; rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Circle-circle overlap test used for every hit check.
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_squared(b) <= r * r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let field = Bounds::FIELD.rect();
        assert!(field.contains(&Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(!field.contains(&Rect::new(595.0, 10.0, 10.0, 10.0)));
        assert!(!field.contains(&Rect::new(-1.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_rect_intersects_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_centered() {
        let r = Rect::centered(Vec2::new(10.0, 20.0), Vec2::new(4.0, 6.0));
        assert_eq!(r, Rect::new(8.0, 17.0, 4.0, 6.0));
    }

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 3.0, Vec2::new(5.0, 0.0), 2.0));
        assert!(!circles_overlap(Vec2::ZERO, 3.0, Vec2::new(5.1, 0.0), 2.0));
    }
}
