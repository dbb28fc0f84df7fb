//! Axis-aligned rectangle geometry for rackets and the net
//!
//! Court space has y pointing down, so `pos` is the top-left corner.

use glam::Vec2;

/// An axis-aligned rectangle in court space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Rectangle of the given size centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Point containment, half-open: the right and bottom edges are outside
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point_edges() {
        let rect = Rect::new(10.0, 20.0, 12.0, 90.0);

        assert!(rect.contains_point(Vec2::new(10.0, 20.0)));
        assert!(rect.contains_point(Vec2::new(21.9, 109.9)));
        // Right and bottom edges belong to the neighbour
        assert!(!rect.contains_point(Vec2::new(22.0, 50.0)));
        assert!(!rect.contains_point(Vec2::new(15.0, 110.0)));
        assert!(!rect.contains_point(Vec2::new(9.9, 50.0)));
    }

    #[test]
    fn test_from_center() {
        let rect = Rect::from_center(Vec2::new(450.0, 260.0), Vec2::new(6.0, 140.0));
        assert_eq!(rect.pos, Vec2::new(447.0, 190.0));
        assert_eq!(rect.center(), Vec2::new(450.0, 260.0));
        assert_eq!(rect.bottom(), 330.0);
    }
}
