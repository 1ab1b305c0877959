//! Axis-aligned rectangle on the ground (XZ) plane

use crate::core::types::Vec2;

/// Axis-aligned rectangle defined by min and max corners.
///
/// `x` maps to world X and `y` maps to world Z.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Create rectangle from min and max corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Square with the given side length, anchored at `min`
    pub fn square(min: Vec2, side: f32) -> Self {
        Self { min, max: min + Vec2::splat(side) }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Get size (max - min)
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Check if point is inside (inclusive on every edge)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x &&
        p.y >= self.min.y && p.y <= self.max.y
    }

    /// Distance from `p` to the nearest point of the rectangle (0 inside)
    pub fn distance_to_point(&self, p: Vec2) -> f32 {
        let nearest = p.clamp(self.min, self.max);
        nearest.distance(p)
    }

    /// Get child quadrant for quadtree subdivision.
    /// index: 0-3 (bit 0 = +x half, bit 1 = +z half)
    pub fn child_quadrant(&self, index: u8) -> Rect {
        let center = self.center();
        let min = Vec2::new(
            if index & 1 != 0 { center.x } else { self.min.x },
            if index & 2 != 0 { center.y } else { self.min.y },
        );
        let max = Vec2::new(
            if index & 1 != 0 { self.max.x } else { center.x },
            if index & 2 != 0 { self.max.y } else { center.y },
        );
        Rect { min, max }
    }
}
