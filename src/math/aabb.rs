//! World-space chunk bounds

use crate::core::types::Vec3;
use super::rect::Rect;

/// Box between two corners, `min <= max` on every axis
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Extrude a ground footprint into a column `height` units tall
    pub fn from_footprint(footprint: &Rect, height: f32) -> Self {
        Self::new(
            Vec3::new(footprint.min.x, 0.0, footprint.min.y),
            Vec3::new(footprint.max.x, height, footprint.max.y),
        )
    }

    /// Tightest box around `points`; `None` when there are none
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |b, p| Self::new(b.min.min(p), b.max.max(p))))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Ground-plane containment, half-open so neighbouring chunks never share a point
    pub fn contains_xz(&self, x: f32, z: f32) -> bool {
        (self.min.x..self.max.x).contains(&x) && (self.min.z..self.max.z).contains(&z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;

    #[test]
    fn test_from_footprint() {
        let rect = Rect::new(Vec2::new(16.0, 32.0), Vec2::new(32.0, 48.0));
        let bounds = Aabb::from_footprint(&rect, 128.0);
        assert_eq!(bounds.min, Vec3::new(16.0, 0.0, 32.0));
        assert_eq!(bounds.max, Vec3::new(32.0, 128.0, 48.0));
        assert_eq!(bounds.center(), Vec3::new(24.0, 64.0, 40.0));
        assert_eq!(bounds.extent(), Vec3::new(16.0, 128.0, 16.0));
    }

    #[test]
    fn test_from_points() {
        assert_eq!(Aabb::from_points(std::iter::empty()), None);
        let bounds = Aabb::from_points([
            Vec3::new(4.0, 1.0, -2.0),
            Vec3::new(-1.0, 6.0, 3.0),
            Vec3::new(2.0, 0.5, 0.0),
        ]);
        assert_eq!(bounds, Some(Aabb::new(Vec3::new(-1.0, 0.5, -2.0), Vec3::new(4.0, 6.0, 3.0))));
    }

    #[test]
    fn test_contains_xz_half_open() {
        let bounds = Aabb::new(Vec3::ZERO, Vec3::new(16.0, 128.0, 16.0));
        assert!(bounds.contains_xz(0.0, 0.0));
        assert!(bounds.contains_xz(15.9, 15.9));
        assert!(!bounds.contains_xz(16.0, 8.0));
        assert!(!bounds.contains_xz(8.0, -0.1));
    }
}
