//! Math types used across the engine
//!
//! The engine works in a 2.5D space: positions are 3D (z doubles as draw
//! depth), while sizes, bounds, and screen coordinates are 2D.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Axis-aligned 2D bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec2,
    /// Maximum corner
    pub max: Vec2,
}

impl Aabb {
    /// Build a box from its center point and full extents
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Whether `point` lies inside the box (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Whether two boxes overlap (touching edges count)
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Width and height of the box
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_edge_inclusive() {
        let aabb = Aabb::from_center_size(Vec2::new(0.0, 0.0), Vec2::new(2.0, 4.0));
        assert!(aabb.contains(Vec2::new(0.0, 0.0)));
        assert!(aabb.contains(Vec2::new(1.0, 2.0)));
        assert!(aabb.contains(Vec2::new(-1.0, -2.0)));
        assert!(!aabb.contains(Vec2::new(1.1, 0.0)));
    }

    #[test]
    fn test_intersects() {
        let a = Aabb::from_center_size(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
        let b = Aabb::from_center_size(Vec2::new(1.5, 0.0), Vec2::new(2.0, 2.0));
        let c = Aabb::from_center_size(Vec2::new(5.0, 0.0), Vec2::new(2.0, 2.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }
}
