//! Transform component
//!
//! Pure data: world position, planar rotation, and 2D scale. The engine
//! works in a 2.5D space, so position z doubles as draw depth while
//! rotation and scale stay planar.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Vec2, Vec3};

/// Spatial placement of a GameObject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World position; Ui-layer objects store camera-relative screen
    /// coordinates here instead
    pub position: Vec3,

    /// Rotation around the z axis in radians
    pub rotation: f32,

    /// Planar scale factors
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Shift the position by `delta`
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Planar (x, y) slice of the position
    pub fn planar_position(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.y)
    }

    /// Squared distance between this transform and `other`
    pub fn distance_squared_to(&self, other: &Self) -> f32 {
        (self.position - other.position).norm_squared()
    }
}
