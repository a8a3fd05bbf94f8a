//! Physics components: rigid body motion state and AABB colliders

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Aabb, Vec2, Vec3};

/// Motion state for an object integrated by the physics subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    /// Linear velocity in units per second
    pub velocity: Vec3,

    /// Linear acceleration in units per second squared
    pub acceleration: Vec3,

    /// Multiplier applied to the world gravity vector
    pub gravity_scale: f32,

    /// Velocity damping factor per second (0 = none)
    pub linear_damping: f32,

    /// Maximum speed limit (0 = no limit)
    pub max_speed: f32,

    /// Mass in arbitrary units
    pub mass: f32,

    /// Kinematic bodies are never integrated; scripts drive them directly
    pub kinematic: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::zeros(),
            acceleration: Vec3::zeros(),
            gravity_scale: 1.0,
            linear_damping: 0.0,
            max_speed: 0.0,
            mass: 1.0,
            kinematic: false,
        }
    }
}

impl RigidBody {
    /// Create a body with an initial velocity
    pub fn with_velocity(velocity: Vec3) -> Self {
        Self {
            velocity,
            ..Default::default()
        }
    }

    /// Advance velocity by one step and return the resulting displacement
    ///
    /// Kinematic bodies return a zero displacement and keep their velocity
    /// untouched.
    pub fn integrate(&mut self, dt: f32, gravity: Vec3) -> Vec3 {
        if self.kinematic {
            return Vec3::zeros();
        }

        self.velocity += (self.acceleration + gravity * self.gravity_scale) * dt;

        if self.linear_damping > 0.0 {
            self.velocity *= (1.0 - self.linear_damping * dt).max(0.0);
        }

        if self.max_speed > 0.0 {
            let speed_sq = self.velocity.norm_squared();
            let limit_sq = self.max_speed * self.max_speed;
            if speed_sq > limit_sq {
                self.velocity *= self.max_speed / speed_sq.sqrt();
            }
        }

        self.velocity * dt
    }
}

/// Axis-aligned box collider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    /// Half extents of the box before transform scale
    pub half_extents: Vec2,

    /// Offset of the box center from the transform position
    pub offset: Vec2,

    /// Trigger volumes report contacts but are not solid
    pub is_trigger: bool,

    /// Updated by the physics subsystem after its overlap pass
    pub in_contact: bool,
}

impl Default for Collider {
    fn default() -> Self {
        Self {
            half_extents: Vec2::new(0.5, 0.5),
            offset: Vec2::zeros(),
            is_trigger: false,
            in_contact: false,
        }
    }
}

impl Collider {
    /// Create a collider with the given half extents
    pub fn with_half_extents(half_extents: Vec2) -> Self {
        Self {
            half_extents,
            ..Default::default()
        }
    }

    /// World-space box for an owner at `position` with planar `scale`
    pub fn aabb_at(&self, position: Vec3, scale: Vec2) -> Aabb {
        let center = Vec2::new(position.x, position.y) + self.offset;
        let size = (self.half_extents * 2.0).component_mul(&scale);
        Aabb::from_center_size(center, size)
    }
}
