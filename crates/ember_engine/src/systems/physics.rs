//! Physics subsystem
//!
//! Primary update integrates every RigidBody into its owner's Transform
//! and advances combat/controller timers; the deferred pass resolves AABB
//! overlaps into per-collider contact state, so anything reacting to
//! contacts (game-over checks, pickup scripts) sees this frame's motion
//! already applied.

use crate::foundation::math::{Aabb, Vec3};
use crate::scene::GameObjectKey;

use super::{FrameContext, PlayState, Subsystem};

/// Rigid body integrator and overlap resolver
pub struct PhysicsSystem {
    gravity: Vec3,
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        // Top-down worlds don't want gravity; platformer hosts override it.
        Self {
            gravity: Vec3::zeros(),
        }
    }
}

impl PhysicsSystem {
    /// Create a physics system without gravity
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a physics system with the given gravity vector
    pub fn with_gravity(gravity: Vec3) -> Self {
        Self { gravity }
    }
}

impl Subsystem for PhysicsSystem {
    fn name(&self) -> &'static str {
        "physics"
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>, dt: f32) {
        if ctx.play_state != PlayState::Playing {
            return;
        }

        let keys: Vec<GameObjectKey> = ctx.level.keys().collect();
        for key in keys {
            let Some(go) = ctx.level.get_mut(key) else {
                continue;
            };
            if !go.active {
                continue;
            }

            if let Some(body) = go.rigid_body_mut() {
                let displacement = body.integrate(dt, self.gravity);
                if let Some(transform) = go.transform_mut() {
                    transform.translate(displacement);
                }
            }

            if let Some(animator) = go.animator_mut() {
                animator.advance(dt);
            }
            if let Some(combat) = go.player_combat_mut() {
                combat.tick_timers(dt);
            }
            if let Some(combat) = go.enemy_combat_mut() {
                combat.tick_timers(dt);
            }
        }
    }

    fn additional_update(&mut self, ctx: &mut FrameContext<'_>, _dt: f32) {
        if ctx.play_state != PlayState::Playing {
            return;
        }

        let mut boxes: Vec<(GameObjectKey, Aabb)> = Vec::new();
        for (key, go) in ctx.level.iter() {
            if !go.active {
                continue;
            }
            let (Some(collider), Some(transform)) = (go.collider(), go.transform()) else {
                continue;
            };
            boxes.push((key, collider.aabb_at(transform.position, transform.scale)));
        }

        let mut touched = vec![false; boxes.len()];
        for i in 0..boxes.len() {
            for j in (i + 1)..boxes.len() {
                if boxes[i].1.intersects(&boxes[j].1) {
                    touched[i] = true;
                    touched[j] = true;
                }
            }
        }

        for ((key, _), in_contact) in boxes.into_iter().zip(touched) {
            if let Some(collider) = ctx.level.get_mut(key).and_then(|go| go.collider_mut()) {
                collider.in_contact = in_contact;
            }
        }
    }
}
