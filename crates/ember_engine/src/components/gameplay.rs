//! Gameplay state components
//!
//! Scripts are stateless; everything a script family needs to remember
//! between frames lives in one of these.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;

/// A named stack of identical items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item name
    pub name: String,

    /// Number of items in the stack
    pub count: u32,
}

/// Item storage for a GameObject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    /// Held stacks in pickup order
    pub items: Vec<ItemStack>,

    /// Maximum number of distinct stacks
    pub capacity: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            capacity: 16,
        }
    }
}

impl Inventory {
    /// Create an inventory with the given stack capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// Add `count` items, merging into an existing stack when possible
    ///
    /// Returns false when a new stack would be needed but the inventory is
    /// full; the items are not added in that case.
    pub fn add(&mut self, name: &str, count: u32) -> bool {
        if let Some(stack) = self.items.iter_mut().find(|s| s.name == name) {
            stack.count += count;
            return true;
        }
        if self.items.len() >= self.capacity {
            return false;
        }
        self.items.push(ItemStack {
            name: name.to_string(),
            count,
        });
        true
    }

    /// Remove up to `count` items and return how many were actually removed
    pub fn remove(&mut self, name: &str, count: u32) -> u32 {
        let Some(index) = self.items.iter().position(|s| s.name == name) else {
            return 0;
        };
        let stack = &mut self.items[index];
        let removed = stack.count.min(count);
        stack.count -= removed;
        if stack.count == 0 {
            self.items.remove(index);
        }
        removed
    }

    /// Items held under `name`
    pub fn count_of(&self, name: &str) -> u32 {
        self.items
            .iter()
            .find(|s| s.name == name)
            .map_or(0, |s| s.count)
    }

    /// Whether no further stack can be added
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }
}

/// Combat state for the player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCombat {
    /// Current hit points
    pub health: f32,

    /// Hit point ceiling
    pub max_health: f32,

    /// Damage dealt per attack
    pub attack_damage: f32,

    /// Seconds between attacks
    pub attack_cooldown: f32,

    /// Seconds until the next attack is allowed
    pub cooldown_remaining: f32,

    /// Seconds of remaining damage immunity
    pub invulnerable_for: f32,
}

impl Default for PlayerCombat {
    fn default() -> Self {
        Self {
            health: 100.0,
            max_health: 100.0,
            attack_damage: 10.0,
            attack_cooldown: 0.5,
            cooldown_remaining: 0.0,
            invulnerable_for: 0.0,
        }
    }
}

impl PlayerCombat {
    /// Apply damage unless currently invulnerable; returns true if applied
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.invulnerable_for > 0.0 {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        true
    }

    /// Whether the player is still alive
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Count down the cooldown and invulnerability timers
    pub fn tick_timers(&mut self, dt: f32) {
        self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
        self.invulnerable_for = (self.invulnerable_for - dt).max(0.0);
    }
}

/// Combat state for an enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyCombat {
    /// Current hit points
    pub health: f32,

    /// Hit point ceiling
    pub max_health: f32,

    /// Damage dealt per attack
    pub attack_damage: f32,

    /// Distance at which the enemy notices a target
    pub aggro_radius: f32,

    /// Distance at which the enemy can attack
    pub attack_range: f32,

    /// Seconds between attacks
    pub attack_cooldown: f32,

    /// Seconds until the next attack is allowed
    pub cooldown_remaining: f32,
}

impl Default for EnemyCombat {
    fn default() -> Self {
        Self {
            health: 30.0,
            max_health: 30.0,
            attack_damage: 5.0,
            aggro_radius: 8.0,
            attack_range: 1.0,
            attack_cooldown: 1.0,
            cooldown_remaining: 0.0,
        }
    }
}

impl EnemyCombat {
    /// Apply damage; returns true when the blow was lethal
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.health = (self.health - amount).max(0.0);
        !self.is_alive()
    }

    /// Whether the enemy is still alive
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Count down the attack cooldown
    pub fn tick_timers(&mut self, dt: f32) {
        self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
    }
}

/// Movement intent for a script- or input-driven GameObject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Controller {
    /// Base movement speed in units per second
    pub move_speed: f32,

    /// Speed multiplier while running
    pub run_multiplier: f32,

    /// Current input axis, each component in [-1, 1]
    pub axis: Vec2,

    /// Whether the run modifier is held
    pub running: bool,
}

impl Default for Controller {
    fn default() -> Self {
        Self {
            move_speed: 4.0,
            run_multiplier: 1.8,
            axis: Vec2::zeros(),
            running: false,
        }
    }
}

impl Controller {
    /// Velocity the owner wants this frame
    pub fn desired_velocity(&self) -> Vec2 {
        let speed = if self.running {
            self.move_speed * self.run_multiplier
        } else {
            self.move_speed
        };
        self.axis * speed
    }
}
