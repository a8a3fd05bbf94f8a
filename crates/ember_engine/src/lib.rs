//! # Ember Engine
//!
//! A small scripted entity/component game engine core.
//!
//! ## Features
//!
//! - **Fixed-role scheduler**: subsystems run in registration order, once
//!   per frame, with a deferred second pass and per-subsystem timing
//! - **GameObjects**: arena-owned entities with generation-checked keys
//!   and at most one component per kind
//! - **Closed component set**: a tagged sum type with RON text
//!   serialization and a copy-state clone contract
//! - **String-keyed scripts**: behavior triples (init, update, end)
//!   attached to objects through their LogicComponent, driven by a
//!   three-stage lifecycle that tolerates same-frame structural changes
//! - **Query engine**: stateless name/id/distance/bounds searches over
//!   the current level
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ember_engine::prelude::*;
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! engine.add_system(Box::new(PhysicsSystem::new()));
//! engine.add_system(Box::new(LogicSystem::new()));
//!
//! let mut level = Level::new("overworld");
//! let hero = level.spawn("hero");
//! level
//!     .get_mut(hero)
//!     .unwrap()
//!     .add_component(Component::Transform(Transform::default()))
//!     .unwrap();
//! engine.set_level(level);
//!
//! let mut host = HeadlessHost::with_frame_budget(60);
//! engine.run(&mut host);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_arguments
)]

pub mod components;
pub mod config;
pub mod debug;
pub mod foundation;
pub mod scene;
pub mod script;
pub mod systems;

mod engine;

pub use config::{Config, ConfigError, EngineConfig};
pub use engine::{Engine, EngineRequests, HeadlessHost, HostWindow};

/// Common imports for engine users
pub mod prelude {
    pub use crate::components::{
        Animator, Collider, Component, ComponentKind, Controller, EnemyCombat, GameUi, Inventory,
        ItemStack, Light, LogicComponent, PlayerCombat, RigidBody, SpriteRenderer, Transform,
        UiAnchor,
    };
    pub use crate::config::{Config, EngineConfig};
    pub use crate::engine::{Engine, EngineRequests, HeadlessHost, HostWindow};
    pub use crate::foundation::math::{Aabb, Vec2, Vec3};
    pub use crate::scene::{query, GameObject, GameObjectKey, Layer, Level, ObjectQuery};
    pub use crate::script::{Script, ScriptContext, ScriptFn, ScriptRegistry};
    pub use crate::systems::{
        FrameContext, LogicSystem, PhysicsSystem, PlayState, Subsystem,
    };
}
