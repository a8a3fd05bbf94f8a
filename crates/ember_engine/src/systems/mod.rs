//! Subsystems: engine-level capabilities driven once per frame
//!
//! The engine calls every subsystem's `update` in registration order, then
//! every subsystem's `additional_update` as a second deferred pass, so each
//! primary update has observed the frame's state before anything reacts to
//! it. Subsystems receive the engine's state through a [`FrameContext`]
//! rather than through globals.

pub mod logic;
pub mod physics;

pub use logic::LogicSystem;
pub use physics::PhysicsSystem;

use crate::engine::EngineRequests;
use crate::scene::Level;
use crate::script::ScriptRegistry;

/// Whether the world is being edited, paused, or simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    /// An editor owns the world; scripts must not run
    Editing,
    /// Simulation halted mid-game; scripts must not run
    Paused,
    /// Normal simulation
    #[default]
    Playing,
}

/// Engine state borrowed by a subsystem for the duration of one call
pub struct FrameContext<'a> {
    /// The current level
    pub level: &'a mut Level,

    /// The script registry (read-only; population happens at startup)
    pub scripts: &'a ScriptRegistry,

    /// Deferred engine-level actions (level change, quit)
    pub requests: &'a mut EngineRequests,

    /// Current play state
    pub play_state: PlayState,

    /// Seconds of app time accumulated before this frame
    pub app_time: f64,
}

/// An engine capability driven once per frame
///
/// Subsystems are registered before `Engine::init` and driven in
/// registration order; shutdown runs in reverse order.
pub trait Subsystem {
    /// Short name used by logs and the frame profiler
    fn name(&self) -> &'static str;

    /// One-time setup after the subsystem is bound to the first level
    fn init(&mut self, _ctx: &mut FrameContext<'_>) {}

    /// Primary per-frame work
    fn update(&mut self, ctx: &mut FrameContext<'_>, dt: f32);

    /// Deferred second pass, after every subsystem's primary update
    fn additional_update(&mut self, _ctx: &mut FrameContext<'_>, _dt: f32) {}

    /// Called whenever the engine installs a level (startup and swaps)
    fn level_changed(&mut self, _level: &mut Level) {}

    /// Teardown, in reverse registration order
    fn shutdown(&mut self, _ctx: &mut FrameContext<'_>) {}
}
