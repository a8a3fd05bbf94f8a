//! Core engine implementation
//!
//! The engine owns the ordered subsystem list, the current level, the
//! script registry, and the frame loop. There are no global singletons:
//! hosts construct an [`Engine`], register subsystems, hand it a level,
//! and drive [`Engine::run`]. Subsystems and scripts reach engine state
//! only through the context types, and level swaps requested mid-frame are
//! deferred to the frame boundary so nothing observes its world being
//! replaced mid-iteration.

use crate::config::EngineConfig;
use crate::debug::FrameProfiler;
use crate::foundation::time::{Stopwatch, Timer};
use crate::scene::Level;
use crate::script::ScriptRegistry;
use crate::systems::{FrameContext, PlayState, Subsystem};

/// Deferred engine-level actions collected during a frame
///
/// Scripts and subsystems can't touch the engine directly; they queue
/// requests here and the engine applies them at the end of the frame.
#[derive(Default)]
pub struct EngineRequests {
    next_level: Option<Level>,
    quit: bool,
}

impl EngineRequests {
    /// Request a level change, applied at the end of the current frame
    ///
    /// A later request in the same frame replaces an earlier one.
    pub fn load_level(&mut self, level: Level) {
        if self.next_level.is_some() {
            log::debug!("replacing pending level request with '{}'", level.name());
        }
        self.next_level = Some(level);
    }

    /// Request that the frame loop stop after this frame
    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Whether a level change is queued
    pub fn has_pending_level(&self) -> bool {
        self.next_level.is_some()
    }

    pub(crate) fn take(&mut self) -> (Option<Level>, bool) {
        let quit = std::mem::take(&mut self.quit);
        (self.next_level.take(), quit)
    }
}

/// The engine's view of the host's window
///
/// The core never creates a window; the host supplies whatever fits
/// (a real windowing backend, or [`HeadlessHost`] for tools and tests).
pub trait HostWindow {
    /// Process pending window/input events for this frame
    fn pump_events(&mut self) {}

    /// Whether the user asked the window to close
    fn close_requested(&self) -> bool;
}

/// Windowless host that requests close after a fixed number of frames
pub struct HeadlessHost {
    remaining: u64,
}

impl HeadlessHost {
    /// Run for exactly `frames` frames, then request close
    pub fn with_frame_budget(frames: u64) -> Self {
        Self { remaining: frames }
    }
}

impl HostWindow for HeadlessHost {
    fn pump_events(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    fn close_requested(&self) -> bool {
        self.remaining == 0
    }
}

/// Fixed-role frame scheduler and owner of the engine's state
pub struct Engine {
    config: EngineConfig,
    systems: Vec<Box<dyn Subsystem>>,
    level: Level,
    next_level: Option<Level>,
    scripts: ScriptRegistry,
    requests: EngineRequests,
    play_state: PlayState,
    timer: Timer,
    profiler: FrameProfiler,
    app_time_elapsed: f64,
    running: bool,
    initialized: bool,
}

impl Engine {
    /// Create an engine with an empty level and no subsystems
    pub fn new(config: EngineConfig) -> Self {
        let timer = Timer::new(config.timing.fixed_timestep, config.timing.max_delta);
        Self {
            config,
            systems: Vec::new(),
            level: Level::new("untitled"),
            next_level: None,
            scripts: ScriptRegistry::new(),
            requests: EngineRequests::default(),
            play_state: PlayState::default(),
            timer,
            profiler: FrameProfiler::new(),
            app_time_elapsed: 0.0,
            running: true,
            initialized: false,
        }
    }

    /// Append a subsystem; only valid before [`Engine::init`]
    pub fn add_system(&mut self, system: Box<dyn Subsystem>) {
        if self.initialized {
            log::warn!(
                "add_system('{}') after init is ignored; register subsystems before init",
                system.name()
            );
            return;
        }
        self.systems.push(system);
    }

    /// Bind every subsystem to the current level and initialize it
    ///
    /// Subsystems initialize in registration order; the profiler is reset.
    /// Calling init twice is a no-op.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        log::info!(
            "initializing engine: {} subsystems, level '{}'",
            self.systems.len(),
            self.level.name()
        );

        for system in &mut self.systems {
            system.level_changed(&mut self.level);
        }
        for system in &mut self.systems {
            let mut ctx = FrameContext {
                level: &mut self.level,
                scripts: &self.scripts,
                requests: &mut self.requests,
                play_state: self.play_state,
                app_time: self.app_time_elapsed,
            };
            system.init(&mut ctx);
        }

        self.profiler.reset();
        self.initialized = true;
    }

    /// Drive the frame loop until quit or the host requests close
    ///
    /// Initializes first if the host didn't, and shuts down on exit.
    pub fn run(&mut self, host: &mut dyn HostWindow) {
        self.init();
        log::info!("starting main loop");
        while self.running && !host.close_requested() {
            host.pump_events();
            self.tick();
        }
        self.shutdown();
    }

    /// Advance the world by one frame
    pub fn tick(&mut self) {
        let dt = self.timer.tick();
        if self.timer.pending_fixed_steps() > 1 {
            log::trace!(
                "frame spans {} fixed steps",
                self.timer.pending_fixed_steps()
            );
        }

        for system in &mut self.systems {
            let stopwatch = Stopwatch::start_new();
            let mut ctx = FrameContext {
                level: &mut self.level,
                scripts: &self.scripts,
                requests: &mut self.requests,
                play_state: self.play_state,
                app_time: self.app_time_elapsed,
            };
            system.update(&mut ctx, dt);
            self.profiler.record(system.name(), stopwatch.elapsed_secs());
        }

        // Second pass: every primary update has run, so subsystems can now
        // react to this frame's results.
        for system in &mut self.systems {
            let mut ctx = FrameContext {
                level: &mut self.level,
                scripts: &self.scripts,
                requests: &mut self.requests,
                play_state: self.play_state,
                app_time: self.app_time_elapsed,
            };
            system.additional_update(&mut ctx, dt);
        }

        self.profiler.finish_frame();

        // Frame boundary: structural changes queued during the frame.
        self.level.flush_destroyed();

        let (requested_level, quit) = self.requests.take();
        if let Some(level) = requested_level {
            self.next_level = Some(level);
        }
        if quit {
            self.running = false;
        }

        if let Some(next) = self.next_level.take() {
            let outgoing = std::mem::replace(&mut self.level, next);
            drop(outgoing);
            log::info!("installed level '{}'", self.level.name());
            for system in &mut self.systems {
                system.level_changed(&mut self.level);
            }
        }

        self.app_time_elapsed += f64::from(dt);
    }

    /// Shut down and release every subsystem in reverse registration
    /// order, then release the current level's objects
    pub fn shutdown(&mut self) {
        log::info!("shutting down engine");
        for mut system in self.systems.drain(..).rev() {
            let mut ctx = FrameContext {
                level: &mut self.level,
                scripts: &self.scripts,
                requests: &mut self.requests,
                play_state: self.play_state,
                app_time: self.app_time_elapsed,
            };
            system.shutdown(&mut ctx);
        }
        self.level.clear();
        self.running = false;
    }

    /// Install `level` immediately and rebind every subsystem
    ///
    /// The outgoing level and all its GameObjects are destroyed first.
    /// Used for the first level and for editor-triggered loads; scripts
    /// should go through [`EngineRequests::load_level`] instead.
    pub fn set_level(&mut self, level: Level) {
        let outgoing = std::mem::replace(&mut self.level, level);
        drop(outgoing);
        log::info!("installed level '{}'", self.level.name());
        if self.initialized {
            for system in &mut self.systems {
                system.level_changed(&mut self.level);
            }
        }
    }

    /// Arm a deferred level swap, applied at the end of the current frame
    pub fn set_next_level(&mut self, level: Level) {
        if self.next_level.is_some() {
            log::debug!("replacing armed next level with '{}'", level.name());
        }
        self.next_level = Some(level);
    }

    /// Stop the frame loop after the current frame
    pub fn request_quit(&mut self) {
        self.running = false;
    }

    /// Configuration the engine was constructed with
    ///
    /// Hosts read this back when building their window.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current level
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Current level, mutably
    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    /// Script registry
    pub fn scripts(&self) -> &ScriptRegistry {
        &self.scripts
    }

    /// Script registry, mutably; populate before play starts
    pub fn scripts_mut(&mut self) -> &mut ScriptRegistry {
        &mut self.scripts
    }

    /// Current play state
    pub fn play_state(&self) -> PlayState {
        self.play_state
    }

    /// Switch between editing, paused, and playing
    pub fn set_play_state(&mut self, play_state: PlayState) {
        self.play_state = play_state;
    }

    /// Frame profiler for the most recent frame
    pub fn profiler(&self) -> &FrameProfiler {
        &self.profiler
    }

    /// Seconds of app time accumulated across all frames
    pub fn app_time_elapsed(&self) -> f64 {
        self.app_time_elapsed
    }

    /// Whether the frame loop would keep running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of registered subsystems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Probe {
        label: &'static str,
        events: Rc<RefCell<Vec<String>>>,
    }

    impl Probe {
        fn new(label: &'static str, events: &Rc<RefCell<Vec<String>>>) -> Box<Self> {
            Box::new(Self {
                label,
                events: Rc::clone(events),
            })
        }

        fn push(&self, what: &str, level: &str) {
            self.events
                .borrow_mut()
                .push(format!("{}:{}:{}", self.label, what, level));
        }
    }

    impl Subsystem for Probe {
        fn name(&self) -> &'static str {
            self.label
        }

        fn init(&mut self, ctx: &mut FrameContext<'_>) {
            self.push("init", ctx.level.name());
        }

        fn update(&mut self, ctx: &mut FrameContext<'_>, _dt: f32) {
            self.push("update", ctx.level.name());
        }

        fn additional_update(&mut self, ctx: &mut FrameContext<'_>, _dt: f32) {
            self.push("post", ctx.level.name());
        }

        fn level_changed(&mut self, level: &mut Level) {
            self.push("bind", level.name());
        }

        fn shutdown(&mut self, ctx: &mut FrameContext<'_>) {
            self.push("shutdown", ctx.level.name());
        }
    }

    fn engine_with_probes(events: &Rc<RefCell<Vec<String>>>) -> Engine {
        let mut engine = Engine::new(EngineConfig::default());
        engine.add_system(Probe::new("a", events));
        engine.add_system(Probe::new("b", events));
        engine.set_level(Level::new("first"));
        engine
    }

    #[test]
    fn test_update_order_and_reverse_shutdown() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut engine = engine_with_probes(&events);
        engine.init();
        engine.tick();
        engine.shutdown();

        let log = events.borrow();
        let expected = [
            "a:bind:first",
            "b:bind:first",
            "a:init:first",
            "b:init:first",
            "a:update:first",
            "b:update:first",
            "a:post:first",
            "b:post:first",
            "b:shutdown:first",
            "a:shutdown:first",
        ];
        assert_eq!(*log, expected);
    }

    #[test]
    fn test_deferred_swap_is_invisible_during_the_frame() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut engine = engine_with_probes(&events);
        engine.init();

        engine.set_next_level(Level::new("second"));
        engine.tick();

        // Every pass of the swap frame still saw the old level.
        {
            let log = events.borrow();
            let frame: Vec<_> = log
                .iter()
                .filter(|e| e.contains(":update:") || e.contains(":post:"))
                .collect();
            assert!(frame.iter().all(|e| e.ends_with(":first")));
        }
        assert_eq!(engine.level().name(), "second");

        events.borrow_mut().clear();
        engine.tick();
        let log = events.borrow();
        assert!(log
            .iter()
            .filter(|e| e.contains(":update:"))
            .all(|e| e.ends_with(":second")));
    }

    #[test]
    fn test_swap_rebinds_every_subsystem() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut engine = engine_with_probes(&events);
        engine.init();
        engine.set_next_level(Level::new("second"));
        engine.tick();

        let log = events.borrow();
        assert!(log.contains(&"a:bind:second".to_string()));
        assert!(log.contains(&"b:bind:second".to_string()));
    }

    #[test]
    fn test_set_level_swaps_immediately() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut engine = engine_with_probes(&events);
        engine.init();

        engine.set_level(Level::new("editor"));
        assert_eq!(engine.level().name(), "editor");
        assert!(events.borrow().contains(&"a:bind:editor".to_string()));
    }

    #[test]
    fn test_add_system_after_init_is_ignored() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut engine = engine_with_probes(&events);
        assert_eq!(engine.system_count(), 2);
        engine.init();
        engine.add_system(Probe::new("late", &events));
        assert_eq!(engine.system_count(), 2);
    }

    #[test]
    fn test_profiler_samples_every_subsystem() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut engine = engine_with_probes(&events);
        engine.init();
        engine.tick();

        let names: Vec<_> = engine.profiler().report().iter().map(|s| s.name).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(engine.profiler().frame_count(), 1);
    }

    #[test]
    fn test_run_honors_the_host_frame_budget() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut engine = engine_with_probes(&events);

        let mut host = HeadlessHost::with_frame_budget(3);
        engine.run(&mut host);

        let updates = events
            .borrow()
            .iter()
            .filter(|e| e.starts_with("a:update:"))
            .count();
        assert_eq!(updates, 3);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_app_time_accumulates() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut engine = engine_with_probes(&events);
        engine.init();
        assert_eq!(engine.app_time_elapsed(), 0.0);
        engine.tick();
        engine.tick();
        assert!(engine.app_time_elapsed() >= 0.0);
        assert_eq!(engine.profiler().frame_count(), 2);
    }
}
