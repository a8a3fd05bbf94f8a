//! Logic subsystem: drives every GameObject's script lifecycle
//!
//! Each frame, every object with a LogicComponent is walked through three
//! stages: init callbacks for freshly attached keys, update callbacks for
//! active keys, and end callbacks for keys detached before this pass.
//! The stage batches are snapshotted per object before any callback runs,
//! so scripts are free to attach, detach, toggle, queue destruction, or
//! request a level change from inside the pass without invalidating the
//! iteration; such changes take effect on the next pass.

use crate::scene::GameObjectKey;
use crate::script::ScriptContext;

use super::{FrameContext, PlayState, Subsystem};

#[derive(Clone, Copy)]
enum Stage {
    Init,
    Update,
    End,
}

/// The script lifecycle driver
#[derive(Default)]
pub struct LogicSystem;

impl LogicSystem {
    /// Create the subsystem
    pub fn new() -> Self {
        Self
    }
}

impl Subsystem for LogicSystem {
    fn name(&self) -> &'static str {
        "logic"
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>, dt: f32) {
        // Scripts never run while the world is paused or being edited.
        if ctx.play_state != PlayState::Playing {
            return;
        }
        run_pass(ctx, dt);
    }

    fn shutdown(&mut self, ctx: &mut FrameContext<'_>) {
        // Detach everything and fire the resulting end callbacks now, so
        // every script that ran gets its end before the registry goes away.
        let keys: Vec<GameObjectKey> = ctx.level.keys().collect();
        for owner in keys {
            let Some(end_batch) = ctx.level.get_mut(owner).and_then(|go| {
                let logic = go.logic_mut()?;
                let attached: Vec<String> =
                    logic.active_scripts().map(str::to_string).collect();
                for key in &attached {
                    logic.remove_script(key);
                }
                Some(std::mem::take(&mut logic.pending_end))
            }) else {
                continue;
            };

            for slot in &end_batch {
                if slot.enabled {
                    invoke(ctx, owner, &slot.key, Stage::End, 0.0);
                }
            }
        }
    }
}

fn run_pass(ctx: &mut FrameContext<'_>, dt: f32) {
    let keys: Vec<GameObjectKey> = ctx.level.keys().collect();
    for owner in keys {
        // Snapshot all three stages up front. Inits and ends queued during
        // this pass accumulate in the (now empty) live lists and wait for
        // the next pass; the active snapshot keeps a key attached mid-pass
        // from updating before its init has run.
        let Some((init_batch, update_keys, end_batch)) =
            ctx.level.get_mut(owner).and_then(|go| {
                let logic = go.logic_mut()?;
                let update_keys: Vec<String> =
                    logic.active_scripts().map(str::to_string).collect();
                Some((
                    std::mem::take(&mut logic.pending_init),
                    update_keys,
                    std::mem::take(&mut logic.pending_end),
                ))
            })
        else {
            continue;
        };

        for slot in &init_batch {
            if slot.enabled {
                invoke(ctx, owner, &slot.key, Stage::Init, dt);
            }
        }

        for key in &update_keys {
            // Re-check the live list: an earlier callback in this pass may
            // have detached or disabled the slot.
            let still_enabled = ctx
                .level
                .get(owner)
                .and_then(|go| go.logic())
                .is_some_and(|logic| {
                    logic
                        .active
                        .iter()
                        .any(|slot| slot.key == *key && slot.enabled)
                });
            if still_enabled {
                invoke(ctx, owner, key, Stage::Update, dt);
            }
        }

        for slot in &end_batch {
            if slot.enabled {
                invoke(ctx, owner, &slot.key, Stage::End, dt);
            }
        }
    }
}

fn invoke(ctx: &mut FrameContext<'_>, owner: GameObjectKey, key: &str, stage: Stage, dt: f32) {
    // An unregistered key means the script is temporarily unavailable;
    // skip quietly rather than fail.
    let Some(script) = ctx.scripts.get(key).copied() else {
        return;
    };
    let stage_fn = match stage {
        Stage::Init => script.init,
        Stage::Update => script.update,
        Stage::End => script.end,
    };
    let mut script_ctx = ScriptContext {
        level: &mut *ctx.level,
        requests: &mut *ctx.requests,
        owner,
        app_time: ctx.app_time,
    };
    stage_fn(&mut script_ctx, dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Component, Inventory, LogicComponent};
    use crate::engine::EngineRequests;
    use crate::scene::Level;
    use crate::script::{Script, ScriptRegistry};

    fn record(ctx: &mut ScriptContext<'_>, what: &str) {
        if let Some(inventory) = ctx.object_mut().and_then(|go| go.inventory_mut()) {
            inventory.add(what, 1);
        }
    }

    fn foo_init(ctx: &mut ScriptContext<'_>, _dt: f32) {
        record(ctx, "foo_init");
    }
    fn foo_update(ctx: &mut ScriptContext<'_>, _dt: f32) {
        record(ctx, "foo_update");
    }
    fn foo_end(ctx: &mut ScriptContext<'_>, _dt: f32) {
        record(ctx, "foo_end");
    }

    fn kamikaze_update(ctx: &mut ScriptContext<'_>, _dt: f32) {
        record(ctx, "kamikaze_update");
        if let Some(logic) = ctx.object_mut().and_then(|go| go.logic_mut()) {
            logic.remove_script("kamikaze");
        }
    }
    fn kamikaze_end(ctx: &mut ScriptContext<'_>, _dt: f32) {
        record(ctx, "kamikaze_end");
    }

    fn spawner_init(ctx: &mut ScriptContext<'_>, _dt: f32) {
        if let Some(logic) = ctx.object_mut().and_then(|go| go.logic_mut()) {
            logic.add_script("payload");
        }
    }
    fn payload_init(ctx: &mut ScriptContext<'_>, _dt: f32) {
        record(ctx, "payload_init");
    }
    fn payload_update(ctx: &mut ScriptContext<'_>, _dt: f32) {
        record(ctx, "payload_update");
    }

    fn noop(_ctx: &mut ScriptContext<'_>, _dt: f32) {}

    struct Fixture {
        level: Level,
        registry: ScriptRegistry,
        requests: EngineRequests,
        system: LogicSystem,
        owner: crate::scene::GameObjectKey,
    }

    impl Fixture {
        fn new(scripts: &[&str]) -> Self {
            let mut registry = ScriptRegistry::new();
            registry.register("foo", Script::new(foo_init, foo_update, foo_end));
            registry.register("kamikaze", Script::new(noop, kamikaze_update, kamikaze_end));
            registry.register("spawner", Script::new(spawner_init, noop, noop));
            registry.register("payload", Script::new(payload_init, payload_update, noop));

            let mut level = Level::new("fixture");
            let owner = level.spawn("subject");
            let go = level.get_mut(owner).unwrap();
            go.add_component(Component::Inventory(Inventory::with_capacity(32)))
                .unwrap();
            go.add_component(Component::Logic(LogicComponent::with_scripts(
                scripts.iter().copied(),
            )))
            .unwrap();

            Self {
                level,
                registry,
                requests: EngineRequests::default(),
                system: LogicSystem::new(),
                owner,
            }
        }

        fn pass(&mut self) {
            self.pass_in_state(PlayState::Playing);
        }

        fn pass_in_state(&mut self, play_state: PlayState) {
            let mut ctx = FrameContext {
                level: &mut self.level,
                scripts: &self.registry,
                requests: &mut self.requests,
                play_state,
                app_time: 0.0,
            };
            self.system.update(&mut ctx, 1.0 / 60.0);
        }

        fn shutdown(&mut self) {
            let mut ctx = FrameContext {
                level: &mut self.level,
                scripts: &self.registry,
                requests: &mut self.requests,
                play_state: PlayState::Playing,
                app_time: 0.0,
            };
            self.system.shutdown(&mut ctx);
        }

        fn count(&self, what: &str) -> u32 {
            self.level
                .get(self.owner)
                .unwrap()
                .inventory()
                .unwrap()
                .count_of(what)
        }

        fn logic_mut(&mut self) -> &mut LogicComponent {
            self.level.get_mut(self.owner).unwrap().logic_mut().unwrap()
        }
    }

    #[test]
    fn test_first_pass_runs_init_and_update_together() {
        let mut fx = Fixture::new(&["foo"]);
        fx.pass();
        assert_eq!(fx.count("foo_init"), 1);
        assert_eq!(fx.count("foo_update"), 1);

        fx.pass();
        assert_eq!(fx.count("foo_init"), 1);
        assert_eq!(fx.count("foo_update"), 2);
    }

    #[test]
    fn test_foo_scenario_end_is_deferred_to_the_next_pass() {
        let mut fx = Fixture::new(&["foo"]);
        fx.pass();
        fx.pass();

        // Detached between pass 2 and pass 3.
        fx.logic_mut().remove_script("foo");
        assert!(!fx.logic_mut().has_script("foo"));

        fx.pass();
        assert_eq!(fx.count("foo_init"), 1);
        assert_eq!(fx.count("foo_update"), 2, "no update in the removal pass");
        assert_eq!(fx.count("foo_end"), 1);

        fx.pass();
        assert_eq!(fx.count("foo_end"), 1, "end fires exactly once");
    }

    #[test]
    fn test_self_removal_defers_end_to_the_next_pass() {
        let mut fx = Fixture::new(&["kamikaze"]);
        fx.pass();
        assert_eq!(fx.count("kamikaze_update"), 1);
        assert_eq!(fx.count("kamikaze_end"), 0, "end never fires in the same pass");

        fx.pass();
        assert_eq!(fx.count("kamikaze_update"), 1);
        assert_eq!(fx.count("kamikaze_end"), 1);
    }

    #[test]
    fn test_disabled_scripts_are_fully_suppressed() {
        let mut fx = Fixture::new(&["foo"]);
        fx.logic_mut().set_enabled("foo", false);

        fx.pass();
        fx.pass();
        assert_eq!(fx.count("foo_init"), 0);
        assert_eq!(fx.count("foo_update"), 0);

        // Re-enabling resumes updates; the init chance was consumed by the
        // first pass regardless of the flag.
        fx.logic_mut().set_enabled("foo", true);
        fx.pass();
        assert_eq!(fx.count("foo_init"), 0);
        assert_eq!(fx.count("foo_update"), 1);
    }

    #[test]
    fn test_script_attached_by_init_waits_for_its_own_pass() {
        let mut fx = Fixture::new(&["spawner"]);
        fx.pass();
        assert_eq!(fx.count("payload_init"), 0);
        assert_eq!(fx.count("payload_update"), 0);

        fx.pass();
        assert_eq!(fx.count("payload_init"), 1);
        assert_eq!(fx.count("payload_update"), 1);
    }

    #[test]
    fn test_unknown_keys_are_silently_ignored() {
        let mut fx = Fixture::new(&["ghost"]);
        fx.pass();
        fx.pass();
        assert!(fx.logic_mut().has_script("ghost"), "the key stays attached");
    }

    #[test]
    fn test_scripts_do_not_run_outside_playing() {
        let mut fx = Fixture::new(&["foo"]);
        fx.pass_in_state(PlayState::Editing);
        fx.pass_in_state(PlayState::Paused);
        assert_eq!(fx.count("foo_init"), 0);
        assert_eq!(fx.count("foo_update"), 0);
    }

    #[test]
    fn test_shutdown_fires_end_for_active_scripts() {
        let mut fx = Fixture::new(&["foo"]);
        fx.pass();
        fx.shutdown();
        assert_eq!(fx.count("foo_end"), 1);
        assert!(fx.logic_mut().is_empty());
    }

    #[test]
    fn test_shutdown_respects_a_suppressed_pending_end() {
        let mut fx = Fixture::new(&["foo"]);
        fx.pass();
        fx.logic_mut().remove_script("foo");
        // Toggling the shared key also reaches the queued end slot.
        fx.logic_mut().set_enabled("foo", false);
        fx.shutdown();
        assert_eq!(fx.count("foo_end"), 0);
    }
}
