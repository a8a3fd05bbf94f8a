//! Script registry
//!
//! A script is a stateless triple of plain functions (init, update, end)
//! registered under a string key. GameObjects reference scripts only by
//! key through their LogicComponent; any state a script needs lives in the
//! owner's components. Looking up an unregistered key is silently treated
//! as "script unavailable", never an error, so an object may carry a key
//! before or after that script's registration window.

use std::collections::HashMap;

use crate::engine::EngineRequests;
use crate::scene::{GameObject, GameObjectKey, Level};

/// Signature shared by all three script stages
pub type ScriptFn = fn(&mut ScriptContext<'_>, f32);

/// A registered behavior triple
#[derive(Debug, Clone, Copy)]
pub struct Script {
    /// Runs once, the first logic pass after attachment
    pub init: ScriptFn,
    /// Runs every logic pass while attached and enabled
    pub update: ScriptFn,
    /// Runs once, the logic pass after detachment
    pub end: ScriptFn,
}

impl Script {
    /// Bundle three stage functions into a script
    pub fn new(init: ScriptFn, update: ScriptFn, end: ScriptFn) -> Self {
        Self { init, update, end }
    }
}

/// Process-lifetime store of scripts, keyed by string
///
/// Owned by the engine and handed to subsystems through the frame
/// context; gameplay modules populate it once at startup.
#[derive(Default)]
pub struct ScriptRegistry {
    scripts: HashMap<String, Script>,
}

impl ScriptRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `script` under `key`, replacing any previous entry
    pub fn register(&mut self, key: impl Into<String>, script: Script) {
        let key = key.into();
        if self.scripts.insert(key.clone(), script).is_some() {
            log::warn!("script '{}' was already registered; replacing", key);
        }
    }

    /// Remove and return the script under `key`
    pub fn deregister(&mut self, key: &str) -> Option<Script> {
        self.scripts.remove(key)
    }

    /// Look up the script under `key`
    pub fn get(&self, key: &str) -> Option<&Script> {
        self.scripts.get(key)
    }

    /// Whether `key` is registered
    pub fn contains(&self, key: &str) -> bool {
        self.scripts.contains_key(key)
    }

    /// Number of registered scripts
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    /// Whether no script is registered
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Drop every registered script
    pub fn clear(&mut self) {
        self.scripts.clear();
    }
}

/// Everything a script stage may touch during one call
pub struct ScriptContext<'a> {
    /// The current level; queries and factory operations go through here
    pub level: &'a mut Level,

    /// Deferred engine-level actions (level change, quit)
    pub requests: &'a mut EngineRequests,

    /// Key of the GameObject the script is attached to
    pub owner: GameObjectKey,

    /// Seconds of app time accumulated before this frame
    pub app_time: f64,
}

impl ScriptContext<'_> {
    /// Borrow the owning GameObject
    ///
    /// `None` once the owner has been destroyed mid-frame.
    pub fn object(&self) -> Option<&GameObject> {
        self.level.get(self.owner)
    }

    /// Mutably borrow the owning GameObject
    pub fn object_mut(&mut self) -> Option<&mut GameObject> {
        self.level.get_mut(self.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_ctx: &mut ScriptContext<'_>, _dt: f32) {}

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ScriptRegistry::new();
        registry.register("foo", Script::new(noop, noop, noop));
        assert!(registry.contains("foo"));
        assert!(registry.get("foo").is_some());
        assert!(registry.get("bar").is_none());
    }

    #[test]
    fn test_deregister_removes_the_entry() {
        let mut registry = ScriptRegistry::new();
        registry.register("foo", Script::new(noop, noop, noop));
        assert!(registry.deregister("foo").is_some());
        assert!(registry.is_empty());
        assert!(registry.deregister("foo").is_none());
    }

    #[test]
    fn test_reregistering_replaces() {
        let mut registry = ScriptRegistry::new();
        registry.register("foo", Script::new(noop, noop, noop));
        registry.register("foo", Script::new(noop, noop, noop));
        assert_eq!(registry.len(), 1);
    }
}
