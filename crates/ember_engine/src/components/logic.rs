//! Script attachment component
//!
//! A GameObject's LogicComponent records which script keys are attached
//! and where each key sits in its lifecycle. The logic subsystem drives
//! the three stage lists once per frame; see `systems::logic`.

use serde::{Deserialize, Serialize};

/// One attached script key and its pause flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptSlot {
    /// Registry key of the script
    pub key: String,

    /// Disabled slots are skipped by every lifecycle stage
    pub enabled: bool,
}

impl ScriptSlot {
    fn new(key: String) -> Self {
        Self { key, enabled: true }
    }
}

/// Per-GameObject script lifecycle state
///
/// A key appears in at most one of `pending_init`/`active`, except right
/// after [`LogicComponent::add_script`], which seeds both so the next logic
/// pass runs init and the first update in the same frame. Removal moves a
/// key into `pending_end` exactly once; its end callback runs on the
/// following pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LogicComponent {
    pub(crate) pending_init: Vec<ScriptSlot>,
    pub(crate) active: Vec<ScriptSlot>,
    pub(crate) pending_end: Vec<ScriptSlot>,
}

impl LogicComponent {
    /// Create an empty component
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a component with the given scripts already attached
    pub fn with_scripts<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut component = Self::new();
        for key in keys {
            component.add_script(key);
        }
        component
    }

    /// Attach a script key
    ///
    /// The key is queued for init and becomes active immediately, so the
    /// next logic pass runs both callbacks in one frame. Attaching a key
    /// that is already attached is a no-op.
    pub fn add_script(&mut self, key: impl Into<String>) {
        let key = key.into();
        if self.has_script(&key) {
            return;
        }
        self.active.push(ScriptSlot::new(key.clone()));
        self.pending_init.push(ScriptSlot::new(key));
    }

    /// Detach a script key
    ///
    /// Erases the first match from `pending_init` and from `active`; if
    /// either erase succeeded, the key is queued for its end callback on
    /// the next logic pass. Returns whether anything was detached.
    pub fn remove_script(&mut self, key: &str) -> bool {
        let mut removed = false;
        if let Some(index) = self.pending_init.iter().position(|s| s.key == key) {
            self.pending_init.remove(index);
            removed = true;
        }
        if let Some(index) = self.active.iter().position(|s| s.key == key) {
            self.active.remove(index);
            removed = true;
        }
        if removed {
            self.pending_end.push(ScriptSlot::new(key.to_string()));
        }
        removed
    }

    /// Pause or resume a script without detaching it
    ///
    /// Toggles the flag on every match in all three stage lists. A key
    /// already queued for its end callback is affected too: disabling it
    /// suppresses the pending end call.
    pub fn set_enabled(&mut self, key: &str, enabled: bool) {
        let slots = self
            .pending_init
            .iter_mut()
            .chain(self.active.iter_mut())
            .chain(self.pending_end.iter_mut());
        for slot in slots {
            if slot.key == key {
                slot.enabled = enabled;
            }
        }
    }

    /// Whether `key` is currently attached (active or awaiting init)
    pub fn has_script(&self, key: &str) -> bool {
        self.active.iter().any(|s| s.key == key)
            || self.pending_init.iter().any(|s| s.key == key)
    }

    /// Keys currently in the active list, in attachment order
    pub fn active_scripts(&self) -> impl Iterator<Item = &str> {
        self.active.iter().map(|s| s.key.as_str())
    }

    /// Whether no script is attached or pending in any stage
    pub fn is_empty(&self) -> bool {
        self.pending_init.is_empty() && self.active.is_empty() && self.pending_end.is_empty()
    }
}
