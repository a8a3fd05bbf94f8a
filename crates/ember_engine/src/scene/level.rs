//! Level: the owning container of a scene's GameObjects
//!
//! Storage is a generational arena, so destroyed objects leave stale keys
//! behind that simply fail lookup. Destruction requested mid-frame is
//! queued and applied by the engine at the frame boundary, so no subsystem
//! ever observes the collection shrinking under its own iteration.

use slotmap::SlotMap;

use super::{GameObject, GameObjectKey};

/// The GameObject collection for one scene
pub struct Level {
    name: String,
    objects: SlotMap<GameObjectKey, GameObject>,
    next_id: u32,
    pending_destroy: Vec<GameObjectKey>,
}

impl Level {
    /// Create an empty level
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: SlotMap::with_key(),
            next_id: 1,
            pending_destroy: Vec::new(),
        }
    }

    /// Level name, used in logs and by the host
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a fresh GameObject and return its key
    pub fn spawn(&mut self, name: &str) -> GameObjectKey {
        let id = self.next_id;
        self.next_id += 1;
        let key = self.objects.insert(GameObject::new(id, name));
        log::trace!("spawned '{}' (id {}) in level '{}'", name, id, self.name);
        key
    }

    /// Deep-copy `source` into a new GameObject
    ///
    /// Every component is copied through its clone contract into freshly
    /// owned storage; the copy gets a fresh id and no hierarchy links.
    /// Returns `None` when `source` no longer exists.
    pub fn clone_object(&mut self, source: GameObjectKey) -> Option<GameObjectKey> {
        let id = self.next_id;
        let copy = self.objects.get(source)?.clone_with_id(id);
        self.next_id += 1;
        Some(self.objects.insert(copy))
    }

    /// Queue `key` for destruction at the end of the current frame
    ///
    /// Queuing a missing or already-queued key is a no-op.
    pub fn destroy(&mut self, key: GameObjectKey) {
        if self.objects.contains_key(key) && !self.pending_destroy.contains(&key) {
            self.pending_destroy.push(key);
        }
    }

    /// Apply queued destructions; returns how many objects were released
    ///
    /// Called by the engine at the frame boundary. Destroyed objects are
    /// detached from their parents and their children are orphaned; the
    /// objects and all owned components are dropped.
    pub fn flush_destroyed(&mut self) -> usize {
        let queued = std::mem::take(&mut self.pending_destroy);
        let mut released = 0;
        for key in queued {
            let Some(object) = self.objects.remove(key) else {
                continue;
            };
            released += 1;
            if let Some(parent) = object.parent {
                if let Some(parent) = self.objects.get_mut(parent) {
                    parent.children.retain(|c| *c != key);
                }
            }
            for child in &object.children {
                if let Some(child) = self.objects.get_mut(*child) {
                    child.parent = None;
                }
            }
            log::trace!(
                "destroyed '{}' (id {}) in level '{}'",
                object.name,
                object.id(),
                self.name
            );
        }
        released
    }

    /// Re-parent `child` under `parent`, or detach it with `None`
    ///
    /// Both sides of the link are kept consistent. Returns false when
    /// either key is stale or the child would become its own parent.
    pub fn set_parent(&mut self, child: GameObjectKey, parent: Option<GameObjectKey>) -> bool {
        if !self.objects.contains_key(child) || parent == Some(child) {
            return false;
        }
        if let Some(parent) = parent {
            if !self.objects.contains_key(parent) {
                return false;
            }
        }

        let old_parent = self.objects[child].parent;
        if let Some(old) = old_parent {
            if let Some(old) = self.objects.get_mut(old) {
                old.children.retain(|c| *c != child);
            }
        }

        self.objects[child].parent = parent;
        if let Some(parent) = parent {
            self.objects[parent].children.push(child);
        }
        true
    }

    /// Borrow the object behind `key`, if it still exists
    pub fn get(&self, key: GameObjectKey) -> Option<&GameObject> {
        self.objects.get(key)
    }

    /// Mutably borrow the object behind `key`, if it still exists
    pub fn get_mut(&mut self, key: GameObjectKey) -> Option<&mut GameObject> {
        self.objects.get_mut(key)
    }

    /// Whether `key` still refers to a live object
    pub fn contains(&self, key: GameObjectKey) -> bool {
        self.objects.contains_key(key)
    }

    /// Keys of every live object, in collection order
    pub fn keys(&self) -> impl Iterator<Item = GameObjectKey> + '_ {
        self.objects.keys()
    }

    /// Every live object with its key, in collection order
    pub fn iter(&self) -> impl Iterator<Item = (GameObjectKey, &GameObject)> {
        self.objects.iter()
    }

    /// Every live object with its key, mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (GameObjectKey, &mut GameObject)> {
        self.objects.iter_mut()
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the level holds no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Drop every object and queued destruction
    pub fn clear(&mut self) {
        self.pending_destroy.clear();
        self.objects.clear();
    }
}
