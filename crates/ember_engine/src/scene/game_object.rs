//! GameObject: identity, hierarchy links, and owned components

use serde::{Deserialize, Serialize};

use super::{GameObjectKey, SceneError};
use crate::components::{
    Animator, Collider, Component, ComponentKind, ComponentMask, Controller, EnemyCombat, GameUi,
    Inventory, Light, LogicComponent, PlayerCombat, RigidBody, SpriteRenderer, Transform,
};

/// Draw/coordinate layer of a GameObject
///
/// Ui-layer objects keep their transforms in camera-relative screen
/// coordinates; every other layer is absolute world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Layer {
    /// Behind the world
    Background,
    /// The playfield
    #[default]
    World,
    /// In front of the world
    Foreground,
    /// Screen-space HUD
    Ui,
}

/// An entity in a scene: identity plus an ordered bag of components
///
/// GameObjects are created and owned by their [`super::Level`]; parent and
/// child links are non-owning keys into the same arena. At most one
/// component of each [`ComponentKind`] is owned at a time.
#[derive(Debug, Clone)]
pub struct GameObject {
    id: u32,

    /// Display name, also the subject of name/prefix/suffix queries
    pub name: String,

    /// Free-form grouping tag
    pub tag: String,

    /// Draw/coordinate layer
    pub layer: Layer,

    /// Inactive objects are invisible to every query
    pub active: bool,

    pub(crate) parent: Option<GameObjectKey>,
    pub(crate) children: Vec<GameObjectKey>,

    components: Vec<Component>,
    mask: ComponentMask,
}

macro_rules! typed_accessors {
    ($(($get:ident, $get_mut:ident, $kind:ident, $ty:ty)),* $(,)?) => {
        $(
            #[doc = concat!("Borrow the owned `", stringify!($kind), "` component, if present")]
            pub fn $get(&self) -> Option<&$ty> {
                match self.component(ComponentKind::$kind) {
                    Some(Component::$kind(inner)) => Some(inner),
                    _ => None,
                }
            }

            #[doc = concat!("Mutably borrow the owned `", stringify!($kind), "` component, if present")]
            pub fn $get_mut(&mut self) -> Option<&mut $ty> {
                match self.component_mut(ComponentKind::$kind) {
                    Some(Component::$kind(inner)) => Some(inner),
                    _ => None,
                }
            }
        )*
    };
}

impl GameObject {
    pub(crate) fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tag: String::new(),
            layer: Layer::default(),
            active: true,
            parent: None,
            children: Vec::new(),
            components: Vec::new(),
            mask: ComponentMask::empty(),
        }
    }

    /// Deep copy with a fresh id and no hierarchy links
    pub(crate) fn clone_with_id(&self, id: u32) -> Self {
        Self {
            id,
            name: self.name.clone(),
            tag: self.tag.clone(),
            layer: self.layer,
            active: self.active,
            parent: None,
            children: Vec::new(),
            components: self.components.clone(),
            mask: self.mask,
        }
    }

    /// Id assigned at creation, unique within the Level's lifetime
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Key of the parent object, if parented
    pub fn parent(&self) -> Option<GameObjectKey> {
        self.parent
    }

    /// Keys of the child objects
    pub fn children(&self) -> &[GameObjectKey] {
        &self.children
    }

    /// Take ownership of `component`
    ///
    /// Fails without modifying the object when a component of the same
    /// kind is already owned.
    pub fn add_component(&mut self, component: Component) -> Result<(), SceneError> {
        let kind = component.kind();
        if self.mask.contains(kind.mask()) {
            return Err(SceneError::DuplicateComponent { id: self.id, kind });
        }
        self.mask.insert(kind.mask());
        self.components.push(component);
        Ok(())
    }

    /// Remove and return the component of `kind`, if owned
    ///
    /// Dropping the returned value destroys the component.
    pub fn remove_component(&mut self, kind: ComponentKind) -> Option<Component> {
        let index = self.components.iter().position(|c| c.kind() == kind)?;
        self.mask.remove(kind.mask());
        Some(self.components.remove(index))
    }

    /// Borrow the component of `kind`, if owned
    pub fn component(&self, kind: ComponentKind) -> Option<&Component> {
        if !self.mask.contains(kind.mask()) {
            return None;
        }
        self.components.iter().find(|c| c.kind() == kind)
    }

    /// Mutably borrow the component of `kind`, if owned
    pub fn component_mut(&mut self, kind: ComponentKind) -> Option<&mut Component> {
        if !self.mask.contains(kind.mask()) {
            return None;
        }
        self.components.iter_mut().find(|c| c.kind() == kind)
    }

    /// Whether a component of `kind` is owned
    pub fn has_component(&self, kind: ComponentKind) -> bool {
        self.mask.contains(kind.mask())
    }

    /// Owned components in attachment order
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    typed_accessors! {
        (transform, transform_mut, Transform, Transform),
        (rigid_body, rigid_body_mut, RigidBody, RigidBody),
        (collider, collider_mut, Collision, Collider),
        (sprite, sprite_mut, Renderer, SpriteRenderer),
        (animator, animator_mut, Animate, Animator),
        (game_ui, game_ui_mut, GameUi, GameUi),
        (inventory, inventory_mut, Inventory, Inventory),
        (player_combat, player_combat_mut, PlayerCombat, PlayerCombat),
        (enemy_combat, enemy_combat_mut, EnemyCombat, EnemyCombat),
        (logic, logic_mut, Logic, LogicComponent),
        (controller, controller_mut, Controller, Controller),
        (light, light_mut, Lighting, Light),
    }
}
